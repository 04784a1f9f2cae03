//! schedsim — прогон нагрузки через планировщик на симулированной машине
//!
//! Runs a workload through the scheduler on the simulated machine and prints
//! the scheduling trace.
//!
//! Запуск / Run:
//!   schedsim [-v] NAME:PRIORITY:CPU[:IO_EVERY] ...
//!
//!   PRIORITY — 0–149
//!   CPU      — сколько тиков процессора нужно потоку / CPU ticks the thread needs
//!   IO_EVERY — блокироваться на I/O каждые столько тиков (0 — никогда)
//!              block on I/O every this many ticks (0 means never)
//!
//! Без аргументов запускается встроенная нагрузка.
//! Without arguments a built-in workload runs.

use std::collections::BTreeMap;
use std::fmt;
use std::process::ExitCode;

use kernel::{Kernel, SchedConfig, SimMachine, ThreadFlags, ThreadId, Tick};
use log::LevelFilter;

/// Сколько тиков длится одна операция I/O / Ticks one I/O operation takes
const IO_LATENCY: Tick = 50;

const DEFAULT_WORKLOAD: &[&str] = &["A:120:400:150", "B:60:900", "C:10:600", "D:95:300:100"];

struct Job {
    name:     String,
    priority: u8,
    cpu:      Tick,
    io_every: Tick,
}

#[derive(Debug)]
enum ArgError {
    Shape(String),
    Number(String),
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::Shape(arg)  => write!(f, "expected NAME:PRIORITY:CPU[:IO_EVERY], got `{}`", arg),
            ArgError::Number(arg) => write!(f, "bad number in `{}`", arg),
        }
    }
}

fn parse_job(arg: &str) -> Result<Job, ArgError> {
    let parts: Vec<&str> = arg.split(':').collect();
    if !(3..=4).contains(&parts.len()) || parts[0].is_empty() {
        return Err(ArgError::Shape(arg.to_string()));
    }
    let number = |s: &str| s.parse::<u64>().map_err(|_| ArgError::Number(arg.to_string()));
    let priority = parts[1].parse::<u8>().map_err(|_| ArgError::Number(arg.to_string()))?;
    Ok(Job {
        name: parts[0].to_string(),
        priority,
        cpu: number(parts[2])?,
        io_every: parts.get(3).map(|s| number(s)).transpose()?.unwrap_or(0),
    })
}

/// Состояние задачи в симуляции / Per-job simulation state
struct Progress {
    left:     Tick,
    io_every: Tick,
    since_io: Tick,
}

fn simulate(jobs: Vec<Job>) -> Result<(), kernel::Error> {
    let mut k = Kernel::new(SimMachine::new(), SchedConfig::DEFAULT);
    let mut progress = BTreeMap::new();
    for job in jobs {
        let tid = k.fork(job.name, job.priority, ThreadFlags::empty())?;
        progress.insert(tid, Progress { left: job.cpu, io_every: job.io_every, since_io: 0 });
    }

    // Ожидающие I/O: поток → тик пробуждения / Waiting on I/O: thread → wake tick
    let mut io_wait: BTreeMap<ThreadId, Tick> = BTreeMap::new();

    // main уступает процессор и завершается / main hands over and finishes
    let mut running = k.finish();
    loop {
        if running {
            let tid = k.current();
            // main уже уничтожен, выполняются только задачи / main is gone, only jobs run
            let Some(job) = progress.get_mut(&tid) else {
                unreachable!("thread {} runs without a job", tid);
            };
            if job.left == 0 {
                println!("[{:>6}] {} done", k.now(), k.current_thread().name);
                progress.remove(&tid);
                running = k.finish();
                continue;
            }
            if job.io_every > 0 && job.since_io == job.io_every {
                job.since_io = 0;
                io_wait.insert(tid, k.now() + IO_LATENCY);
                running = k.sleep(false);
                continue;
            }
            job.left -= 1;
            job.since_io += 1;
        } else if io_wait.is_empty() {
            break;
        }

        k.advance(1);

        let now = k.now();
        let due: Vec<ThreadId> = io_wait.iter().filter(|&(_, &at)| at <= now).map(|(&t, _)| t).collect();
        for tid in due {
            io_wait.remove(&tid);
            k.wake(tid)?;
        }
        if !running {
            running = k.idle();
        }
    }

    println!("[{:>6}] all jobs finished, {} context switches", k.now(), k.machine.switches.len());
    Ok(())
}

struct Stdout;

impl fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        print!("{}", s);
        Ok(())
    }
}

fn main() -> ExitCode {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let level = match args.first().map(String::as_str) {
        Some("-v") => {
            args.remove(0);
            LevelFilter::Trace
        }
        _ => LevelFilter::Debug,
    };

    kernel::console::set_sink(Box::new(Stdout));
    if let Err(e) = kernel::klog::init(level) {
        eprintln!("schedsim: {}", e);
        return ExitCode::FAILURE;
    }

    let specs: Vec<&str> = if args.is_empty() {
        DEFAULT_WORKLOAD.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };
    let jobs = match specs.into_iter().map(parse_job).collect::<Result<Vec<_>, _>>() {
        Ok(jobs) => jobs,
        Err(e) => {
            eprintln!("schedsim: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match simulate(jobs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("schedsim: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_job_specs() {
        let job = parse_job("A:120:400:150").unwrap();
        assert_eq!((job.name.as_str(), job.priority, job.cpu, job.io_every), ("A", 120, 400, 150));
        assert_eq!(parse_job("B:60:900").unwrap().io_every, 0);
        assert!(matches!(parse_job("B:60"), Err(ArgError::Shape(_))));
        assert!(matches!(parse_job("B:x:9"), Err(ArgError::Number(_))));
    }

    #[test]
    fn default_workload_runs_to_completion() {
        let jobs = DEFAULT_WORKLOAD.iter().map(|s| parse_job(s).unwrap()).collect();
        simulate(jobs).unwrap();
    }

    #[test]
    fn lone_io_bound_job_resumes_after_idling() {
        let jobs = vec![parse_job("A:60:300:100").unwrap()];
        simulate(jobs).unwrap();
    }

    #[test]
    fn out_of_range_priority_is_rejected() {
        let jobs = vec![parse_job("Z:200:10").unwrap()];
        assert_eq!(simulate(jobs).unwrap_err(), kernel::Error::InvalidPriority(200));
    }
}
