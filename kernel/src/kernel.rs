//! Связка жизненного цикла потоков / Thread lifecycle glue
//!
//! Минимальные примитивы ядра, которые вызывают планировщик в нужных точках:
//! fork, yield, sleep, finish, wake и прерывание таймера.
//! Minimal kernel primitives that call into the scheduler at the defined
//! points: fork, yield, sleep, finish, wake and the timer interrupt.
//!
//! Каждый путь выключает прерывания на время вызова планировщика и
//! восстанавливает прежний уровень после.
//! Every path disables interrupts around the scheduler call and restores the
//! previous level afterwards.

use alloc::string::String;

use crate::arch::{IntLevel, Machine};
use crate::config::SchedConfig;
use crate::error::{Error, Result};
use crate::sched::{SchedCtx, Scheduler};
use crate::thread::{Priority, Thread, ThreadFlags, ThreadId, ThreadStatus, ThreadTable};
use crate::time::{Clock, Tick};

pub struct Kernel<M: Machine> {
    pub machine:   M,
    pub clock:     Clock,
    pub threads:   ThreadTable,
    pub scheduler: Scheduler,
    /// Единственная ссылка на RUNNING поток / The only reference to the RUNNING thread
    current:       ThreadId,
    /// Процессор простаивает в контексте `current` / The processor idles in `current`'s context
    idling:        bool,
}

impl<M: Machine> Kernel<M> {
    /// Загрузка: поток 0 ("main") уже выполняется, затем включаются прерывания.
    /// Boot: thread 0 ("main") is already running, then interrupts go on.
    pub fn new(mut machine: M, config: SchedConfig) -> Self {
        let mut threads = ThreadTable::new();
        let main = threads.spawn("main", Priority::MIN, ThreadFlags::empty());
        threads[main].status = ThreadStatus::Running;

        machine.set_interrupt_level(IntLevel::On);
        log::info!(target: "kernel", "booted; aging every {} ticks", config.aging_interval);

        Self {
            machine,
            clock: Clock::new(),
            threads,
            scheduler: Scheduler::new(config),
            current: main,
            idling: false,
        }
    }

    pub fn current(&self) -> ThreadId {
        self.current
    }

    pub fn current_thread(&self) -> &Thread {
        &self.threads[self.current]
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Нет готовых потоков после `sleep`; ждём `idle`.
    /// Nothing was ready after `sleep`; waiting for `idle`.
    pub fn is_idling(&self) -> bool {
        self.idling
    }

    /// Выполнить `f` над планировщиком с выключенными прерываниями.
    /// Run `f` against the scheduler with interrupts disabled.
    fn with_scheduler<R>(&mut self, f: impl FnOnce(&mut Scheduler, &mut SchedCtx<'_>) -> R) -> R {
        let previous = self.machine.set_interrupt_level(IntLevel::Off);
        let mut cx = SchedCtx {
            machine: &mut self.machine,
            threads: &mut self.threads,
            current: &mut self.current,
            now:     self.clock.now(),
        };
        let result = f(&mut self.scheduler, &mut cx);
        self.machine.set_interrupt_level(previous);
        result
    }

    // ── Жизненный цикл / Lifecycle ────────────────────────────────────────────

    /// Создать поток и допустить его к выполнению.
    /// Create a thread and admit it.
    pub fn fork(&mut self, name: impl Into<String>, priority: u8, flags: ThreadFlags) -> Result<ThreadId> {
        let priority = Priority::new(priority)?;
        let tid = self.threads.spawn(name, priority, flags);
        log::info!(target: "kernel", "forked thread {} ({}) at priority {}",
            tid, self.threads[tid].name, priority);
        self.with_scheduler(|sched, cx| sched.ready_to_run(cx, tid));
        Ok(tid)
    }

    /// Уступить процессор. Если готовых нет, текущий поток продолжает.
    /// Give up the processor. With nothing ready the current thread carries on.
    pub fn yield_now(&mut self) {
        assert!(!self.idling, "yield called while thread {} idles", self.current);
        self.with_scheduler(|sched, cx| {
            if let Some(next) = sched.find_next_to_run(cx) {
                let current = *cx.current;
                sched.ready_to_run(cx, current);
                sched.run(cx, next, false);
            }
        });
    }

    /// Заблокировать текущий поток (`finishing` — навсегда).
    /// Возвращает `false`, если готовых нет: процессор простаивает в контексте
    /// уснувшего потока, пока `idle` не найдёт работу.
    /// Block the current thread, for good with `finishing`.
    /// Returns `false` when nothing is ready: the processor idles in the
    /// sleeping thread's context until `idle` finds work.
    pub fn sleep(&mut self, finishing: bool) -> bool {
        assert!(!self.idling, "sleep called while thread {} idles", self.current);
        let now = self.clock.now();
        let tid = self.current;
        let thread = &mut self.threads[tid];
        if finishing {
            thread.status = ThreadStatus::Finished;
        } else {
            // Конец CPU-всплеска / End of a CPU burst
            thread.status = ThreadStatus::Blocked;
            let ran = now.saturating_sub(thread.start_time);
            let previous = thread.record_burst(ran);
            log::debug!(target: "sched",
                "[D] Tick [{}]: Thread [{}] update approximate burst time, from: [{}], add [{}], to [{}]",
                now, tid, previous, ran, thread.burst_estimate);
        }
        self.dispatch_next(finishing)
    }

    pub fn finish(&mut self) -> bool {
        self.sleep(true)
    }

    /// Разбудить заблокированный поток / Wake a blocked thread
    pub fn wake(&mut self, tid: ThreadId) -> Result<()> {
        let thread = self.threads.get(tid).ok_or(Error::UnknownThread(tid))?;
        if thread.status != ThreadStatus::Blocked {
            return Err(Error::NotBlocked(tid));
        }
        self.with_scheduler(|sched, cx| sched.ready_to_run(cx, tid));
        Ok(())
    }

    /// Повторить диспетчеризацию из цикла простоя.
    /// Поток, уснувший здесь, мог быть разбужен и стоит в очереди сам:
    /// тогда он просто выбирается снова.
    /// Retry dispatch from the idle loop.
    /// The thread that slept here may have been woken and queued itself;
    /// it is then simply selected again.
    pub fn idle(&mut self) -> bool {
        assert!(self.idling, "idle entered while thread {} is not idling", self.current);
        let finishing = self.threads[self.current].status == ThreadStatus::Finished;
        self.dispatch_next(finishing)
    }

    fn dispatch_next(&mut self, finishing: bool) -> bool {
        let dispatched = self.with_scheduler(|sched, cx| match sched.find_next_to_run(cx) {
            Some(next) => {
                sched.run(cx, next, finishing);
                true
            }
            None => false,
        });
        self.idling = !dispatched;
        dispatched
    }

    // ── Время / Time ──────────────────────────────────────────────────────────

    /// Продвинуть часы; каждые `aging_interval` тиков срабатывает таймер.
    /// Advance the clock; the timer fires every `aging_interval` ticks.
    pub fn advance(&mut self, ticks: Tick) {
        let interval = self.scheduler.config().aging_interval;
        for _ in 0..ticks {
            if self.clock.advance(1) % interval == 0 {
                self.timer_interrupt();
            }
        }
    }

    /// Обработчик таймера: старение, затем yield при возврате, если нужно.
    /// Timer handler: aging, then yield on return when due.
    fn timer_interrupt(&mut self) {
        let preempt = self.with_scheduler(|sched, cx| {
            sched.tick(cx);
            sched.preemption_due(cx)
        });
        if preempt {
            log::trace!(target: "kernel", "timer preempts thread {}", self.current);
            self.yield_now();
        }
    }
}
