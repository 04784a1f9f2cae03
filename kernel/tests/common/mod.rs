//! Общий стенд для тестов планировщика / Shared scheduler test bench

#![allow(dead_code)]

use kernel::{
    Priority, SchedConfig, SchedCtx, Scheduler, SimMachine, ThreadFlags, ThreadId, ThreadStatus,
    ThreadTable, Tick,
};

/// Ядро без связки: планировщик и явный контекст.
/// Kernel without the glue: the scheduler and an explicit context.
pub struct Bench {
    pub machine: SimMachine,
    pub threads: ThreadTable,
    pub current: ThreadId,
    pub sched:   Scheduler,
    pub now:     Tick,
}

impl Bench {
    pub fn new() -> Self {
        Self::with_machine(SimMachine::new())
    }

    /// Поток 0 ("main") выполняется; прерывания выключены.
    /// Thread 0 ("main") is running; interrupts are off.
    pub fn with_machine(machine: SimMachine) -> Self {
        let mut threads = ThreadTable::new();
        let main = threads.spawn("main", Priority::MIN, ThreadFlags::empty());
        threads[main].status = ThreadStatus::Running;
        Self {
            machine,
            threads,
            current: main,
            sched: Scheduler::new(SchedConfig::DEFAULT),
            now: 0,
        }
    }

    pub fn spawn(&mut self, priority: u8) -> ThreadId {
        self.spawn_with(priority, ThreadFlags::empty())
    }

    pub fn spawn_with(&mut self, priority: u8, flags: ThreadFlags) -> ThreadId {
        self.threads.spawn("t", Priority::new(priority).unwrap(), flags)
    }

    pub fn with<R>(&mut self, f: impl FnOnce(&mut Scheduler, &mut SchedCtx<'_>) -> R) -> R {
        let mut cx = SchedCtx {
            machine: &mut self.machine,
            threads: &mut self.threads,
            current: &mut self.current,
            now:     self.now,
        };
        f(&mut self.sched, &mut cx)
    }

    pub fn ready(&mut self, tid: ThreadId) {
        self.with(|s, cx| s.ready_to_run(cx, tid));
    }

    pub fn next(&mut self) -> Option<ThreadId> {
        self.with(|s, cx| s.find_next_to_run(cx))
    }

    pub fn run(&mut self, next: ThreadId, finishing: bool) {
        self.with(|s, cx| s.run(cx, next, finishing));
    }

    pub fn tick(&mut self) {
        self.now += self.sched.config().aging_interval;
        self.with(|s, cx| s.tick(cx));
    }

    pub fn priority(&self, tid: ThreadId) -> u8 {
        self.threads[tid].priority.get()
    }
}
