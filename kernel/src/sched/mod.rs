//! Scheduler — MLFQ со старением приоритетов
//!
//! Multilevel Feedback Queue with priority aging.
//! Многоуровневая очередь с обратной связью и старением приоритетов.
//!
//! Очереди / Queues:
//!   L1 — 100–149 — кратчайший оценённый всплеск / shortest estimated burst
//!   L2 —  50–99  — наибольший приоритет / highest priority
//!   L3 —   0–49  — FIFO, round-robin по таймеру / FIFO, timer round-robin
//!
//! Выбор всегда строго сверху вниз: L3 выполняется, только когда L1 и L2 пусты.
//! Selection is strictly top down: L3 runs only when L1 and L2 are empty.
//!
//! Все операции требуют выключенных прерываний. Блокировки здесь запрещены:
//! ожидание занятой блокировки снова вошло бы в планировщик.
//! Every operation requires interrupts disabled. No locks may be taken here:
//! waiting on a busy lock would re-enter the scheduler.
//!
//! Трасса (target "sched") / Trace (target "sched"):
//!   [A] вставлен в очередь / inserted into a queue
//!   [B] удалён из очереди / removed from a queue
//!   [C] приоритет изменён / priority changed
//!   [D] оценка всплеска обновлена / burst estimate updated
//!   [E] диспетчеризация / dispatch

mod aging;
mod queue;
mod zombie;

pub use queue::{QueueOrder, TierQueue};
pub use zombie::ZombieSlot;

use crate::arch::{IntLevel, Machine, Resumption};
use crate::config::SchedConfig;
use crate::thread::{ThreadFlags, ThreadId, ThreadStatus, ThreadTable, Tier};
use crate::time::Tick;

/// Состояние ядра, передаваемое в каждую операцию вместо глобалов.
/// Kernel state handed to every operation instead of globals.
pub struct SchedCtx<'a> {
    pub machine: &'a mut dyn Machine,
    pub threads: &'a mut ThreadTable,
    /// Слот текущего потока (владеет ядро) / Current-thread slot (kernel-owned)
    pub current: &'a mut ThreadId,
    pub now:     Tick,
}

impl SchedCtx<'_> {
    fn assert_interrupts_off(&self, op: &str) {
        assert_eq!(
            self.machine.interrupt_level(),
            IntLevel::Off,
            "{} called with interrupts enabled",
            op
        );
    }
}

#[derive(Debug)]
pub struct Scheduler {
    config:          SchedConfig,
    queues:          [TierQueue; 3],
    to_be_destroyed: ZombieSlot,
}

impl Scheduler {
    pub const fn new(config: SchedConfig) -> Self {
        Self {
            config,
            queues: [
                TierQueue::new(QueueOrder::ShortestBurst),
                TierQueue::new(QueueOrder::HighestPriority),
                TierQueue::new(QueueOrder::Fifo),
            ],
            to_be_destroyed: ZombieSlot::new(),
        }
    }

    pub fn config(&self) -> &SchedConfig {
        &self.config
    }

    pub fn queue(&self, tier: Tier) -> &TierQueue {
        &self.queues[tier.index()]
    }

    fn queue_mut(&mut self, tier: Tier) -> &mut TierQueue {
        &mut self.queues[tier.index()]
    }

    /// В какой очереди сейчас поток / Which queue holds the thread now
    pub fn queued_tier(&self, tid: ThreadId) -> Option<Tier> {
        Tier::ALL.into_iter().find(|&tier| self.queue(tier).contains(tid))
    }

    /// Всего готовых потоков / Total ready threads
    pub fn len(&self) -> usize {
        self.queues.iter().map(TierQueue::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(TierQueue::is_empty)
    }

    /// Поток, ожидающий уничтожения / Thread awaiting destruction
    pub fn pending_destruction(&self) -> Option<ThreadId> {
        self.to_be_destroyed.peek()
    }

    // ── Допуск / Admission ────────────────────────────────────────────────────

    /// Пометить поток готовым и поставить в очередь его уровня (ReadyToRun).
    /// Mark a thread ready and queue it in its tier (ReadyToRun).
    pub fn ready_to_run(&mut self, cx: &mut SchedCtx<'_>, tid: ThreadId) {
        cx.assert_interrupts_off("ready_to_run");
        if let Some(tier) = self.queued_tier(tid) {
            panic!("thread {} is already queued in {}", tid, tier);
        }

        let thread = &mut cx.threads[tid];
        thread.status = ThreadStatus::Ready;
        let tier = thread.tier();
        self.queue_mut(tier).insert(tid, cx.threads);

        log::debug!(target: "sched",
            "[A] Tick [{}]: Thread [{}] is inserted into queue {}", cx.now, tid, tier);
    }

    // ── Выбор / Selection ─────────────────────────────────────────────────────

    /// Снять голову первой непустой очереди (FindNextToRun).
    /// `None` — процессору нечего делать, вызывающий уходит в idle.
    /// Pop the front of the first non-empty queue (FindNextToRun).
    /// `None` means nothing to run; the caller idles.
    pub fn find_next_to_run(&mut self, cx: &mut SchedCtx<'_>) -> Option<ThreadId> {
        cx.assert_interrupts_off("find_next_to_run");

        let tier = Tier::ALL.into_iter().find(|&tier| !self.queue(tier).is_empty())?;
        let tid = self.queue_mut(tier).pop_front()?;

        log::debug!(target: "sched",
            "[B] Tick [{}]: Thread [{}] is removed from queue {}", cx.now, tid, tier);
        Some(tid)
    }

    // ── Диспетчеризация / Dispatch ────────────────────────────────────────────

    /// Отдать процессор потоку `next` (Run).
    /// Dispatch the processor to `next` (Run).
    ///
    /// Уходящий поток уже переведён вызывающим в Ready/Blocked/Finished.
    /// С `finishing` он паркуется для уничтожения после переключения.
    /// The caller has already moved the outgoing thread to
    /// Ready/Blocked/Finished. With `finishing` it is parked for destruction
    /// after the switch.
    pub fn run(&mut self, cx: &mut SchedCtx<'_>, next: ThreadId, finishing: bool) {
        cx.assert_interrupts_off("run");
        let old = *cx.current;

        if finishing {
            assert_ne!(next, old, "finishing thread {} dispatched to itself", old);
            self.to_be_destroyed.park(old);
        }

        let outgoing = &cx.threads[old];
        if outgoing.flags.contains(ThreadFlags::USER_SPACE) {
            cx.machine.save_user_state(old);
        }

        let ran = cx.now.saturating_sub(outgoing.start_time);
        let incoming = &mut cx.threads[next];
        incoming.start_time = cx.now;
        incoming.waiting_time = 0;
        incoming.status = ThreadStatus::Running;
        *cx.current = next;

        log::debug!(target: "sched",
            "[E] Tick [{}]: Thread [{}] is now selected for execution, thread [{}] is replaced, and it has executed [{}] ticks",
            cx.now, next, old, ran);

        match cx.machine.switch(old, next) {
            Resumption::Resumed   => self.resume(cx),
            Resumption::Suspended => {}
        }
    }

    /// Путь возобновления: освободить зомби и восстановить пользовательское
    /// состояние текущего потока. Также вызывается новым потоком при первом входе.
    /// Resume path: free the zombie and restore the current thread's user
    /// state. Also called by a fresh thread on first entry.
    pub fn resume(&mut self, cx: &mut SchedCtx<'_>) {
        cx.assert_interrupts_off("resume");

        if let Some(dead) = self.to_be_destroyed.take() {
            cx.threads.remove(dead);
            log::trace!(target: "sched", "destroyed thread {}", dead);
        }

        let current = *cx.current;
        if cx.threads[current].flags.contains(ThreadFlags::USER_SPACE) {
            cx.machine.restore_user_state(current);
        }
    }

    // ── Вытеснение / Preemption ───────────────────────────────────────────────

    /// Нужно ли вытеснить текущий поток. Решает таймер, а не планировщик.
    /// Whether the current thread should be preempted. The timer acts on it.
    pub fn preemption_due(&self, cx: &SchedCtx<'_>) -> bool {
        let running = &cx.threads[*cx.current];
        if running.status != ThreadStatus::Running {
            return false;
        }

        let high = self.queue(Tier::High);
        match running.tier() {
            Tier::High => high
                .front()
                .is_some_and(|front| cx.threads[front].burst_estimate < running.burst_estimate),
            Tier::Medium => !high.is_empty(),
            Tier::Low => {
                let quantum_used = cx.now.saturating_sub(running.start_time) >= self.config.low_quantum;
                !high.is_empty()
                    || !self.queue(Tier::Medium).is_empty()
                    || (quantum_used && !self.queue(Tier::Low).is_empty())
            }
        }
    }

    /// Снимок очередей для отладки / Queue snapshot for debugging
    pub fn dump(&self) {
        for tier in Tier::ALL {
            crate::kprint!("{}:", tier);
            for tid in self.queue(tier).iter() {
                crate::kprint!(" {}", tid);
            }
            crate::kprintln!();
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedConfig::DEFAULT)
    }
}
