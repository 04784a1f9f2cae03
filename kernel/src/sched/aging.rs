//! Старение приоритетов / Priority aging
//!
//! Раз в `aging_interval` тиков таймер прибавляет интервал к `waiting_time`
//! каждого готового потока. За каждые `aging_threshold` тиков ожидания
//! приоритет растёт на `aging_step`, остаток переносится дальше.
//! Once every `aging_interval` ticks the timer adds the interval to the
//! `waiting_time` of every ready thread. Every `aging_threshold` waited ticks
//! raise the priority by `aging_step`; the remainder carries over.
//!
//! Повышение, пересекающее границу уровня, переносит поток в очередь выше
//! (L3 45 → L2 55). Потолок только один — 149.
//! A raise that crosses a tier boundary moves the thread up a queue
//! (L3 45 → L2 55). The only ceiling is 149.

use alloc::vec::Vec;

use super::{QueueOrder, SchedCtx, Scheduler};
use crate::config::SchedConfig;
use crate::thread::{ThreadStatus, Tier};

impl Scheduler {
    /// Периодический проход старения (UpdatePriorities).
    /// Periodic aging pass (UpdatePriorities).
    pub fn tick(&mut self, cx: &mut SchedCtx<'_>) {
        cx.assert_interrupts_off("tick");
        let SchedConfig { aging_threshold, aging_step, aging_interval, .. } = self.config;

        // Сверху вниз: поднятый поток уже не попадёт под повторный проход.
        // Top down: a promoted thread is not aged twice in one pass.
        for tier in Tier::ALL {
            let queued: Vec<_> = self.queue(tier).iter().collect();
            for tid in queued {
                let thread = &mut cx.threads[tid];
                assert_eq!(
                    thread.status,
                    ThreadStatus::Ready,
                    "thread {} queued in {} is not ready",
                    tid,
                    tier
                );

                thread.waiting_time += aging_interval;
                if thread.waiting_time < aging_threshold || !thread.ages() {
                    continue;
                }
                thread.waiting_time -= aging_threshold;

                let old = thread.priority;
                let new = old.raised(aging_step);
                if new == old {
                    continue;
                }
                thread.priority = new;
                log::debug!(target: "sched",
                    "[C] Tick [{}]: Thread [{}] changes its priority from [{}] to [{}]",
                    cx.now, tid, old, new);

                // Внутри уровня место меняется, только если очередь упорядочена
                // по приоритету. FIFO и очередь по всплеску не трогаем.
                // Within a tier the entry moves only when the queue is ordered
                // by priority. FIFO and burst-ordered entries stay put.
                let dest = new.tier();
                let keyed = self.queue(tier).order() == QueueOrder::HighestPriority;
                if dest == tier && !keyed {
                    continue;
                }
                self.queue_mut(tier).remove(tid);
                self.queue_mut(dest).insert(tid, cx.threads);
                if dest != tier {
                    log::debug!(target: "sched",
                        "[B] Tick [{}]: Thread [{}] is removed from queue {}", cx.now, tid, tier);
                    log::debug!(target: "sched",
                        "[A] Tick [{}]: Thread [{}] is inserted into queue {}", cx.now, tid, dest);
                }
            }
        }
    }
}
