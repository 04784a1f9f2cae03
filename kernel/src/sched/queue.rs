//! Очередь одного уровня / Single-tier ready queue
//!
//! Порядок задаётся тегом `QueueOrder`, а не колбэком-компаратором.
//! Ordering is selected by a `QueueOrder` tag, not a comparator callback.

use alloc::collections::VecDeque;
use core::cmp::Ordering;

use crate::thread::{Thread, ThreadId, ThreadTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOrder {
    /// Меньшая оценка всплеска раньше, при равенстве — больший id.
    /// Smaller burst estimate first, ties to the larger id.
    ShortestBurst,
    /// Больший приоритет раньше, при равенстве — больший id.
    /// Higher priority first, ties to the larger id.
    HighestPriority,
    /// Порядок прибытия / Arrival order
    Fifo,
}

impl QueueOrder {
    /// `Less` — `a` выбирается раньше `b`. Для FIFO все равны.
    /// `Less` means `a` is selected before `b`. FIFO treats all as equal.
    fn compare(self, a: &Thread, b: &Thread) -> Ordering {
        match self {
            QueueOrder::ShortestBurst => a.burst_estimate
                .cmp(&b.burst_estimate)
                .then_with(|| b.id().cmp(&a.id())),
            QueueOrder::HighestPriority => b.priority
                .cmp(&a.priority)
                .then_with(|| b.id().cmp(&a.id())),
            QueueOrder::Fifo => Ordering::Equal,
        }
    }
}

#[derive(Debug)]
pub struct TierQueue {
    order:   QueueOrder,
    threads: VecDeque<ThreadId>,
}

impl TierQueue {
    pub const fn new(order: QueueOrder) -> Self {
        Self { order, threads: VecDeque::new() }
    }

    pub fn order(&self) -> QueueOrder {
        self.order
    }

    /// Вставить за последним элементом, который выбирается не позже нового.
    /// Insert after the last entry that is selected no later than the new one.
    pub fn insert(&mut self, tid: ThreadId, threads: &ThreadTable) {
        let new = &threads[tid];
        let at = self
            .threads
            .iter()
            .position(|&queued| self.order.compare(new, &threads[queued]) == Ordering::Less)
            .unwrap_or(self.threads.len());
        self.threads.insert(at, tid);
    }

    pub fn front(&self) -> Option<ThreadId> {
        self.threads.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<ThreadId> {
        self.threads.pop_front()
    }

    pub fn remove(&mut self, tid: ThreadId) -> bool {
        match self.threads.iter().position(|&queued| queued == tid) {
            Some(at) => {
                self.threads.remove(at);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, tid: ThreadId) -> bool {
        self.threads.contains(&tid)
    }

    pub fn iter(&self) -> impl Iterator<Item = ThreadId> + '_ {
        self.threads.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}
