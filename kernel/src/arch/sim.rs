//! Симулированная машина / Simulated machine
//!
//! Переключение контекста моделируется как мгновенный шаг: после `switch`
//! вызывающий код продолжает выполнение уже от имени нового потока.
//! A context switch is modelled as an instant step: after `switch` the
//! caller carries on as the incoming thread.

use alloc::vec::Vec;

use super::{IntLevel, Machine, Resumption};
use crate::thread::ThreadId;

#[derive(Debug)]
pub struct SimMachine {
    level:      IntLevel,
    resumption: Resumption,
    /// Все переключения (from, to) / Every switch (from, to)
    pub switches: Vec<(ThreadId, ThreadId)>,
    pub saved:    Vec<ThreadId>,
    pub restored: Vec<ThreadId>,
}

impl SimMachine {
    /// Машина загружается с выключенными прерываниями, как после `cli`.
    /// The machine boots with interrupts disabled, as after `cli`.
    pub fn new() -> Self {
        Self {
            level:      IntLevel::Off,
            resumption: Resumption::Resumed,
            switches:   Vec::new(),
            saved:      Vec::new(),
            restored:   Vec::new(),
        }
    }

    /// Машина, у которой уходящий контекст не возобновляется сам.
    /// A machine whose outgoing context does not resume by itself.
    pub fn suspending() -> Self {
        Self { resumption: Resumption::Suspended, ..Self::new() }
    }

    pub fn last_switch(&self) -> Option<(ThreadId, ThreadId)> {
        self.switches.last().copied()
    }
}

impl Default for SimMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine for SimMachine {
    fn interrupt_level(&self) -> IntLevel {
        self.level
    }

    fn set_interrupt_level(&mut self, level: IntLevel) -> IntLevel {
        core::mem::replace(&mut self.level, level)
    }

    fn save_user_state(&mut self, tid: ThreadId) {
        self.saved.push(tid);
    }

    fn restore_user_state(&mut self, tid: ThreadId) {
        self.restored.push(tid);
    }

    fn switch(&mut self, from: ThreadId, to: ThreadId) -> Resumption {
        log::trace!(target: "sched", "switching from {} to {}", from, to);
        self.switches.push((from, to));
        self.resumption
    }
}
