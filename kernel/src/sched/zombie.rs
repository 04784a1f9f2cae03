//! Слот ожидающего уничтожения потока / Pending-destruction slot
//!
//! Завершающийся поток нельзя уничтожить, пока мы на его стеке. Он паркуется
//! здесь и освобождается только после возобновления на другом стеке.
//! A finishing thread cannot be destroyed while we run on its stack. It is
//! parked here and freed only after resuming on another stack.

use crate::thread::ThreadId;

#[derive(Debug, Default)]
pub struct ZombieSlot(Option<ThreadId>);

impl ZombieSlot {
    pub const fn new() -> Self {
        Self(None)
    }

    /// Второй зомби до освобождения первого — повреждённое состояние.
    /// A second zombie before the first is freed means corrupted state.
    pub fn park(&mut self, tid: ThreadId) {
        if let Some(parked) = self.0 {
            panic!(
                "pending-destruction slot already holds thread {} (parking {})",
                parked, tid
            );
        }
        self.0 = Some(tid);
    }

    pub fn take(&mut self) -> Option<ThreadId> {
        self.0.take()
    }

    pub fn peek(&self) -> Option<ThreadId> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_empties_the_slot() {
        let mut slot = ZombieSlot::new();
        slot.park(ThreadId(4));
        assert_eq!(slot.take(), Some(ThreadId(4)));
        assert_eq!(slot.take(), None);
        slot.park(ThreadId(5));
        assert_eq!(slot.peek(), Some(ThreadId(5)));
    }

    #[test]
    #[should_panic(expected = "pending-destruction slot already holds thread 4")]
    fn double_park_is_fatal() {
        let mut slot = ZombieSlot::new();
        slot.park(ThreadId(4));
        slot.park(ThreadId(5));
    }
}
