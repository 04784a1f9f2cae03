//! Граница машины / Machine boundary
//!
//! Планировщик не знает, как сохраняются регистры и стек. Он вызывает
//! примитивы машины через трейт `Machine`.
//! The scheduler does not know how registers and stacks are saved. It calls
//! machine primitives through the `Machine` trait.
//!
//! Реализации / Implementations:
//!   sim — симулированная машина на чистом Rust (хост, тесты, schedsim)
//!         pure-Rust simulated machine (host, tests, schedsim)

mod sim;

pub use sim::SimMachine;

use crate::thread::ThreadId;

/// Уровень прерываний / Interrupt level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntLevel {
    /// Прерывания запрещены — единственный механизм взаимоисключения
    /// Interrupts disabled: the only mutual exclusion mechanism
    Off,
    On,
}

/// Чем закончилось переключение контекста для уходящего потока.
/// What a context switch meant for the outgoing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resumption {
    /// Управление вернулось в этот контекст: кто-то позже переключился обратно.
    /// Control came back into this context: a later dispatch switched back.
    Resumed,
    /// Уходящий контекст всё ещё припаркован. Путь возобновления выполнится
    /// позже через `Scheduler::resume`.
    /// The outgoing context is still parked. The resume path runs later
    /// through `Scheduler::resume`.
    Suspended,
}

/// Примитивы, которые планировщик потребляет от машины.
/// Primitives the scheduler consumes from the machine.
pub trait Machine {
    fn interrupt_level(&self) -> IntLevel;

    /// Установить уровень, вернуть предыдущий.
    /// Set the level, returning the previous one.
    fn set_interrupt_level(&mut self, level: IntLevel) -> IntLevel;

    /// Сохранить регистры пользовательского режима потока.
    /// Save the thread's user-mode registers.
    fn save_user_state(&mut self, tid: ThreadId);

    fn restore_user_state(&mut self, tid: ThreadId);

    /// Переключить процессор с `from` на `to` (SWITCH).
    /// На железе не возвращается, пока кто-то не переключится обратно в `from`.
    /// Switch the processor from `from` to `to`.
    /// On hardware this does not return until someone switches back to `from`.
    fn switch(&mut self, from: ThreadId, to: ThreadId) -> Resumption;
}
