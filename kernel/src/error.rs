//! Ошибки ядра / Kernel errors
//!
//! Только восстановимые ошибки вызывающей стороны. Нарушения инвариантов
//! планировщика — это panic ядра, а не `Error`.
//! Recoverable caller errors only. Scheduler invariant breaches are kernel
//! panics, never an `Error`.

use core::fmt;

use crate::thread::{Priority, ThreadId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Приоритет вне диапазона 0–149 / Priority outside 0–149
    InvalidPriority(u8),
    /// Нет такого потока / No such thread
    UnknownThread(ThreadId),
    /// Поток не заблокирован / Thread is not blocked
    NotBlocked(ThreadId),
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPriority(p) => {
                write!(f, "priority {} is outside 0..={}", p, Priority::MAX.get())
            }
            Error::UnknownThread(tid) => write!(f, "no thread with id {}", tid),
            Error::NotBlocked(tid)    => write!(f, "thread {} is not blocked", tid),
        }
    }
}
