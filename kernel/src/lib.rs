//! Tristar Kernel — трёхуровневый планировщик / three-tier scheduler core
//!
//! Однопроцессорное ядро с MLFQ-планировщиком и старением приоритетов.
//! Uniprocessor kernel core with an MLFQ scheduler and priority aging.
//!
//! Подсистемы / Subsystems:
//!   arch    — граница машины: прерывания, переключение контекста
//!             machine boundary: interrupts, context switch
//!   thread  — дескрипторы потоков и таблица / thread descriptors and table
//!   sched   — очереди уровней, выбор, диспетчеризация, старение
//!             tier queues, selection, dispatch, aging
//!   kernel  — связка жизненного цикла / lifecycle glue
//!
//! Все операции планировщика выполняются с выключенными прерываниями.
//! Every scheduler operation runs with interrupts disabled.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

// Подключить стандартный alloc крейт (Vec, VecDeque, BTreeMap, Box)
// Connect standard alloc crate (Vec, VecDeque, BTreeMap, Box)
extern crate alloc;

pub mod arch;
pub mod console;
pub mod klog;
pub mod config;
pub mod error;
pub mod time;
pub mod thread;
pub mod sched;
mod kernel;

pub use arch::{IntLevel, Machine, Resumption, SimMachine};
pub use config::SchedConfig;
pub use error::{Error, Result};
pub use kernel::Kernel;
pub use sched::{SchedCtx, Scheduler};
pub use thread::{Priority, Thread, ThreadFlags, ThreadId, ThreadStatus, ThreadTable, Tier};
pub use time::{Clock, Tick};
