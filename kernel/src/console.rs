//! Консоль ядра / Kernel console
//!
//! Вывод идёт в устанавливаемый приёмник `fmt::Write`: UART на железе,
//! stdout в симуляторе, буфер в тестах.
//! Output goes to an installable `fmt::Write` sink: a UART on hardware,
//! stdout in the simulator, a buffer in tests.
//!
//! Пока приёмник не установлен, вывод отбрасывается.
//! Until a sink is installed, output is dropped.

use alloc::boxed::Box;
use core::fmt;
use spin::Mutex;

type Sink = Box<dyn fmt::Write + Send>;

static CONSOLE: Mutex<Option<Sink>> = Mutex::new(None);

/// Установить приёмник консоли, вернуть предыдущий.
/// Install a console sink, returning the previous one.
pub fn set_sink(sink: Sink) -> Option<Sink> {
    CONSOLE.lock().replace(sink)
}

/// Снять приёмник / Remove the sink
pub fn take_sink() -> Option<Sink> {
    CONSOLE.lock().take()
}

/// Внутренняя функция для макроса kprint!
/// Internal function for kprint! macro
pub fn _print(args: fmt::Arguments) {
    if let Some(sink) = CONSOLE.lock().as_mut() {
        sink.write_fmt(args).ok();
    }
}

/// Макрос для вывода в консоль.
/// Console print macro.
#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => {
        $crate::console::_print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! kprintln {
    ()           => ($crate::kprint!("\n"));
    ($($arg:tt)*) => ($crate::kprint!("{}\n", format_args!($($arg)*)));
}
