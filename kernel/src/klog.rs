//! Логгер ядра поверх консоли / Kernel logger on top of the console
//!
//! Реализует `log::Log`; строки вида `[DEBUG] sched: ...`.
//! Implements `log::Log`; lines look like `[DEBUG] sched: ...`.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct KernelLogger;

static LOGGER: KernelLogger = KernelLogger;

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            crate::kprintln!("[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Зарегистрировать логгер ядра. Вызывается один раз при загрузке.
/// Register the kernel logger. Called once at boot.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::sync::Arc;
    use core::fmt;
    use spin::Mutex;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<String>>);

    impl fmt::Write for Capture {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0.lock().push_str(s);
            Ok(())
        }
    }

    // Единственный тест, трогающий глобальные логгер и консоль.
    // The only test that touches the global logger and console.
    #[test]
    fn records_reach_console_sink() {
        let capture = Capture::default();
        crate::console::set_sink(alloc::boxed::Box::new(capture.clone()));
        init(LevelFilter::Debug).unwrap();

        crate::kprintln!("boot {}", 1);
        log::debug!(target: "sched", "[A] Tick [{}]: Thread [{}]", 0, 7);
        log::trace!(target: "sched", "filtered out");

        let text = capture.0.lock().clone();
        assert!(text.contains("boot 1\n"));
        assert!(text.contains("[DEBUG] sched: [A] Tick [0]: Thread [7]\n"));
        assert!(!text.contains("filtered out"));

        crate::console::take_sink();
    }
}
