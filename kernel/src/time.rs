//! Время ядра в тиках / Kernel time in ticks

/// Наименьшая единица времени ядра / Smallest kernel time unit
pub type Tick = u64;

/// Монотонный счётчик тиков / Monotonic tick counter
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    total_ticks: Tick,
}

impl Clock {
    pub const fn new() -> Self { Self { total_ticks: 0 } }
    pub const fn now(&self) -> Tick { self.total_ticks }

    pub fn advance(&mut self, ticks: Tick) -> Tick {
        self.total_ticks += ticks;
        self.total_ticks
    }
}
