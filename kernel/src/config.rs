//! Параметры планировщика / Scheduler parameters
//!
//! Константы сборки ядра, а не политика пользователя.
//! Kernel build-time constants, not a user policy.

use crate::time::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedConfig {
    /// Сколько тиков ожидания даёт одно повышение / Wait ticks per promotion
    pub aging_threshold: Tick,
    /// Шаг повышения приоритета / Priority raise per promotion
    pub aging_step:      u8,
    /// Период таймера: проход старения раз в столько тиков
    /// Timer period: one aging pass every this many ticks
    pub aging_interval:  Tick,
    /// Квант round-robin для нижнего уровня / Round-robin quantum of the low tier
    pub low_quantum:     Tick,
}

impl SchedConfig {
    pub const DEFAULT: Self = Self {
        aging_threshold: 1500,
        aging_step:      10,
        aging_interval:  100,
        low_quantum:     100,
    };
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
