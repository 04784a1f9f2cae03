//! Дескрипторы потоков / Thread descriptors
//!
//! Только данные: приоритет, статус, счётчики времени, идентичность.
//! Data only: priority, status, timing counters, identity.
//!
//! Уровни приоритета / Priority tiers:
//!   L1 — 100–149 — high / interactive   (по оценке CPU-всплеска / by burst estimate)
//!   L2 —  50–99  — medium               (по приоритету / by priority)
//!   L3 —   0–49  — low / batch          (FIFO)

mod table;

pub use table::ThreadTable;

use alloc::string::String;
use bitflags::bitflags;
use core::fmt;

use crate::error::{Error, Result};
use crate::time::Tick;

// ── Идентификатор / Identifier ────────────────────────────────────────────────

/// Уникальный, монотонно выдаваемый идентификатор потока.
/// Unique, monotonically assigned thread identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(pub u32);

impl ThreadId {
    /// Загрузочный поток; не стареет / Bootstrap thread; never aged
    pub const BOOT: Self = Self(0);
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Приоритет и уровни / Priority and tiers ───────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(149);

    pub const fn new(value: u8) -> Result<Self> {
        if value > Self::MAX.0 {
            return Err(Error::InvalidPriority(value));
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> u8 { self.0 }

    pub const fn tier(self) -> Tier {
        match self.0 {
            100..=149 => Tier::High,
            50..=99   => Tier::Medium,
            _         => Tier::Low,
        }
    }

    /// Повысить на `step`, не выше 149.
    /// Raise by `step`, saturating at 149.
    pub fn raised(self, step: u8) -> Self {
        Self(self.0.saturating_add(step).min(Self::MAX.0))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Уровень очереди / Queue tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    /// Порядок выбора: сверху вниз / Selection order: top down
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    pub const fn index(self) -> usize {
        match self {
            Tier::High   => 0,
            Tier::Medium => 1,
            Tier::Low    => 2,
        }
    }

    /// Метка в трассе / Trace label
    pub const fn label(self) -> &'static str {
        match self {
            Tier::High   => "L[1]",
            Tier::Medium => "L[2]",
            Tier::Low    => "L[3]",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Статус и флаги / Status and flags ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadStatus {
    New,
    Ready,
    Running,
    Blocked,
    Finished,
}

bitflags! {
    /// Флаги потока / Thread flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ThreadFlags: u32 {
        /// Есть пользовательское состояние для сохранения при переключении
        /// Owns user-mode state to save/restore around a switch
        const USER_SPACE = 1 << 0;
        /// Не участвует в старении / Exempt from aging
        const NO_AGING   = 1 << 1;
    }
}

// ── Дескриптор / Descriptor ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Thread {
    pub name:           String,
    id:                 ThreadId,
    pub priority:       Priority,
    pub status:         ThreadStatus,
    /// Оценка длины CPU-всплеска; упорядочивает только L1.
    /// Estimated CPU burst; orders L1 only.
    pub burst_estimate: Tick,
    /// Тики в очереди готовых с последней диспетчеризации.
    /// Ticks spent ready since the last dispatch.
    pub waiting_time:   Tick,
    /// Тик последней диспетчеризации / Tick of the last dispatch
    pub start_time:     Tick,
    pub flags:          ThreadFlags,
}

impl Thread {
    pub(crate) fn new(id: ThreadId, name: String, priority: Priority, flags: ThreadFlags) -> Self {
        Self {
            name,
            id,
            priority,
            status: ThreadStatus::New,
            burst_estimate: 0,
            waiting_time: 0,
            start_time: 0,
            flags,
        }
    }

    pub fn id(&self) -> ThreadId { self.id }
    pub fn tier(&self) -> Tier { self.priority.tier() }

    pub fn ages(&self) -> bool {
        !self.flags.contains(ThreadFlags::NO_AGING)
    }

    /// Учесть завершённый CPU-всплеск: t(i) = (t(i-1) + T) / 2.
    /// Fold a finished CPU burst in: t(i) = (t(i-1) + T) / 2.
    pub fn record_burst(&mut self, ran: Tick) -> Tick {
        let old = self.burst_estimate;
        self.burst_estimate = (old + ran) / 2;
        old
    }
}
