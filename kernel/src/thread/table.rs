//! Таблица потоков — владелец дескрипторов.
//! Thread table, owner of the descriptors.
//!
//! Планировщик хранит только `ThreadId`; время жизни потока принадлежит ядру.
//! The scheduler only holds `ThreadId`s; thread lifetime belongs to the kernel.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::ops::{Index, IndexMut};

use super::{Priority, Thread, ThreadFlags, ThreadId};

#[derive(Debug, Default)]
pub struct ThreadTable {
    threads: BTreeMap<ThreadId, Thread>,
    next_id: u32,
}

impl ThreadTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Создать поток в статусе New. Поток 0 никогда не стареет.
    /// Create a thread in status New. Thread 0 is never aged.
    pub fn spawn(&mut self, name: impl Into<String>, priority: Priority, mut flags: ThreadFlags) -> ThreadId {
        let id = ThreadId(self.next_id);
        self.next_id += 1;
        if id == ThreadId::BOOT {
            flags |= ThreadFlags::NO_AGING;
        }
        self.threads.insert(id, Thread::new(id, name.into(), priority, flags));
        id
    }

    pub fn get(&self, tid: ThreadId) -> Option<&Thread> {
        self.threads.get(&tid)
    }

    pub fn get_mut(&mut self, tid: ThreadId) -> Option<&mut Thread> {
        self.threads.get_mut(&tid)
    }

    /// Уничтожить поток / Destroy a thread
    pub fn remove(&mut self, tid: ThreadId) -> Option<Thread> {
        self.threads.remove(&tid)
    }

    pub fn contains(&self, tid: ThreadId) -> bool {
        self.threads.contains_key(&tid)
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

impl Index<ThreadId> for ThreadTable {
    type Output = Thread;

    fn index(&self, tid: ThreadId) -> &Thread {
        match self.get(tid) {
            Some(t) => t,
            None    => panic!("thread {} is not in the thread table", tid),
        }
    }
}

impl IndexMut<ThreadId> for ThreadTable {
    fn index_mut(&mut self, tid: ThreadId) -> &mut Thread {
        match self.get_mut(tid) {
            Some(t) => t,
            None    => panic!("thread {} is not in the thread table", tid),
        }
    }
}
