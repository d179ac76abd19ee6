//! Delayed tick queue with generation-based cancellation.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Monotonic counter distinguishing one animation run from those it
/// superseded.
pub type Generation = u64;

/// Identity of one animation run on a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RunId<C> {
    pub code: C,
    pub generation: Generation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickKind {
    /// First tick of a run; the handler captures its start state here.
    First,
    /// Follow-up tick rescheduled by the previous one.
    Update,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick<K, C> {
    pub key: K,
    pub run: RunId<C>,
    pub kind: TickKind,
    pub due_millis: u64,
}

/// Time-ordered queue of animation ticks keyed by channel.
///
/// Each channel `K` has at most one live run. Starting a run on a channel
/// removes every pending tick of the previous run and retires its
/// generation, so nothing scheduled by a superseded run can fire afterwards.
/// Ticks due at the same instant fire in the order they were queued.
pub struct TickScheduler<K, C> {
    queue: VecDeque<Tick<K, C>>,
    runs: FxHashMap<K, RunId<C>>,
    next_generation: Generation,
}

impl<K, C> Default for TickScheduler<K, C>
where
    K: Copy + Eq + Hash + Debug,
    C: Copy + Eq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> TickScheduler<K, C>
where
    K: Copy + Eq + Hash + Debug,
    C: Copy + Eq + Debug,
{
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            runs: FxHashMap::default(),
            next_generation: 1,
        }
    }

    /// Starts a new run on `key`, cancelling whatever ran there before, and
    /// queues its first tick at `due_millis`.
    pub fn start(&mut self, key: K, code: C, due_millis: u64) -> RunId<C> {
        self.cancel(key);
        let run = RunId {
            code,
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.runs.insert(key, run);
        self.enqueue(Tick {
            key,
            run,
            kind: TickKind::First,
            due_millis,
        });
        log::trace!("start {key:?} {code:?} gen {} due {due_millis}", run.generation);
        run
    }

    /// Queues a follow-up tick for `run`. Returns false, queuing nothing,
    /// when the run is no longer current on `key`.
    pub fn schedule(&mut self, key: K, run: RunId<C>, due_millis: u64) -> bool {
        if !self.is_current(key, run) {
            return false;
        }
        self.enqueue(Tick {
            key,
            run,
            kind: TickKind::Update,
            due_millis,
        });
        true
    }

    /// Cancels the live run on `key` and drops its pending ticks.
    pub fn cancel(&mut self, key: K) -> Option<RunId<C>> {
        let previous = self.runs.remove(&key);
        if previous.is_some() {
            self.queue.retain(|tick| tick.key != key);
            log::trace!("cancel {key:?} {previous:?}");
        }
        previous
    }

    /// Marks `run` as completed. Returns false if it had already been
    /// superseded.
    pub fn finish(&mut self, key: K, run: RunId<C>) -> bool {
        if !self.is_current(key, run) {
            return false;
        }
        self.runs.remove(&key);
        self.queue.retain(|tick| tick.key != key);
        true
    }

    pub fn current(&self, key: K) -> Option<RunId<C>> {
        self.runs.get(&key).copied()
    }

    pub fn is_current(&self, key: K, run: RunId<C>) -> bool {
        self.runs.get(&key) == Some(&run)
    }

    pub fn is_running(&self, key: K, code: C) -> bool {
        self.current(key).is_some_and(|run| run.code == code)
    }

    /// Pops the next tick due at or before `now_millis`.
    ///
    /// Ticks whose run has since been superseded are discarded on the way.
    pub fn pop_due(&mut self, now_millis: u64) -> Option<Tick<K, C>> {
        while let Some(front) = self.queue.front() {
            if front.due_millis > now_millis {
                return None;
            }
            let tick = self.queue.pop_front()?;
            if self.is_current(tick.key, tick.run) {
                return Some(tick);
            }
            log::trace!("dropping stale tick {tick:?}");
        }
        None
    }

    pub fn next_due(&self) -> Option<u64> {
        self.queue.front().map(|tick| tick.due_millis)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.runs.clear();
    }

    fn enqueue(&mut self, tick: Tick<K, C>) {
        let index = self
            .queue
            .partition_point(|queued| queued.due_millis <= tick.due_millis);
        self.queue.insert(index, tick);
    }
}
