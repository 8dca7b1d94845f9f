//! Sampled address history.
//!
//! Each set remembers up to `ways` recently seen address tags together with
//! the time, PC and prediction of their last access. The history is what lets
//! Hawkeye pair a current access with the previous access to the same address
//! and hand the interval to OPTgen.
//!
//! Storage is a flat arena of `sets × ways` slots. Entries inside a set are
//! ordered by an explicit recency rank (0 = most recent) that is independent of
//! the RRIP state of the cache lines. The ranks of the occupied slots in a set
//! always form the permutation `0..len`. When a new tag arrives in a full set,
//! the entry at rank `capacity - 1` is dropped.

/// One remembered address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Hashed block address.
    pub tag: u32,
    /// Set clock value at the last access.
    pub last_time: u64,
    /// PC of the last access.
    pub pc: u64,
    /// Predictor verdict for `pc` at the last access.
    pub predicted_friendly: bool,
    /// Recency rank, 0 = most recent.
    pub rank: usize,
}

/// Outcome of [`SampledHistory::lookup_or_init`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The tag was absent and has been admitted.
    Inserted,
    /// The tag was present; carries the entry as it was before this access.
    Present(HistoryEntry),
}

/// Per-set bounded address history.
#[derive(Clone, Debug)]
pub struct SampledHistory {
    slots: Vec<Option<HistoryEntry>>,
    len: Vec<usize>,
    capacity: usize,
}

impl SampledHistory {
    /// Creates an empty history of `capacity` entries per set.
    pub fn new(sets: usize, capacity: usize) -> Self {
        Self {
            slots: vec![None; sets * capacity],
            len: vec![0; sets],
            capacity,
        }
    }

    /// Forgets every entry.
    pub fn reset(&mut self) {
        self.slots.fill(None);
        self.len.fill(0);
    }

    /// Maximum entries per set.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries currently held for `set`.
    pub fn len(&self, set: usize) -> usize {
        self.len[set]
    }

    /// Whether `set` holds no entries.
    pub fn is_empty(&self, set: usize) -> bool {
        self.len[set] == 0
    }

    fn set_slots(&self, set: usize) -> &[Option<HistoryEntry>] {
        let base = set * self.capacity;
        &self.slots[base..base + self.capacity]
    }

    fn set_slots_mut(&mut self, set: usize) -> &mut [Option<HistoryEntry>] {
        let base = set * self.capacity;
        &mut self.slots[base..base + self.capacity]
    }

    fn position(&self, set: usize, tag: u32) -> Option<usize> {
        self.set_slots(set)
            .iter()
            .position(|slot| slot.is_some_and(|entry| entry.tag == tag))
    }

    /// The entry for `tag`, if present.
    pub fn get(&self, set: usize, tag: u32) -> Option<&HistoryEntry> {
        self.set_slots(set)
            .iter()
            .flatten()
            .find(|entry| entry.tag == tag)
    }

    /// Iterates the entries of `set` in slot order.
    pub fn entries(&self, set: usize) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.set_slots(set).iter().flatten()
    }

    /// Ranks of the entries of `set`, sorted ascending.
    pub fn ranks(&self, set: usize) -> Vec<usize> {
        let mut ranks: Vec<usize> = self.entries(set).map(|entry| entry.rank).collect();
        ranks.sort_unstable();
        ranks
    }

    /// Finds `tag`, admitting it at the most-recent rank when absent.
    ///
    /// A full set first drops its least recent entry. A fresh entry has
    /// `last_time = time`, no PC, and a friendly prediction until
    /// [`update`](Self::update) fills it in.
    pub fn lookup_or_init(&mut self, set: usize, tag: u32, time: u64) -> Lookup {
        if let Some(&entry) = self.get(set, tag) {
            return Lookup::Present(entry);
        }

        if self.len[set] == self.capacity {
            self.evict_least_recent(set);
        }

        let rank = self.len[set];
        let slots = self.set_slots_mut(set);
        if let Some(free) = slots.iter().position(Option::is_none) {
            slots[free] = Some(HistoryEntry {
                tag,
                last_time: time,
                pc: 0,
                predicted_friendly: true,
                rank,
            });
            self.len[set] += 1;
            self.promote(set, free);
        }
        Lookup::Inserted
    }

    /// Records an access to `tag` and makes it the most recent entry.
    ///
    /// No-op when `tag` is absent; callers go through
    /// [`lookup_or_init`](Self::lookup_or_init) first.
    pub fn update(&mut self, set: usize, tag: u32, time: u64, pc: u64, predicted_friendly: bool) {
        let slot = self.position(set, tag);
        debug_assert!(slot.is_some(), "sampled history update for unknown tag {tag:#x}");
        let Some(slot) = slot else {
            return;
        };
        if let Some(entry) = self.set_slots_mut(set)[slot].as_mut() {
            entry.last_time = time;
            entry.pc = pc;
            entry.predicted_friendly = predicted_friendly;
        }
        self.promote(set, slot);
    }

    /// Moves the entry in `slot` to rank 0, shifting more recent entries down.
    fn promote(&mut self, set: usize, slot: usize) {
        let cap = self.capacity - 1;
        let slots = self.set_slots_mut(set);
        let Some(current) = slots[slot].map(|entry| entry.rank) else {
            return;
        };
        for (index, entry) in slots.iter_mut().enumerate() {
            if let Some(entry) = entry.as_mut() {
                if index == slot {
                    entry.rank = 0;
                } else if entry.rank < current {
                    entry.rank = (entry.rank + 1).min(cap);
                }
            }
        }
    }

    /// Drops the entry with the highest rank.
    ///
    /// In a full set that rank must be `capacity - 1`; anything else means
    /// the rank bookkeeping is broken.
    fn evict_least_recent(&mut self, set: usize) {
        let expected = self.capacity - 1;
        let slots = self.set_slots_mut(set);
        let victim = slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|entry| (index, entry.rank)))
            .max_by_key(|&(_, rank)| rank);

        let Some((index, rank)) = victim else {
            return;
        };
        debug_assert_eq!(
            rank, expected,
            "sampled history rank corruption in set {set}"
        );
        if rank != expected {
            tracing::error!(set, rank, expected, "sampled history rank corruption");
        }
        slots[index] = None;
        self.len[set] -= 1;
    }
}
