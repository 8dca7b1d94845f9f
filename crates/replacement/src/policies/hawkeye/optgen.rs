//! OPTgen: bounded-window Belady emulation.
//!
//! OPTgen answers, for one set, "would Belady's OPT have kept this line cached
//! between its previous access and now?". Time is discretised into quanta
//! (one per access to the set) and kept modulo the window length. The
//! occupancy vector counts, for every quanta in the window, how many intervals
//! OPT has already decided to keep live across it.
//!
//! A reuse interval `[last, current)` fits in the cache iff no quanta inside
//! it is already at capacity. When it fits, OPT would have hit, so every
//! quanta in the interval gains one more live line.

/// Per-set occupancy vector and OPT hit counters.
#[derive(Clone, Debug)]
pub struct OptGen {
    /// Live-interval count per quanta, circular.
    occupancy: Vec<u32>,
    /// Effective capacity OPT is emulated with.
    capacity: u32,
    /// Accesses OPT would have hit.
    opt_hits: u64,
    /// Demand accesses recorded.
    demand_accesses: u64,
}

impl OptGen {
    /// Creates an emulator over a window of `window` quanta.
    pub fn new(window: usize, capacity: u32) -> Self {
        Self {
            occupancy: vec![0; window],
            capacity,
            opt_hits: 0,
            demand_accesses: 0,
        }
    }

    /// Clears the window and counters and sets the emulated capacity.
    pub fn init(&mut self, capacity: u32) {
        self.occupancy.fill(0);
        self.capacity = capacity;
        self.opt_hits = 0;
        self.demand_accesses = 0;
    }

    /// Records a demand access at `quanta`; the slot starts with no live lines.
    pub fn add_access(&mut self, quanta: usize) {
        self.demand_accesses += 1;
        self.occupancy[quanta] = 0;
    }

    /// Decides whether the interval `[last_quanta, current_quanta)` fits.
    ///
    /// Both arguments are positions in the window. The interval is walked
    /// forward from `last_quanta` with wraparound; equal arguments describe an
    /// empty interval, which always fits. On success every quanta in the
    /// interval is charged one live line and the OPT hit counter advances.
    pub fn should_cache(&mut self, current_quanta: usize, last_quanta: usize) -> bool {
        let window = self.occupancy.len();
        let mut quanta = last_quanta;
        while quanta != current_quanta {
            if self.occupancy[quanta] >= self.capacity {
                return false;
            }
            quanta = (quanta + 1) % window;
        }

        let mut quanta = last_quanta;
        while quanta != current_quanta {
            self.occupancy[quanta] += 1;
            quanta = (quanta + 1) % window;
        }
        self.opt_hits += 1;
        true
    }

    /// Accesses OPT would have hit.
    pub const fn opt_hits(&self) -> u64 {
        self.opt_hits
    }

    /// Demand accesses recorded.
    pub const fn demand_accesses(&self) -> u64 {
        self.demand_accesses
    }

    /// Emulated capacity.
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Window length in quanta.
    pub fn window(&self) -> usize {
        self.occupancy.len()
    }

    /// Live-interval count at `quanta`.
    pub fn occupancy(&self, quanta: usize) -> u32 {
        self.occupancy[quanta]
    }
}
