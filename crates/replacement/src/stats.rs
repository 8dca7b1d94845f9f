//! Replacement statistics collection and reporting.
//!
//! Statistics are purely observational: nothing here feeds back into victim
//! selection or insertion. It provides:
//! 1. **Access counters:** Demand accesses, hits, and ignored writebacks.
//! 2. **Policy internals:** PSEL position for dueling policies, OPTgen hit rate
//!    and trained predictor entries for Hawkeye.
//! 3. **Reporting:** A text block in the simulator's stats style and JSON.

use serde::Serialize;

/// Counters every policy maintains on its `update` path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessCounters {
    /// Non-writeback accesses.
    pub accesses: u64,
    /// Non-writeback hits.
    pub hits: u64,
    /// Writebacks observed.
    pub writebacks: u64,
}

impl AccessCounters {
    /// Records one access.
    #[inline(always)]
    pub const fn record(&mut self, writeback: bool, hit: bool) {
        if writeback {
            self.writebacks += 1;
        } else {
            self.accesses += 1;
            if hit {
                self.hits += 1;
            }
        }
    }

    /// Zeroes all counters.
    pub const fn reset(&mut self) {
        self.accesses = 0;
        self.hits = 0;
        self.writebacks = 0;
    }
}

/// Snapshot of a policy's observable state.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PolicyStats {
    /// Policy display name.
    pub policy: &'static str,
    /// Non-writeback accesses.
    pub accesses: u64,
    /// Non-writeback hits.
    pub hits: u64,
    /// Writebacks observed.
    pub writebacks: u64,
    /// Policy selector value (DRRIP, DIP).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psel: Option<u16>,
    /// Accesses OPTgen judged would hit under Belady (Hawkeye).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_hits: Option<u64>,
    /// Demand accesses replayed through OPTgen (Hawkeye).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_accesses: Option<u64>,
    /// Predictor entries touched at least once (Hawkeye).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trained_entries: Option<usize>,
}

impl PolicyStats {
    /// Creates a snapshot carrying only the access counters.
    pub const fn new(policy: &'static str, counters: AccessCounters) -> Self {
        Self {
            policy,
            accesses: counters.accesses,
            hits: counters.hits,
            writebacks: counters.writebacks,
            psel: None,
            opt_hits: None,
            opt_accesses: None,
            trained_entries: None,
        }
    }

    /// Hit rate in percent over non-writeback accesses; `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        percent(self.hits, self.accesses)
    }

    /// OPTgen hit rate in percent, when the policy runs OPTgen.
    pub fn opt_hit_rate(&self) -> Option<f64> {
        match (self.opt_hits, self.opt_accesses) {
            (Some(hits), Some(accesses)) => Some(percent(hits, accesses)),
            _ => None,
        }
    }

    /// Renders the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Renders the snapshot as a multi-line text block.
    pub fn render(&self, label: &str) -> String {
        let mut out = String::new();
        out.push_str("==========================================================\n");
        out.push_str(&format!("{} REPLACEMENT STATISTICS ({label})\n", self.policy));
        out.push_str("==========================================================\n");
        out.push_str(&format!("  llc.accesses           {}\n", self.accesses));
        out.push_str(&format!("  llc.hits               {}\n", self.hits));
        out.push_str(&format!("  llc.hit_rate           {:.2}%\n", self.hit_rate()));
        out.push_str(&format!("  llc.writebacks         {}\n", self.writebacks));
        if let Some(psel) = self.psel {
            out.push_str(&format!("  duel.psel              {psel}\n"));
        }
        if let (Some(hits), Some(accesses)) = (self.opt_hits, self.opt_accesses) {
            out.push_str(&format!("  optgen.hits            {hits}\n"));
            out.push_str(&format!("  optgen.accesses        {accesses}\n"));
            out.push_str(&format!(
                "  optgen.hit_rate        {:.2}%\n",
                percent(hits, accesses)
            ));
        }
        if let Some(trained) = self.trained_entries {
            out.push_str(&format!("  predictor.trained      {trained}\n"));
        }
        out.push_str("==========================================================\n");
        out
    }

    /// Prints the snapshot to stdout.
    pub fn print(&self, label: &str) {
        print!("{}", self.render(label));
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * (part as f64 / total as f64)
    }
}
