//! Collision-safe output-slot allocation.
//!
//! Multiple records can land on the same calendar date, and the output
//! layout is one file per date. The allocator hands out `<slug>.json` for
//! the first record on a date, then `<slug>_2.json`, `<slug>_3.json`, … in
//! processing order, and guarantees no filename is returned twice within a
//! run.
//!
//! The allocator is run-scoped state: the pipeline creates one, threads it
//! through the batch loop, and drops it at run end. Nothing here is global,
//! so repeated runs (and tests) cannot leak allocations into each other.

use std::collections::{HashMap, HashSet};

use crate::models::CalendarDate;

#[derive(Debug, Default)]
pub struct SlotAllocator {
    /// Next ordinal attempt per date slug.
    counts: HashMap<String, u32>,
    /// Every name handed out or reserved this run.
    taken: HashSet<String>,
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a name that must not be handed out — typically a file written
    /// by a prior run when overwriting is disabled. The suffix sequence for
    /// its date extends past it.
    pub fn reserve(&mut self, file_name: &str) {
        self.taken.insert(file_name.to_string());
    }

    /// Next unique filename for `date`. Deterministic for a fixed call
    /// sequence.
    pub fn allocate(&mut self, date: &CalendarDate) -> String {
        let slug = date.slug();
        loop {
            let ordinal = self.counts.entry(slug.clone()).or_default();
            *ordinal += 1;
            let name = if *ordinal == 1 {
                format!("{}.json", slug)
            } else {
                format!("{}_{}.json", slug, ordinal)
            };
            if self.taken.insert(name.clone()) {
                return name;
            }
        }
    }

    /// How many allocations needed a suffix step beyond the bare slug —
    /// same-date records plus reserved names skipped over.
    pub fn collisions_resolved(&self) -> u64 {
        self.counts
            .values()
            .map(|ordinal| u64::from(ordinal.saturating_sub(1)))
            .sum()
    }
}
