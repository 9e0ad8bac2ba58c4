//! Bounded best-first result list.

use gear_core::EquipableItem;

/// Sets kept per solve.
pub const DEFAULT_CAPACITY: usize = 5;

/// Below this many entries the acceptance cutoff is the current minimum.
const CUTOFF_WINDOW: usize = 3;

/// A scored set; items sorted by id.
#[derive(Clone, Debug)]
pub struct Ranked<'a> {
    pub score: f64,
    pub items: Vec<&'a EquipableItem>,
}

impl Ranked<'_> {
    fn same_set(&self, score: f64, ids: &[u32]) -> bool {
        self.score == score && self.items.iter().map(|i| i.id).eq(ids.iter().copied())
    }
}

#[derive(Clone, Debug)]
pub struct TopK<'a> {
    entries: Vec<Ranked<'a>>,
    capacity: usize,
}

impl<'a> TopK<'a> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Score a new set must beat.
    ///
    /// The minimum kept score while the list holds one or two entries, zero
    /// otherwise.
    pub fn worst_kept(&self) -> f64 {
        if (1..CUTOFF_WINDOW).contains(&self.entries.len()) {
            self.entries
                .iter()
                .map(|e| e.score)
                .fold(f64::INFINITY, f64::min)
        } else {
            0.0
        }
    }

    /// Offers a set. `items` is only called once the score qualifies.
    ///
    /// Returns true when the set was inserted.
    pub fn offer(&mut self, score: f64, items: impl FnOnce() -> Vec<&'a EquipableItem>) -> bool {
        if score <= self.worst_kept() {
            return false;
        }
        let mut items = items();
        items.sort_by_key(|i| i.id);
        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        if self.entries.iter().any(|e| e.same_set(score, &ids)) {
            return false;
        }

        self.entries.push(Ranked { score, items });
        self.entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        self.entries.truncate(self.capacity);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Ranked<'a>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Ranked<'a>> {
        self.entries
    }
}

impl Default for TopK<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
