//! Slot bucketing and domination pruning.

use std::collections::{BTreeMap, HashMap, HashSet};

use gear_core::{EquipableItem, ItemSlot, Locale, ScoreModel, SimKey, Stats};

/// An item with its scores precomputed for one configuration.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    pub item: &'a EquipableItem,
    /// Relevant mastery contributed by the item.
    pub score: f64,
    /// First-pass ordering key.
    pub initial: f64,
}

impl<'a> Candidate<'a> {
    pub fn new(item: &'a EquipableItem, model: &ScoreModel) -> Self {
        Self {
            item,
            score: model.item_score(&item.stats),
            initial: model.initial_score(&item.stats),
        }
    }

    pub fn sim_key(&self) -> SimKey {
        self.item.sim_key()
    }
}

/// Sorts candidates best first: by the initial key, ties broken by score.
pub fn sort_candidates(candidates: &mut [Candidate<'_>]) {
    candidates.sort_by(|a, b| {
        b.initial
            .total_cmp(&a.initial)
            .then_with(|| b.score.total_cmp(&a.score))
    });
}

/// Stats a truncated bucket keeps offering while it has room.
const MAJOR_STATS: [fn(&Stats) -> i32; 4] = [|s| s.ap, |s| s.mp, |s| s.range, |s| s.wp];

/// Pruning limits for one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PruneLimits {
    /// Candidates sharing a [`SimKey`] that survive, and kept per major stat.
    pub per_key: usize,
    /// Maximum bucket size after pruning.
    pub depth: usize,
    /// Skip depth truncation entirely.
    pub exhaustive: bool,
}

impl PruneLimits {
    /// Extra ring candidates kept on top of the search depth.
    pub const RING_EXTRA_DEPTH: usize = 3;
    /// Extra pet candidates kept on top of the search depth.
    pub const PET_EXTRA_DEPTH: usize = 4;

    pub fn for_slot(slot: ItemSlot, search_depth: usize, exhaustive: bool) -> Self {
        let depth = search_depth.max(1);
        let (per_key, depth) = match slot {
            ItemSlot::LeftHand => (2, depth + Self::RING_EXTRA_DEPTH),
            ItemSlot::Pet => (1, depth + Self::PET_EXTRA_DEPTH),
            _ => (1, depth),
        };
        Self {
            per_key,
            depth,
            exhaustive,
        }
    }
}

/// Prunes one bucket in place.
///
/// 1. Sort best first and drop repeated `(name, souvenir)` pairs.
/// 2. Keep at most `per_key` candidates per [`SimKey`].
/// 3. Keep `depth` candidates: the best one, then up to `per_key` of the best
///    carrying AP, MP, range and WP in turn, then the best of the rest.
///
/// The first candidate after sorting always survives and the bucket never
/// exceeds `depth`, so no `(ap > 0, mp > 0, range > 0, two-handed)` signature
/// can fill more than `depth` places.
pub fn prune_bucket(bucket: &mut Vec<Candidate<'_>>, limits: PruneLimits, locale: Locale) {
    sort_candidates(bucket);

    let mut seen_names: HashSet<(&str, bool)> = HashSet::new();
    bucket.retain(|c| match c.item.name(locale) {
        Some(name) => seen_names.insert((name, c.item.is_souvenir())),
        None => true,
    });

    let mut per_key: HashMap<SimKey, usize> = HashMap::new();
    bucket.retain(|c| {
        let seen = per_key.entry(c.sim_key()).or_insert(0);
        *seen += 1;
        *seen <= limits.per_key
    });

    if limits.exhaustive || bucket.len() <= limits.depth {
        return;
    }

    let mut keep = vec![false; bucket.len()];
    keep[0] = true;
    let mut kept = 1;
    for stat in MAJOR_STATS {
        let carriers = (1..bucket.len())
            .filter(|&i| !keep[i] && stat(&bucket[i].item.stats) > 0)
            .take(limits.per_key)
            .collect::<Vec<_>>();
        for i in carriers {
            if kept == limits.depth {
                break;
            }
            keep[i] = true;
            kept += 1;
        }
    }
    for flag in keep.iter_mut().filter(|flag| !**flag) {
        if kept == limits.depth {
            break;
        }
        *flag = true;
        kept += 1;
    }

    let mut flags = keep.into_iter();
    bucket.retain(|_| flags.next().unwrap_or(false));
}

/// Searchable slots, each with its pruned candidates.
///
/// Weapons are kept apart in [`crate::weapons::WeaponPools`]; costumes are
/// never searched.
#[derive(Clone, Debug, Default)]
pub struct SlotPools<'a> {
    buckets: BTreeMap<ItemSlot, Vec<Candidate<'a>>>,
}

impl<'a> SlotPools<'a> {
    pub fn insert(&mut self, slot: ItemSlot, candidates: Vec<Candidate<'a>>) {
        self.buckets.insert(slot, candidates);
    }

    /// Candidates for `slot`, empty when none survived.
    pub fn get(&self, slot: ItemSlot) -> &[Candidate<'a>] {
        self.buckets.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemSlot, &[Candidate<'a>])> {
        self.buckets.iter().map(|(slot, c)| (*slot, c.as_slice()))
    }

    /// Prunes every bucket with its slot's limits.
    pub fn prune(&mut self, search_depth: usize, exhaustive: bool, locale: Locale) {
        for (slot, bucket) in &mut self.buckets {
            prune_bucket(bucket, PruneLimits::for_slot(*slot, search_depth, exhaustive), locale);
        }
    }
}

/// Groups candidates by slot.
pub fn bucket_by_slot<'a>(
    candidates: impl IntoIterator<Item = Candidate<'a>>,
) -> BTreeMap<ItemSlot, Vec<Candidate<'a>>> {
    let mut buckets: BTreeMap<ItemSlot, Vec<Candidate<'a>>> = BTreeMap::new();
    for candidate in candidates {
        buckets.entry(candidate.item.slot).or_default().push(candidate);
    }
    buckets
}
