//! Items the solver cannot reason about.
//!
//! Equip conditions (stat windows such as "40 <= block <= 50") are not part of
//! the game data export and are not modelled by the search, so those items are
//! excluded outright.

/// Items present in the data that cannot be obtained in game.
pub const UNOBTAINABLE_ITEM_IDS: [u32; 1] = [15296];

/// Names of items present in the data that cannot be obtained in game.
pub const DEFAULT_FORBIDDEN_NAMES: [&str; 3] =
    ["Fuzzy Cards", "Nemotilus Harpoon", "Nemotilus Bolt Screw"];

/// Items that carry a set-wide equip condition, grouped by condition.
pub const CONDITIONAL_ITEMS: &[(&str, &[u32])] = &[
    ("40 <= block <= 50", &[27293, 27294]),
    ("40 <= crit <= 50", &[27445, 27446, 26302, 26322, 27695]),
    ("400 <= distance mastery <= 500", &[26292, 26313, 27747]),
    ("400 <= lock <= 500", &[27443, 27444]),
    ("500 <= dodge <= 600", &[26304, 26324]),
    (
        "500 <= lock <= 600",
        &[26299, 26318, 26953, 26954, 27297, 27298, 26290, 26311],
    ),
    (
        "ap <= 11",
        &[27447, 27448, 27303, 27304, 27409, 27410, 18691, 30138],
    ),
    ("ap >= 13", &[26296, 26317, 27289, 27290]),
    ("block <= 20", &[26291, 26312]),
    ("crit <= 25", &[26303, 26323]),
    ("control == 4", &[26293, 26314]),
    (
        "mp <= 5",
        &[27449, 27450, 26997, 26998, 26289, 26310, 27693],
    ),
    ("range <= 3", &[27299, 27300, 26295, 26316, 27377, 27378]),
    ("range >= 2", &[27287, 27288]),
    ("wp <= 4", &[26298]),
    ("wp >= 8", &[26994, 26995, 26996, 26300, 26319]),
];

pub fn has_equip_condition(item_id: u32) -> bool {
    CONDITIONAL_ITEMS
        .iter()
        .any(|(_, ids)| ids.contains(&item_id))
}

pub fn is_unobtainable(item_id: u32) -> bool {
    UNOBTAINABLE_ITEM_IDS.contains(&item_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_condition_items() {
        assert!(has_equip_condition(27293));
        assert!(has_equip_condition(30138));
        assert!(!has_equip_condition(26494));
        assert!(is_unobtainable(15296));
    }

    #[test]
    fn no_id_listed_twice() {
        let mut ids: Vec<u32> = CONDITIONAL_ITEMS.iter().flat_map(|(_, ids)| ids.iter().copied()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
