//! Equip-effect dispatch.
//!
//! Raw item records list their effects as `(actionId, params)` pairs. The
//! table below maps each action id to an [`EffectKind`], which in turn resolves
//! to a typed [`StatField`] delta. Unknown ids are not errors at the item level:
//! the caller logs and skips them.

use gear_core::Stats;

/// A single field of [`Stats`] that effects can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatField {
    Hp,
    Ap,
    Mp,
    Wp,
    Range,
    Control,
    Block,
    CriticalHit,
    CriticalMastery,
    CriticalResistance,
    ElementalMastery,
    Mastery1Element,
    Mastery2Elements,
    Mastery3Elements,
    FireMastery,
    EarthMastery,
    WaterMastery,
    AirMastery,
    MeleeMastery,
    DistanceMastery,
    BerserkMastery,
    RearMastery,
    HealingMastery,
    AreaMastery,
    SingleTargetMastery,
    ElementalResistance,
    Resistance1Element,
    Resistance2Elements,
    Resistance3Elements,
    FireResistance,
    EarthResistance,
    WaterResistance,
    AirResistance,
    RearResistance,
    ArmorGiven,
    ArmorReceived,
    Lock,
    Dodge,
    Initiative,
    Wisdom,
    Prospecting,
    ForceOfWill,
    KitSkill,
}

impl StatField {
    pub fn get_mut(self, stats: &mut Stats) -> &mut i32 {
        match self {
            Self::Hp => &mut stats.hp,
            Self::Ap => &mut stats.ap,
            Self::Mp => &mut stats.mp,
            Self::Wp => &mut stats.wp,
            Self::Range => &mut stats.range,
            Self::Control => &mut stats.control,
            Self::Block => &mut stats.block,
            Self::CriticalHit => &mut stats.critical_hit,
            Self::CriticalMastery => &mut stats.critical_mastery,
            Self::CriticalResistance => &mut stats.critical_resistance,
            Self::ElementalMastery => &mut stats.elemental_mastery,
            Self::Mastery1Element => &mut stats.mastery_1_element,
            Self::Mastery2Elements => &mut stats.mastery_2_elements,
            Self::Mastery3Elements => &mut stats.mastery_3_elements,
            Self::FireMastery => &mut stats.fire_mastery,
            Self::EarthMastery => &mut stats.earth_mastery,
            Self::WaterMastery => &mut stats.water_mastery,
            Self::AirMastery => &mut stats.air_mastery,
            Self::MeleeMastery => &mut stats.melee_mastery,
            Self::DistanceMastery => &mut stats.distance_mastery,
            Self::BerserkMastery => &mut stats.berserk_mastery,
            Self::RearMastery => &mut stats.rear_mastery,
            Self::HealingMastery => &mut stats.healing_mastery,
            Self::AreaMastery => &mut stats.area_mastery,
            Self::SingleTargetMastery => &mut stats.single_target_mastery,
            Self::ElementalResistance => &mut stats.elemental_resistance,
            Self::Resistance1Element => &mut stats.resistance_1_element,
            Self::Resistance2Elements => &mut stats.resistance_2_elements,
            Self::Resistance3Elements => &mut stats.resistance_3_elements,
            Self::FireResistance => &mut stats.fire_resistance,
            Self::EarthResistance => &mut stats.earth_resistance,
            Self::WaterResistance => &mut stats.water_resistance,
            Self::AirResistance => &mut stats.air_resistance,
            Self::RearResistance => &mut stats.rear_resistance,
            Self::ArmorGiven => &mut stats.armor_given,
            Self::ArmorReceived => &mut stats.armor_received,
            Self::Lock => &mut stats.lock,
            Self::Dodge => &mut stats.dodge,
            Self::Initiative => &mut stats.initiative,
            Self::Wisdom => &mut stats.wisdom,
            Self::Prospecting => &mut stats.prospecting,
            Self::ForceOfWill => &mut stats.force_of_will,
            Self::KitSkill => &mut stats.kit_skill,
        }
    }
}

/// How an action id turns its params into a stat delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// `+params[0]` to the field.
    Gain(StatField),
    /// `-params[0]` to the field.
    Loss(StatField),
    /// Armor given/received, selected by `params[4]`.
    Armor { negative: bool },
    /// N-element mastery, N = `params[2]`.
    ElementCountMastery,
    /// N-element resistance, N = `params[2]`.
    ElementCountResistance,
    /// Recognised effect with no bearing on stats (auras, spell levels, ...).
    NoOp,
}

/// A resolved change to one stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatDelta {
    pub field: StatField,
    pub value: i32,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EffectError {
    #[error("unhandled effect action id {0}")]
    UnknownAction(u32),

    #[error("unhandled effect subtype {key} for action id {action}")]
    UnknownSubtype { action: u32, key: i64 },

    #[error("effect action id {action} is missing param {index}")]
    MissingParam { action: u32, index: usize },
}

/// Looks up the dispatch entry for an action id.
pub fn effect_kind(action_id: u32) -> Option<EffectKind> {
    use EffectKind::{Gain, Loss, NoOp};
    use StatField::*;

    Some(match action_id {
        20 => Gain(Hp),
        21 => Loss(Hp),
        26 => Gain(HealingMastery),
        31 => Gain(Ap),
        32 | 56 => Loss(Ap),
        39 => EffectKind::Armor { negative: false },
        40 => EffectKind::Armor { negative: true },
        41 => Gain(Mp),
        42 | 57 => Loss(Mp),
        71 => Gain(RearResistance),
        80 => Gain(ElementalResistance),
        82 => Gain(FireResistance),
        83 => Gain(WaterResistance),
        84 => Gain(EarthResistance),
        85 => Gain(AirResistance),
        90 | 100 => Loss(ElementalResistance),
        // Uncapped resistance losses; there is no air variant in the data.
        96 => Loss(EarthResistance),
        97 => Loss(FireResistance),
        98 => Loss(WaterResistance),
        120 => Gain(ElementalMastery),
        122 => Gain(FireMastery),
        123 => Gain(EarthMastery),
        124 => Gain(WaterMastery),
        125 => Gain(AirMastery),
        130 => Loss(ElementalMastery),
        132 => Loss(FireMastery),
        149 => Gain(CriticalMastery),
        150 => Gain(CriticalHit),
        160 => Gain(Range),
        161 => Loss(Range),
        162 => Gain(Prospecting),
        166 => Gain(Wisdom),
        167 => Loss(Wisdom),
        168 => Loss(CriticalHit),
        171 => Gain(Initiative),
        172 => Loss(Initiative),
        173 => Gain(Lock),
        174 => Loss(Lock),
        175 => Gain(Dodge),
        176 => Loss(Dodge),
        177 => Gain(ForceOfWill),
        180 => Gain(RearMastery),
        181 => Loss(RearMastery),
        184 => Gain(Control),
        191 => Gain(Wp),
        192 => Loss(Wp),
        234 => Gain(KitSkill),
        875 => Gain(Block),
        876 => Loss(Block),
        988 => Gain(CriticalResistance),
        1050 => Gain(AreaMastery),
        1051 => Gain(SingleTargetMastery),
        1052 => Gain(MeleeMastery),
        1053 => Gain(DistanceMastery),
        1055 => Gain(BerserkMastery),
        1056 => Loss(CriticalMastery),
        1059 => Loss(MeleeMastery),
        1060 => Loss(DistanceMastery),
        1061 => Loss(BerserkMastery),
        1062 => Loss(CriticalResistance),
        1063 => Loss(RearResistance),
        1068 => EffectKind::ElementCountMastery,
        1069 => EffectKind::ElementCountResistance,
        // 304 and 1020: conditional ring effects, not modelled.
        // 400: auras. 832 and 979: spell levels.
        // 1083 and 1084: light damage and heal. 2001: harvest quantity.
        304 | 400 | 832 | 979 | 1020 | 1083 | 1084 | 2001 => NoOp,
        _ => return None,
    })
}

fn param(action: u32, params: &[f64], index: usize) -> Result<f64, EffectError> {
    params
        .get(index)
        .copied()
        .ok_or(EffectError::MissingParam { action, index })
}

impl EffectKind {
    /// Resolves the delta this effect applies. `Ok(None)` for no-ops.
    pub fn delta(self, action: u32, params: &[f64]) -> Result<Option<StatDelta>, EffectError> {
        let (field, value) = match self {
            Self::NoOp => return Ok(None),
            Self::Gain(field) => (field, param(action, params, 0)?),
            Self::Loss(field) => (field, -param(action, params, 0)?),
            Self::Armor { negative } => {
                let key = param(action, params, 4)? as i64;
                let field = match key {
                    120 => StatField::ArmorGiven,
                    121 => StatField::ArmorReceived,
                    _ => return Err(EffectError::UnknownSubtype { action, key }),
                };
                let value = param(action, params, 0)?;
                (field, if negative { -value } else { value })
            }
            Self::ElementCountMastery | Self::ElementCountResistance => {
                let key = param(action, params, 2)? as i64;
                let mastery = matches!(self, Self::ElementCountMastery);
                let field = match (key, mastery) {
                    (1, true) => StatField::Mastery1Element,
                    (2, true) => StatField::Mastery2Elements,
                    (3, true) => StatField::Mastery3Elements,
                    (1, false) => StatField::Resistance1Element,
                    (2, false) => StatField::Resistance2Elements,
                    (3, false) => StatField::Resistance3Elements,
                    _ => return Err(EffectError::UnknownSubtype { action, key }),
                };
                (field, param(action, params, 0)?)
            }
        };
        Ok(Some(StatDelta {
            field,
            value: value as i32,
        }))
    }
}

/// Applies one raw effect to `stats`.
///
/// Companion effects (pets and mounts) are stored at level 0 with a per-level
/// increment in `params[1]`; they are evaluated at their maximum level 50.
pub fn apply_effect(
    stats: &mut Stats,
    action: u32,
    params: &[f64],
    companion: bool,
) -> Result<(), EffectError> {
    let kind = effect_kind(action).ok_or(EffectError::UnknownAction(action))?;
    let Some(mut delta) = kind.delta(action, params)? else {
        return Ok(());
    };
    if companion {
        let per_level = params.get(1).copied().unwrap_or(0.0);
        delta.value = (f64::from(delta.value) + 50.0 * per_level) as i32;
    }
    *delta.field.get_mut(stats) += delta.value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(action: u32, params: &[f64]) -> Stats {
        let mut stats = Stats::default();
        apply_effect(&mut stats, action, params, false).unwrap();
        stats
    }

    #[test]
    fn gains_and_losses() {
        assert_eq!(apply(31, &[1.0]).ap, 1);
        assert_eq!(apply(56, &[2.0]).ap, -2);
        assert_eq!(apply(1055, &[120.0, 0.0]).berserk_mastery, 120);
        assert_eq!(apply(97, &[15.0]).fire_resistance, -15);
    }

    #[test]
    fn armor_keyed_by_fifth_param() {
        assert_eq!(apply(39, &[6.0, 0.0, 0.0, 0.0, 120.0]).armor_given, 6);
        assert_eq!(apply(40, &[4.0, 0.0, 0.0, 0.0, 121.0]).armor_received, -4);

        let mut stats = Stats::default();
        assert_eq!(
            apply_effect(&mut stats, 39, &[6.0, 0.0, 0.0, 0.0, 99.0], false),
            Err(EffectError::UnknownSubtype { action: 39, key: 99 })
        );
    }

    #[test]
    fn element_count_keyed_by_third_param() {
        assert_eq!(apply(1068, &[80.0, 0.0, 3.0]).mastery_3_elements, 80);
        assert_eq!(apply(1068, &[40.0, 0.0, 1.0]).mastery_1_element, 40);
        assert_eq!(apply(1069, &[25.0, 0.0, 2.0]).resistance_2_elements, 25);
    }

    #[test]
    fn no_ops_and_unknown_ids() {
        assert_eq!(apply(400, &[1.0]), Stats::default());
        let mut stats = Stats::default();
        assert_eq!(
            apply_effect(&mut stats, 4242, &[1.0], false),
            Err(EffectError::UnknownAction(4242))
        );
        assert_eq!(effect_kind(194), None);
    }

    #[test]
    fn companions_scale_to_level_fifty() {
        let mut stats = Stats::default();
        apply_effect(&mut stats, 120, &[0.0, 1.6], true).unwrap();
        assert_eq!(stats.elemental_mastery, 80);
    }
}
