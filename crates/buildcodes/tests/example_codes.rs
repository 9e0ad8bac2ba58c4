//! Known builds and their encoded sizes.

use buildcodes::base2048::TAIL;
use buildcodes::{AllocatedStats, Build, Item, decode_build, encode_build};
use gear_core::{ClassName, Elements};

fn osamodas_build() -> Build {
    let stats = AllocatedStats {
        percent_hp: 33,
        elemental_res: 10,
        distance_mastery: 40,
        elemental_mastery: 2,
        force_of_will: 20,
        dodge: 22,
        percent_crit: 20,
        crit_mastery: 22,
        ap: true,
        damage_inflicted: true,
        major_res: true,
        ..AllocatedStats::default()
    };

    let ele3 = Elements::AIR | Elements::FIRE | Elements::EARTH;
    let ele2 = Elements::FIRE | Elements::AIR;
    let items = [
        (21207, ele3),
        (26599, ele2),
        (25075, ele3),
        (22371, ele2),
        (26620, ele2),
        (22407, ele2),
        (26020, Elements::empty()),
        (26756, Elements::empty()),
        (22383, ele2),
        (25804, Elements::empty()),
        (25970, Elements::empty()),
        (19055, ele3),
    ]
    .into_iter()
    .map(|(id, elements)| Item::new(id).with_mastery(elements))
    .collect();

    Build {
        classname: Some(ClassName::Osamodas),
        level: 170,
        stats,
        items,
        deck: vec![7340, 7336, 7328, 7335, 5144],
        ..Build::default()
    }
}

#[test]
fn osamodas_build_payload_layout() {
    let packed = rmp_serde::to_vec(&osamodas_build()).unwrap();
    assert_eq!(packed.len(), 151);
    assert_eq!(
        hex::encode(&packed),
        concat!(
            "9701ccaadc001d210a0000000200280000160000141400160000000000c3c2c2c2c2c3c3c0c0",
            "9c95cd52d70700c0c095cd67e70500c0c095cd61f30700c0c095cd57630500c0c095cd67fc0500c0c0",
            "95cd57870500c0c095cd65a40000c0c095cd68840000c0c095cd576f0500c0c095cd64cc0000c0c0",
            "95cd65720000c0c095cd4a6f0700c0c0",
            "95cd1caccd1ca8cd1ca0cd1ca7cd1418",
        )
    );
}

#[test]
fn osamodas_build_with_deck() {
    let build = osamodas_build();
    let code = encode_build(&build).unwrap();
    assert_eq!(code.chars().count(), 78);
    // 106 deflated bytes leave one bit for the tail symbol
    assert_eq!(code.chars().last(), Some(TAIL[0]));
    assert_eq!(decode_build(&code).unwrap(), build);
}

#[test]
fn osamodas_build_without_deck() {
    let build = Build {
        deck: Vec::new(),
        ..osamodas_build()
    };
    let code = encode_build(&build).unwrap();
    assert_eq!(code.chars().count(), 67);

    let decoded = decode_build(&code).unwrap();
    assert_eq!(decoded.classname, Some(ClassName::Osamodas));
    assert_eq!(decoded.level, 170);
    assert_eq!(decoded.items.len(), 12);
    assert_eq!(decoded.items[0].item_id, 21207);
}
