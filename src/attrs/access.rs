//! Access permission resolution into a 64-bit nibble-group bitmask.
//!
//! Each traveler class owns one 4-bit group of the mask; the value of the
//! group encodes the kind of access (yes, private, destination, ...). The
//! highest nibble is never used so the mask always fits a signed 64-bit
//! field on the wire.

use super::road_type::RoadType;
use super::Tags;

// Value masks: a repeating nibble pattern, one nibble per traveler class.
pub const MASK_YES: u64 = 0x0111_1111_1111_1111;
pub const MASK_NO: u64 = 0x0;
pub const MASK_PRIVATE: u64 = 0x0222_2222_2222_2222;
pub const MASK_DESTINATION: u64 = 0x0333_3333_3333_3333;
pub const MASK_DELIVERY: u64 = 0x0444_4444_4444_4444;
pub const MASK_CUSTOMERS: u64 = 0x0555_5555_5555_5555;
pub const MASK_FORESTRY: u64 = 0x0666_6666_6666_6666;
pub const MASK_UNKNOWN: u64 = 0x0fff_ffff_ffff_ffff;

// Key masks: which nibble groups a tag key controls.
pub const MASK_ALL: u64 = 0x0fff_ffff_ffff_ffff;
pub const MASK_FOOT: u64 = 0x0000_0000_0000_000f;
pub const MASK_VEHICLE: u64 = 0x0fff_ffff_ffff_ff00;
pub const MASK_BICYCLE: u64 = 0x0000_0000_0000_0f00;
pub const MASK_MOTOR_VEHICLE: u64 = 0x0fff_ffff_ffff_f000;
pub const MASK_SMALL_MOTORCYCLE: u64 = 0x0000_0000_0000_f000;
pub const MASK_AGRICULTURAL: u64 = 0x0000_0000_000f_0000;
pub const MASK_MOTORCYCLE: u64 = 0x0000_0000_00f0_0000;
pub const MASK_MOTORCAR: u64 = 0x0000_0000_0f00_0000;
pub const MASK_HEAVY_GOODS: u64 = 0x0000_0000_f000_0000;
pub const MASK_PUBLIC_TRANSPORT: u64 = 0x0000_00f0_0000_0000;

/// Access tag keys in precedence order: later keys override the nibble
/// groups they control, so more specific keys must come last.
pub const PRECEDENCE: [&str; 15] = [
    "access",
    "foot",
    "vehicle",
    "bicycle",
    "motor_vehicle",
    "motorcycle",
    "moped",
    "mofa",
    "motorcar",
    "agricultural",
    "hgv",
    "psv",
    "bus",
    "minibus",
    "share_taxi",
];

fn key_mask(key: &str) -> Option<u64> {
    match key {
        "access" => Some(MASK_ALL),
        "foot" => Some(MASK_FOOT),
        "vehicle" => Some(MASK_VEHICLE),
        "bicycle" => Some(MASK_BICYCLE),
        "motor_vehicle" => Some(MASK_MOTOR_VEHICLE),
        "moped" | "mofa" => Some(MASK_SMALL_MOTORCYCLE),
        "agricultural" => Some(MASK_AGRICULTURAL),
        "motorcycle" => Some(MASK_MOTORCYCLE),
        "motorcar" => Some(MASK_MOTORCAR),
        "hgv" => Some(MASK_HEAVY_GOODS),
        "psv" | "bus" | "minibus" | "share_taxi" => Some(MASK_PUBLIC_TRANSPORT),
        _ => None,
    }
}

fn value_mask(value: &str) -> u64 {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "permissive" | "designated" | "use_sidepath" | "dismount" => {
            MASK_YES
        }
        "no" | "false" | "0" | "discouraged" => MASK_NO,
        "private" => MASK_PRIVATE,
        "destination" => MASK_DESTINATION,
        "delivery" => MASK_DELIVERY,
        "customers" => MASK_CUSTOMERS,
        "agricultural" | "forestry" => MASK_FORESTRY,
        _ => MASK_UNKNOWN,
    }
}

/// Default access mask for a road type, before any access tag applies.
pub fn default_access(road_type: RoadType) -> u64 {
    match road_type {
        RoadType::Motorway | RoadType::MotorwayLink | RoadType::Trunk | RoadType::TrunkLink => {
            (MASK_MOTOR_VEHICLE & !MASK_SMALL_MOTORCYCLE & !MASK_AGRICULTURAL) & MASK_YES
        }
        RoadType::Primary
        | RoadType::PrimaryLink
        | RoadType::Secondary
        | RoadType::SecondaryLink
        | RoadType::Tertiary
        | RoadType::Residential
        | RoadType::LivingStreet
        | RoadType::Roundabout
        | RoadType::Service => MASK_ALL & MASK_YES,
        RoadType::Track => (MASK_ALL & !MASK_PUBLIC_TRANSPORT & !MASK_HEAVY_GOODS) & MASK_YES,
        RoadType::Bicycle => MASK_BICYCLE & MASK_YES,
        RoadType::Pedestrian => (MASK_FOOT | MASK_BICYCLE) & MASK_YES,
        RoadType::Coastline | RoadType::Unclassified => MASK_ALL & MASK_UNKNOWN,
    }
}

/// Resolve the access mask for a tag set.
///
/// Starts from the road-type default, then applies every present access tag
/// in [`PRECEDENCE`] order; each tag replaces only the nibble groups
/// selected by its key mask.
pub fn access(tags: &Tags, road_type: RoadType) -> u64 {
    let mut access = default_access(road_type);

    for key in PRECEDENCE {
        let Some(value) = tags.get(key) else {
            continue;
        };
        let Some(key_mask) = key_mask(key) else {
            continue;
        };
        let value_mask = value_mask(value);
        access = (key_mask & value_mask) | (access & !key_mask);
    }

    access
}
