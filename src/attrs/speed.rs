//! Maximum speed resolution from `maxspeed` tags and road-type defaults.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::road_type::RoadType;
use super::Tags;

const DEFAULT_MAXIMUM_SPEED: u32 = 50;
const DEFAULT_WALK_SPEED: u32 = 5;
const DEFAULT_BICYCLE_SPEED: u32 = 14;

/// Implicit speed limits for `maxspeed=<country>:<zone>` codes, as documented
/// on the OpenStreetMap wiki.
static COUNTRY_SPEEDS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("AT:urban", 50),
        ("AT:rural", 100),
        ("AT:trunk", 100),
        ("AT:motorway", 130),
        ("BE:urban", 50),
        ("BE:rural", 90),
        ("BE:trunk", 120),
        ("BE:motorway", 120),
        ("CH:urban", 50),
        ("CH:rural", 80),
        ("CH:trunk", 100),
        ("CH:motorway", 120),
        ("CZ:urban", 50),
        ("CZ:rural", 90),
        ("CZ:trunk", 110),
        ("CZ:motorway", 130),
        ("DK:urban", 50),
        ("DK:rural", 80),
        ("DK:motorway", 130),
        ("DE:living_street", 7),
        ("DE:urban", 50),
        ("DE:rural", 100),
        ("DE:motorway", 130),
        ("FI:urban", 50),
        ("FI:rural", 80),
        ("FI:trunk", 100),
        ("FI:motorway", 120),
        ("FR:urban", 50),
        ("FR:rural", 90),
        ("FR:trunk", 110),
        ("FR:motorway", 130),
        ("GR:urban", 50),
        ("GR:rural", 90),
        ("GR:trunk", 110),
        ("GR:motorway", 130),
        ("HU:urban", 50),
        ("HU:rural", 90),
        ("HU:trunk", 110),
        ("HU:motorway", 130),
        ("IT:urban", 50),
        ("IT:rural", 90),
        ("IT:trunk", 110),
        ("IT:motorway", 130),
        ("JP:national", 60),
        ("JP:motorway", 100),
        ("LT:living_street", 20),
        ("LT:urban", 50),
        ("LT:rural", 90),
        ("LT:trunk", 120),
        ("LT:motorway", 130),
        ("PL:living_street", 20),
        ("PL:urban", 50),
        ("PL:rural", 90),
        ("PL:trunk", 100),
        ("PL:motorway", 140),
        ("RO:urban", 50),
        ("RO:rural", 90),
        ("RO:trunk", 100),
        ("RO:motorway", 130),
        ("RU:living_street", 20),
        ("RU:rural", 90),
        ("RU:urban", 60),
        ("RU:motorway", 110),
        ("SK:urban", 50),
        ("SK:rural", 90),
        ("SK:trunk", 130),
        ("SK:motorway", 130),
        ("SI:urban", 50),
        ("SI:rural", 90),
        ("SI:trunk", 110),
        ("SI:motorway", 130),
        ("ES:urban", 50),
        ("ES:rural", 90),
        ("ES:trunk", 100),
        ("ES:motorway", 120),
        ("SE:urban", 50),
        ("SE:rural", 70),
        ("SE:trunk", 90),
        ("SE:motorway", 110),
        ("GB:nsl_single", 48),
        ("GB:nsl_dual", 113),
        ("GB:motorway", 113),
        ("UA:urban", 50),
        ("UA:rural", 90),
        ("UA:trunk", 110),
        ("UA:motorway", 130),
        ("UZ:living_street", 30),
        ("UZ:urban", 70),
        ("UZ:rural", 100),
        ("UZ:motorway", 110),
    ])
});

/// Default maximum speed in km/h for a road type.
pub fn default_speed(road_type: RoadType) -> u32 {
    match road_type {
        RoadType::Motorway => 130,
        RoadType::Trunk => 110,
        RoadType::Primary => 90,
        RoadType::Secondary => 70,
        RoadType::MotorwayLink
        | RoadType::TrunkLink
        | RoadType::PrimaryLink
        | RoadType::SecondaryLink
        | RoadType::Tertiary => DEFAULT_MAXIMUM_SPEED,
        RoadType::Residential
        | RoadType::Unclassified
        | RoadType::LivingStreet
        | RoadType::Service
        | RoadType::Roundabout
        | RoadType::Track => 30,
        RoadType::Bicycle => DEFAULT_BICYCLE_SPEED,
        RoadType::Pedestrian => DEFAULT_WALK_SPEED,
        RoadType::Coastline => 0,
    }
}

fn speed_for_code(code: &str, default: u32) -> u32 {
    COUNTRY_SPEEDS.get(code).copied().unwrap_or(default)
}

/// Resolve the maximum speed in km/h from a tag set, falling back to the
/// road-type default when the `maxspeed` tag is absent or unusable.
///
/// Handles `none`/`signal` (default), `walk` (fixed walking speed), implicit
/// `<country>:<zone>` codes, and numeric values with an optional `mph` or
/// `knots` unit suffix.
pub fn max_speed(tags: &Tags, road_type: RoadType) -> u32 {
    let default = default_speed(road_type);
    let Some(raw) = tags.get("maxspeed") else {
        return default;
    };

    match raw.to_ascii_lowercase().as_str() {
        "none" | "signal" => return default,
        "walk" => return DEFAULT_WALK_SPEED,
        _ => {}
    }

    // Zone codes keep their canonical casing (FR:rural, GB:nsl_single).
    if raw.contains(':') {
        return speed_for_code(raw, default);
    }

    let mut parts = raw.split(' ');
    let speed = parts
        .next()
        .and_then(|t| t.parse::<u32>().ok())
        .unwrap_or(default);
    match parts.next() {
        Some(unit) if unit.eq_ignore_ascii_case("knots") => (speed as f64 * 1.852) as u32,
        Some(unit) if unit.eq_ignore_ascii_case("mph") => (speed as f64 * 1.609) as u32,
        _ => speed,
    }
}
