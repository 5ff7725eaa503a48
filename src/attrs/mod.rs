//! Road attribute resolution: mapping raw OSM tags to the type, speed,
//! one-way and access attributes carried by every arc, plus the interning
//! pool that deduplicates the resulting records.

use std::collections::HashMap;

pub mod access;
pub mod pool;
pub mod road_type;
pub mod speed;

pub use pool::RoadInfoPool;
pub use road_type::RoadType;

/// Tag set of a single way, keyed by tag name.
pub type Tags = HashMap<String, String>;

/// Resolved road attributes shared by every arc split from the same way
/// (and, through interning, by arcs of structurally identical ways).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoadInformation {
    pub road_type: RoadType,
    /// Per-traveler-class permission mask, see [`access`].
    pub access: u64,
    pub one_way: bool,
    /// Maximum speed in km/h.
    pub max_speed: u32,
    pub name: String,
}

/// Non-access tags that feed attribute resolution.
const USEFUL_TAGS: [&str; 6] = ["name", "highway", "natural", "junction", "maxspeed", "oneway"];

/// Whether a tag key participates in attribute resolution.
pub fn is_useful_tag(key: &str) -> bool {
    USEFUL_TAGS.contains(&key) || access::PRECEDENCE.contains(&key)
}

/// Resolve the one-way flag: an explicit `oneway` tag wins; without one,
/// motorways, motorway/trunk/primary links and roundabouts are one-way.
pub fn one_way(tags: &Tags, road_type: RoadType) -> bool {
    if let Some(value) = tags.get("oneway") {
        let value = value.to_ascii_lowercase();
        return value == "yes" || value == "true" || value == "1";
    }
    matches!(
        road_type,
        RoadType::Motorway
            | RoadType::MotorwayLink
            | RoadType::TrunkLink
            | RoadType::PrimaryLink
            | RoadType::Roundabout
    )
}

/// Resolve the full attribute record for a way's tag set.
pub fn resolve(tags: &Tags) -> RoadInformation {
    let road_type = road_type::road_type(tags);
    RoadInformation {
        road_type,
        access: access::access(tags, road_type),
        one_way: one_way(tags, road_type),
        max_speed: speed::max_speed(tags, road_type),
        name: tags.get("name").cloned().unwrap_or_default(),
    }
}
