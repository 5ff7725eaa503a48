//! Road type classification from OSM tags.

use super::Tags;

/// Road classification, covering the standard `highway` values plus the few
/// synthetic types (roundabouts, coastlines) resolved from other tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadType {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    MotorwayLink,
    TrunkLink,
    PrimaryLink,
    SecondaryLink,
    Tertiary,
    Track,
    Residential,
    Unclassified,
    LivingStreet,
    Service,
    Roundabout,
    Pedestrian,
    Bicycle,
    Coastline,
}

impl RoadType {
    /// Every variant, for exhaustive table tests.
    pub const ALL: [RoadType; 18] = [
        RoadType::Motorway,
        RoadType::Trunk,
        RoadType::Primary,
        RoadType::Secondary,
        RoadType::MotorwayLink,
        RoadType::TrunkLink,
        RoadType::PrimaryLink,
        RoadType::SecondaryLink,
        RoadType::Tertiary,
        RoadType::Track,
        RoadType::Residential,
        RoadType::Unclassified,
        RoadType::LivingStreet,
        RoadType::Service,
        RoadType::Roundabout,
        RoadType::Pedestrian,
        RoadType::Bicycle,
        RoadType::Coastline,
    ];
}

/// Resolve the road type for a tag set.
///
/// `natural=coastline` wins over everything, then `junction=roundabout`,
/// then the `highway` value (case-insensitive). Ways without a recognized
/// `highway` value fall back to [`RoadType::Unclassified`].
pub fn road_type(tags: &Tags) -> RoadType {
    if tags
        .get("natural")
        .is_some_and(|v| v.eq_ignore_ascii_case("coastline"))
    {
        return RoadType::Coastline;
    }

    if tags
        .get("junction")
        .is_some_and(|v| v.eq_ignore_ascii_case("roundabout"))
    {
        return RoadType::Roundabout;
    }

    let Some(highway) = tags.get("highway") else {
        return RoadType::Unclassified;
    };

    match highway.to_ascii_lowercase().as_str() {
        "motorway" => RoadType::Motorway,
        "trunk" => RoadType::Trunk,
        "primary" => RoadType::Primary,
        "secondary" => RoadType::Secondary,
        "motorway_link" => RoadType::MotorwayLink,
        "trunk_link" => RoadType::TrunkLink,
        "primary_link" => RoadType::PrimaryLink,
        "secondary_link" => RoadType::SecondaryLink,
        "tertiary" => RoadType::Tertiary,
        "track" => RoadType::Track,
        "residential" => RoadType::Residential,
        "unclassified" => RoadType::Unclassified,
        "living_street" => RoadType::LivingStreet,
        "service" => RoadType::Service,
        "roundabout" => RoadType::Roundabout,
        "pedestrian" | "footway" | "steps" | "bridleway" => RoadType::Pedestrian,
        "bicycle" | "cycleway" => RoadType::Bicycle,
        "coastline" => RoadType::Coastline,
        _ => RoadType::Unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_highway_lookup() {
        assert_eq!(
            road_type(&tags(&[("highway", "motorway")])),
            RoadType::Motorway
        );
        assert_eq!(
            road_type(&tags(&[("highway", "living_street")])),
            RoadType::LivingStreet
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(
            road_type(&tags(&[("highway", "Residential")])),
            RoadType::Residential
        );
    }

    #[test]
    fn test_coastline_wins_over_highway() {
        let t = tags(&[("natural", "coastline"), ("highway", "residential")]);
        assert_eq!(road_type(&t), RoadType::Coastline);
    }

    #[test]
    fn test_roundabout_wins_over_highway() {
        let t = tags(&[("junction", "roundabout"), ("highway", "primary")]);
        assert_eq!(road_type(&t), RoadType::Roundabout);
    }

    #[test]
    fn test_pedestrian_and_bicycle_synonyms() {
        for hw in ["footway", "steps", "bridleway"] {
            assert_eq!(road_type(&tags(&[("highway", hw)])), RoadType::Pedestrian);
        }
        assert_eq!(
            road_type(&tags(&[("highway", "cycleway")])),
            RoadType::Bicycle
        );
    }

    #[test]
    fn test_unknown_or_missing_highway() {
        assert_eq!(road_type(&tags(&[])), RoadType::Unclassified);
        assert_eq!(
            road_type(&tags(&[("highway", "proposed")])),
            RoadType::Unclassified
        );
    }
}
