//! PBF ingestion: extract routable ways and their node coordinates.

use std::path::Path;

use anyhow::{Context, Result};
use osmpbf::{Element, ElementReader};
use rustc_hash::FxHashMap;
use tracing::info;

use crate::attrs::is_useful_tag;
use crate::builder::WayData;
use crate::geo::Point;

pub struct OsmData {
    pub nodes: FxHashMap<i64, Point>,
    pub ways: Vec<WayData>,
}

/// A way is routable if it has a `highway` tag or is a coastline.
fn is_routable<'a>(tags: impl Iterator<Item = (&'a str, &'a str)>) -> bool {
    let mut routable = false;
    for (key, value) in tags {
        match key {
            "highway" => routable = true,
            "natural" if value.eq_ignore_ascii_case("coastline") => routable = true,
            _ => {}
        }
    }
    routable
}

/// Single-pass read of a PBF extract. Every node is kept; ways are kept
/// only when routable, with their tags filtered down to the ones the
/// attribute resolver consumes.
pub fn read_pbf<P: AsRef<Path>>(path: P) -> Result<OsmData> {
    let path = path.as_ref();
    let reader = ElementReader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut nodes = FxHashMap::default();
    let mut ways = Vec::new();

    reader
        .for_each(|element| match element {
            Element::Node(node) => {
                nodes.insert(node.id(), Point::new(node.lon(), node.lat()));
            }
            Element::DenseNode(node) => {
                nodes.insert(node.id(), Point::new(node.lon(), node.lat()));
            }
            Element::Way(way) => {
                if is_routable(way.tags()) {
                    let tags = way
                        .tags()
                        .filter(|(key, _)| is_useful_tag(key))
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect();
                    ways.push(WayData {
                        id: way.id(),
                        nodes: way.refs().collect(),
                        tags,
                    });
                }
            }
            _ => {}
        })
        .with_context(|| format!("failed to parse {}", path.display()))?;

    info!(
        nodes = nodes.len(),
        ways = ways.len(),
        "finished reading {}",
        path.display()
    );

    Ok(OsmData { nodes, ways })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routable_requires_highway_or_coastline() {
        assert!(is_routable([("highway", "residential")].into_iter()));
        assert!(is_routable(
            [("natural", "coastline"), ("name", "Plage")].into_iter()
        ));
        // Classification is case-insensitive, so ingest must be too.
        assert!(is_routable([("natural", "Coastline")].into_iter()));
        assert!(!is_routable([("natural", "water")].into_iter()));
        assert!(!is_routable(
            [("building", "yes"), ("name", "Capitole")].into_iter()
        ));
        assert!(!is_routable(std::iter::empty()));
    }
}
