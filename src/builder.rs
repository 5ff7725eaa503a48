//! Way-to-arc conversion: junction marking, way splitting, and assembly of
//! the final dense-id graph.

use parking_lot::Mutex;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::info;

use crate::attrs::{self, RoadInfoPool, RoadInformation, Tags};
use crate::geo::Point;
use crate::graph::{Arc, Graph, Vertex};

/// A way as delivered by the entity source: an ordered node-id polyline
/// with its (already filtered) tags.
#[derive(Debug, Clone)]
pub struct WayData {
    pub id: i64,
    pub nodes: Vec<i64>,
    pub tags: Vec<(String, String)>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("way {way} has fewer than two nodes")]
    DegenerateWay { way: i64 },
    #[error("way {way} references unknown node {node}")]
    UnknownNode { way: i64, node: i64 },
}

/// An arc before vertex renumbering: endpoints are original node ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArc {
    pub origin: i64,
    pub destination: i64,
    pub length_mm: u32,
    pub info: u32,
    /// Shape points spanning the arc, including both endpoints.
    pub points: Vec<Point>,
}

/// Mark every node that must become a graph vertex: the first and last node
/// of any way, and every node traversed more than once across all ways.
///
/// Must run over the complete way list before any splitting starts, since
/// shared-node detection needs the global view.
pub fn mark_vertices(ways: &[WayData]) -> FxHashSet<i64> {
    let mut marks = FxHashSet::default();
    let mut seen = FxHashSet::default();

    for way in ways {
        for &node in &way.nodes {
            if !seen.insert(node) {
                marks.insert(node);
            }
        }
        if let (Some(&first), Some(&last)) = (way.nodes.first(), way.nodes.last()) {
            marks.insert(first);
            marks.insert(last);
        }
    }

    marks
}

/// Split one way into arcs at marked nodes.
///
/// Walks the node list accumulating shape points and haversine length, and
/// closes an arc at every marked node past the start of the current
/// accumulation. A way with no internal marks yields exactly one arc; one
/// with k internal marks yields k+1.
pub fn split_way(
    way: &WayData,
    nodes: &FxHashMap<i64, Point>,
    marks: &FxHashSet<i64>,
    info: u32,
) -> Result<Vec<RawArc>, BuildError> {
    if way.nodes.len() < 2 {
        return Err(BuildError::DegenerateWay { way: way.id });
    }

    let point_of = |node: i64| {
        nodes.get(&node).copied().ok_or(BuildError::UnknownNode {
            way: way.id,
            node,
        })
    };

    let mut arcs = Vec::new();
    let mut origin = way.nodes[0];
    let mut prev = point_of(origin)?;
    let mut points = vec![prev];
    let mut length_m = 0.0;

    for &node in &way.nodes[1..] {
        let point = point_of(node)?;
        length_m += prev.distance_to(&point);
        points.push(point);
        prev = point;

        if marks.contains(&node) {
            arcs.push(RawArc {
                origin,
                destination: node,
                length_mm: (length_m * 1000.0).round() as u32,
                info,
                points: std::mem::replace(&mut points, vec![point]),
            });
            origin = node;
            length_m = 0.0;
        }
    }

    Ok(arcs)
}

/// Convert every way into arcs, resolving and interning one road-information
/// record per way.
///
/// Ways are processed in parallel over contiguous chunks; the interning pool
/// is the only shared state and is locked per intern call. Any per-way
/// failure aborts the whole conversion.
pub fn convert(
    ways: &[WayData],
    nodes: &FxHashMap<i64, Point>,
) -> Result<(Vec<RawArc>, Vec<RoadInformation>), BuildError> {
    info!(ways = ways.len(), "marking junction and endpoint nodes");
    let marks = mark_vertices(ways);
    info!(vertices = marks.len(), "marked vertex nodes");

    let pool = Mutex::new(RoadInfoPool::new());

    let arcs: Vec<Vec<RawArc>> = ways
        .par_iter()
        .map(|way| {
            let tags: Tags = way
                .tags
                .iter()
                .filter(|(k, _)| attrs::is_useful_tag(k))
                .cloned()
                .collect();
            // Resolution is pure; only the intern call takes the lock.
            let record = attrs::resolve(&tags);
            let info = pool.lock().get_or_create(record);
            split_way(way, nodes, &marks, info)
        })
        .collect::<Result<_, _>>()?;

    let arcs: Vec<RawArc> = arcs.into_iter().flatten().collect();
    let infos = pool.into_inner().into_infos();
    info!(
        arcs = arcs.len(),
        road_infos = infos.len(),
        "converted ways to arcs"
    );
    Ok((arcs, infos))
}

/// Assemble the final graph: renumber arc endpoints to dense ids in
/// ascending original-id order, drop nodes no arc references, and attach
/// arcs to their origin vertices in arc order.
pub fn assemble(
    map_id: String,
    map_name: String,
    arcs: Vec<RawArc>,
    road_infos: Vec<RoadInformation>,
) -> Graph {
    let mut endpoint_points: FxHashMap<i64, Point> = FxHashMap::default();
    for arc in &arcs {
        endpoint_points.insert(arc.origin, arc.points[0]);
        endpoint_points.insert(arc.destination, arc.points[arc.points.len() - 1]);
    }

    let mut original_ids: Vec<i64> = endpoint_points.keys().copied().collect();
    original_ids.sort_unstable();

    let dense: FxHashMap<i64, u32> = original_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i as u32))
        .collect();

    let mut vertices: Vec<Vertex> = original_ids
        .iter()
        .enumerate()
        .map(|(i, id)| Vertex {
            id: i as u32,
            point: endpoint_points[id],
            successors: Vec::new(),
        })
        .collect();

    for arc in arcs {
        let origin = dense[&arc.origin];
        vertices[origin as usize].successors.push(Arc {
            destination: dense[&arc.destination],
            length_mm: arc.length_mm,
            info: arc.info,
            points: arc.points,
        });
    }

    info!(vertices = vertices.len(), "assembled graph");
    Graph {
        map_id,
        map_name,
        vertices,
        road_infos,
    }
}
