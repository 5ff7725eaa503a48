//! Graph model: vertices owning their outgoing arcs, plus a path helper
//! used to validate reconstructed routes.
//!
//! Vertices live in a dense arena (`Graph::vertices`, indexed by vertex id)
//! and arcs refer to their destination vertex and their road-information
//! record by index, so the structure has no reference cycles and serializes
//! with fixed-width ids.

use thiserror::Error;

use crate::attrs::RoadInformation;
use crate::geo::Point;

/// A graph node: a junction or way endpoint, with its outgoing arcs in
/// attachment order.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Dense id, equal to this vertex's index in `Graph::vertices`.
    pub id: u32,
    pub point: Point,
    pub successors: Vec<Arc>,
}

/// A directed edge. The arc is owned by its origin vertex; `destination`
/// and `info` are indices into the graph's vertex and road-information
/// arenas.
#[derive(Debug, Clone)]
pub struct Arc {
    pub destination: u32,
    /// Length in millimeters.
    pub length_mm: u32,
    pub info: u32,
    /// Shape points spanning the arc, including both endpoints.
    pub points: Vec<Point>,
}

impl Arc {
    pub fn length_m(&self) -> f64 {
        self.length_mm as f64 / 1000.0
    }

    /// Travel time in seconds at the road's maximum speed.
    pub fn minimum_travel_time(&self, info: &RoadInformation) -> f64 {
        self.length_m() * 3.6 / info.max_speed as f64
    }
}

#[derive(Debug)]
pub struct Graph {
    pub map_id: String,
    pub map_name: String,
    pub vertices: Vec<Vertex>,
    pub road_infos: Vec<RoadInformation>,
}

impl Graph {
    pub fn n_arcs(&self) -> usize {
        self.vertices.iter().map(|v| v.successors.len()).sum()
    }

    pub fn info(&self, arc: &Arc) -> &RoadInformation {
        &self.road_infos[arc.info as usize]
    }

    /// Vertex closest to the given point, by great-circle distance.
    pub fn closest_vertex(&self, point: &Point) -> Option<u32> {
        self.vertices
            .iter()
            .min_by(|a, b| {
                point
                    .distance_to(&a.point)
                    .total_cmp(&point.distance_to(&b.point))
            })
            .map(|v| v.id)
    }
}

/// Cost used when picking between parallel arcs during path construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostModel {
    ShortestLength,
    ShortestTime,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("no arc found between vertices {from} and {to}")]
    NoArc { from: u32, to: u32 },
    #[error("vertex id {0} is out of range")]
    UnknownVertex(u32),
}

/// An ordered list of contiguous arcs, referenced as (origin vertex,
/// successor index) pairs into the graph. Built from known vertex
/// sequences to validate that the graph connects them; not a router.
#[derive(Debug)]
pub struct Path<'a> {
    graph: &'a Graph,
    arcs: Vec<(u32, usize)>,
}

impl<'a> Path<'a> {
    /// Build a path following `vertex_ids`, picking for every consecutive
    /// pair the cheapest arc under `cost` that connects them.
    pub fn from_vertices(
        graph: &'a Graph,
        vertex_ids: &[u32],
        cost: CostModel,
    ) -> Result<Self, PathError> {
        let mut arcs = Vec::new();
        for pair in vertex_ids.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let vertex = graph
                .vertices
                .get(from as usize)
                .ok_or(PathError::UnknownVertex(from))?;
            if graph.vertices.get(to as usize).is_none() {
                return Err(PathError::UnknownVertex(to));
            }

            let best = vertex
                .successors
                .iter()
                .enumerate()
                .filter(|(_, arc)| arc.destination == to)
                .min_by(|(_, a), (_, b)| {
                    arc_cost(graph, a, cost).total_cmp(&arc_cost(graph, b, cost))
                })
                .map(|(i, _)| i)
                .ok_or(PathError::NoArc { from, to })?;
            arcs.push((from, best));
        }
        Ok(Self { graph, arcs })
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs
            .iter()
            .map(|&(origin, idx)| &self.graph.vertices[origin as usize].successors[idx])
    }

    /// A path is valid when every arc starts where the previous one ended.
    pub fn is_valid(&self) -> bool {
        self.arcs.windows(2).all(|w| {
            let (origin, idx) = w[0];
            let arc = &self.graph.vertices[origin as usize].successors[idx];
            arc.destination == w[1].0
        })
    }

    pub fn total_length_m(&self) -> f64 {
        self.arcs().map(|arc| arc.length_m()).sum()
    }

    pub fn minimum_travel_time(&self) -> f64 {
        self.arcs()
            .map(|arc| arc.minimum_travel_time(self.graph.info(arc)))
            .sum()
    }
}

fn arc_cost(graph: &Graph, arc: &Arc, cost: CostModel) -> f64 {
    match cost {
        CostModel::ShortestLength => arc.length_m(),
        CostModel::ShortestTime => arc.minimum_travel_time(graph.info(arc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::RoadType;

    fn test_info(max_speed: u32) -> RoadInformation {
        RoadInformation {
            road_type: RoadType::Residential,
            access: 0x0111_1111_1111_1111,
            one_way: false,
            max_speed,
            name: String::new(),
        }
    }

    /// Three vertices in a row, 0 -> 1 -> 2, plus a slower parallel arc
    /// 0 -> 1 on a second road record.
    fn test_graph() -> Graph {
        let p0 = Point::new(1.0, 44.0);
        let p1 = Point::new(1.001, 44.0);
        let p2 = Point::new(1.002, 44.0);
        let arc = |dest: u32, length_mm: u32, info: u32, points: Vec<Point>| Arc {
            destination: dest,
            length_mm,
            info,
            points,
        };
        Graph {
            map_id: "test".to_string(),
            map_name: "test map".to_string(),
            vertices: vec![
                Vertex {
                    id: 0,
                    point: p0,
                    successors: vec![
                        arc(1, 80_000, 0, vec![p0, p1]),
                        arc(1, 95_000, 1, vec![p0, p1]),
                    ],
                },
                Vertex {
                    id: 1,
                    point: p1,
                    successors: vec![arc(2, 80_000, 0, vec![p1, p2])],
                },
                Vertex {
                    id: 2,
                    point: p2,
                    successors: vec![],
                },
            ],
            road_infos: vec![test_info(30), test_info(90)],
        }
    }

    #[test]
    fn test_closest_vertex() {
        let graph = test_graph();
        let near_p2 = Point::new(1.0021, 44.0001);
        assert_eq!(graph.closest_vertex(&near_p2), Some(2));
    }

    #[test]
    fn test_path_picks_cheapest_arc_by_length() {
        let graph = test_graph();
        let path = Path::from_vertices(&graph, &[0, 1, 2], CostModel::ShortestLength).unwrap();
        assert!(path.is_valid());
        assert!((path.total_length_m() - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_path_picks_cheapest_arc_by_time() {
        let graph = test_graph();
        // The 95 m arc rides a 90 km/h record, so it is faster than the
        // 80 m arc at 30 km/h.
        let path = Path::from_vertices(&graph, &[0, 1], CostModel::ShortestTime).unwrap();
        let arc = path.arcs().next().unwrap();
        assert_eq!(arc.length_mm, 95_000);
    }

    #[test]
    fn test_path_missing_arc_names_both_vertices() {
        let graph = test_graph();
        let err = Path::from_vertices(&graph, &[2, 0], CostModel::ShortestLength).unwrap_err();
        assert_eq!(err, PathError::NoArc { from: 2, to: 0 });
    }

    #[test]
    fn test_minimum_travel_time() {
        let graph = test_graph();
        let path = Path::from_vertices(&graph, &[1, 2], CostModel::ShortestTime).unwrap();
        // 80 m at 30 km/h.
        assert!((path.minimum_travel_time() - 80.0 * 3.6 / 30.0).abs() < 1e-9);
    }
}
