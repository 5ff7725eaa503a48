//! Record bodies shared by both graph formats.
//!
//! Past the header the two formats are byte-identical: counts, per-vertex
//! records, a sentinel, road-information records, a sentinel, per-arc
//! records with delta-encoded shape points, and a closing sentinel.

use std::collections::HashMap;
use std::io::{Read, Write};

use crate::attrs::RoadInformation;
use crate::geo::Point;
use crate::graph::{Arc, Graph, Vertex};

use super::wire::{self, CodecError};

pub const SENTINEL_VERTICES: u8 = 0xFF;
pub const SENTINEL_ROAD_INFOS: u8 = 0xFE;
pub const SENTINEL_ARCS: u8 = 0xFD;

const COORD_SCALE: f64 = 1e6;
const DELTA_SCALE: f64 = 2e5;

/// All graph content except the format-specific header fields.
pub struct GraphBody {
    pub vertices: Vec<Vertex>,
    pub road_infos: Vec<RoadInformation>,
}

/// Write counts, vertex records, road-information records and arc records.
///
/// Road-information file indices are assigned in first-encounter order
/// while walking the successor lists; records no arc references are not
/// written.
pub fn write_body<W: Write>(w: &mut W, graph: &Graph) -> Result<(), CodecError> {
    let mut file_index: HashMap<u32, u32> = HashMap::new();
    let mut order: Vec<u32> = Vec::new();
    for vertex in &graph.vertices {
        for arc in &vertex.successors {
            file_index.entry(arc.info).or_insert_with(|| {
                order.push(arc.info);
                order.len() as u32 - 1
            });
        }
    }

    wire::write_i32(w, wire::checked_i32("road info count", order.len() as i64)?)?;
    wire::write_i32(
        w,
        wire::checked_i32("vertex count", graph.vertices.len() as i64)?,
    )?;

    for vertex in &graph.vertices {
        wire::write_i32(
            w,
            wire::checked_i32(
                "longitude",
                (vertex.point.longitude * COORD_SCALE).round() as i64,
            )?,
        )?;
        wire::write_i32(
            w,
            wire::checked_i32(
                "latitude",
                (vertex.point.latitude * COORD_SCALE).round() as i64,
            )?,
        )?;
        wire::write_u8(
            w,
            wire::checked_u8("successor count", vertex.successors.len())?,
        )?;
    }
    wire::write_u8(w, SENTINEL_VERTICES)?;

    for &pool_idx in &order {
        let info = graph
            .road_infos
            .get(pool_idx as usize)
            .ok_or(CodecError::BadIndex {
                field: "road info",
                value: pool_idx,
            })?;
        wire::write_u8(w, wire::type_to_char(info.road_type))?;

        let speed = info.max_speed / 5;
        if speed > 0x7F {
            return Err(CodecError::FieldOverflow {
                field: "maximum speed",
                value: info.max_speed as i64,
                width: 7,
            });
        }
        let packed = speed as u8 | if info.one_way { 0x80 } else { 0 };
        wire::write_u8(w, packed)?;
        wire::write_u64(w, info.access)?;
        wire::write_str(w, "road name", &info.name)?;
    }
    wire::write_u8(w, SENTINEL_ROAD_INFOS)?;

    for vertex in &graph.vertices {
        for arc in &vertex.successors {
            wire::write_u24(w, "destination id", arc.destination)?;
            wire::write_u24(w, "road info index", file_index[&arc.info])?;
            wire::write_i32(w, wire::checked_i32("arc length", arc.length_mm as i64)?)?;

            // Interior shape points only; both endpoints are implied by the
            // vertex records.
            let n_segments = arc.points.len().saturating_sub(2);
            wire::write_i16(w, wire::checked_i16("segment count", n_segments as i64)?)?;
            for i in 1..=n_segments {
                let dlon = (DELTA_SCALE
                    * (arc.points[i].longitude - arc.points[i - 1].longitude))
                    .round() as i64;
                let dlat = (DELTA_SCALE
                    * (arc.points[i].latitude - arc.points[i - 1].latitude))
                    .round() as i64;
                wire::write_i16(w, wire::checked_i16("longitude delta", dlon)?)?;
                wire::write_i16(w, wire::checked_i16("latitude delta", dlat)?)?;
            }
        }
    }
    wire::write_u8(w, SENTINEL_ARCS)?;

    Ok(())
}

/// Read everything [`write_body`] wrote, reconstructing vertices with their
/// arcs. Interior shape points are rebuilt from the deltas; arc endpoints
/// come from the vertex records.
pub fn read_body<R: Read>(r: &mut R) -> Result<GraphBody, CodecError> {
    let n_infos = non_negative("road info count", wire::read_i32(r)?)?;
    let n_vertices = non_negative("vertex count", wire::read_i32(r)?)?;

    let mut points = Vec::with_capacity(n_vertices);
    let mut successor_counts = Vec::with_capacity(n_vertices);
    for _ in 0..n_vertices {
        let lon = wire::read_i32(r)? as f64 / COORD_SCALE;
        let lat = wire::read_i32(r)? as f64 / COORD_SCALE;
        points.push(Point::new(lon, lat));
        successor_counts.push(wire::read_u8(r)? as usize);
    }
    wire::expect_sentinel(r, SENTINEL_VERTICES)?;

    let mut road_infos = Vec::with_capacity(n_infos);
    for _ in 0..n_infos {
        let road_type = wire::type_from_char(wire::read_u8(r)?);
        let packed = wire::read_u8(r)?;
        let access = wire::read_u64(r)?;
        let name = wire::read_str(r, "road name")?;
        road_infos.push(RoadInformation {
            road_type,
            access,
            one_way: packed & 0x80 != 0,
            max_speed: (packed & 0x7F) as u32 * 5,
            name,
        });
    }
    wire::expect_sentinel(r, SENTINEL_ROAD_INFOS)?;

    let mut vertices: Vec<Vertex> = points
        .iter()
        .enumerate()
        .map(|(i, &point)| Vertex {
            id: i as u32,
            point,
            successors: Vec::new(),
        })
        .collect();

    for origin in 0..n_vertices {
        for _ in 0..successor_counts[origin] {
            let destination = wire::read_u24(r)?;
            if destination as usize >= n_vertices {
                return Err(CodecError::BadIndex {
                    field: "destination id",
                    value: destination,
                });
            }
            let info = wire::read_u24(r)?;
            if info as usize >= n_infos {
                return Err(CodecError::BadIndex {
                    field: "road info index",
                    value: info,
                });
            }
            let length_mm = non_negative("arc length", wire::read_i32(r)?)? as u32;
            let n_segments = wire::read_i16(r)?;
            if n_segments < 0 {
                return Err(CodecError::FieldOverflow {
                    field: "segment count",
                    value: n_segments as i64,
                    width: 16,
                });
            }
            let n_segments = n_segments as usize;

            let mut arc_points = Vec::with_capacity(n_segments + 2);
            let mut prev = points[origin];
            arc_points.push(prev);
            for _ in 0..n_segments {
                let dlon = wire::read_i16(r)? as f64 / DELTA_SCALE;
                let dlat = wire::read_i16(r)? as f64 / DELTA_SCALE;
                prev = Point::new(prev.longitude + dlon, prev.latitude + dlat);
                arc_points.push(prev);
            }
            arc_points.push(points[destination as usize]);

            vertices[origin].successors.push(Arc {
                destination,
                length_mm,
                info,
                points: arc_points,
            });
        }
    }
    wire::expect_sentinel(r, SENTINEL_ARCS)?;

    Ok(GraphBody {
        vertices,
        road_infos,
    })
}

fn non_negative(field: &'static str, v: i32) -> Result<usize, CodecError> {
    usize::try_from(v).map_err(|_| CodecError::FieldOverflow {
        field,
        value: v as i64,
        width: 32,
    })
}
