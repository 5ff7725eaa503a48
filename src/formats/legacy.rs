//! Legacy graph format (`.map`, version 4).
//!
//! Same record body as the current format behind an older header: the map
//! is identified by a numeric id and a zone number instead of a string id
//! and display name. The zone is always written as zero.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::graph::Graph;

use super::records;
use super::wire::{self, CodecError};

pub const MAGIC: u32 = 0x00BA_CAFF;
pub const VERSION: i32 = 4;
pub const DEFAULT_ZONE: i32 = 0;
pub const DEFAULT_EXTENSION: &str = "map";

/// The legacy header only carries a numeric map id; reject anything else
/// before processing starts.
pub fn validate(map_id: &str) -> Result<i32, CodecError> {
    map_id
        .parse::<i32>()
        .map_err(|_| CodecError::NonNumericMapId(map_id.to_string()))
}

pub fn write<W: Write>(w: &mut W, graph: &Graph) -> Result<(), CodecError> {
    let map_id = validate(&graph.map_id)?;

    wire::write_u32(w, MAGIC)?;
    wire::write_i32(w, VERSION)?;
    wire::write_i32(w, map_id)?;
    wire::write_i32(w, DEFAULT_ZONE)?;
    records::write_body(w, graph)
}

pub fn read<R: Read>(r: &mut R) -> Result<Graph, CodecError> {
    let magic = wire::read_u32(r)?;
    if magic != MAGIC {
        return Err(CodecError::BadMagic {
            expected: MAGIC,
            found: magic,
        });
    }
    let version = wire::read_i32(r)?;
    if version != VERSION {
        return Err(CodecError::BadVersion {
            expected: VERSION,
            found: version,
        });
    }

    let map_id = wire::read_i32(r)?;
    let _zone = wire::read_i32(r)?;
    let body = records::read_body(r)?;

    Ok(Graph {
        map_id: map_id.to_string(),
        map_name: String::new(),
        vertices: body.vertices,
        road_infos: body.road_infos,
    })
}

pub fn write_file<P: AsRef<Path>>(path: P, graph: &Graph) -> Result<(), CodecError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, graph)?;
    writer.flush()?;
    Ok(())
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Graph, CodecError> {
    let file = File::open(path.as_ref())?;
    read(&mut BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{RoadInformation, RoadType};
    use crate::geo::Point;
    use crate::graph::{Arc, Vertex};
    use tempfile::NamedTempFile;

    fn sample_graph(map_id: &str) -> Graph {
        let p0 = Point::new(1.433333, 43.6);
        let p1 = Point::new(1.4337, 43.6001);
        Graph {
            map_id: map_id.to_string(),
            map_name: String::new(),
            vertices: vec![
                Vertex {
                    id: 0,
                    point: p0,
                    successors: vec![Arc {
                        destination: 1,
                        length_mm: 34_560,
                        info: 0,
                        points: vec![p0, p1],
                    }],
                },
                Vertex {
                    id: 1,
                    point: p1,
                    successors: Vec::new(),
                },
            ],
            road_infos: vec![RoadInformation {
                road_type: RoadType::Motorway,
                access: 0x0111_1111_1110_0000,
                one_way: true,
                max_speed: 130,
                name: String::new(),
            }],
        }
    }

    #[test]
    fn test_round_trip() {
        let graph = sample_graph("31555");
        let tmpfile = NamedTempFile::new().unwrap();
        write_file(tmpfile.path(), &graph).unwrap();
        let decoded = read_file(tmpfile.path()).unwrap();

        assert_eq!(decoded.map_id, "31555");
        assert_eq!(decoded.map_name, "");
        assert_eq!(decoded.vertices.len(), 2);
        assert_eq!(decoded.n_arcs(), 1);

        let arc = &decoded.vertices[0].successors[0];
        assert_eq!(arc.destination, 1);
        assert_eq!(arc.length_mm, 34_560);
        let info = &decoded.road_infos[arc.info as usize];
        assert_eq!(info.road_type, RoadType::Motorway);
        assert!(info.one_way);
        assert_eq!(info.max_speed, 130);
    }

    #[test]
    fn test_non_numeric_map_id() {
        let graph = sample_graph("toulouse");
        let mut buf = Vec::new();
        let err = write(&mut buf, &graph).unwrap_err();
        assert!(matches!(err, CodecError::NonNumericMapId(id) if id == "toulouse"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_rejects_current_format_header() {
        let mut graph = sample_graph("31555");
        graph.map_id = "toulouse".to_string();
        graph.map_name = "Toulouse".to_string();
        let mut buf = Vec::new();
        super::super::mapgr::write(&mut buf, &graph).unwrap();
        assert!(matches!(
            read(&mut buf.as_slice()),
            Err(CodecError::BadMagic { .. })
        ));
    }
}
