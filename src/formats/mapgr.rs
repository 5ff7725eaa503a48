//! Current graph format (`.mapgr`, version 8).
//!
//! Header: magic, version, a fixed 32-byte UTF-8 map id and a map name
//! string; the rest of the file is the shared record body.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::graph::Graph;

use super::records;
use super::wire::{self, CodecError};

pub const MAGIC: u32 = 0x208B_C3B3;
pub const VERSION: i32 = 8;
pub const MAP_ID_LEN: usize = 32;
pub const DEFAULT_EXTENSION: &str = "mapgr";

/// Check that the map id and name are encodable before any processing
/// starts.
pub fn validate(map_id: &str, map_name: &str) -> Result<(), CodecError> {
    let len = map_id.as_bytes().len();
    if len > MAP_ID_LEN {
        return Err(CodecError::MapIdTooLong {
            len,
            max: MAP_ID_LEN,
        });
    }
    if map_name.is_empty() {
        return Err(CodecError::MissingMapName);
    }
    Ok(())
}

pub fn write<W: Write>(w: &mut W, graph: &Graph) -> Result<(), CodecError> {
    validate(&graph.map_id, &graph.map_name)?;

    wire::write_u32(w, MAGIC)?;
    wire::write_i32(w, VERSION)?;

    let mut id_field = [0u8; MAP_ID_LEN];
    let id_bytes = graph.map_id.as_bytes();
    id_field[..id_bytes.len()].copy_from_slice(id_bytes);
    w.write_all(&id_field)?;

    wire::write_str(w, "map name", &graph.map_name)?;
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

    let mut id_field = [0u8; MAP_ID_LEN];
    r.read_exact(&mut id_field)?;
    let id_len = id_field
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(MAP_ID_LEN);
    let map_id = std::str::from_utf8(&id_field[..id_len])
        .map_err(|_| CodecError::BadString("map id"))?
        .to_string();

    let map_name = wire::read_str(r, "map name")?;
    let body = records::read_body(r)?;

    Ok(Graph {
        map_id,
        map_name,
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
