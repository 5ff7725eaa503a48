//! Big-endian wire primitives and codec errors shared by the graph formats.
//!
//! Both historical formats were written with a big-endian stream writer;
//! strings are u16-length-prefixed UTF-8.

use std::io::{Read, Write};

use thiserror::Error;

use crate::attrs::RoadType;

#[derive(Debug, Error)]
pub enum CodecError {
    /// A value does not fit its fixed-width field. Always a hard failure,
    /// never a silent truncation.
    #[error("{field} value {value} does not fit a {width}-bit field")]
    FieldOverflow {
        field: &'static str,
        value: i64,
        width: u8,
    },
    #[error("map id is {len} bytes in UTF-8, at most {max} allowed")]
    MapIdTooLong { len: usize, max: usize },
    #[error("map id {0:?} is not a numeric identifier")]
    NonNumericMapId(String),
    #[error("a map name is required by this format")]
    MissingMapName,
    #[error("bad magic number: expected {expected:#010x}, got {found:#010x}")]
    BadMagic { expected: u32, found: u32 },
    #[error("unsupported format version {found}, expected {expected}")]
    BadVersion { expected: i32, found: i32 },
    #[error("expected sentinel {expected:#04x}, found {found:#04x}")]
    BadSentinel { expected: u8, found: u8 },
    #[error("{field} index {value} is out of range")]
    BadIndex { field: &'static str, value: u32 },
    #[error("invalid UTF-8 in {0}")]
    BadString(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn write_u8<W: Write>(w: &mut W, v: u8) -> Result<(), CodecError> {
    w.write_all(&[v])?;
    Ok(())
}

pub fn write_u16<W: Write>(w: &mut W, v: u16) -> Result<(), CodecError> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_i16<W: Write>(w: &mut W, v: i16) -> Result<(), CodecError> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_i32<W: Write>(w: &mut W, v: i32) -> Result<(), CodecError> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_u32<W: Write>(w: &mut W, v: u32) -> Result<(), CodecError> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

pub fn write_u64<W: Write>(w: &mut W, v: u64) -> Result<(), CodecError> {
    w.write_all(&v.to_be_bytes())?;
    Ok(())
}

/// Write a 24-bit unsigned value, high byte first.
pub fn write_u24<W: Write>(w: &mut W, field: &'static str, v: u32) -> Result<(), CodecError> {
    if v >= 1 << 24 {
        return Err(CodecError::FieldOverflow {
            field,
            value: v as i64,
            width: 24,
        });
    }
    let bytes = v.to_be_bytes();
    w.write_all(&bytes[1..4])?;
    Ok(())
}

/// Write a u16-length-prefixed UTF-8 string.
pub fn write_str<W: Write>(w: &mut W, field: &'static str, s: &str) -> Result<(), CodecError> {
    let bytes = s.as_bytes();
    let len = checked_u16(field, bytes.len())?;
    write_u16(w, len)?;
    w.write_all(bytes)?;
    Ok(())
}

pub fn read_u8<R: Read>(r: &mut R) -> Result<u8, CodecError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub fn read_u16<R: Read>(r: &mut R) -> Result<u16, CodecError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

pub fn read_i16<R: Read>(r: &mut R) -> Result<i16, CodecError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(i16::from_be_bytes(buf))
}

pub fn read_i32<R: Read>(r: &mut R) -> Result<i32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

pub fn read_u32<R: Read>(r: &mut R) -> Result<u32, CodecError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

pub fn read_u64<R: Read>(r: &mut R) -> Result<u64, CodecError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

pub fn read_u24<R: Read>(r: &mut R) -> Result<u32, CodecError> {
    let mut buf = [0u8; 3];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes([0, buf[0], buf[1], buf[2]]))
}

pub fn read_str<R: Read>(r: &mut R, field: &'static str) -> Result<String, CodecError> {
    let len = read_u16(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| CodecError::BadString(field))
}

pub fn expect_sentinel<R: Read>(r: &mut R, expected: u8) -> Result<(), CodecError> {
    let found = read_u8(r)?;
    if found != expected {
        return Err(CodecError::BadSentinel { expected, found });
    }
    Ok(())
}

pub fn checked_i16(field: &'static str, v: i64) -> Result<i16, CodecError> {
    i16::try_from(v).map_err(|_| CodecError::FieldOverflow {
        field,
        value: v,
        width: 16,
    })
}

pub fn checked_i32(field: &'static str, v: i64) -> Result<i32, CodecError> {
    i32::try_from(v).map_err(|_| CodecError::FieldOverflow {
        field,
        value: v,
        width: 32,
    })
}

pub fn checked_u8(field: &'static str, v: usize) -> Result<u8, CodecError> {
    u8::try_from(v).map_err(|_| CodecError::FieldOverflow {
        field,
        value: v as i64,
        width: 8,
    })
}

pub fn checked_u16(field: &'static str, v: usize) -> Result<u16, CodecError> {
    u16::try_from(v).map_err(|_| CodecError::FieldOverflow {
        field,
        value: v as i64,
        width: 16,
    })
}

/// Road-type code used in the on-disk road-information records.
pub fn type_to_char(road_type: RoadType) -> u8 {
    match road_type {
        RoadType::Motorway => b'a',
        RoadType::Trunk => b'b',
        RoadType::Primary => b'c',
        RoadType::Secondary => b'd',
        RoadType::MotorwayLink => b'e',
        RoadType::TrunkLink => b'f',
        RoadType::PrimaryLink => b'g',
        RoadType::SecondaryLink => b'h',
        RoadType::Tertiary => b'i',
        RoadType::Residential => b'j',
        RoadType::Unclassified => b'k',
        RoadType::LivingStreet => b'm',
        RoadType::Service => b'n',
        RoadType::Roundabout => b'o',
        RoadType::Pedestrian => b'p',
        RoadType::Bicycle => b'q',
        RoadType::Track => b'r',
        RoadType::Coastline => b'z',
    }
}

/// Inverse of [`type_to_char`]; unknown codes map to `Unclassified`.
pub fn type_from_char(c: u8) -> RoadType {
    match c {
        b'a' => RoadType::Motorway,
        b'b' => RoadType::Trunk,
        b'c' => RoadType::Primary,
        b'd' => RoadType::Secondary,
        b'e' => RoadType::MotorwayLink,
        b'f' => RoadType::TrunkLink,
        b'g' => RoadType::PrimaryLink,
        b'h' => RoadType::SecondaryLink,
        b'i' => RoadType::Tertiary,
        b'j' => RoadType::Residential,
        b'm' => RoadType::LivingStreet,
        b'n' => RoadType::Service,
        b'o' => RoadType::Roundabout,
        b'p' => RoadType::Pedestrian,
        b'q' => RoadType::Bicycle,
        b'r' => RoadType::Track,
        b'z' => RoadType::Coastline,
        _ => RoadType::Unclassified,
    }
}
