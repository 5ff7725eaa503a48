//! On-disk graph formats.
//!
//! Two container formats share one record body: the current `.mapgr`
//! format with a string map id and display name, and the legacy `.map`
//! format with a numeric map id.

pub mod legacy;
pub mod mapgr;
pub mod records;
pub mod wire;

pub use wire::CodecError;
