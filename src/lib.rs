//! Road-network graphs from OpenStreetMap extracts.
//!
//! The pipeline reads a PBF extract, resolves routing attributes per way,
//! splits ways into directed arcs at junction nodes, and serializes the
//! resulting graph in one of two binary formats.

pub mod attrs;
pub mod builder;
pub mod formats;
pub mod geo;
pub mod graph;
pub mod ingest;

pub use attrs::{RoadInformation, RoadType};
pub use builder::{BuildError, WayData};
pub use formats::CodecError;
pub use geo::Point;
pub use graph::{Arc, CostModel, Graph, Path, PathError, Vertex};
