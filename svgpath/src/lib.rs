//! Compiles SVG path descriptions (the `d` attribute grammar) into absolute
//! path elements and renderer geometry, with a cache so each description is
//! compiled once per scale.

pub mod arc;
pub mod cache;
pub mod error;
pub mod export;
pub mod geometry;
pub mod markers;
pub mod parse;
pub mod types;

pub use cache::{get_or_parse, CacheConfig, CacheStats, PathCache};
pub use error::ParseError;
pub use geometry::{GeometricPath, ParsedPath, PathOp, PathSink};
pub use parse::{parse, tokenize};
pub use types::{ArcParams, ElementKind, PathCommand, PathElement, Point, Position, Rect};
