//! Data-row production: value resolution and row projection.

pub mod projector;
pub mod resolver;

pub use projector::{FaultPolicy, Row, RowProjector};
pub use resolver::ValueResolver;
