//! Payload decoding

pub mod parser;

pub use parser::{ParseError, PositionRecord, SensorRecord, SnapshotParser, TrilaterationRecord};
