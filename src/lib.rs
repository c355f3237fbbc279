//! TextGrid - Praat annotation library
//!
//! This library models Praat TextGrids (named tiers of labelled intervals and
//! points on a shared timeline), edits them, and reads and writes the long
//! and short text forms Praat uses on disk.

mod block_parser;
pub mod csv;
pub mod decode;
pub mod error;
pub mod file;
pub mod parser;
pub mod query;
pub mod search_tree;
pub mod textgrid;
pub mod transforms;
pub mod types;
pub mod util;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use csv::{CsvOptions, serialize_textgrid_to_csv};
pub use decode::decode_buffer;
pub use error::TextgridError;
pub use file::{SerializeOptions, TextgridForm, TextgridFormatter, serialize_textgrid};
pub use parser::{parse_textgrid, parse_textgrid_bytes};
pub use search_tree::SearchTree;
pub use textgrid::Textgrid;
pub use transforms::normalize::prep_for_saving;
pub use types::entry::{AnyEntry, Interval, Point, TierKind, TimedEntry};
pub use types::policy::{CollisionPolicy, CropMode, FindMode, InsertSpacePolicy};
pub use types::tier::{AnyTier, IntervalTier, PointTier, Tier};
pub use util::MIN_INTERVAL_LENGTH;

pub type Result<T> = std::result::Result<T, TextgridError>;
