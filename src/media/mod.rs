//! Media module for item representation and parsing.

pub mod item;
pub mod parser;

pub use item::{video_url, MediaItem};
pub use parser::{parse_item, parse_items};
