//! Output writing module
//!
//! Demodulated frames can be written as headerless raw bytes, BMP or TIFF.

mod writer;
mod raw_writer;
mod bitmap_writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::ImageWriter;
pub use raw_writer::RawWriter;
pub use bitmap_writer::BitmapWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{OutputFormat, TiffCompression};
