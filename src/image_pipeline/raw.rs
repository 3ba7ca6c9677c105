//! Modulated frame reading module
//!
//! Readers turn the bytes of an input file into a [`ModulatedImage`](crate::image_pipeline::ModulatedImage).

mod reader;
mod raw_frame_reader;
mod bitmap_reader;

pub use reader::ModulatedImageReader;
pub use raw_frame_reader::RawFrameReader;
pub use bitmap_reader::BitmapFrameReader;
