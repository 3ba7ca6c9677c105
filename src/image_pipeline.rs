//! Image processing pipeline module
//!
//! The double-rate codec sits at the centre; readers, writers and the
//! optional debayer stage turn it into a file-to-file conversion.

pub mod common;
pub mod conversions;
pub mod debayer;
pub mod double_rate;
pub mod output;
pub mod raw;

pub use common::{
    DemodError,
    Result,
};

pub use double_rate::{
    ColorInterleave,
    DemodulatedImage,
    DemodulationStrategy,
    DoubleRateCodec,
    ModulatedImage,
    MonoInterleave,
};

pub use raw::{
    BitmapFrameReader,
    ModulatedImageReader,
    RawFrameReader,
};

pub use output::{
    BitmapWriter,
    ImageWriter,
    OutputFormat,
    RawWriter,
    StandardTiffWriter,
    TiffCompression,
};

pub use debayer::{
    BayerPattern,
    CpuDebayer,
    RgbImageData,
};

pub use conversions::{
    ConversionSummary,
    DemodulatePipeline,
    DemodulationConfig,
    DemodulationConfigBuilder,
};
