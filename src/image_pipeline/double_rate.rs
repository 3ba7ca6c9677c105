//! Double-rate (DR) demodulation codec
//!
//! A DR sensor multiplexes two sample streams onto one data path, so each
//! captured ("modulated") row is twice as wide as the sensor row it encodes.
//! This module converts between the two layouts.

mod codec;
mod strategy;
pub mod types;


pub use codec::{
    DEMODULATED_WIDTH_GRANULARITY, DoubleRateCodec, MODULATED_WIDTH_GRANULARITY, RATE_FACTOR,
};
pub use strategy::{ColorInterleave, DemodulationStrategy, MonoInterleave};
pub use types::{DemodulatedImage, ModulatedImage};
