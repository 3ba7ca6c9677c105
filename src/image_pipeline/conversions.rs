//! Pipeline conversions module
//!
//! Orchestrates reading a modulated frame, demodulating it and writing the result.

mod dr_demodulate;
pub mod types;

#[cfg(test)]
mod tests;

pub use dr_demodulate::DemodulatePipeline;
pub use types::{ConversionSummary, DemodulationConfig, DemodulationConfigBuilder};
