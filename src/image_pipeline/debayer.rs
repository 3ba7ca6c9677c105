//! Debayering module for colour-sensor frames recovered from double-rate captures

pub mod cpu_debayer;
pub mod types;

pub use cpu_debayer::CpuDebayer;
pub use types::{BayerPattern, RgbImageData};
