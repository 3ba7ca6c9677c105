use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing::debug;

use dr_demod::image_pipeline::{
    BayerPattern, BitmapFrameReader, BitmapWriter, ConversionSummary, DemodulatePipeline,
    DemodulationConfig, DoubleRateCodec, ImageWriter, ModulatedImageReader, OutputFormat,
    RawFrameReader, RawWriter, StandardTiffWriter, TiffCompression,
};

/// `Window_W` of the reference double-rate camera
pub const DEFAULT_WINDOW_W: usize = 2048;

const DEFAULT_INPUT: &str = "image.dr1";
const DEFAULT_OUTPUT_STEM: &str = "image";

#[derive(Parser, Debug)]
#[command(name = "dr_demod")]
#[command(about = "Demodulate images captured by double-rate cameras")]
#[command(version)]
pub struct Args {
    /// Modulated frames: headerless .dr1 raw data, or .bmp/.png captures
    #[arg(default_value = DEFAULT_INPUT)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only, default: image.raw)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Demodulated width, the camera's Window_W (default: 2048)
    #[arg(short, long, conflicts_with = "modulated_width")]
    pub width: Option<usize>,

    /// Modulated row width, instead of --width
    #[arg(long)]
    pub modulated_width: Option<usize>,

    /// Horizontal binning the frame was captured with
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub binning: u32,

    /// Use the colour-sensor interleave order
    #[arg(long)]
    pub color: bool,

    /// Output format (default: from the output extension, else raw)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Demosaic the demodulated frame to RGB
    #[arg(long, value_enum)]
    pub debayer: Option<PatternArg>,

    /// TIFF compression
    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    pub compression: CompressionArg,

    /// Demodulate rows on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Raw,
    Bmp,
    Tiff,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternArg {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Raw => OutputFormat::Raw,
            FormatArg::Bmp => OutputFormat::Bmp,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
}

impl From<PatternArg> for BayerPattern {
    fn from(pattern: PatternArg) -> Self {
        match pattern {
            PatternArg::Rggb => BayerPattern::Rggb,
            PatternArg::Bggr => BayerPattern::Bggr,
            PatternArg::Grbg => BayerPattern::Grbg,
            PatternArg::Gbrg => BayerPattern::Gbrg,
        }
    }
}

impl From<CompressionArg> for TiffCompression {
    fn from(compression: CompressionArg) -> Self {
        match compression {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::DeflateFast => TiffCompression::DeflateFast,
            CompressionArg::DeflateBalanced => TiffCompression::DeflateBalanced,
            CompressionArg::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

/// Conversion settings shared by every input.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: DemodulationConfig,
    /// Row width assumed for headerless inputs
    pub raw_modulated_width: usize,
}

impl Settings {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let binning = args.binning as usize;

        // Window_W reports the unbinned sensor width.
        let demodulated_width = match (args.width, args.modulated_width) {
            (Some(width), _) => Some(width / binning),
            (None, Some(modulated)) => Some(
                DoubleRateCodec::demodulated_width(modulated)
                    .with_context(|| format!("invalid modulated width {}", modulated))?,
            ),
            (None, None) => None,
        };

        let raw_demodulated_width = demodulated_width.unwrap_or(DEFAULT_WINDOW_W / binning);
        let raw_modulated_width = DoubleRateCodec::modulated_width(raw_demodulated_width)
            .with_context(|| format!("invalid demodulated width {}", raw_demodulated_width))?;

        debug!(
            raw_modulated_width,
            ?demodulated_width,
            binning,
            "Resolved frame geometry"
        );

        let config = DemodulationConfig::builder()
            .color_variant(args.color)
            .demodulated_width(demodulated_width)
            .parallel(!args.sequential)
            .debayer(args.debayer.map(BayerPattern::from))
            .compression(args.compression.into())
            .build();

        Ok(Self {
            config,
            raw_modulated_width,
        })
    }
}

/// One input/output pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
}

pub fn plan_jobs(args: &Args) -> anyhow::Result<Vec<Job>> {
    if args.inputs.len() > 1 && args.output.is_some() {
        bail!("--output can only be used with a single input");
    }

    if let [input] = args.inputs.as_slice() {
        let format = match (args.format, &args.output) {
            (Some(format), _) => format.into(),
            (None, Some(output)) => OutputFormat::from_path(output),
            (None, None) => OutputFormat::Raw,
        };
        let output = args.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{}.{}", DEFAULT_OUTPUT_STEM, format.extension()))
        });
        return Ok(vec![Job {
            input: input.clone(),
            output,
            format,
        }]);
    }

    let format = args.format.map(OutputFormat::from).unwrap_or_default();
    Ok(args
        .inputs
        .iter()
        .map(|input| Job {
            input: input.clone(),
            output: demodulated_path(input, format),
            format,
        })
        .collect())
}

/// `image_3_mod.bmp` becomes `image_3_demod.<ext>`, anything else `<stem>_demod.<ext>`.
pub fn demodulated_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_suffix("_mod").unwrap_or(&stem);
    input.with_file_name(format!("{}_demod.{}", stem, format.extension()))
}

fn is_bitmap(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref(),
        Some("bmp") | Some("png")
    )
}

pub fn convert(settings: &Settings, job: &Job) -> anyhow::Result<ConversionSummary> {
    let summary = if is_bitmap(&job.input) {
        convert_with(BitmapFrameReader, settings, job)
    } else {
        convert_with(RawFrameReader::new(settings.raw_modulated_width), settings, job)
    };
    summary.with_context(|| format!("failed to demodulate {}", job.input.display()))
}

fn convert_with<R: ModulatedImageReader>(
    reader: R,
    settings: &Settings,
    job: &Job,
) -> dr_demod::image_pipeline::Result<ConversionSummary> {
    let config = settings.config.clone();
    match job.format {
        OutputFormat::Raw => run_pipeline(reader, RawWriter, config, job),
        OutputFormat::Bmp => run_pipeline(reader, BitmapWriter, config, job),
        OutputFormat::Tiff => run_pipeline(reader, StandardTiffWriter, config, job),
    }
}

fn run_pipeline<R: ModulatedImageReader, W: ImageWriter>(
    reader: R,
    writer: W,
    config: DemodulationConfig,
    job: &Job,
) -> dr_demod::image_pipeline::Result<ConversionSummary> {
    DemodulatePipeline::with_custom(reader, writer, config).convert_file(&job.input, &job.output)
}
