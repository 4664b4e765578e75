use std::path::PathBuf;

use clap::{Parser, builder::ValueHint};
use graphicsmagick::FilterType;

/// Command-line arguments for gm-thumb.
#[derive(Parser, Debug)]
#[command(
    name = "gm-thumb",
    about = "Resize an image with GraphicsMagick and write it back out.",
    author,
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Image to read; anything GraphicsMagick can decode, including `file.pdf[0]`
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub input: String,

    /// Output path; the extension picks the format (defaults to <stem>-thumb.<ext>)
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Target width in pixels (aspect ratio kept when omitted)
    #[arg(long, short = 'W', value_parser = clap::value_parser!(u64).range(1..))]
    pub width: Option<u64>,

    /// Target height in pixels (aspect ratio kept when omitted)
    #[arg(long, short = 'H', value_parser = clap::value_parser!(u64).range(1..))]
    pub height: Option<u64>,

    /// Resampling filter (Point, Box, Triangle, ..., Lanczos, Sinc)
    #[arg(long, short = 'f', default_value = "Lanczos", value_parser = parse_filter)]
    pub filter: FilterType,

    /// Blur factor: > 1 is blurry, < 1 is sharp
    #[arg(long, default_value_t = 1.0, value_parser = parse_blur)]
    pub blur: f64,

    /// Encoder quality for lossy formats (0-100)
    #[arg(long, short = 'q', value_parser = clap::value_parser!(u32).range(0..=100))]
    pub quality: Option<u32>,

    /// Background color name or hex, e.g. "white" or "#336699"
    #[arg(long, value_name = "COLOR")]
    pub background: Option<String>,

    /// Print format, dimensions and filename of the input, then exit
    #[arg(long)]
    pub info: bool,
}

fn parse_filter(s: &str) -> Result<FilterType, String> {
    s.parse().map_err(|_| {
        let names: Vec<_> = FilterType::ALL
            .iter()
            .map(FilterType::as_str)
            .filter(|n| !n.is_empty())
            .collect();
        format!("unknown filter '{}'; expected one of {}", s, names.join(", "))
    })
}

fn parse_blur(s: &str) -> Result<f64, String> {
    let blur: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if blur.is_finite() && blur > 0.0 {
        Ok(blur)
    } else {
        Err("blur must be a positive number".to_string())
    }
}
