use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use graphicsmagick::{Image, ImageInfo, query_color};

use crate::cli::Cli;

pub fn print_info(args: &Cli) -> Result<()> {
    let image = read_input(&args.input)?;
    println!(
        "{}: {} {}x{}",
        image.filename(),
        image.magick(),
        image.columns(),
        image.rows()
    );
    Ok(())
}

pub fn run_resize(args: &Cli, out_path: &Path) -> Result<()> {
    let image = read_input(&args.input)?;
    let (columns, rows) = target_size(
        (image.columns(), image.rows()),
        args.width,
        args.height,
    )?;
    tracing::info!(
        input = %args.input,
        from = %format!("{}x{}", image.columns(), image.rows()),
        to = %format!("{}x{}", columns, rows),
        filter = %args.filter,
        blur = args.blur,
        "resizing"
    );
    let mut resized = image.resize_with(columns, rows, args.filter, args.blur)?;

    let mut info = ImageInfo::new()?;
    if let Some(quality) = args.quality {
        info.set_quality(quality);
    }
    if let Some(name) = &args.background {
        let color =
            query_color(name).with_context(|| format!("Unknown background color {}", name))?;
        tracing::debug!(color = %color, "background");
        info.set_background_color(color);
    }

    let out = out_path
        .to_str()
        .with_context(|| format!("Output path {} is not valid UTF-8", out_path.display()))?;
    resized.set_filename(out)?;
    info.write_image(&mut resized)
        .with_context(|| format!("Failed to write output {}", out_path.display()))?;

    tracing::info!(output = %out_path.display(), "wrote image");
    Ok(())
}

fn read_input(input: &str) -> Result<Image> {
    graphicsmagick::read_image(input).with_context(|| format!("Failed to read input {}", input))
}

/// Output dimensions; a missing side follows the source aspect ratio.
pub fn target_size(
    source: (u64, u64),
    width: Option<u64>,
    height: Option<u64>,
) -> Result<(u64, u64)> {
    let (src_w, src_h) = source;
    ensure!(src_w > 0 && src_h > 0, "Input image has no pixels");
    let scaled = |num: u64, of: u64, over: u64| -> u64 {
        let v = (num as f64 * of as f64 / over as f64).round() as u64;
        v.max(1)
    };
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        (Some(w), None) => Ok((w, scaled(w, src_h, src_w))),
        (None, Some(h)) => Ok((scaled(h, src_w, src_h), h)),
        (None, None) => bail!("Provide --width, --height, or both"),
    }
}
