//! Write a solid color swatch: `cargo run --example swatch -- "#336699" 64x64 swatch.png`
use anyhow::{Context, Result};
use graphicsmagick::{ImageInfo, query_color};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let color = args.get(1).map(String::as_str).unwrap_or("red");
    let size = args.get(2).map(String::as_str).unwrap_or("32x32");
    let out = args.get(3).map(String::as_str).unwrap_or("swatch.png");

    let packet = query_color(color).with_context(|| format!("Unknown color {color}"))?;
    println!("{color} -> {}", packet.hex());

    let mut info = ImageInfo::new()?;
    info.set_size(size)?;
    info.set_filename(&format!("xc:{color}"))?;
    let mut image = info.read_image()?;
    println!("created {}x{} {}", image.columns(), image.rows(), image.magick());

    graphicsmagick::write_image(&mut image, out, None)?;
    println!("Wrote {out}");
    Ok(())
}
