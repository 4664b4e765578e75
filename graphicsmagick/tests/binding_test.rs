use anyhow::Result;
use graphicsmagick::{Error, FilterType, Image, ImageInfo, PixelPacket, Severity, query_color};

fn solid(color: &str, size: &str) -> Result<Image> {
    let mut info = ImageInfo::new()?;
    info.set_size(size)?;
    info.set_filename(&format!("xc:{color}"))?;
    Ok(info.read_image()?)
}

#[test]
fn reads_pseudo_image_with_size() -> Result<()> {
    let image = solid("red", "32x24")?;
    assert_eq!(image.columns(), 32);
    assert_eq!(image.rows(), 24);
    assert_eq!(image.magick(), "XC");
    Ok(())
}

#[test]
fn missing_file_reports_native_exception() {
    let err = graphicsmagick::read_image("fixtures/!!missing!!.png").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("while reading file: "), "{msg}");
    match err {
        Error::Native { exception, .. } => {
            assert_ne!(exception.severity, Severity::Warning);
            assert!(!exception.reason.is_empty());
        }
        Error::Unknown { .. } => {}
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn resize_produces_new_image() -> Result<()> {
    let image = solid("blue", "40x20")?;
    let small = image.resize(10, 5, "Lanczos", 1.0)?;
    assert_eq!((small.columns(), small.rows()), (10, 5));
    assert_eq!((image.columns(), image.rows()), (40, 20));

    let default_filter = image.resize(20, 10, "", 1.0)?;
    assert_eq!(default_filter.columns(), 20);

    let typed = image.resize_with(8, 4, FilterType::Mitchell, 0.9)?;
    assert_eq!(typed.rows(), 4);
    Ok(())
}

#[test]
fn resize_rejects_unknown_filter() -> Result<()> {
    let image = solid("green", "4x4")?;
    let err = image.resize(2, 2, "Nearest", 1.0).unwrap_err();
    assert!(matches!(&err, Error::UnknownFilter(name) if name == "Nearest"));
    assert_eq!(err.to_string(), "unknown filter: Nearest");
    Ok(())
}

#[test]
fn writes_and_reads_back() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let png = dir.path().join("out.png");
    let png = png.to_str().expect("utf-8 temp path");

    let mut image = solid("white", "12x7")?;
    graphicsmagick::write_image(&mut image, png, None)?;
    assert_eq!(image.filename(), png);

    let back = graphicsmagick::read_image(png)?;
    assert_eq!((back.columns(), back.rows()), (12, 7));
    assert_eq!(back.magick(), "PNG");
    assert_eq!(back.filename(), png);
    Ok(())
}

#[test]
fn writes_jpeg_with_quality() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let jpg = dir.path().join("out.jpg");
    let jpg = jpg.to_str().expect("utf-8 temp path");

    let mut info = ImageInfo::new()?;
    info.set_quality(40);
    let mut image = solid("orange", "16x16")?;
    image.set_filename(jpg)?;
    info.write_image(&mut image)?;

    let back = graphicsmagick::read_image(jpg)?;
    assert_eq!(back.magick(), "JPEG");
    assert_eq!(back.columns(), 16);
    Ok(())
}

#[test]
fn write_failure_uses_image_exception() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let bad = dir.path().join("no-such-dir").join("out.png");
    let mut image = solid("black", "2x2")?;
    let err = graphicsmagick::write_image(&mut image, bad.to_str().expect("utf-8"), None)
        .unwrap_err();
    assert!(err.to_string().starts_with("in WriteImage(): "), "{err}");
    assert!(matches!(err, Error::Native { .. }), "{err}");
    let exception = err.exception().expect("write error carries the image exception");
    assert!(!exception.reason.is_empty());
    assert_ne!(exception.severity, Severity::Warning);
    Ok(())
}

#[test]
fn image_info_settings_round_trip() -> Result<()> {
    let mut info = ImageInfo::new()?;
    info.set_filename("photos/a.jpg")?;
    info.set_quality(85);
    let color = PixelPacket::new(0x33, 0x66, 0x99, 0);
    info.set_background_color(color);
    info.set_size("64x48")?;

    assert_eq!(info.filename(), "photos/a.jpg");
    assert_eq!(info.quality(), 85);
    assert_eq!(info.background_color(), color);
    assert_eq!(info.size().as_deref(), Some("64x48"));

    let copy = info.try_clone()?;
    info.set_quality(10);
    info.set_filename("b.png")?;
    assert_eq!(copy.quality(), 85);
    assert_eq!(copy.filename(), "photos/a.jpg");
    assert_eq!(copy.size().as_deref(), Some("64x48"));
    Ok(())
}

#[test]
fn filename_with_nul_is_rejected() -> Result<()> {
    let mut info = ImageInfo::new()?;
    assert!(matches!(
        info.set_filename("a\0b.png"),
        Err(Error::InvalidParam(_))
    ));
    Ok(())
}

#[test]
fn long_filename_is_truncated() -> Result<()> {
    let mut info = ImageInfo::new()?;
    let long = "x".repeat(10_000);
    info.set_filename(&long)?;
    let stored = info.filename();
    assert!(stored.len() < long.len());
    assert!(long.starts_with(&stored));
    Ok(())
}

#[test]
fn allocates_empty_image() -> Result<()> {
    let mut image = graphicsmagick::allocate_image()?;
    assert_eq!(image.columns(), 0);
    image.set_filename("blank.png")?;
    assert_eq!(image.filename(), "blank.png");
    Ok(())
}

#[test]
fn clone_is_independent() -> Result<()> {
    let mut image = solid("gray", "6x3")?;
    let copy = image.try_clone()?;
    image.set_filename("changed.png")?;
    assert_eq!((copy.columns(), copy.rows()), (6, 3));
    assert_ne!(copy.filename(), "changed.png");
    Ok(())
}

#[test]
fn queries_named_colors() -> Result<()> {
    assert_eq!(query_color("red")?.hex(), "ff000000");
    assert_eq!(query_color("#336699")?.hex(), "33669900");
    let white = query_color("white")?;
    assert_eq!((white.red, white.green, white.blue), (255, 255, 255));
    Ok(())
}

#[test]
fn unknown_color_fails() {
    let err = query_color("definitely-not-a-colour").unwrap_err();
    assert!(
        err.to_string().starts_with("in QueryColorDatabase(): "),
        "{err}"
    );
    assert!(matches!(
        query_color("re\0d"),
        Err(Error::InvalidParam(_))
    ));
}
