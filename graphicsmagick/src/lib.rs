//! Safe Rust bindings for a subset of the [GraphicsMagick](http://www.graphicsmagick.org/)
//! C API.
//!
//! All decoding, resizing, color lookup and encoding happens inside the native library;
//! this crate owns the native handles and translates arguments and failures:
//! - [`ImageInfo`] carries read/write settings (filename, quality, background color, size)
//!   and reads, writes and allocates images.
//! - [`Image`] owns decoded pixels and exposes dimensions, filename and resizing.
//! - [`PixelPacket`] is an 8-bit-per-channel color, looked up by name with [`query_color`].
//! - [`Error`] wraps the native exception record of a failed call.
//!
//! Every handle releases its native resource when dropped.
//!
//! ```no_run
//! # fn main() -> graphicsmagick::Result<()> {
//! let image = graphicsmagick::read_image("photo.jpg")?;
//! let mut thumb = image.resize(160, 120, "Lanczos", 1.0)?;
//! graphicsmagick::write_image(&mut thumb, "thumb.jpg", Some(85))?;
//! # Ok(())
//! # }
//! ```

/// Low-level bindings to GraphicsMagick. Most users should favor the safe wrappers
/// re-exported from this crate.
pub use graphicsmagick_sys as sys;

mod error;
mod filter;
mod image;
mod image_info;
mod pixel;
mod text;

pub use error::{Error, Exception, Result, Severity};
pub use filter::FilterType;
pub use image::Image;
pub use image_info::ImageInfo;
pub use pixel::{PixelPacket, query_color};

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the native library. Runs `InitializeMagick` once per process; every
/// constructor in this crate calls it, so calling it directly is only needed to pay the
/// start-up cost early.
pub fn initialize() {
    INIT.call_once(|| {
        tracing::debug!("initializing GraphicsMagick");
        unsafe { sys::InitializeMagick(std::ptr::null()) }
    });
}

/// Read the image at `path` with default settings.
///
/// `path` is passed to the library verbatim, so format prefixes (`png:-`), frame
/// selectors (`doc.pdf[0]`) and pseudo formats (`xc:red`) work as they do on the `gm`
/// command line.
pub fn read_image(path: &str) -> Result<Image> {
    let mut info = ImageInfo::new()?;
    info.set_filename(path)?;
    info.read_image()
}

/// Allocate an empty image with default settings.
pub fn allocate_image() -> Result<Image> {
    ImageInfo::new()?.allocate_image()
}

/// Write `image` to `path`, optionally overriding the encoder quality.
pub fn write_image(image: &mut Image, path: &str, quality: Option<u32>) -> Result<()> {
    let mut info = ImageInfo::new()?;
    if let Some(quality) = quality {
        info.set_quality(quality);
    }
    image.set_filename(path)?;
    info.write_image(image)
}
