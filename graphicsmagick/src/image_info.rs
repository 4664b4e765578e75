use crate::error::{Error, ExceptionInfo, MAGICK_PASS, Result, failure, log_warning};
use crate::image::Image;
use crate::pixel::PixelPacket;
use crate::sys;
use crate::text::{read_buf, write_buf};
use std::ffi::{CStr, CString};
use std::fmt;
use std::os::raw::c_ulong;
use std::ptr::{self, NonNull};

/// Settings consumed when reading, writing or allocating an image.
pub struct ImageInfo {
    raw: NonNull<sys::ImageInfo>,
}

impl ImageInfo {
    /// A fresh copy of the library defaults.
    pub fn new() -> Result<Self> {
        crate::initialize();
        let ptr = unsafe { sys::CloneImageInfo(ptr::null()) };
        NonNull::new(ptr)
            .map(|raw| ImageInfo { raw })
            .ok_or(Error::Alloc("CloneImageInfo()"))
    }

    /// Independent copy of these settings.
    pub fn try_clone(&self) -> Result<Self> {
        let ptr = unsafe { sys::CloneImageInfo(self.raw.as_ptr()) };
        NonNull::new(ptr)
            .map(|raw| ImageInfo { raw })
            .ok_or(Error::Alloc("CloneImageInfo()"))
    }

    fn inner(&self) -> &sys::ImageInfo {
        // SAFETY: raw is non-null and owned by self until drop.
        unsafe { self.raw.as_ref() }
    }

    fn inner_mut(&mut self) -> &mut sys::ImageInfo {
        unsafe { self.raw.as_mut() }
    }

    pub fn filename(&self) -> String {
        read_buf(&self.inner().filename)
    }

    /// Set the file to read. Names longer than `MaxTextExtent - 1` bytes are truncated.
    pub fn set_filename(&mut self, filename: &str) -> Result<()> {
        write_buf(&mut self.inner_mut().filename, filename)
    }

    pub fn quality(&self) -> u32 {
        u32::try_from(self.inner().quality).unwrap_or(u32::MAX)
    }

    /// Encoder quality, 0-100 for JPEG and similar lossy formats.
    pub fn set_quality(&mut self, quality: u32) {
        self.inner_mut().quality = quality as c_ulong;
    }

    pub fn background_color(&self) -> PixelPacket {
        PixelPacket::from_sys(&self.inner().background_color)
    }

    pub fn set_background_color(&mut self, color: PixelPacket) {
        self.inner_mut().background_color = color.to_sys();
    }

    /// Geometry used by raw and pseudo formats, e.g. `"32x24"` for `xc:red`.
    pub fn size(&self) -> Option<String> {
        let ptr = self.inner().size;
        if ptr.is_null() {
            return None;
        }
        // SAFETY: size is either null or a NUL-terminated string owned by the info.
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    pub fn set_size(&mut self, geometry: &str) -> Result<()> {
        let cgeometry = CString::new(geometry)
            .map_err(|_| Error::invalid_param("size contains an interior NUL byte"))?;
        // CloneString frees the previous value and allocates a copy the info owns.
        let status = unsafe { sys::CloneString(&mut self.inner_mut().size, cgeometry.as_ptr()) };
        if status != MAGICK_PASS {
            return Err(Error::Alloc("CloneString()"));
        }
        Ok(())
    }

    /// Read the image named by [`filename`](Self::filename).
    ///
    /// Multi-frame input (animated GIF, multi-page TIFF or PDF) yields the first frame;
    /// the remaining frames are freed.
    pub fn read_image(&self) -> Result<Image> {
        let mut exc = ExceptionInfo::new();
        let ptr = unsafe { sys::ReadImage(self.raw.as_ptr(), exc.as_mut_ptr()) };
        match NonNull::new(ptr) {
            Some(raw) => {
                exc.warn_if_set("while reading file");
                Ok(Image::from_first_frame(raw))
            }
            None => Err(exc.into_error("while reading file")),
        }
    }

    /// Encode `image` to its own filename using these settings.
    ///
    /// The library reports write failures in the image's exception record rather than a
    /// separate one, so the error is read from there.
    pub fn write_image(&self, image: &mut Image) -> Result<()> {
        let status = unsafe { sys::WriteImage(self.raw.as_ptr(), image.as_mut_ptr()) };
        if status != MAGICK_PASS {
            return Err(failure(&image.inner().exception, "in WriteImage()"));
        }
        log_warning(&image.inner().exception, "in WriteImage()");
        tracing::debug!(filename = %image.filename(), quality = self.quality(), "wrote image");
        Ok(())
    }

    /// An empty image carrying these settings.
    pub fn allocate_image(&self) -> Result<Image> {
        let ptr = unsafe { sys::AllocateImage(self.raw.as_ptr()) };
        NonNull::new(ptr)
            .map(Image::from_raw)
            .ok_or(Error::Alloc("AllocateImage()"))
    }
}

impl fmt::Debug for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageInfo")
            .field("filename", &self.filename())
            .field("quality", &self.quality())
            .field("background_color", &self.background_color())
            .field("size", &self.size())
            .finish()
    }
}

impl Drop for ImageInfo {
    fn drop(&mut self) {
        unsafe { sys::DestroyImageInfo(self.raw.as_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Two 2x2 grayscale frames in one plain PGM file.
    const TWO_FRAME_PGM: &str = "P2\n2 2\n255\n0 0 0 0\nP2\n2 2\n255\n255 255 255 255\n";

    #[test]
    fn multi_frame_read_keeps_only_first_frame() {
        let mut file = tempfile::Builder::new().suffix(".pgm").tempfile().unwrap();
        file.write_all(TWO_FRAME_PGM.as_bytes()).unwrap();
        file.flush().unwrap();

        let mut info = ImageInfo::new().unwrap();
        info.set_filename(file.path().to_str().unwrap()).unwrap();
        let image = info.read_image().unwrap();
        assert!(image.inner().next.is_null());
        assert!(image.inner().previous.is_null());
        assert_eq!((image.columns(), image.rows()), (2, 2));
    }

    #[test]
    fn oversized_native_quality_saturates() {
        let mut info = ImageInfo::new().unwrap();
        info.inner_mut().quality = c_ulong::MAX;
        assert_eq!(info.quality(), u32::MAX);
        info.set_quality(92);
        assert_eq!(info.quality(), 92);
    }
}
