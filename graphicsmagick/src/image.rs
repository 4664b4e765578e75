use crate::error::{Error, ExceptionInfo, Result};
use crate::filter::FilterType;
use crate::sys;
use crate::text::{read_buf, write_buf};
use std::fmt;
use std::os::raw::c_ulong;
use std::ptr::{self, NonNull};

/// A decoded image owned by this handle.
pub struct Image {
    raw: NonNull<sys::Image>,
}

impl Image {
    pub(crate) fn from_raw(raw: NonNull<sys::Image>) -> Self {
        Image { raw }
    }

    /// Own the first frame of a frame list, freeing any frames linked after it.
    pub(crate) fn from_first_frame(raw: NonNull<sys::Image>) -> Self {
        let head = raw.as_ptr();
        // SAFETY: head is a valid list head returned by the library; the tail is unlinked
        // before it is destroyed so no frame is freed twice.
        unsafe {
            let tail = (*head).next;
            if !tail.is_null() {
                (*head).next = ptr::null_mut();
                (*tail).previous = ptr::null_mut();
                let mut dropped = 0usize;
                let mut frame = tail;
                while !frame.is_null() {
                    dropped += 1;
                    frame = (*frame).next;
                }
                tracing::debug!(dropped, "discarding trailing frames");
                sys::DestroyImageList(tail);
            }
        }
        Image { raw }
    }

    pub(crate) fn inner(&self) -> &sys::Image {
        // SAFETY: raw is non-null and owned by self until drop.
        unsafe { self.raw.as_ref() }
    }

    fn inner_mut(&mut self) -> &mut sys::Image {
        unsafe { self.raw.as_mut() }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut sys::Image {
        self.raw.as_ptr()
    }

    /// Width in pixels.
    pub fn columns(&self) -> u64 {
        self.inner().columns as u64
    }

    /// Height in pixels.
    pub fn rows(&self) -> u64 {
        self.inner().rows as u64
    }

    pub fn filename(&self) -> String {
        read_buf(&self.inner().filename)
    }

    /// Set the path the image is written to. The extension (or a `fmt:` prefix) picks
    /// the encoder.
    pub fn set_filename(&mut self, filename: &str) -> Result<()> {
        write_buf(&mut self.inner_mut().filename, filename)
    }

    /// Format tag of the decoder that produced this image, e.g. `"JPEG"`.
    pub fn magick(&self) -> String {
        read_buf(&self.inner().magick)
    }

    /// Resize into a new image, picking the filter by name (see [`FilterType`]).
    ///
    /// Unknown filter names fail before anything is handed to the library.
    pub fn resize(&self, columns: u64, rows: u64, filter: &str, blur: f64) -> Result<Image> {
        let filter: FilterType = filter.parse()?;
        self.resize_with(columns, rows, filter, blur)
    }

    /// Resize into a new image. `blur` > 1 blurs, < 1 sharpens; 1.0 leaves the filter as is.
    pub fn resize_with(
        &self,
        columns: u64,
        rows: u64,
        filter: FilterType,
        blur: f64,
    ) -> Result<Image> {
        let columns = to_c_ulong(columns, "columns")?;
        let rows = to_c_ulong(rows, "rows")?;
        let mut exc = ExceptionInfo::new();
        let ptr = unsafe {
            sys::ResizeImage(
                self.raw.as_ptr(),
                columns,
                rows,
                filter.to_sys(),
                blur,
                exc.as_mut_ptr(),
            )
        };
        match NonNull::new(ptr) {
            Some(raw) => {
                exc.warn_if_set("in ResizeImage()");
                Ok(Image::from_raw(raw))
            }
            None => Err(exc.into_error("in ResizeImage()")),
        }
    }

    /// Deep copy of pixels and metadata.
    pub fn try_clone(&self) -> Result<Image> {
        let mut exc = ExceptionInfo::new();
        let ptr = unsafe { sys::CloneImage(self.raw.as_ptr(), 0, 0, 1, exc.as_mut_ptr()) };
        NonNull::new(ptr)
            .map(Image::from_raw)
            .ok_or_else(|| exc.into_error("in CloneImage()"))
    }
}

// c_ulong is 32 bits on LLP64 targets.
fn to_c_ulong(value: u64, what: &str) -> Result<c_ulong> {
    c_ulong::try_from(value)
        .map_err(|_| Error::invalid_param(format!("{what} {value} does not fit the native size")))
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("columns", &self.columns())
            .field("rows", &self.rows())
            .field("magick", &self.magick())
            .field("filename", &self.filename())
            .finish()
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        unsafe { sys::DestroyImage(self.raw.as_ptr()) }
    }
}
