//! Helpers for the fixed `char[MaxTextExtent]` buffers embedded in native structs.

use crate::error::{Error, Result};
use std::os::raw::c_char;

/// Read a NUL-terminated buffer. A buffer without a terminator is read to its end.
pub(crate) fn read_buf(buf: &[c_char]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    let bytes: Vec<u8> = buf[..len].iter().map(|&c| c as u8).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Copy `src` into `dst`, truncating to leave room for the terminator.
///
/// Truncation backs off to a char boundary so the stored text stays valid UTF-8.
pub(crate) fn write_buf(dst: &mut [c_char], src: &str) -> Result<()> {
    if src.contains('\0') {
        return Err(Error::invalid_param("string contains an interior NUL byte"));
    }
    let Some(max) = dst.len().checked_sub(1) else {
        return Err(Error::invalid_param("destination buffer has no room"));
    };
    let mut end = src.len().min(max);
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    for (slot, &b) in dst.iter_mut().zip(&src.as_bytes()[..end]) {
        *slot = b as c_char;
    }
    dst[end] = 0;
    Ok(())
}
