use crate::sys;
use std::ffi::CStr;
use std::fmt;
use std::os::raw::{c_char, c_ulong};

// MagickPass lives in a header that api.h does not export.
pub(crate) const MAGICK_PASS: u32 = 1;

/// Severity class of a native exception, derived from its `ExceptionType` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Codes below 400: the call may still have produced a result.
    Warning,
    /// Codes 400-699: the call failed.
    Error,
    /// Codes 700 and above: the library considers itself unusable.
    FatalError,
}

impl Severity {
    /// Classify a raw `ExceptionType` value. `UndefinedException` (0) has no severity.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => None,
            c if c < 400 => Some(Severity::Warning),
            c if c < 700 => Some(Severity::Error),
            _ => Some(Severity::FatalError),
        }
    }
}

/// Owned copy of a populated native exception record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    pub severity: Severity,
    /// Raw `ExceptionType` value reported by the library.
    pub code: u32,
    pub reason: String,
    pub description: String,
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.reason, self.description)
        }
    }
}

/// Error produced by the safe wrappers around GraphicsMagick.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A native call failed and left an exception record behind.
    #[error("{context}: {exception}")]
    Native {
        context: &'static str,
        exception: Exception,
    },

    /// A native call failed without describing why.
    #[error("{context}: unknown error")]
    Unknown { context: &'static str },

    /// The filter name is not in the filter table.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// A native allocation returned null.
    #[error("allocation failed in {0}")]
    Alloc(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParam(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The native exception record behind this error, if there was one.
    pub fn exception(&self) -> Option<&Exception> {
        match self {
            Error::Native { exception, .. } => Some(exception),
            _ => None,
        }
    }

    pub(crate) fn invalid_param(msg: impl Into<String>) -> Self {
        Error::InvalidParam(msg.into())
    }
}

/// A native `ExceptionInfo` scoped to a single call.
///
/// Boxed so the address handed to the library stays put; released on drop.
pub(crate) struct ExceptionInfo {
    raw: Box<sys::ExceptionInfo>,
}

impl ExceptionInfo {
    pub(crate) fn new() -> Self {
        // SAFETY: ExceptionInfo is plain pointers and integers; all-zero is a valid
        // bit pattern and GetExceptionInfo initializes every field afterwards.
        let mut raw: Box<sys::ExceptionInfo> = Box::new(unsafe { std::mem::zeroed() });
        unsafe { sys::GetExceptionInfo(&mut *raw) };
        ExceptionInfo { raw }
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut sys::ExceptionInfo {
        &mut *self.raw
    }

    /// Build the error for a call that reported failure through its return value.
    pub(crate) fn into_error(self, context: &'static str) -> Error {
        failure(&self.raw, context)
    }

    /// Log any exception left behind by a call that otherwise succeeded.
    pub(crate) fn warn_if_set(&self, context: &'static str) {
        log_warning(&self.raw, context);
    }
}

impl Drop for ExceptionInfo {
    fn drop(&mut self) {
        unsafe { sys::DestroyExceptionInfo(&mut *self.raw) }
    }
}

/// Copy the populated fields out of a native record.
pub(crate) fn read_exception(raw: &sys::ExceptionInfo) -> Option<Exception> {
    if raw.signature != sys::MagickSignature as c_ulong {
        return None;
    }
    let code = raw.severity as u32;
    let severity = Severity::from_code(code)?;
    Some(Exception {
        severity,
        code,
        // SAFETY: the library keeps these NUL-terminated or null.
        reason: unsafe { owned_c_str(raw.reason) },
        description: unsafe { owned_c_str(raw.description) },
    })
}

pub(crate) fn failure(raw: &sys::ExceptionInfo, context: &'static str) -> Error {
    let err = match read_exception(raw) {
        Some(exception) => Error::Native { context, exception },
        None => Error::Unknown { context },
    };
    tracing::debug!(error = %err, "GraphicsMagick call failed");
    err
}

pub(crate) fn log_warning(raw: &sys::ExceptionInfo, context: &'static str) {
    if let Some(exception) = read_exception(raw) {
        tracing::warn!(context, severity = ?exception.severity, "{}", exception);
    }
}

unsafe fn owned_c_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
