use crate::error::{Error, ExceptionInfo, MAGICK_PASS, Result};
use crate::sys;
use std::ffi::CString;
use std::fmt;

// Quantum width follows the QuantumDepth the library was built with (8, 16 or 32).
const QUANTUM_SCALE: u64 = match std::mem::size_of::<sys::Quantum>() {
    1 => 1,
    2 => 257,
    _ => 16_843_009,
};

fn quantum_to_u8(q: sys::Quantum) -> u8 {
    ((q as u64 + QUANTUM_SCALE / 2) / QUANTUM_SCALE) as u8
}

fn u8_to_quantum(v: u8) -> sys::Quantum {
    (v as u64 * QUANTUM_SCALE) as sys::Quantum
}

/// An 8-bit RGBA color. `opacity` is inverted alpha: 0 is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPacket {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub opacity: u8,
}

impl PixelPacket {
    pub const fn new(red: u8, green: u8, blue: u8, opacity: u8) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }

    /// Lowercase `rrggbbaa`, where the last byte is the opacity channel.
    pub fn hex(&self) -> String {
        format!(
            "{:02x}{:02x}{:02x}{:02x}",
            self.red, self.green, self.blue, self.opacity
        )
    }

    pub(crate) fn from_sys(raw: &sys::PixelPacket) -> Self {
        Self {
            red: quantum_to_u8(raw.red),
            green: quantum_to_u8(raw.green),
            blue: quantum_to_u8(raw.blue),
            opacity: quantum_to_u8(raw.opacity),
        }
    }

    pub(crate) fn to_sys(self) -> sys::PixelPacket {
        // SAFETY: PixelPacket is four integer channels.
        let mut raw: sys::PixelPacket = unsafe { std::mem::zeroed() };
        raw.red = u8_to_quantum(self.red);
        raw.green = u8_to_quantum(self.green);
        raw.blue = u8_to_quantum(self.blue);
        raw.opacity = u8_to_quantum(self.opacity);
        raw
    }
}

impl fmt::Display for PixelPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// Look up a color by name (`"red"`, `"#336699"`, `"rgb(1,2,3)"`, ...) in the library's
/// color database.
pub fn query_color(name: &str) -> Result<PixelPacket> {
    crate::initialize();
    let cname = CString::new(name)
        .map_err(|_| Error::invalid_param("color name contains an interior NUL byte"))?;
    // SAFETY: zeroed channels are a valid PixelPacket; the library overwrites them.
    let mut raw: sys::PixelPacket = unsafe { std::mem::zeroed() };
    let mut exc = ExceptionInfo::new();
    let status = unsafe { sys::QueryColorDatabase(cname.as_ptr(), &mut raw, exc.as_mut_ptr()) };
    if status != MAGICK_PASS {
        return Err(exc.into_error("in QueryColorDatabase()"));
    }
    Ok(PixelPacket::from_sys(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_rgba_order() {
        assert_eq!(PixelPacket::new(255, 0, 0, 0).hex(), "ff000000");
        assert_eq!(PixelPacket::new(0x0a, 0xbc, 0x01, 0xff).hex(), "0abc01ff");
        assert_eq!(PixelPacket::new(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn every_channel_value_survives_native_conversion() {
        for v in 0..=u8::MAX {
            let packet = PixelPacket::new(v, v, v, v);
            assert_eq!(PixelPacket::from_sys(&packet.to_sys()), packet);
        }
    }

    #[test]
    fn full_scale_quantum_maps_to_255() {
        let mut raw = PixelPacket::default().to_sys();
        raw.red = sys::Quantum::MAX;
        assert_eq!(PixelPacket::from_sys(&raw).red, 255);
    }
}
