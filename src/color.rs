// Float color -> the strip's packed 0x00RRGGBB encoding.

use crate::types::{Color, PackedColor};

// Scale to [0, 255], truncate, keep the low byte. Values outside [0, 1] wrap.
#[inline]
fn quantize_wrapping(channel: f32) -> u32 {
    ((channel * 255.0) as i64 & 0xFF) as u32
}

#[inline]
fn quantize_saturating(channel: f32) -> u32 {
    (channel * 255.0).clamp(0.0, 255.0) as u32
}

impl Color {
    /// Pack into the strip encoding. Channels are not clamped first: 1.5 becomes
    /// 382 & 0xFF. In-range input (everything the sampler produces) is unaffected.
    pub fn pack(self) -> PackedColor {
        let r = quantize_wrapping(self.red);
        let g = quantize_wrapping(self.green);
        let b = quantize_wrapping(self.blue);
        PackedColor((r << 16) | (g << 8) | b)
    }

    /// Like `pack`, but out-of-range channels saturate at 0 or 255.
    pub fn pack_saturating(self) -> PackedColor {
        let r = quantize_saturating(self.red);
        let g = quantize_saturating(self.green);
        let b = quantize_saturating(self.blue);
        PackedColor((r << 16) | (g << 8) | b)
    }
}

impl PackedColor {
    /// One fade step: every channel shifted right by one bit within its own byte.
    pub const fn halved(self) -> Self {
        let r = ((self.0 & 0x00FF_0000) >> 1) & 0x00FF_0000;
        let g = ((self.0 & 0x0000_FF00) >> 1) & 0x0000_FF00;
        let b = ((self.0 & 0x0000_00FF) >> 1) & 0x0000_00FF;
        Self(r | g | b)
    }
}
