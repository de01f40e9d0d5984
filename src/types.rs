// Core types shared by the pipeline: camera frame -> sampled color -> packed light value.

use std::ops::{Index, IndexMut, Range};

/// A light's sample location relative to the frame center, nominally in [-1, 1].
/// y = 1 is the top of the vertical extent, x scales with the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Linear intensity per channel, conventionally [0, 1] but not clamped here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const BLACK: Color = Color { red: 0.0, green: 0.0, blue: 0.0 };

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}

/// Wire format of one light: 0x00RRGGBB (red bits 16..24, green 8..16, blue 0..8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const OFF: PackedColor = PackedColor(0);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[cfg(test)]
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[cfg(test)]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[cfg(test)]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// Pixel layouts a camera may report. Only interleaved RGB can be sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Unsupported,
}

/// One camera frame: `data` holds width*height*3 bytes of RGB, or nothing at all
/// when the frame came in a format we cannot decode.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a zeroed frame. Storage only exists for non-empty RGB frames;
    /// anything else stays empty and samples as black.
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Self {
        let data = if width > 0 && height > 0 && format == PixelFormat::Rgb {
            vec![0u8; width * height * 3]
        } else {
            Vec::new()
        };
        Self { width, height, format, data }
    }

    /// A frame we could not decode: dimensions are known, pixels are not.
    pub fn empty(width: usize, height: usize) -> Self {
        Self::new(width, height, PixelFormat::Unsupported)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Fixed-length, index-ordered light values: index i is the i-th geometry point
/// and the i-th physical light on the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightArray {
    lights: Vec<PackedColor>,
}

impl LightArray {
    /// All lights off.
    pub fn new(count: usize) -> Self {
        Self { lights: vec![PackedColor::OFF; count] }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn fill(&mut self, value: PackedColor) {
        self.lights.fill(value);
    }

    pub fn as_slice(&self) -> &[PackedColor] {
        &self.lights
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PackedColor> {
        self.lights.iter_mut()
    }

    /// Rotate one contiguous segment left by one: the first element moves to the
    /// end, the rest shift down. Segments that do not fit are left untouched.
    /// Returns whether the rotation happened.
    pub fn rotate_segment(&mut self, segment: Range<usize>) -> bool {
        match self.lights.get_mut(segment) {
            Some(seg) if !seg.is_empty() => {
                seg.rotate_left(1);
                true
            }
            _ => false,
        }
    }
}

impl Index<usize> for LightArray {
    type Output = PackedColor;

    fn index(&self, index: usize) -> &PackedColor {
        &self.lights[index]
    }
}

impl IndexMut<usize> for LightArray {
    fn index_mut(&mut self, index: usize) -> &mut PackedColor {
        &mut self.lights[index]
    }
}
