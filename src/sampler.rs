// Reads a light's color out of a camera frame.
// Visual: the panel shows a true mirror image, flipped both ways relative to the
// raw camera, so someone facing the installation sees themselves.

use crate::types::{Color, FrameBuffer, PixelFormat};

impl FrameBuffer {
    /// Color at (column, row) after the mirror transform (width - column, height - row).
    ///
    /// Anything that does not resolve to a stored pixel yields black: mirrored
    /// coordinates past the edge (column 0 maps to `width` itself), frames we
    /// could not decode, and short buffers.
    pub fn sample(&self, column: usize, row: usize) -> Color {
        if self.format != PixelFormat::Rgb {
            return Color::BLACK;
        }
        let (Some(x), Some(y)) = (self.width.checked_sub(column), self.height.checked_sub(row))
        else {
            return Color::BLACK;
        };
        if x >= self.width || y >= self.height {
            return Color::BLACK;
        }

        let offset = 3 * (y * self.width + x);
        match self.data.get(offset..offset + 3) {
            Some(&[r, g, b]) => Color::new(
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
            ),
            _ => Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gradient(width: usize, height: usize) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height, PixelFormat::Rgb);
        for y in 0..height {
            for x in 0..width {
                let i = 3 * (y * width + x);
                fb.data[i] = x as u8;
                fb.data[i + 1] = y as u8;
                fb.data[i + 2] = 255;
            }
        }
        fb
    }

    #[test]
    fn origin_mirrors_out_of_bounds() {
        let mut fb = FrameBuffer::new(2, 2, PixelFormat::Rgb);
        fb.data.fill(255);
        assert_eq!(fb.sample(0, 0), Color::BLACK);
        assert_eq!(fb.sample(0, 0).pack().0, 0x000000);
        assert_eq!(fb.sample(0, 1), Color::BLACK);
        assert_eq!(fb.sample(1, 0), Color::BLACK);
    }

    #[test]
    fn reads_mirrored_pixel() {
        let fb = gradient(10, 8);
        // (3, 2) mirrors to (7, 6)
        let c = fb.sample(3, 2);
        assert_relative_eq!(c.red, 7.0 / 255.0);
        assert_relative_eq!(c.green, 6.0 / 255.0);
        assert_relative_eq!(c.blue, 1.0);

        // Far corner mirrors to (1, 1)
        let c = fb.sample(9, 7);
        assert_relative_eq!(c.red, 1.0 / 255.0);
        assert_relative_eq!(c.green, 1.0 / 255.0);
    }

    #[test]
    fn coordinates_past_the_frame_are_black() {
        let fb = gradient(4, 4);
        assert_eq!(fb.sample(5, 1), Color::BLACK);
        assert_eq!(fb.sample(1, 9), Color::BLACK);
        assert_eq!(fb.sample(usize::MAX, usize::MAX), Color::BLACK);
    }

    #[test]
    fn undecodable_frame_is_black() {
        let fb = FrameBuffer::empty(4, 4);
        for (c, r) in [(0, 0), (1, 1), (2, 3), (3, 3)] {
            assert_eq!(fb.sample(c, r), Color::BLACK);
        }
    }

    #[test]
    fn non_rgb_frame_is_black_even_with_data() {
        let mut fb = gradient(4, 4);
        fb.format = PixelFormat::Unsupported;
        assert_eq!(fb.sample(1, 1), Color::BLACK);
    }

    #[test]
    fn short_buffer_is_black() {
        let mut fb = gradient(4, 4);
        fb.data.truncate(6);
        assert_eq!(fb.sample(1, 1), Color::BLACK);
    }
}
