// Normalized sample point -> pixel coordinate in a concrete frame.

use crate::types::NormalizedPoint;

/// Map a point into device coordinates (column, row) of a `width` x `height` frame.
///
/// The vertical extent [-1, 1] spans the full frame height whatever the aspect
/// ratio. Each axis is clamped to the frame before truncation, so any finite
/// point lands on a real pixel. Both dimensions must be positive.
pub fn to_device(point: NormalizedPoint, width: usize, height: usize) -> (usize, usize) {
    let scale = 0.5 * height as f32;
    // Integer halves, matching the camera's center convention.
    let x_offset = (width / 2) as f32;
    let y_offset = (height / 2) as f32;

    let x_dc = point.x * scale + x_offset;
    let y_dc = point.y * scale + y_offset;

    let column = x_dc.min((width - 1) as f32).max(0.0) as usize;
    let row = y_dc.min((height - 1) as f32).max(0.0) as usize;
    (column, row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::reference_layout;

    #[test]
    fn center_maps_to_integer_center() {
        assert_eq!(to_device(NormalizedPoint::new(0.0, 0.0), 100, 100), (50, 50));
        assert_eq!(to_device(NormalizedPoint::new(0.0, 0.0), 101, 99), (50, 49));
    }

    #[test]
    fn vertical_extent_follows_height() {
        // 640x480: scale 240, offsets (320, 240)
        assert_eq!(to_device(NormalizedPoint::new(0.5, -0.5), 640, 480), (440, 120));
        assert_eq!(to_device(NormalizedPoint::new(-1.0, 1.0), 640, 480), (80, 479));
    }

    #[test]
    fn far_points_are_clamped() {
        let dims = [(1, 1), (2, 2), (3, 7), (640, 480), (1280, 720)];
        let points = [
            NormalizedPoint::new(-1e9, -1e9),
            NormalizedPoint::new(1e9, 1e9),
            NormalizedPoint::new(-3.0, 2.5),
            NormalizedPoint::new(f32::MAX, f32::MIN),
            NormalizedPoint::new(1.0, -1.0),
        ];
        for (w, h) in dims {
            for p in points {
                let (c, r) = to_device(p, w, h);
                assert!(c < w, "{p:?} in {w}x{h} gave column {c}");
                assert!(r < h, "{p:?} in {w}x{h} gave row {r}");
            }
        }
    }

    #[test]
    fn reference_layout_stays_inside_frame() {
        for p in reference_layout() {
            let (c, r) = to_device(p, 1280, 960);
            assert!(c < 1280 && r < 960);
        }
    }
}
