// On-screen stand-in for the light strip.
// Visual: a window with one filled hexagon per light, laid out like the real
// panel, each showing exactly the value the strip would receive.
// Closing the window or pressing ESC ends the mirror loop.

use log::info;
use minifb::{Key, Window, WindowOptions};

use crate::config::PreviewConfig;
use crate::error::Error;
use crate::strip::StripDevice;
use crate::types::{LightArray, NormalizedPoint};

const BACKGROUND: u32 = 0x00_40_40_40;
// tan(30deg): slope of the slanted hexagon edges
const HEX_SLOPE: f32 = 0.577_35;

/// Pixel buffer with the panel's hexagons laid out on it.
pub struct PanelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>, // 0x00RRGGBB, same layout as a packed light value
    centers: Vec<(i32, i32)>,
    radius: i32,
}

impl PanelCanvas {
    /// Fit the layout (plus one hexagon radius of margin) into the canvas.
    /// y points up in normalized space and down on screen.
    pub fn new(width: usize, height: usize, points: &[NormalizedPoint], radius: f32) -> Self {
        let extent = points
            .iter()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0_f32, f32::max)
            + radius;
        let scale = if extent > 0.0 { width.min(height) as f32 / (2.0 * extent) } else { 1.0 };

        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let centers = points
            .iter()
            .map(|p| ((cx + p.x * scale) as i32, (cy - p.y * scale) as i32))
            .collect();

        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width * height],
            centers,
            radius: (radius * scale).round() as i32,
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Redraw every hexagon with its light's current value.
    pub fn paint(&mut self, lights: &LightArray) {
        self.pixels.fill(BACKGROUND);
        for (i, value) in lights.as_slice().iter().enumerate().take(self.centers.len()) {
            let (x, y) = self.centers[i];
            self.fill_hexagon(x, y, value.0);
        }
    }

    /// Put a pixel if (x, y) is inside the canvas.
    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Pointy-top hexagon with circumradius `self.radius`, centered on (cx, cy).
    fn fill_hexagon(&mut self, cx: i32, cy: i32, color: u32) {
        let r = self.radius;
        let half_width = (r as f32 * 0.866) as i32;
        for dy in -r..=r {
            for dx in -half_width..=half_width {
                let inside = dy.abs() as f32 + dx.abs() as f32 * HEX_SLOPE <= r as f32;
                if inside {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }
}

pub struct PreviewStrip {
    window: Window, // the on-screen window you see
    canvas: PanelCanvas,
    count: usize,
}

impl PreviewStrip {
    /// Open the preview window. Visual: an empty grey window appears.
    pub fn new(config: &PreviewConfig, count: usize, points: &[NormalizedPoint]) -> Result<Self, Error> {
        let window = Window::new(
            "hexmirror preview (ESC to quit)",
            config.width,
            config.height,
            WindowOptions::default(),
        )
        .map_err(|e| Error::WindowInit(e.to_string()))?;
        info!("Preview strip: {count} lights in a {}x{} window", config.width, config.height);

        Ok(Self {
            window,
            canvas: PanelCanvas::new(config.width, config.height, points, config.radius),
            count,
        })
    }
}

impl StripDevice for PreviewStrip {
    fn light_count(&self) -> usize {
        self.count
    }

    /// Visual: the hexagons take on the new colors immediately.
    fn render(&mut self, lights: &LightArray) -> Result<(), Error> {
        self.canvas.paint(lights);
        self.window
            .update_with_buffer(self.canvas.pixels(), self.canvas.width, self.canvas.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }
}
