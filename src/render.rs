// Steady-state mirror loop: grab a frame, sample every light, push, wait.
// Visual: the panel follows whatever stands in front of the camera, one
// frame per period, until the process is stopped.

use std::time::Duration;

use log::{debug, trace, warn};

use crate::camera::FrameSource;
use crate::mapper::to_device;
use crate::pacing::{Clock, FramePacer};
use crate::strip::StripDevice;
use crate::types::{FrameBuffer, LightArray, NormalizedPoint};

/// Turns camera frames into light values. Owns the light array.
pub struct MirrorRenderer {
    points: Vec<NormalizedPoint>,
    lights: LightArray,
    saturate: bool,
}

impl MirrorRenderer {
    /// `points[i]` is sampled for light `i`. Lights without a point stay dark.
    pub fn new(points: Vec<NormalizedPoint>, light_count: usize, saturate: bool) -> Self {
        if points.len() != light_count {
            warn!(
                "Layout has {} points but the strip has {light_count} lights",
                points.len()
            );
        }
        Self { points, lights: LightArray::new(light_count), saturate }
    }

    /// Map, sample and pack every light from `frame`, in index order.
    pub fn sample_frame(&mut self, frame: &FrameBuffer) -> &LightArray {
        self.lights.fill(Default::default());
        if frame.is_empty() || frame.width == 0 || frame.height == 0 {
            return &self.lights;
        }

        for (i, (point, light)) in self.points.iter().zip(self.lights.iter_mut()).enumerate() {
            let (column, row) = to_device(*point, frame.width, frame.height);
            let color = frame.sample(column, row);
            let packed = if self.saturate { color.pack_saturating() } else { color.pack() };
            trace!(
                "led[{}] NDC = [{}, {}], DC = [{column}, {row}], RGB = ({}, {}, {}), p = {:#08x}",
                i + 1,
                point.x,
                point.y,
                color.red,
                color.green,
                color.blue,
                packed.0,
            );
            *light = packed;
        }
        &self.lights
    }

    /// One render tick without the wait: acquire, sample, push.
    /// Neither a failed grab nor a failed push stops the mirror.
    pub fn tick<F, S>(&mut self, source: &mut F, strip: &mut S)
    where
        F: FrameSource + ?Sized,
        S: StripDevice + ?Sized,
    {
        let frame = source.next_frame().unwrap_or_else(|e| {
            warn!("{e}; showing a dark frame");
            FrameBuffer::empty(0, 0)
        });

        self.sample_frame(&frame);

        if let Err(e) = strip.render(&self.lights) {
            warn!("{e}");
        }
    }
}

/// Run the mirror until the strip closes. A hardware strip never does, so on
/// the installation this only ends with the process.
pub fn run<F, S, C>(
    renderer: &mut MirrorRenderer,
    source: &mut F,
    strip: &mut S,
    pacer: &mut FramePacer<C>,
) where
    F: FrameSource + ?Sized,
    S: StripDevice + ?Sized,
    C: Clock,
{
    let mut last_fps_time = pacer.now();
    let mut frames_this_second: u32 = 0;

    while strip.is_open() {
        renderer.tick(source, strip);
        pacer.wait();

        frames_this_second += 1;
        let now = pacer.now();
        let elapsed = now.duration_since(last_fps_time);
        if elapsed >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / elapsed.as_secs_f32();
            debug!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }
    debug!("Strip closed, leaving render loop");
}
