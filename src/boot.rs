// Startup light show, played once before the camera takes over.
// Visual: a short red, green and blue comet chases around the inner, middle and
// outer ring, then the whole panel fades to black in eight halving steps.

use log::{debug, info, warn};

use crate::geometry::{LIGHT_COUNT, RING_COUNT, RING_SEGMENTS};
use crate::pacing::{Clock, FramePacer};
use crate::strip::StripDevice;
use crate::types::{LightArray, PackedColor};

/// Chase frames; one full turn of the outer ring.
pub const ROTATION_STEPS: usize = 18;
/// Fade frames; enough halvings to take 0xFF to zero.
pub const FADE_STEPS: usize = 8;

const TAIL_LEN: usize = 4;

// Comet tails seeded at the start of each ring, bright to dim.
const TAILS: [[PackedColor; TAIL_LEN]; RING_COUNT] = [
    [
        PackedColor::from_rgb(0xFF, 0, 0),
        PackedColor::from_rgb(0x3F, 0, 0),
        PackedColor::from_rgb(0x0F, 0, 0),
        PackedColor::from_rgb(0x07, 0, 0),
    ],
    [
        PackedColor::from_rgb(0, 0xFF, 0),
        PackedColor::from_rgb(0, 0x3F, 0),
        PackedColor::from_rgb(0, 0x0F, 0),
        PackedColor::from_rgb(0, 0x07, 0),
    ],
    [
        PackedColor::from_rgb(0, 0, 0xFF),
        PackedColor::from_rgb(0, 0, 0x7F),
        PackedColor::from_rgb(0, 0, 0x0F),
        PackedColor::from_rgb(0, 0, 0x07),
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Rotate(usize),
    Fade(usize),
    Done,
}

/// Animation state: the current phase with its frame counter, and the lights.
pub struct BootAnimation {
    phase: Phase,
    lights: LightArray,
}

impl BootAnimation {
    /// Seed the comets. Only the reference panel layout is supported; any other
    /// light count yields `None` and the animation is skipped.
    pub fn new(light_count: usize) -> Option<Self> {
        if light_count != LIGHT_COUNT {
            return None;
        }
        let mut lights = LightArray::new(light_count);
        for (segment, tail) in RING_SEGMENTS.iter().zip(TAILS) {
            for (offset, value) in tail.into_iter().enumerate() {
                lights[segment.start + offset] = value;
            }
        }
        Some(Self { phase: Phase::Rotate(0), lights })
    }

    #[cfg(test)]
    pub fn lights(&self) -> &LightArray {
        &self.lights
    }

    #[cfg(test)]
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advance one frame and return what to show, or `None` once finished.
    pub fn step(&mut self) -> Option<&LightArray> {
        match self.phase {
            Phase::Rotate(n) => {
                for segment in RING_SEGMENTS {
                    self.lights.rotate_segment(segment);
                }
                self.phase = if n + 1 < ROTATION_STEPS { Phase::Rotate(n + 1) } else { Phase::Fade(0) };
            }
            Phase::Fade(n) => {
                for light in self.lights.iter_mut() {
                    *light = light.halved();
                }
                self.phase = if n + 1 < FADE_STEPS { Phase::Fade(n + 1) } else { Phase::Done };
            }
            Phase::Done => return None,
        }
        Some(&self.lights)
    }
}

/// Play the whole animation on `strip`, one frame per period. Returns the number
/// of frames shown (zero when the strip is not the reference panel).
/// Push failures are logged and the show goes on.
pub fn play<S, C>(strip: &mut S, pacer: &mut FramePacer<C>) -> usize
where
    S: StripDevice + ?Sized,
    C: Clock,
{
    let Some(mut animation) = BootAnimation::new(strip.light_count()) else {
        info!(
            "Skipping boot animation: strip has {} lights, expected {LIGHT_COUNT}",
            strip.light_count()
        );
        return 0;
    };

    let mut frames = 0;
    while let Some(lights) = animation.step() {
        if let Err(e) = strip.render(lights) {
            warn!("Boot animation frame {frames}: {e}");
        }
        pacer.wait();
        frames += 1;
    }
    debug!("Boot animation finished after {frames} frames");
    frames
}
