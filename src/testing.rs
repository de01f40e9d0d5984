// Fakes for the hardware seams: a virtual clock, a strip that records what it
// was asked to show, and a camera that replays canned frames.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::camera::FrameSource;
use crate::error::Error;
use crate::pacing::Clock;
use crate::strip::StripDevice;
use crate::types::{FrameBuffer, LightArray, PixelFormat};

/// Virtual time that only moves on `sleep` or `advance`. Clones share state.
#[derive(Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
            sleeps: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Simulate work taking `d`.
    pub fn advance(&self, d: Duration) {
        self.elapsed.set(self.elapsed.get() + d);
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

/// Strip that keeps a copy of every pushed array.
pub struct RecordingStrip {
    count: usize,
    frames: Vec<LightArray>,
    fail: bool,
    close_after: Option<usize>,
}

impl RecordingStrip {
    pub fn new(count: usize) -> Self {
        Self { count, frames: Vec::new(), fail: false, close_after: None }
    }

    /// Every push is recorded, then reported as failed.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Report closed once `n` frames were pushed.
    pub fn close_after(mut self, n: usize) -> Self {
        self.close_after = Some(n);
        self
    }

    pub fn frames(&self) -> &[LightArray] {
        &self.frames
    }
}

impl StripDevice for RecordingStrip {
    fn light_count(&self) -> usize {
        self.count
    }

    fn render(&mut self, lights: &LightArray) -> Result<(), Error> {
        self.frames.push(lights.clone());
        if self.fail {
            return Err(Error::StripRender("injected failure".into()));
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.close_after.is_none_or(|n| self.frames.len() < n)
    }
}

/// Camera that hands out queued results, then errors once empty.
pub struct ScriptedFrames {
    frames: VecDeque<Result<FrameBuffer, Error>>,
}

impl ScriptedFrames {
    pub fn new(frames: Vec<Result<FrameBuffer, Error>>) -> Self {
        Self { frames: frames.into() }
    }
}

impl FrameSource for ScriptedFrames {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        self.frames
            .pop_front()
            .unwrap_or_else(|| Err(Error::CameraFrame("no more frames".into())))
    }

    fn resolution(&self) -> (u32, u32) {
        match self.frames.front() {
            Some(Ok(f)) => (f.width as u32, f.height as u32),
            _ => (0, 0),
        }
    }
}

/// A `width` x `height` RGB frame filled with one color.
pub fn solid_frame(width: usize, height: usize, rgb: [u8; 3]) -> FrameBuffer {
    let mut frame = FrameBuffer::new(width, height, PixelFormat::Rgb);
    for px in frame.data.chunks_exact_mut(3) {
        px.copy_from_slice(&rgb);
    }
    frame
}
