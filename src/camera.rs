// Opens the camera and hands out frames as raw RGB buffers.
// When the render loop calls `next_frame()` it gets a FrameBuffer of
// width*height*3 interleaved bytes, ready to be sampled per light.

use log::{debug, info, warn};

use crate::config::CameraConfig;
use crate::error::Error;
use crate::types::{FrameBuffer, PixelFormat};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Anything that can produce camera frames, one blocking call at a time.
pub trait FrameSource {
    /// Grab the next frame, blocking until one is ready.
    fn next_frame(&mut self) -> Result<FrameBuffer, Error>;

    /// Resolution frames are delivered at.
    fn resolution(&self) -> (u32, u32);
}

// A small wrapper around nokhwa::Camera so the render loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open the configured camera and start streaming.
    /// The device may choose a resolution close to, not equal to, the request.
    pub fn open(config: &CameraConfig) -> Result<Self, Error> {
        let idx = CameraIndex::Index(config.index);

        let fmt = CameraFormat::new(
            Resolution::new(config.width, config.height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            config.fps,
        );

        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera {}: {e}", config.index)))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        info!(
            "Connected to camera {} ({}), {}x{} @ {} fps",
            config.index,
            cam.info().human_name(),
            actual.width(),
            actual.height(),
            cam.frame_rate(),
        );

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Format the device streams in, before our RGB decode.
    pub fn source_format(&self) -> String {
        format!("{:?}", self.cam.frame_format())
    }
}

impl FrameSource for CameraCapture {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        // Blocks until the camera has a new frame.
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let res = frame.resolution();
        let mut out = FrameBuffer::new(res.width() as usize, res.height() as usize, PixelFormat::Rgb);

        // Anything we cannot turn into RGB becomes an empty frame (black lights).
        if let Err(e) = frame.decode_image_to_buffer::<RgbFormat>(&mut out.data) {
            debug!("Cannot decode {:?} frame: {e}", frame.source_frame_format());
            return Ok(FrameBuffer::empty(out.width, out.height));
        }
        Ok(out)
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        if let Err(e) = self.cam.stop_stream() {
            warn!("Failed to stop camera stream: {e}");
        }
    }
}
