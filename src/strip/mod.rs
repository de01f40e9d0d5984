// Light strip drivers. The render loop only talks to `StripDevice`; which
// driver sits behind it is decided once at startup.

mod preview;
#[cfg(all(feature = "ws281x", target_os = "linux"))]
mod ws281x;

pub use preview::PreviewStrip;
#[cfg(all(feature = "ws281x", target_os = "linux"))]
pub use ws281x::Ws281xStrip;

use log::debug;

use crate::config::{MirrorConfig, StripDriver};
use crate::error::Error;
use crate::types::{LightArray, NormalizedPoint};

/// A strip of addressable lights that displays a whole `LightArray` at once.
pub trait StripDevice {
    /// Number of lights the device was configured with.
    fn light_count(&self) -> usize;

    /// Push every light value to the hardware. Blocks until the device accepts it.
    fn render(&mut self, lights: &LightArray) -> Result<(), Error>;

    /// False once the device can no longer show anything (e.g. preview window closed).
    fn is_open(&self) -> bool {
        true
    }
}

/// Bring up the configured driver. Failure here is fatal to the process.
pub fn open_strip(
    config: &MirrorConfig,
    points: &[NormalizedPoint],
) -> Result<Box<dyn StripDevice>, Error> {
    let strip = &config.strip;
    debug!(
        "Strip {:?}: {} lights, GPIO {}, DMA {}, {} Hz, brightness {}, invert {}",
        strip.driver, strip.count, strip.gpio, strip.dma, strip.frequency, strip.brightness, strip.invert
    );
    match strip.driver {
        StripDriver::Preview => Ok(Box::new(PreviewStrip::new(
            &config.preview,
            config.strip.count,
            points,
        )?)),
        #[cfg(all(feature = "ws281x", target_os = "linux"))]
        StripDriver::Ws281x => Ok(Box::new(Ws281xStrip::new(&config.strip)?)),
        #[cfg(not(all(feature = "ws281x", target_os = "linux")))]
        StripDriver::Ws281x => Err(Error::Unsupported(
            "built without the `ws281x` feature; rebuild with it or use --preview".into(),
        )),
    }
}
