// The real panel: WS281x lights on a Raspberry Pi, driven over PWM + DMA.

use log::{info, warn};
use rs_ws281x::{ChannelBuilder, Controller, ControllerBuilder, StripType};

use crate::config::StripConfig;
use crate::error::Error;
use crate::strip::StripDevice;
use crate::types::{LightArray, PackedColor};

// Only channel 0 carries lights; channel 1 is left unconfigured.
const CHANNEL: usize = 0;

// The driver's LED word is 0x00RRGGBB in the host's native byte order.
fn led_word(value: PackedColor) -> [u8; 4] {
    value.0.to_ne_bytes()
}

pub struct Ws281xStrip {
    controller: Controller,
    count: usize,
}

impl Ws281xStrip {
    pub fn new(config: &StripConfig) -> Result<Self, Error> {
        let controller = ControllerBuilder::new()
            .freq(config.frequency)
            .dma(i32::from(config.dma))
            .channel(
                CHANNEL,
                ChannelBuilder::new()
                    .pin(i32::from(config.gpio))
                    .count(config.count as i32)
                    .strip_type(StripType::Ws2811Rgb)
                    .brightness(config.brightness)
                    .invert(config.invert)
                    .build(),
            )
            .build()
            .map_err(|e| Error::StripInit(format!("ws2811_init: {e}")))?;

        info!(
            "WS281x strip: {} lights on GPIO {}, DMA {}, {} Hz",
            config.count, config.gpio, config.dma, config.frequency
        );
        Ok(Self { controller, count: config.count })
    }
}

impl StripDevice for Ws281xStrip {
    fn light_count(&self) -> usize {
        self.count
    }

    fn render(&mut self, lights: &LightArray) -> Result<(), Error> {
        let leds = self.controller.leds_mut(CHANNEL);
        for (led, value) in leds.iter_mut().zip(lights.as_slice()) {
            *led = led_word(*value);
        }
        self.controller
            .render()
            .map_err(|e| Error::StripRender(format!("ws2811_render: {e}")))
    }
}

impl Drop for Ws281xStrip {
    fn drop(&mut self) {
        // Leave the panel dark rather than frozen on the last frame.
        for led in self.controller.leds_mut(CHANNEL) {
            *led = led_word(PackedColor::OFF);
        }
        if let Err(e) = self.controller.render() {
            warn!("Failed to blank the strip: {e}");
        }
    }
}
