// What you SEE:
// • The panel plays a short red/green/blue chase, then fades out.
// • After that every light shows the camera pixel behind it, mirrored like a
//   looking glass, refreshed 24 times a second.
// • With --preview the panel is drawn in a window instead (ESC quits).

mod boot;
mod camera;
mod color;
mod config;
mod error;
mod geometry;
mod mapper;
mod pacing;
mod render;
mod sampler;
mod strip;
#[cfg(test)]
mod testing;
mod types;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use camera::{CameraCapture, FrameSource};
use config::{Cli, MirrorConfig};
use error::Error;
use pacing::{FramePacer, SystemClock};
use render::MirrorRenderer;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = MirrorConfig::from_cli(cli)?;

    /* --- Camera ---
       Nothing lights up if this fails: the strip is never touched. */
    info!("Opening camera {}", config.camera.index);
    let mut cam = CameraCapture::open(&config.camera)?;
    let (w, h) = cam.resolution();
    info!("Size = {w} X {h}");
    info!("Format = {}", cam.source_format());

    // Let exposure and white balance settle.
    std::thread::sleep(config.camera_warmup());

    /* --- Light layout + strip --- */
    let points = geometry::reference_layout();
    let mut strip = strip::open_strip(&config, &points)?;
    info!("Strip ready: {} lights", strip.light_count());

    let mut pacer = FramePacer::new(SystemClock, config.frame_period());
    info!("Frame period {:?}", pacer.frame_period());

    /* --- Boot animation ---
       Visual: comets chase around the rings, then everything fades to black. */
    boot::play(&mut *strip, &mut pacer);

    /* --- Mirror ---
       Visual: live camera colors on every light until the process is stopped. */
    let mut renderer = MirrorRenderer::new(points, strip.light_count(), config.render.saturate_colors);
    render::run(&mut renderer, &mut cam, &mut *strip, &mut pacer);

    Ok(())
}
