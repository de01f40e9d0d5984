// Crate-wide error type. Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing a frame failed
    #[cfg(all(feature = "ws281x", target_os = "linux"))]
    #[error("Strip init error: {0}")]
    StripInit(String), // Bringing up the light strip failed
    #[cfg(any(test, all(feature = "ws281x", target_os = "linux")))]
    #[error("Strip render error: {0}")]
    StripRender(String), // Pushing the light array to the strip failed
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the preview window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the preview window buffer failed
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[cfg(not(all(feature = "ws281x", target_os = "linux")))]
    #[error("Unsupported: {0}")]
    Unsupported(String), // Asked for something this build does not include
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value: {0}")]
    Invalid(String),
}
