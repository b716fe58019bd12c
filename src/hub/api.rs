use thiserror::Error;

use crate::hub::device::{ColorGroup, DeviceSnapshot, HsColor};

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Device not found: {0}")]
    NotFound(String),
    #[error("Device unreachable: {0}")]
    Unreachable(String),
    #[error("Malformed hub response: {0}")]
    MalformedResponse(String),
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Blocking control interface of the hub.
///
/// Every call may perform I/O, so async callers must go through
/// [`run_blocking`] instead of calling these methods directly.
pub trait DeviceApi: Send + Sync {
    fn get_devices(&self) -> Result<Vec<DeviceSnapshot>, DeviceError>;

    fn set_color(&self, ain: &str, hs_color: HsColor) -> Result<(), DeviceError>;

    /// `kelvin` must be one of the values returned by `get_color_temps`.
    fn set_color_temp(&self, ain: &str, kelvin: u32) -> Result<(), DeviceError>;

    fn set_state_on(&self, ain: &str) -> Result<(), DeviceError>;

    fn set_state_off(&self, ain: &str) -> Result<(), DeviceError>;

    fn get_colors(&self, ain: &str) -> Result<Vec<ColorGroup>, DeviceError>;

    fn get_color_temps(&self, ain: &str) -> Result<Vec<u32>, DeviceError>;
}

/// Runs a blocking hub call on tokio's blocking pool and waits for it.
pub async fn run_blocking<T, F>(call: F) -> Result<T, DeviceError>
where
    F: FnOnce() -> Result<T, DeviceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call).await?
}
