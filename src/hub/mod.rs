mod api;
mod device;
mod file_hub;

pub use api::{DeviceApi, DeviceError, run_blocking};
pub use device::{ColorGroup, DeviceSnapshot, HsColor};
pub use file_hub::{FileHub, HubFile, HubRecord};
