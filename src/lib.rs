//! FRITZ!SmartHome light bulbs as home-automation light entities.

pub mod color;
pub mod coordinator;
pub mod entities;
pub mod hub;
pub mod logging;
pub mod platform;
pub mod settings;

#[cfg(test)]
mod testing;

pub use coordinator::{Coordinator, DeviceCache};
pub use entities::{ColorMode, FritzboxLight, LightEntity, LightState, TurnOnArgs};
pub use hub::{DeviceApi, DeviceError, DeviceSnapshot, FileHub, HsColor};
pub use platform::setup_lights;
pub use settings::Settings;
