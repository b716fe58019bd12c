mod capability;
mod light;

use std::collections::BTreeSet;
use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::hub::{DeviceError, HsColor};

pub use capability::{ColorCapability, reported_color_mode};
pub use light::FritzboxLight;

/// Color modes of a platform light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    /// The light can only be switched on and off.
    #[serde(rename = "onoff")]
    OnOff,
    /// Hue and saturation.
    #[serde(rename = "hs")]
    Hs,
    /// White with an adjustable color temperature.
    #[serde(rename = "color_temp")]
    ColorTemp,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::OnOff => "onoff",
            ColorMode::Hs => "hs",
            ColorMode::ColorTemp => "color_temp",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration data handed to the platform for a new entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInfo {
    pub name: String,
    pub entity_id: String,
    pub unit_of_measurement: Option<String>,
    pub device_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub identifier: String,
    pub name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub sw_version: Option<String>,
}

/// Optional parameters of a turn on command.
///
/// `color_temp` is expressed in mireds.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(default)]
pub struct TurnOnArgs {
    #[builder(setter(strip_option))]
    pub hs_color: Option<HsColor>,
    #[builder(setter(strip_option))]
    pub color_temp: Option<u32>,
}

impl TurnOnArgs {
    pub fn builder() -> TurnOnArgsBuilder {
        TurnOnArgsBuilder::default()
    }
}

/// Everything the platform displays for a light at a given moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightState {
    pub entity_id: String,
    pub name: String,
    pub available: bool,
    pub is_on: bool,
    pub brightness: Option<u8>,
    pub hs_color: Option<HsColor>,
    pub color_temp: Option<u32>,
    pub color_mode: Option<ColorMode>,
    pub supported_color_modes: BTreeSet<ColorMode>,
    pub min_mireds: u32,
    pub max_mireds: u32,
    pub device: DeviceInfo,
}

pub trait LightEntity {
    fn unique_id(&self) -> &str;

    fn name(&self) -> &str;

    fn available(&self) -> bool;

    /// Device registry entry of the hardware behind the entity.
    fn device_info(&self) -> DeviceInfo;

    fn is_on(&self) -> bool;

    /// Brightness level, 0..=255.
    fn brightness(&self) -> Option<u8>;

    fn hs_color(&self) -> Option<HsColor>;

    /// Current color temperature in mireds.
    fn color_temp(&self) -> Option<u32>;

    fn color_mode(&self) -> Option<ColorMode>;

    fn supported_color_modes(&self) -> BTreeSet<ColorMode>;

    /// Coldest supported color temperature in mireds.
    fn min_mireds(&self) -> u32;

    /// Warmest supported color temperature in mireds.
    fn max_mireds(&self) -> u32;

    fn turn_on(&self, args: TurnOnArgs) -> impl Future<Output = Result<(), DeviceError>> + Send;

    fn turn_off(&self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    fn state(&self) -> LightState {
        LightState {
            entity_id: self.unique_id().to_string(),
            name: self.name().to_string(),
            available: self.available(),
            is_on: self.is_on(),
            brightness: self.brightness(),
            hs_color: self.hs_color(),
            color_temp: self.color_temp(),
            color_mode: self.color_mode(),
            supported_color_modes: self.supported_color_modes(),
            min_mireds: self.min_mireds(),
            max_mireds: self.max_mireds(),
            device: self.device_info(),
        }
    }
}
