use serde::{Deserialize, Serialize};

/// A `(hue, saturation)` pair as reported and accepted by the hub.
pub type HsColor = (f64, f64);

/// Last known state of a single FRITZ!SmartHome device.
///
/// Snapshots are produced by the coordinator and are never mutated by the
/// entities reading them. Optional fields are `None` when the hub did not
/// report them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub ain: String,
    pub name: String,
    #[serde(default)]
    pub present: bool,
    #[serde(default)]
    pub state: bool,
    pub level: Option<u8>,
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    /// Color temperature in Kelvin.
    pub color_temp: Option<u32>,
    pub color_mode: Option<i32>,
    pub supported_color_mode: Option<i32>,
    #[serde(default)]
    pub has_lightbulb: bool,
    pub manufacturer: Option<String>,
    pub productname: Option<String>,
    pub fw_version: Option<String>,
}

/// One named entry of the hub's color table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGroup {
    pub name: String,
    pub colors: Vec<HsColor>,
}
