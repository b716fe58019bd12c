use std::collections::BTreeSet;

use crate::entities::ColorMode;

/// What a bulb can do besides switching, as announced by the hub's
/// `supported_color_mode` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TemperatureOnly,
    ColorOnly,
    ColorAndTemperature,
    OnOffOnly,
}

impl From<i32> for ColorCapability {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::TemperatureOnly,
            4 => Self::ColorOnly,
            5 => Self::ColorAndTemperature,
            _ => Self::OnOffOnly,
        }
    }
}

impl From<Option<i32>> for ColorCapability {
    fn from(value: Option<i32>) -> Self {
        value.map(Self::from).unwrap_or(Self::OnOffOnly)
    }
}

impl ColorCapability {
    pub fn color_modes(&self) -> BTreeSet<ColorMode> {
        match self {
            Self::TemperatureOnly => BTreeSet::from([ColorMode::ColorTemp]),
            Self::ColorOnly => BTreeSet::from([ColorMode::Hs]),
            Self::ColorAndTemperature => BTreeSet::from([ColorMode::Hs, ColorMode::ColorTemp]),
            Self::OnOffOnly => BTreeSet::from([ColorMode::OnOff]),
        }
    }

    pub fn supports(&self, mode: ColorMode) -> bool {
        match (self, mode) {
            (Self::TemperatureOnly, ColorMode::ColorTemp) => true,
            (Self::ColorOnly, ColorMode::Hs) => true,
            (Self::ColorAndTemperature, ColorMode::Hs | ColorMode::ColorTemp) => true,
            (Self::OnOffOnly, ColorMode::OnOff) => true,
            _ => false,
        }
    }
}

/// Maps the hub's current `color_mode` code to the platform color mode.
pub fn reported_color_mode(code: i32) -> Option<ColorMode> {
    match code {
        1 => Some(ColorMode::ColorTemp),
        4 => Some(ColorMode::Hs),
        _ => None,
    }
}
