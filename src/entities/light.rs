use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::color::{
    kelvin_to_mired, mired_to_kelvin, nearest_supported_color, nearest_supported_color_temp,
};
use crate::coordinator::Coordinator;
use crate::entities::{
    ColorCapability, ColorMode, DeviceInfo, EntityInfo, LightEntity, TurnOnArgs,
    reported_color_mode,
};
use crate::hub::{DeviceApi, DeviceError, DeviceSnapshot, HsColor, run_blocking};

const MIN_MIREDS: u32 = 153; // 6500K
const MAX_MIREDS: u32 = 370; // 2700K

/// A FRITZ!SmartHome light bulb presented as a platform light.
///
/// All live values are read from the coordinator's snapshot on every access.
/// Only the capability and the supported color and temperature lists are
/// captured at construction.
pub struct FritzboxLight {
    info: EntityInfo,
    ain: String,
    coordinator: Arc<dyn Coordinator>,
    api: Arc<dyn DeviceApi>,
    capability: ColorCapability,
    supported_colors: Vec<HsColor>,
    supported_color_temps: Vec<u32>,
}

impl FritzboxLight {
    pub async fn new(
        info: EntityInfo,
        coordinator: Arc<dyn Coordinator>,
        api: Arc<dyn DeviceApi>,
        ain: &str,
    ) -> Result<Self, DeviceError> {
        let device = coordinator
            .snapshot(ain)
            .ok_or_else(|| DeviceError::NotFound(ain.to_string()))?;
        let ain = ain.to_string();

        let (color_groups, supported_color_temps) = {
            let api = api.clone();
            let ain = ain.clone();
            run_blocking(move || Ok((api.get_colors(&ain)?, api.get_color_temps(&ain)?))).await?
        };
        let supported_colors: Vec<HsColor> = color_groups
            .into_iter()
            .flat_map(|group| group.colors)
            .collect();
        let capability = ColorCapability::from(device.supported_color_mode);
        debug!(
            ?capability,
            colors = supported_colors.len(),
            color_temps = ?supported_color_temps,
            "Created light {ain}"
        );

        Ok(Self {
            info,
            ain,
            coordinator,
            api,
            capability,
            supported_colors,
            supported_color_temps,
        })
    }

    pub fn ain(&self) -> &str {
        &self.ain
    }

    pub fn entity_info(&self) -> &EntityInfo {
        &self.info
    }

    pub fn capability(&self) -> ColorCapability {
        self.capability
    }

    pub fn supported_colors(&self) -> &[HsColor] {
        &self.supported_colors
    }

    pub fn supported_color_temps(&self) -> &[u32] {
        &self.supported_color_temps
    }

    fn device(&self) -> Option<DeviceSnapshot> {
        self.coordinator.snapshot(&self.ain)
    }

    fn nearest_supported_color(&self, hs_color: HsColor) -> Option<HsColor> {
        nearest_supported_color(&self.supported_colors, hs_color)
    }

    fn nearest_supported_color_temp(&self, kelvin: u32) -> Option<u32> {
        nearest_supported_color_temp(&self.supported_color_temps, kelvin)
    }

    /// Sends a command to the bulb from the blocking pool.
    async fn send<F>(&self, command: F) -> Result<(), DeviceError>
    where
        F: FnOnce(&dyn DeviceApi, &str) -> Result<(), DeviceError> + Send + 'static,
    {
        let api = self.api.clone();
        let ain = self.ain.clone();
        run_blocking(move || command(api.as_ref(), &ain))
            .await
            .inspect_err(|e| error!("Command for light {} failed: {}", self.ain, e))
    }
}

impl LightEntity for FritzboxLight {
    fn unique_id(&self) -> &str {
        &self.ain
    }

    fn name(&self) -> &str {
        &self.info.name
    }

    fn available(&self) -> bool {
        self.device().is_some_and(|d| d.present)
    }

    fn device_info(&self) -> DeviceInfo {
        let device = self.device();
        DeviceInfo {
            identifier: self.ain.clone(),
            name: device
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_else(|| self.info.name.clone()),
            manufacturer: device.as_ref().and_then(|d| d.manufacturer.clone()),
            model: device.as_ref().and_then(|d| d.productname.clone()),
            sw_version: device.and_then(|d| d.fw_version),
        }
    }

    fn is_on(&self) -> bool {
        match self.device() {
            Some(device) if device.present => device.state,
            _ => false,
        }
    }

    fn brightness(&self) -> Option<u8> {
        self.device()?.level
    }

    fn hs_color(&self) -> Option<HsColor> {
        let device = self.device()?;
        Some((device.hue?, device.saturation?))
    }

    fn color_temp(&self) -> Option<u32> {
        self.device()?.color_temp.map(kelvin_to_mired)
    }

    fn color_mode(&self) -> Option<ColorMode> {
        let device = self.device().filter(|d| d.present)?;
        reported_color_mode(device.color_mode?).filter(|mode| self.capability.supports(*mode))
    }

    fn supported_color_modes(&self) -> BTreeSet<ColorMode> {
        self.capability.color_modes()
    }

    fn min_mireds(&self) -> u32 {
        MIN_MIREDS
    }

    fn max_mireds(&self) -> u32 {
        MAX_MIREDS
    }

    async fn turn_on(&self, args: TurnOnArgs) -> Result<(), DeviceError> {
        let hs_color = args
            .hs_color
            .and_then(|hs| self.nearest_supported_color(hs));
        let color_temp = args
            .color_temp
            .and_then(|mireds| self.nearest_supported_color_temp(mired_to_kelvin(mireds)));

        if let Some(hs_color) = hs_color {
            info!("Light {}: setting color {:?}", self.ain, hs_color);
            self.send(move |api, ain| api.set_color(ain, hs_color))
                .await?;
        } else if let Some(kelvin) = color_temp {
            info!("Light {}: setting color temperature {}K", self.ain, kelvin);
            self.send(move |api, ain| api.set_color_temp(ain, kelvin))
                .await?;
        } else {
            info!("Light {}: turning on", self.ain);
            self.send(|api, ain| api.set_state_on(ain)).await?;
        }

        self.coordinator.refresh().await
    }

    async fn turn_off(&self) -> Result<(), DeviceError> {
        info!("Light {}: turning off", self.ain);
        self.send(|api, ain| api.set_state_off(ain)).await?;
        self.coordinator.refresh().await
    }
}
