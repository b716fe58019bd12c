//! A [`DeviceApi`] backed by a JSON file.
//!
//! The file mirrors what a hub would report: one record per device holding
//! the snapshot fields plus the device's color table and supported color
//! temperatures. Every call reads the file again, commands write it back.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::hub::api::{DeviceApi, DeviceError};
use crate::hub::device::{ColorGroup, DeviceSnapshot, HsColor};

const COLOR_MODE_COLOR_TEMP: i32 = 1;
const COLOR_MODE_HS: i32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubRecord {
    #[serde(flatten)]
    pub snapshot: DeviceSnapshot,
    #[serde(default)]
    pub colors: Vec<ColorGroup>,
    #[serde(default)]
    pub color_temps: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubFile {
    pub devices: Vec<HubRecord>,
}

pub struct FileHub {
    path: PathBuf,
    // guards every read and write of the file
    lock: Mutex<()>,
}

impl FileHub {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HubFile, DeviceError> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, hub: &HubFile) -> Result<(), DeviceError> {
        std::fs::write(&self.path, serde_json::to_string_pretty(hub)?)?;
        Ok(())
    }

    fn record(&self, ain: &str) -> Result<HubRecord, DeviceError> {
        let _guard = self.lock.lock();
        self.load()?
            .devices
            .into_iter()
            .find(|r| r.snapshot.ain == ain)
            .ok_or_else(|| DeviceError::NotFound(ain.to_string()))
    }

    /// Applies `change` to the device record and persists the result.
    fn command<F>(&self, ain: &str, change: F) -> Result<(), DeviceError>
    where
        F: FnOnce(&mut HubRecord) -> Result<(), DeviceError>,
    {
        let _guard = self.lock.lock();
        let mut hub = self.load()?;
        let record = hub
            .devices
            .iter_mut()
            .find(|r| r.snapshot.ain == ain)
            .ok_or_else(|| DeviceError::NotFound(ain.to_string()))?;
        if !record.snapshot.present {
            return Err(DeviceError::Unreachable(ain.to_string()));
        }
        change(&mut *record)?;
        debug!(snapshot = ?record.snapshot, "Device {ain} updated");
        self.store(&hub)
    }
}

impl DeviceApi for FileHub {
    fn get_devices(&self) -> Result<Vec<DeviceSnapshot>, DeviceError> {
        let _guard = self.lock.lock();
        Ok(self
            .load()?
            .devices
            .into_iter()
            .map(|r| r.snapshot)
            .collect())
    }

    fn set_color(&self, ain: &str, hs_color: HsColor) -> Result<(), DeviceError> {
        info!("Setting color of {ain} to {hs_color:?}");
        self.command(ain, |record| {
            let device = &mut record.snapshot;
            device.hue = Some(hs_color.0);
            device.saturation = Some(hs_color.1);
            device.color_mode = Some(COLOR_MODE_HS);
            device.state = true;
            Ok(())
        })
    }

    fn set_color_temp(&self, ain: &str, kelvin: u32) -> Result<(), DeviceError> {
        info!("Setting color temperature of {ain} to {kelvin}K");
        self.command(ain, |record| {
            if !record.color_temps.contains(&kelvin) {
                return Err(DeviceError::MalformedResponse(format!(
                    "{kelvin}K is not a supported color temperature of {ain}"
                )));
            }
            let device = &mut record.snapshot;
            device.color_temp = Some(kelvin);
            device.color_mode = Some(COLOR_MODE_COLOR_TEMP);
            device.state = true;
            Ok(())
        })
    }

    fn set_state_on(&self, ain: &str) -> Result<(), DeviceError> {
        info!("Switching on {ain}");
        self.command(ain, |record| {
            record.snapshot.state = true;
            Ok(())
        })
    }

    fn set_state_off(&self, ain: &str) -> Result<(), DeviceError> {
        info!("Switching off {ain}");
        self.command(ain, |record| {
            record.snapshot.state = false;
            Ok(())
        })
    }

    fn get_colors(&self, ain: &str) -> Result<Vec<ColorGroup>, DeviceError> {
        Ok(self.record(ain)?.colors)
    }

    fn get_color_temps(&self, ain: &str) -> Result<Vec<u32>, DeviceError> {
        Ok(self.record(ain)?.color_temps)
    }
}
