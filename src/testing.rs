use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::coordinator::Coordinator;
use crate::hub::{ColorGroup, DeviceApi, DeviceError, DeviceSnapshot, HsColor};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetDevices,
    GetColors(String),
    GetColorTemps(String),
    SetColor(String, HsColor),
    SetColorTemp(String, u32),
    SetStateOn(String),
    SetStateOff(String),
    Refresh,
}

/// In-memory hub acting both as device API and as coordinator, recording
/// every call in order.
#[derive(Default)]
pub struct FakeHub {
    devices: Mutex<Vec<DeviceSnapshot>>,
    colors: Mutex<Vec<ColorGroup>>,
    color_temps: Mutex<Vec<u32>>,
    calls: Mutex<Vec<Call>>,
    unreachable: AtomicBool,
    refresh_fails: AtomicBool,
}

impl FakeHub {
    pub fn new(devices: Vec<DeviceSnapshot>) -> Self {
        Self {
            devices: Mutex::new(devices),
            ..Default::default()
        }
    }

    pub fn with_colors(self, colors: Vec<ColorGroup>) -> Self {
        *self.colors.lock() = colors;
        self
    }

    pub fn with_color_temps(self, color_temps: Vec<u32>) -> Self {
        *self.color_temps.lock() = color_temps;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn fail_with_unreachable(&self, fail: bool) {
        self.unreachable.store(fail, Ordering::Relaxed);
    }

    pub fn fail_refresh(&self, fail: bool) {
        self.refresh_fails.store(fail, Ordering::Relaxed);
    }

    pub fn update_device(&self, ain: &str, change: impl FnOnce(&mut DeviceSnapshot)) {
        if let Some(device) = self.devices.lock().iter_mut().find(|d| d.ain == ain) {
            change(device);
        }
    }

    pub fn remove_device(&self, ain: &str) {
        self.devices.lock().retain(|d| d.ain != ain);
    }

    fn record(&self, call: Call) -> Result<(), DeviceError> {
        self.calls.lock().push(call);
        if self.unreachable.load(Ordering::Relaxed) {
            return Err(DeviceError::Unreachable("fake hub".to_string()));
        }
        Ok(())
    }
}

impl DeviceApi for FakeHub {
    fn get_devices(&self) -> Result<Vec<DeviceSnapshot>, DeviceError> {
        self.record(Call::GetDevices)?;
        Ok(self.devices.lock().clone())
    }

    fn set_color(&self, ain: &str, hs_color: HsColor) -> Result<(), DeviceError> {
        self.record(Call::SetColor(ain.to_string(), hs_color))?;
        self.update_device(ain, |d| {
            d.hue = Some(hs_color.0);
            d.saturation = Some(hs_color.1);
            d.color_mode = Some(4);
            d.state = true;
        });
        Ok(())
    }

    fn set_color_temp(&self, ain: &str, kelvin: u32) -> Result<(), DeviceError> {
        self.record(Call::SetColorTemp(ain.to_string(), kelvin))?;
        self.update_device(ain, |d| {
            d.color_temp = Some(kelvin);
            d.color_mode = Some(1);
            d.state = true;
        });
        Ok(())
    }

    fn set_state_on(&self, ain: &str) -> Result<(), DeviceError> {
        self.record(Call::SetStateOn(ain.to_string()))?;
        self.update_device(ain, |d| d.state = true);
        Ok(())
    }

    fn set_state_off(&self, ain: &str) -> Result<(), DeviceError> {
        self.record(Call::SetStateOff(ain.to_string()))?;
        self.update_device(ain, |d| d.state = false);
        Ok(())
    }

    fn get_colors(&self, ain: &str) -> Result<Vec<ColorGroup>, DeviceError> {
        self.record(Call::GetColors(ain.to_string()))?;
        Ok(self.colors.lock().clone())
    }

    fn get_color_temps(&self, ain: &str) -> Result<Vec<u32>, DeviceError> {
        self.record(Call::GetColorTemps(ain.to_string()))?;
        Ok(self.color_temps.lock().clone())
    }
}

#[async_trait]
impl Coordinator for FakeHub {
    fn snapshot(&self, ain: &str) -> Option<DeviceSnapshot> {
        self.devices.lock().iter().find(|d| d.ain == ain).cloned()
    }

    fn data(&self) -> Vec<DeviceSnapshot> {
        let mut devices = self.devices.lock().clone();
        devices.sort_by(|a, b| a.ain.cmp(&b.ain));
        devices
    }

    async fn refresh(&self) -> Result<(), DeviceError> {
        self.calls.lock().push(Call::Refresh);
        if self.refresh_fails.load(Ordering::Relaxed) {
            return Err(DeviceError::MalformedResponse("refresh failed".to_string()));
        }
        Ok(())
    }
}

/// A present, switched on bulb reporting `supported_color_mode`.
pub fn light_snapshot(ain: &str, supported_color_mode: i32) -> DeviceSnapshot {
    let color_mode = match supported_color_mode {
        1 => Some(1),
        4 | 5 => Some(4),
        _ => None,
    };
    DeviceSnapshot {
        ain: ain.to_string(),
        name: format!("Bulb {ain}"),
        present: true,
        state: true,
        level: Some(200),
        hue: Some(10.0),
        saturation: Some(50.0),
        color_temp: Some(2700),
        color_mode,
        supported_color_mode: Some(supported_color_mode),
        has_lightbulb: true,
        manufacturer: Some("AVM".to_string()),
        productname: Some("FRITZ!DECT 500".to_string()),
        fw_version: Some("34.10.16.16.009".to_string()),
    }
}

pub fn color_groups() -> Vec<ColorGroup> {
    vec![
        ColorGroup {
            name: "Red".to_string(),
            colors: vec![(10.0, 50.0), (10.0, 80.0)],
        },
        ColorGroup {
            name: "Yellow".to_string(),
            colors: vec![(40.0, 90.0)],
        },
    ]
}
