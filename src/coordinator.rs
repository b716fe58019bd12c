use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::hub::{DeviceApi, DeviceError, DeviceSnapshot, run_blocking};

/// Shared source of device snapshots.
///
/// Entities only read from it and ask for a refresh after sending a command
/// so that the next read reflects the new device state.
#[async_trait]
pub trait Coordinator: Send + Sync {
    fn snapshot(&self, ain: &str) -> Option<DeviceSnapshot>;

    /// All known devices, ordered by ain.
    fn data(&self) -> Vec<DeviceSnapshot>;

    async fn refresh(&self) -> Result<(), DeviceError>;
}

/// Coordinator keeping the last device list fetched from the hub.
///
/// Refreshes happen only when requested.
pub struct DeviceCache {
    api: Arc<dyn DeviceApi>,
    devices: DashMap<String, DeviceSnapshot>,
    last_update: RwLock<Option<Instant>>,
}

impl DeviceCache {
    pub fn new(api: Arc<dyn DeviceApi>) -> Self {
        Self {
            api,
            devices: DashMap::new(),
            last_update: RwLock::new(None),
        }
    }

    pub fn last_update(&self) -> Option<Instant> {
        *self.last_update.read()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[async_trait]
impl Coordinator for DeviceCache {
    fn snapshot(&self, ain: &str) -> Option<DeviceSnapshot> {
        self.devices.get(ain).map(|d| d.value().clone())
    }

    fn data(&self) -> Vec<DeviceSnapshot> {
        let mut devices: Vec<DeviceSnapshot> =
            self.devices.iter().map(|d| d.value().clone()).collect();
        devices.sort_by(|a, b| a.ain.cmp(&b.ain));
        devices
    }

    async fn refresh(&self) -> Result<(), DeviceError> {
        let api = self.api.clone();
        let fetched = run_blocking(move || api.get_devices()).await?;
        debug!("Fetched {} devices from the hub", fetched.len());

        self.devices
            .retain(|ain, _| fetched.iter().any(|d| d.ain == *ain));
        for device in fetched {
            self.devices.insert(device.ain.clone(), device);
        }
        *self.last_update.write() = Some(Instant::now());
        info!("Device cache refreshed ({} devices)", self.devices.len());
        Ok(())
    }
}
