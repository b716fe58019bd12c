use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{info, warn};

use crate::coordinator::Coordinator;
use crate::entities::{EntityInfo, FritzboxLight};
use crate::hub::{DeviceApi, DeviceError};
use crate::settings::Settings;

const DEVICE_CLASS_LIGHT: &str = "light";

/// Creates a light entity for every bulb known to the coordinator and hands
/// them to `add_entities`, ordered by ain.
pub async fn setup_lights<F>(
    coordinator: Arc<dyn Coordinator>,
    api: Arc<dyn DeviceApi>,
    settings: &Settings,
    add_entities: F,
) -> Result<(), DeviceError>
where
    F: FnOnce(Vec<FritzboxLight>),
{
    if !settings.mount_lights.unwrap_or(true) {
        info!("Lights are disabled in settings, skipping setup");
        add_entities(vec![]);
        return Ok(());
    }

    let ignored = settings.ignored_devices.clone().unwrap_or_default();
    let mut pending = vec![];
    for device in coordinator.data() {
        if !device.has_lightbulb {
            continue;
        }
        if ignored.contains(&device.ain) {
            warn!("Skipping ignored light {} ({})", device.name, device.ain);
            continue;
        }
        info!("Adding light device: {} ({})", device.name, device.ain);
        let info = EntityInfo {
            name: device.name.clone(),
            entity_id: device.ain.clone(),
            unit_of_measurement: None,
            device_class: Some(DEVICE_CLASS_LIGHT.to_string()),
        };
        let coordinator = coordinator.clone();
        let api = api.clone();
        pending.push(async move {
            FritzboxLight::new(info, coordinator, api, device.ain.as_str()).await
        });
    }

    let entities = try_join_all(pending).await?;
    info!("{} lights added", entities.len());
    add_entities(entities);
    Ok(())
}
