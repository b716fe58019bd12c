use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_derive::{Parser, Subcommand};
use fritzbox_lights::logging::{init_logging, parse_rotation};
use fritzbox_lights::{
    Coordinator, DeviceCache, FileHub, FritzboxLight, LightEntity, Settings, TurnOnArgs,
    setup_lights,
};
use tracing::info;
use tracing_appender::rolling::Rotation;

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the state of every light
    List {
        #[arg(long)]
        json: bool,
    },
    /// Turn a light on, optionally with a color or a color temperature
    On {
        #[arg(long)]
        ain: String,
        #[arg(long, requires = "saturation")]
        hue: Option<f64>,
        #[arg(long, requires = "hue")]
        saturation: Option<f64>,
        /// Color temperature in mireds
        #[arg(long)]
        color_temp: Option<u32>,
    },
    /// Turn a light off
    Off {
        #[arg(long)]
        ain: String,
    },
}

#[derive(Parser, Debug)]
struct Params {
    /// JSON file with the hub's devices
    #[clap(long)]
    hub_file: PathBuf,
    /// Settings file path (if not set, default settings are used)
    #[clap(long)]
    settings: Option<PathBuf>,
    /// Directory for rolling log files (if not set, logs go to stdout)
    #[clap(long)]
    log_dir: Option<PathBuf>,
    /// Log rotation period: minutely, hourly, daily or never
    #[clap(long, default_value = "daily", value_parser = parse_rotation)]
    log_rotation: Rotation,
    /// Number of log files to keep (0 keeps all of them)
    #[clap(long, default_value = "7")]
    max_log_files: usize,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let params = Params::parse();

    let _log_guard = init_logging(
        params.log_dir.as_deref(),
        params.log_rotation.clone(),
        params.max_log_files,
    )?;

    let settings = Settings::load(params.settings.as_deref())?;

    let hub = Arc::new(FileHub::new(&params.hub_file));
    let cache = Arc::new(DeviceCache::new(hub.clone()));
    cache
        .refresh()
        .await
        .with_context(|| format!("Failed to read hub file {}", hub.path().display()))?;

    let mut lights = vec![];
    setup_lights(cache.clone(), hub.clone(), &settings, |entities| {
        lights = entities
    })
    .await
    .context("Failed to set up lights")?;
    info!("{} lights available", lights.len());

    match params.command {
        Commands::List { json } => list(&lights, json)?,
        Commands::On {
            ain,
            hue,
            saturation,
            color_temp,
        } => {
            let mut builder = TurnOnArgs::builder();
            if let (Some(hue), Some(saturation)) = (hue, saturation) {
                builder.hs_color((hue, saturation));
            }
            if let Some(color_temp) = color_temp {
                builder.color_temp(color_temp);
            }
            let args = builder.build()?;
            find(&lights, &ain)?.turn_on(args).await?;
            println!("Light {ain} turned on");
        }
        Commands::Off { ain } => {
            find(&lights, &ain)?.turn_off().await?;
            println!("Light {ain} turned off");
        }
    }

    Ok(())
}

fn find<'a>(lights: &'a [FritzboxLight], ain: &str) -> Result<&'a FritzboxLight> {
    match lights.iter().find(|l| l.ain() == ain) {
        Some(light) => Ok(light),
        None => bail!("No light with ain {ain}"),
    }
}

fn list(lights: &[FritzboxLight], json: bool) -> Result<()> {
    if json {
        let states: Vec<_> = lights.iter().map(|l| l.state()).collect();
        println!("{}", serde_json::to_string_pretty(&states)?);
        return Ok(());
    }
    for light in lights {
        let state = light.state();
        let modes: Vec<&str> = state
            .supported_color_modes
            .iter()
            .map(|m| m.as_str())
            .collect();
        println!(
            "Light '{}' ({}, {}) status: {}{}, brightness: {}, mode: {}, supports: [{}]",
            state.name,
            state.entity_id,
            state.device.model.as_deref().unwrap_or("unknown model"),
            if state.is_on { "on" } else { "off" },
            if state.available { "" } else { " (unavailable)" },
            state
                .brightness
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string()),
            state.color_mode.map(|m| m.as_str()).unwrap_or("-"),
            modes.join(", ")
        );
    }
    Ok(())
}
