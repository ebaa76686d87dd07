/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::error::{Error, Result};
use crate::shared::ElevatorSeed;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub scheduler: SchedulerConfig,
    pub render: RenderConfig,
    pub elevators: Vec<ElevatorSeed>,
}

/**
 * Constants of the motion and door model.
 *
 * # Fields
 * - `n_floors`:                 Number of floor lines; targets are drawn from `0..=n_floors`.
 * - `visible_floors_only`:      Draw targets from `0..n_floors` instead, so a car never
 *                               heads for the line above the top rendered floor.
 * - `max_speed`:                Speed clamp in floors per second.
 * - `acceleration`:             Acceleration magnitude in floors per second squared.
 * - `door_speed`:               Door travel per second, shared by opening and closing.
 * - `arrival_tolerance`:        Maximum altitude error for a car to count as arrived.
 * - `arrival_speed_tolerance`:  Maximum speed for a car to count as arrived.
 * - `close_probability`:        Per-tick chance that an arrived car starts closing.
 * - `max_step_secs`:            Ceiling for a single tick's elapsed time.
 * - `seed`:                     Seed for the random source; `None` seeds from entropy.
 */
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SimulationConfig {
    pub n_floors: u32,
    pub visible_floors_only: bool,
    pub max_speed: f64,
    pub acceleration: f64,
    pub door_speed: f64,
    pub arrival_tolerance: f64,
    pub arrival_speed_tolerance: f64,
    pub close_probability: f64,
    pub max_step_secs: f64,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SchedulerConfig {
    pub tick_period_ms: u64,
    pub max_ticks: Option<u64>,
    pub start_paused: bool,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Text,
    Json,
    None,
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(RenderMode::Text),
            "json" => Ok(RenderMode::Json),
            "none" => Ok(RenderMode::None),
            other => Err(format!("unknown render mode '{}' (expected text, json or none)", other)),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: RenderMode,
    pub floor_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub every_n_ticks: u64,
}

/***************************************/
/*              Defaults               */
/***************************************/
impl Default for Config {
    fn default() -> Self {
        Config {
            simulation: SimulationConfig::default(),
            scheduler: SchedulerConfig::default(),
            render: RenderConfig::default(),
            elevators: ElevatorSeed::defaults(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            n_floors: 10,
            visible_floors_only: false,
            max_speed: 1.5,
            acceleration: 0.2,
            door_speed: 1.5,
            arrival_tolerance: 0.01,
            arrival_speed_tolerance: 0.1,
            close_probability: 0.1,
            max_step_secs: 100.0,
            seed: None,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            tick_period_ms: 10,
            max_ticks: None,
            start_paused: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            mode: RenderMode::Text,
            floor_height: 64.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            every_n_ticks: 10,
        }
    }
}

impl SchedulerConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

/***************************************/
/*             Public API              */
/***************************************/

/// Reads and validates the configuration at `path`. A missing file is not an
/// error: the compiled-in defaults are used instead.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = match fs::read_to_string(path) {
        Ok(config_str) => parse_config(&config_str).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("No configuration file at {}, using defaults", path.display());
            Config::default()
        }
        Err(source) => {
            return Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    config.validate()?;
    Ok(config)
}

fn parse_config(config_str: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(config_str)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;

        if self.elevators.is_empty() {
            return Err(Error::InvalidConfig("at least one elevator is required".into()));
        }
        if sim.n_floors == 0 {
            return Err(Error::InvalidConfig("n_floors must be at least 1".into()));
        }
        for (name, value) in [
            ("max_speed", sim.max_speed),
            ("acceleration", sim.acceleration),
            ("door_speed", sim.door_speed),
            ("max_step_secs", sim.max_step_secs),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&sim.close_probability) {
            return Err(Error::InvalidConfig(format!(
                "close_probability must be within [0, 1], got {}",
                sim.close_probability
            )));
        }
        if self.scheduler.tick_period_ms == 0 {
            return Err(Error::InvalidConfig("tick_period_ms must be at least 1".into()));
        }
        if self.render.every_n_ticks == 0 {
            return Err(Error::InvalidConfig("every_n_ticks must be at least 1".into()));
        }

        Ok(())
    }
}
