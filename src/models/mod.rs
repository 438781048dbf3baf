pub mod config;

pub use config::{AppConfig, FitConfig, PresetConfig};
