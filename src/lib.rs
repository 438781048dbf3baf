//! Cospal - cosine gradient palettes
//!
//! Application layer over `cosine-palette`: YAML configuration with named
//! presets, a bounded seed cache and the service used by the `cospal` CLI.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
