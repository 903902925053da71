//! # Keylights Library for Elgato Key Lights
//!
//! `keylights-lib` is a Rust library for controlling Elgato Key Light devices
//! over their local-network JSON-over-HTTP API. It provides a per-device
//! client, action translation (power, brightness, color temperature), config
//! loading, and batch application across several lights.
//!
//! This library is designed to be used by command-line tools or other client
//! applications that control Key Light hardware.
//!
//! ## Features
//!
//! - Per-light HTTP client for the `/elgato/lights` endpoint
//! - Power on/off/toggle, brightness (5-100), and color temperature
//!   (2900-7900 K, converted to mireds) with range clamping
//! - Alias-based target resolution, including an `all` fan-out
//! - Sequential batch application with per-light failure isolation
//! - JSON config loading with a `defaults` block for port and timeout
//!
//! ## Example
//!
//! ```no_run
//! use keylights_lib::action::Action;
//! use keylights_lib::batch::apply_actions;
//! use keylights_lib::config::Config;
//! use keylights_lib::target::resolve_targets;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lights = Config::load("keylights.conf")?.lights();
//!     let targets = resolve_targets(&lights, "all")?;
//!
//!     let result = apply_actions(&targets, &[Action::PowerToggle]).await;
//!     for (light, message) in &result.failures {
//!         eprintln!("failed to update {}: {}", light.label(), message);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Limitations
//!
//! The device API is a partial-update PUT that merges only supplied fields.
//! A toggle is therefore a read followed by a separate write: another
//! controller changing the light between the two is a race inherent to the
//! protocol, and no locking against an external device is attempted.
//!
//! ## Disclaimer
//!
//! This project is not affiliated with, authorized by, endorsed by, or in any
//! way officially connected with Elgato or its affiliates.
//!
//! ## License
//!
//! This project is dual-licensed under the MIT License and the Apache License,
//! Version 2.0. You may choose to use either license, depending on your
//! project needs.

// The `client` module holds the HTTP client for a single Key Light and the
// wire types of the `/elgato/lights` endpoint.
pub mod client;

// The `action` module maps abstract power/brightness/temperature actions to
// device PUT payloads, including clamping and Kelvin-to-mired conversion.
pub mod action;

// The `batch` module applies actions to a resolved set of lights, one light
// at a time, collecting per-light failures instead of aborting.
pub mod batch;

// The `config` module loads and validates the JSON config file that lists
// the available lights.
pub mod config;

// The `target` module resolves a CLI target specifier (alias or "all")
// against the configured lights.
pub mod target;

pub mod error;

pub use crate::error::Error;
