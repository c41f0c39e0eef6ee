//! Core library for the `skycast` weather client.
//!
//! This crate defines:
//! - The lookup controller (request lifecycle, latest-wins ordering, view state)
//! - Abstraction over weather providers (proxy backend or OpenWeather directly)
//! - Temperature conversion and condition-to-theme mapping
//! - Configuration handling
//!
//! It is used by `skycast-cli`, but any front end can drive the controller and
//! render its [`ViewModel`].

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod preset;
pub mod provider;
pub mod units;
pub mod view;

pub use config::{Config, DisplayConfig, ProviderConfig};
pub use controller::{ControllerSettings, RequestId, WeatherLookupController};
pub use error::{GENERIC_FAILURE_MESSAGE, LookupError};
pub use model::{DisplayUnit, LocationQuery, LookupState, WeatherReading};
pub use preset::ConditionPreset;
pub use provider::{ProviderId, WeatherProvider};
pub use view::{IconSettings, IconSize, ReadingView, ViewModel};
