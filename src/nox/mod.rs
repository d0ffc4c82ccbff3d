//! Shared configuration for the lint/type-check/test automation of the
//! generated repositories.

pub mod config;
pub mod default;
pub mod util;

pub use config::{CommandsOptions, Config, ConfigOverrides, Tool};
pub use default::Presets;
