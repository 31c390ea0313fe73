//! Configuration loading

mod settings;

pub use settings::{BrandingSettings, LifecycleSettings, Settings};
