//! laserup core: configuration layer, dependency manifest, input workspace inspection.

pub mod config;
pub mod manifest;
pub mod workspace;

pub use config::{BootstrapConfig, ObservabilityConfig, Overrides, PythonVersion};
pub use manifest::Manifest;
pub use workspace::{ensure_input_scaffold, inspect_input, InputStatus, SUPPORTED_IMAGE_EXTS};
