// Core configuration types
mod core;
mod loader;
mod parallel;

pub use core::{DovmapConfig, OutputConfig, StepsConfig, CONFIG_FILE_NAME};
pub use loader::{directory_ancestors, load_config, load_config_from, parse_and_validate_config};
pub use parallel::ParallelConfig;
