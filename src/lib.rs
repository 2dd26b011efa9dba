// uecmd - headless command-line orchestration for Unreal Editor pipelines
//
// This is the library crate containing the orchestration layer: path
// resolution, manifest editing, import spec building, command composition
// and subprocess supervision. The binary crate (main.rs) provides the CLI
// entry point.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{RemoteExecutionConfig, SettingsManager, ToolSettings};
pub use error::UeCmdError;
pub use models::{
    ImportOptions, ImportSpec, LaunchOptions, LogTarget, PluginEntry, RenderOutputFormat,
    RenderSettings, required_plugins,
};
pub use services::{EditorInstall, Launched, ProcessLauncher, ProjectFile, UnrealCmd};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
