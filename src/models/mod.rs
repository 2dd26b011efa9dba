//! Data models for the uecmd orchestration layer.
//!
//! - [`import`]: FBX import option variants and the grouped import spec
//!   consumed by the editor's `ImportAssets` commandlet
//! - [`launch`]: per-call launch options and log-target selection
//! - [`manifest`]: `.uproject` plugin entries and the required plugin set
//! - [`render`]: movie-capture render settings
//!
//! All artifact-producing models serialize through `serde_json` with sorted
//! keys and four-space indentation so repeated writes diff cleanly.

pub mod import;
pub mod launch;
pub mod manifest;
pub mod render;

pub use import::{
    AnimSequenceImportData, ImportGroup, ImportOptions, ImportSpec, SkeletalMeshImportData,
    StaticMeshImportData, TextureImportData,
};
pub use launch::{LaunchOptions, LogTarget};
pub use manifest::{PluginEntry, required_plugins};
pub use render::{RenderOutputFormat, RenderSettings};

use serde::Serialize;

/// Serialize a JSON value with the formatting the editor's own tools expect:
/// sorted keys (serde_json's default map is ordered) and four-space
/// indentation.
pub(crate) fn to_pretty_json(value: &serde_json::Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf).expect("serialized JSON is valid UTF-8"))
}
