//! Services module - the command-line orchestration layer.
//!
//! Everything needed to drive the Unreal Editor headlessly lives here, with
//! no UI or host-framework dependencies:
//!
//! - [`locator::EditorInstall`]: resolves editor binaries and `.uproject`
//!   files from configured root paths
//! - [`project::ProjectFile`]: reads and mutates the `.uproject` manifest
//!   (plugin enablement, `Edit`-prefixed write fallback)
//! - [`command::UnrealCmd`]: composes argument vectors for the four
//!   operations (editor launch, render, script run, import run)
//! - [`launcher::ProcessLauncher`]: spawns the composed command and
//!   optionally blocks for completion, with a replaceable spawn function
//!   for test doubles
//!
//! Each invocation is independent: paths are resolved, the manifest is
//! prepared and the argument vector is built per call. The only shared
//! resource is the `.uproject` file on disk, which is read-modify-written
//! without a cross-process lock.

pub mod command;
pub mod launcher;
pub mod locator;
pub mod project;

pub use command::{UnrealCmd, compose_launch, import_args, render_args, script_args};
pub use launcher::{Launched, ProcessLauncher, SpawnFn};
pub use locator::EditorInstall;
pub use project::ProjectFile;
