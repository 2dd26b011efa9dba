//! Resolution of editor binaries and project files from configured roots.
//!
//! Both resolutions follow the same rule: a configured path that already
//! points at the expected file is returned unchanged; a directory root is
//! searched at the conventional location (`Binaries/Win64/` for binaries,
//! the root itself for `.uproject` files). Resolution never fails with an
//! error, it returns `None` and leaves the domain error to the caller.

use camino::{Utf8Path, Utf8PathBuf};

/// Filename of the headless command-line editor binary.
pub const HEADLESS_BINARY: &str = "UE4Editor-Cmd.exe";

/// Filename of the interactive editor binary.
pub const INTERACTIVE_BINARY: &str = "UE4Editor.exe";

/// Environment variable naming the editor install root.
pub const EDITOR_ENV_VAR: &str = "UE4Editor";

/// Environment variable naming the project root.
pub const PROJECT_ENV_VAR: &str = "UE4Project";

const BINARIES_SUBDIR: &str = "Binaries";
const PLATFORM_SUBDIR: &str = "Win64";
const PROJECT_EXTENSION: &str = "uproject";

/// A configured editor install and project location.
///
/// Either path may be unset; resolution then yields `None` and callers raise
/// the matching domain error before composing a command.
#[derive(Debug, Clone, Default)]
pub struct EditorInstall {
    editor_root: Option<Utf8PathBuf>,
    project_root: Option<Utf8PathBuf>,
}

impl EditorInstall {
    pub fn new(editor_root: Option<Utf8PathBuf>, project_root: Option<Utf8PathBuf>) -> Self {
        Self {
            editor_root,
            project_root,
        }
    }

    /// Build an install from the `UE4Editor` / `UE4Project` environment
    /// variables. Only meant for the outer boundary (the CLI); library
    /// callers pass explicit paths to [`EditorInstall::new`].
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.is_empty())
                .map(Utf8PathBuf::from)
        };
        Self::new(read(EDITOR_ENV_VAR), read(PROJECT_ENV_VAR))
    }

    pub fn editor_root(&self) -> Option<&Utf8Path> {
        self.editor_root.as_deref()
    }

    pub fn project_root(&self) -> Option<&Utf8Path> {
        self.project_root.as_deref()
    }

    /// Resolve the headless command-line binary.
    pub fn headless_binary(&self) -> Option<Utf8PathBuf> {
        self.resolve_binary(HEADLESS_BINARY)
    }

    /// Resolve the interactive editor binary.
    pub fn interactive_binary(&self) -> Option<Utf8PathBuf> {
        self.resolve_binary(INTERACTIVE_BINARY)
    }

    fn resolve_binary(&self, binary_name: &str) -> Option<Utf8PathBuf> {
        let root = self.editor_root.as_ref()?;
        if !root.exists() {
            return None;
        }

        if root.is_file() {
            if root.file_name() == Some(binary_name) {
                return Some(root.clone());
            }
            return None;
        }

        let candidate = root
            .join(BINARIES_SUBDIR)
            .join(PLATFORM_SUBDIR)
            .join(binary_name);
        candidate.is_file().then_some(candidate)
    }

    /// Resolve the `.uproject` file: the configured path itself when it has
    /// the right extension, else the first (name-sorted) `.uproject` file
    /// directly under the root.
    pub fn project_file(&self) -> Option<Utf8PathBuf> {
        let root = self.project_root.as_ref()?;
        if !root.exists() {
            return None;
        }

        if root.is_file() {
            if root.extension() == Some(PROJECT_EXTENSION) {
                return Some(root.clone());
            }
            return None;
        }

        let mut candidates: Vec<Utf8PathBuf> = root
            .read_dir_utf8()
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && path.extension() == Some(PROJECT_EXTENSION))
            .collect();
        candidates.sort();
        candidates.into_iter().next()
    }
}
