//! Configuration for the orchestration layer.
//!
//! Two unrelated documents live here:
//!
//! - [`RemoteExecutionConfig`]: the engine user-settings INI handed to every
//!   editor launch via `EDITORUSERSETTINGSINI=`. It enables the editor's
//!   remote Python scripting endpoint with fixed multicast defaults.
//! - [`SettingsManager`] / [`ToolSettings`]: the tool's own YAML settings
//!   file holding the default editor root and project path, so operators do
//!   not have to pass them on every invocation.

use crate::error::UeCmdError;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;

/// Multicast group endpoint the editor's remote execution plugin binds to.
pub const MULTICAST_GROUP_ENDPOINT: &str = "239.0.0.1:6766";

/// Bind address for the remote execution endpoint.
pub const MULTICAST_BIND_ADDRESS: &str = "0.0.0.0";

/// Send/receive buffer size for the remote execution endpoint, in bytes.
pub const REMOTE_EXECUTION_BUFFER_SIZE: u64 = 2_097_152;

/// Builds the engine user-settings file that enables remote Python
/// scripting.
///
/// Startup-script and additional-path directives are only accepted when the
/// referenced path actually exists, so a stale pipeline setting cannot leak
/// into the editor's configuration.
#[derive(Debug, Clone, Default)]
pub struct RemoteExecutionConfig {
    startup_script: Option<Utf8PathBuf>,
    additional_paths: Vec<Utf8PathBuf>,
}

impl RemoteExecutionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a Python startup script. Ignored unless the path exists and
    /// ends in `.py`.
    pub fn set_startup_script(&mut self, path: impl AsRef<Utf8Path>) {
        let path = path.as_ref();
        if path.exists() && path.extension() == Some("py") {
            self.startup_script = Some(path.to_path_buf());
        } else {
            tracing::debug!("Ignoring startup script that is not an existing .py file: {path}");
        }
    }

    /// Register an additional Python search path. Ignored unless the path
    /// exists.
    pub fn add_python_path(&mut self, path: impl AsRef<Utf8Path>) {
        let path = path.as_ref();
        if path.exists() {
            self.additional_paths.push(path.to_path_buf());
        } else {
            tracing::debug!("Ignoring nonexistent additional Python path: {path}");
        }
    }

    /// Render the INI document.
    pub fn render(&self) -> String {
        let mut directives = Vec::new();
        if let Some(script) = &self.startup_script {
            directives.push(format!("+StartupScripts={script}"));
        }
        for path in &self.additional_paths {
            directives.push(format!("+AdditionalPaths=(Path=\\\"{path}\\\")"));
        }
        let directives = directives.join("\n");

        format!(
            "[/Script/PythonScriptPlugin.PythonScriptPluginSettings]\n\
             {directives}\n\
             bDeveloperMode=True\n\
             bRemoteExecution=True\n\
             RemoteExecutionMulticastGroupEndpoint={MULTICAST_GROUP_ENDPOINT}\n\
             RemoteExecutionMulticastBindAddress={MULTICAST_BIND_ADDRESS}\n\
             RemoteExecutionSendBufferSizeBytes={REMOTE_EXECUTION_BUFFER_SIZE}\n\
             RemoteExecutionReceiveBufferSizeBytes={REMOTE_EXECUTION_BUFFER_SIZE}\n\
             RemoteExecutionMulticastTtl=0\n"
        )
    }

    /// Write the INI to `path`, or to `<tmp>/uecmd/UserEngine.ini` when no
    /// path is given, creating parent directories. Returns the path written.
    pub fn save(&self, path: Option<&Utf8Path>) -> Result<Utf8PathBuf, UeCmdError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_settings_path().map_err(|source| UeCmdError::ConfigWrite {
                path: Utf8PathBuf::from("UserEngine.ini"),
                source,
            })?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| UeCmdError::ConfigWrite {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        fs::write(&path, self.render()).map_err(|source| UeCmdError::ConfigWrite {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote engine user settings to {path}");
        Ok(path)
    }
}

fn default_settings_path() -> std::io::Result<Utf8PathBuf> {
    let temp_dir = Utf8PathBuf::try_from(std::env::temp_dir()).map_err(std::io::Error::other)?;
    Ok(temp_dir.join("uecmd").join("UserEngine.ini"))
}

/// Tool settings persisted between invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Editor install root (or direct path to the editor binary).
    #[serde(rename = "Editor", default)]
    pub editor: String,

    /// Project root (or direct path to the `.uproject` file).
    #[serde(rename = "Uproject", default)]
    pub uproject: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

/// Loads and saves the tool's YAML settings file.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_path: Utf8PathBuf,
}

impl SettingsManager {
    /// Create a manager rooted at `settings_dir`, creating the directory if
    /// needed.
    pub fn new<P: AsRef<Utf8Path>>(settings_dir: P) -> Result<Self> {
        let settings_dir = settings_dir.as_ref().to_path_buf();

        if !settings_dir.exists() {
            fs::create_dir_all(&settings_dir)
                .with_context(|| format!("Failed to create settings directory: {settings_dir}"))?;
        }

        Ok(Self {
            settings_path: settings_dir.join("Uecmd Settings.yaml"),
        })
    }

    /// Load the settings file, falling back to defaults when it does not
    /// exist yet.
    pub fn load(&self) -> Result<ToolSettings> {
        if !self.settings_path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(ToolSettings::default());
        }

        let contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: ToolSettings = serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    pub fn save(&self, settings: &ToolSettings) -> Result<()> {
        let yaml = serde_yaml_ng::to_string(settings)
            .context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_render_fixed_endpoint_fields() {
        let ini = RemoteExecutionConfig::new().render();
        assert!(ini.starts_with("[/Script/PythonScriptPlugin.PythonScriptPluginSettings]"));
        assert!(ini.contains("bRemoteExecution=True"));
        assert!(ini.contains("RemoteExecutionMulticastGroupEndpoint=239.0.0.1:6766"));
        assert!(ini.contains("RemoteExecutionMulticastBindAddress=0.0.0.0"));
        assert!(ini.contains("RemoteExecutionSendBufferSizeBytes=2097152"));
        assert!(ini.contains("RemoteExecutionReceiveBufferSizeBytes=2097152"));
        assert!(ini.contains("RemoteExecutionMulticastTtl=0"));
    }

    #[test]
    fn test_startup_script_requires_existing_py_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        let script = dir.join("startup.py");
        let mut file = fs::File::create(&script).unwrap();
        writeln!(file, "print('hello')").unwrap();

        let mut config = RemoteExecutionConfig::new();
        config.set_startup_script(&script);
        assert!(config.render().contains(&format!("+StartupScripts={script}")));

        let mut config = RemoteExecutionConfig::new();
        config.set_startup_script(dir.join("missing.py"));
        assert!(!config.render().contains("+StartupScripts"));

        let not_python = dir.join("startup.txt");
        fs::write(&not_python, "x").unwrap();
        let mut config = RemoteExecutionConfig::new();
        config.set_startup_script(&not_python);
        assert!(!config.render().contains("+StartupScripts"));
    }

    #[test]
    fn test_additional_path_requires_existing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        let mut config = RemoteExecutionConfig::new();
        config.add_python_path(&dir);
        config.add_python_path(dir.join("missing"));

        let ini = config.render();
        assert!(ini.contains(&format!("+AdditionalPaths=(Path=\\\"{dir}\\\")")));
        assert_eq!(ini.matches("+AdditionalPaths").count(), 1);
    }

    #[test]
    fn test_save_to_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let target = dir.join("nested").join("UserEngine.ini");

        let written = RemoteExecutionConfig::new().save(Some(&target)).unwrap();
        assert_eq!(written, target);
        assert!(target.exists());
    }

    #[test]
    fn test_settings_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = SettingsManager::new(&dir).unwrap();

        let settings = ToolSettings {
            editor: "C:/UE_4.26".to_string(),
            uproject: "C:/Projects/Game".to_string(),
            debug_mode: true,
        };
        manager.save(&settings).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.editor, "C:/UE_4.26");
        assert_eq!(loaded.uproject, "C:/Projects/Game");
        assert!(loaded.debug_mode);
    }

    #[test]
    fn test_missing_settings_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = SettingsManager::new(&dir).unwrap();

        let settings = manager.load().unwrap();
        assert!(settings.editor.is_empty());
        assert!(!settings.debug_mode);
    }
}
