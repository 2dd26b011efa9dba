//! Read/modify/write access to the `.uproject` manifest.
//!
//! The manifest is plain JSON with a `Plugins` array. Writes use sorted
//! keys and fixed indentation so repeated edits produce reproducible diffs.
//! When the primary file is unwritable (checked out read-only by source
//! control, typically) the write retries once at a sibling path whose
//! filename carries an `Edit` prefix.
//!
//! There is no cross-process lock: concurrent invocations against the same
//! project race and the last writer wins.

use crate::error::UeCmdError;
use crate::models::manifest::PluginEntry;
use crate::models::to_pretty_json;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;

/// Editor for one resolved `.uproject` file.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: Utf8PathBuf,
}

impl ProjectFile {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Parse the manifest. Tolerates a UTF-8 byte-order mark, which the
    /// editor itself writes on Windows.
    pub fn read(&self) -> Result<Value, UeCmdError> {
        if !self.path.exists() {
            return Err(UeCmdError::MissingProject);
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| UeCmdError::ManifestRead {
            path: self.path.clone(),
            source,
        })?;
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

        serde_json::from_str(contents).map_err(|source| UeCmdError::ManifestParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Serialize `document` back to disk. On a write failure the document
    /// goes to a sibling `Edit`-prefixed file instead; a second failure
    /// propagates. Returns the path actually written.
    pub fn write(&self, document: &Value) -> Result<Utf8PathBuf, UeCmdError> {
        let contents = to_pretty_json(document).map_err(|source| UeCmdError::ManifestWrite {
            path: self.path.clone(),
            source: std::io::Error::other(source),
        })?;

        if let Err(why) = fs::write(&self.path, &contents) {
            let fallback = self.edit_fallback_path();
            tracing::warn!(
                "Cannot directly edit {}: {}. Writing {} instead",
                self.path,
                why,
                fallback
            );
            fs::write(&fallback, &contents).map_err(|source| UeCmdError::ManifestWrite {
                path: fallback.clone(),
                source,
            })?;
            return Ok(fallback);
        }

        Ok(self.path.clone())
    }

    /// Merge `plugins` into the manifest's `Plugins` array and persist.
    ///
    /// Entries are matched by name: an existing entry has its enabled flag
    /// overwritten in place, anything else is appended. Applying the same
    /// list twice yields the same manifest. Returns the path written.
    pub fn set_plugins(&self, plugins: &[PluginEntry]) -> Result<Utf8PathBuf, UeCmdError> {
        let mut document = self.read()?;

        if !document
            .get("Plugins")
            .map(Value::is_array)
            .unwrap_or(false)
        {
            document["Plugins"] = json!([]);
        }
        let entries = document["Plugins"]
            .as_array_mut()
            .expect("Plugins was just ensured to be an array");

        for plugin in plugins {
            let existing = entries
                .iter_mut()
                .find(|entry| entry.get("Name").and_then(Value::as_str) == Some(&plugin.name));
            match existing {
                Some(entry) => {
                    entry["Enabled"] = Value::Bool(plugin.enabled);
                }
                None => {
                    entries.push(
                        serde_json::to_value(plugin)
                            .expect("plugin entries serialize to JSON objects"),
                    );
                }
            }
        }

        tracing::debug!(
            "Merged {} plugin entr{} into {}",
            plugins.len(),
            if plugins.len() == 1 { "y" } else { "ies" },
            self.path
        );
        self.write(&document)
    }

    /// Sibling path with an `Edit` filename prefix, same directory.
    fn edit_fallback_path(&self) -> Utf8PathBuf {
        let file_name = self.path.file_name().unwrap_or("uproject");
        match self.path.parent() {
            Some(parent) => parent.join(format!("Edit{file_name}")),
            None => Utf8PathBuf::from(format!("Edit{file_name}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::manifest::required_plugins;
    use tempfile::TempDir;

    fn project_in(dir: &TempDir, contents: &str) -> ProjectFile {
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let path = root.join("Game.uproject");
        fs::write(&path, contents).unwrap();
        ProjectFile::new(path)
    }

    #[test]
    fn test_read_strips_bom() {
        let temp_dir = TempDir::new().unwrap();
        let project = project_in(&temp_dir, "\u{feff}{\"FileVersion\": 3, \"Plugins\": []}");

        let document = project.read().unwrap();
        assert_eq!(document["FileVersion"], 3);
    }

    #[test]
    fn test_read_missing_file_is_missing_project() {
        let project = ProjectFile::new("/nope/Game.uproject");
        assert!(matches!(project.read(), Err(UeCmdError::MissingProject)));
    }

    #[test]
    fn test_read_invalid_json_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let project = project_in(&temp_dir, "not json at all");
        assert!(matches!(
            project.read(),
            Err(UeCmdError::ManifestParse { .. })
        ));
    }

    #[test]
    fn test_write_is_sorted_and_indented() {
        let temp_dir = TempDir::new().unwrap();
        let project = project_in(&temp_dir, "{}");

        let document = json!({"Zebra": 1, "Apple": 2});
        let written = project.write(&document).unwrap();

        let contents = fs::read_to_string(written).unwrap();
        let apple = contents.find("Apple").unwrap();
        let zebra = contents.find("Zebra").unwrap();
        assert!(apple < zebra);
        assert!(contents.contains("    \"Apple\": 2"));
    }

    #[test]
    fn test_write_falls_back_to_edit_prefixed_sibling() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        // A directory at the manifest path makes the primary write fail.
        let blocked = root.join("Game.uproject");
        fs::create_dir(&blocked).unwrap();

        let project = ProjectFile::new(blocked);
        let written = project.write(&json!({"Plugins": []})).unwrap();

        assert_eq!(written, root.join("EditGame.uproject"));
        assert!(written.exists());
    }

    #[test]
    fn test_set_plugins_appends_and_updates() {
        let temp_dir = TempDir::new().unwrap();
        let project = project_in(
            &temp_dir,
            r#"{"Plugins": [{"Name": "PythonScriptPlugin", "Enabled": false}]}"#,
        );

        project.set_plugins(&required_plugins()).unwrap();

        let document = project.read().unwrap();
        let entries = document["Plugins"].as_array().unwrap();
        assert_eq!(entries.len(), 4);
        // The pre-existing entry was updated in place, not duplicated.
        assert_eq!(entries[0]["Name"], "PythonScriptPlugin");
        assert_eq!(entries[0]["Enabled"], true);
    }

    #[test]
    fn test_set_plugins_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let project = project_in(&temp_dir, r#"{"FileVersion": 3, "Plugins": []}"#);

        project.set_plugins(&required_plugins()).unwrap();
        let first = fs::read_to_string(project.path()).unwrap();

        project.set_plugins(&required_plugins()).unwrap();
        let second = fs::read_to_string(project.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_set_plugins_creates_plugins_array() {
        let temp_dir = TempDir::new().unwrap();
        let project = project_in(&temp_dir, r#"{"FileVersion": 3}"#);

        project.set_plugins(&required_plugins()).unwrap();

        let document = project.read().unwrap();
        assert_eq!(document["Plugins"].as_array().unwrap().len(), 4);
    }
}
