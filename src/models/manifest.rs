use serde::{Deserialize, Serialize};

/// A single entry in a `.uproject` manifest's `Plugins` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Enabled")]
    pub enabled: bool,
}

impl PluginEntry {
    pub fn enabled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }
}

/// The plugin set every editor-launch-family command depends on.
///
/// Remote scripting, sequencer scripting, automation tests and the editor
/// scripting utilities must all be enabled before the editor is driven
/// headlessly. Returns a fresh list on every call so callers can never
/// share or mutate a common default.
pub fn required_plugins() -> Vec<PluginEntry> {
    vec![
        PluginEntry::enabled("PythonScriptPlugin"),
        PluginEntry::enabled("SequencerScripting"),
        PluginEntry::enabled("PythonAutomationTest"),
        PluginEntry::enabled("EditorScriptingUtilities"),
    ]
}
