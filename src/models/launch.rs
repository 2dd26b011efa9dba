use camino::Utf8PathBuf;

/// Where the editor should send its log output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// No logging flag is emitted.
    #[default]
    Disabled,
    /// `-log`: the editor opens its log window.
    Window,
    /// A log file. A bare filename lands next to the project and is passed
    /// as `LOG="name"`; a path with a directory component is passed as
    /// `ABSLOG="path"`.
    File(Utf8PathBuf),
}

impl LogTarget {
    /// The argument token for this target, if one is emitted at all.
    pub fn token(&self) -> Option<String> {
        match self {
            Self::Disabled => None,
            Self::Window => Some("-log".to_string()),
            Self::File(path) => match path.parent() {
                Some(parent) if !parent.as_str().is_empty() => {
                    Some(format!("ABSLOG=\"{path}\""))
                }
                _ => Some(format!("LOG=\"{path}\"")),
            },
        }
    }
}

/// Per-call options for a generic editor launch.
///
/// A fresh value is constructed for every invocation; nothing here is shared
/// across calls.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Optional map to open, placed right after the project path.
    pub map_path: Option<String>,

    /// Caller-supplied arguments, appended after the standard flags.
    pub extra_args: Vec<String>,

    /// Console commands joined into the `-ExecCmds` token. The token is
    /// emitted even when this list is empty.
    pub console_commands: Vec<String>,

    pub log: LogTarget,

    /// Use the headless command-line binary with the unattended flag set.
    pub headless: bool,

    /// Block until the editor process exits.
    pub wait: bool,

    /// Pre-generated engine user settings file. When absent, a fresh one is
    /// written per call.
    pub settings_ini: Option<Utf8PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_log_emits_nothing() {
        assert_eq!(LogTarget::Disabled.token(), None);
    }

    #[test]
    fn test_window_log_flag() {
        assert_eq!(LogTarget::Window.token(), Some("-log".to_string()));
    }

    #[test]
    fn test_bare_filename_uses_log() {
        let target = LogTarget::File(Utf8PathBuf::from("render.log"));
        assert_eq!(target.token(), Some(r#"LOG="render.log""#.to_string()));
    }

    #[test]
    fn test_path_with_directory_uses_abslog() {
        let target = LogTarget::File(Utf8PathBuf::from("C:/logs/render.log"));
        assert_eq!(
            target.token(),
            Some(r#"ABSLOG="C:/logs/render.log""#.to_string())
        );
    }
}
