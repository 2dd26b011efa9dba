//! Command-line composition for the Unreal Editor.
//!
//! Translates typed operation parameters into the exact argument vectors the
//! editor's own CLI parser expects. Token spelling and ordering are fixed by
//! the editor, not by this crate: executable path, project path, optional
//! map, then flags, with the engine user-settings override always last.
//!
//! The composition functions are pure; [`UnrealCmd`] wires them to path
//! resolution, manifest preparation and the process launcher.

use crate::config::RemoteExecutionConfig;
use crate::error::UeCmdError;
use crate::models::launch::{LaunchOptions, LogTarget};
use crate::models::manifest::required_plugins;
use crate::models::render::RenderSettings;
use crate::services::launcher::{Launched, ProcessLauncher};
use crate::services::locator::EditorInstall;
use crate::services::project::ProjectFile;
use camino::Utf8Path;
use std::process::ExitStatus;

/// Flags appended to every headless invocation.
const HEADLESS_FLAGS: [&str; 5] = [
    "-silent",
    "-UNATTENDED",
    "-NOSPLASH",
    "-NOLOADSTARTUPPACKAGES",
    "-targetplatform=WindowsNoEditor",
];

/// Assemble the argument vector for an editor launch.
///
/// Order: executable, project, optional map, `-ExecCmds` (always present,
/// empty quotes are valid), log flag, headless flags, caller extra args,
/// trailing `EDITORUSERSETTINGSINI=` token.
pub fn compose_launch(
    editor: &Utf8Path,
    project: &Utf8Path,
    options: &LaunchOptions,
    settings_ini: &Utf8Path,
) -> Vec<String> {
    let mut argv = vec![editor.to_string(), project.to_string()];

    if let Some(map_path) = &options.map_path {
        argv.push(map_path.clone());
    }

    argv.push(format!(
        "-ExecCmds=\"{}\"",
        options.console_commands.join(";")
    ));

    if let Some(log_token) = options.log.token() {
        argv.push(log_token);
    }

    if options.headless {
        argv.extend(HEADLESS_FLAGS.iter().map(|flag| flag.to_string()));
    }

    argv.extend(options.extra_args.iter().cloned());
    argv.push(format!("EDITORUSERSETTINGSINI={settings_ini}"));
    argv
}

/// The fixed `-Movie*` flag sequence for a render, plus the conditional
/// flags for parameters that are actually set. Start/end frames of zero mean
/// "unset" and emit nothing.
pub fn render_args(settings: &RenderSettings) -> Vec<String> {
    let mut args = vec![
        "-game".to_string(),
        "-MovieSceneCaptureType=\"/Script/MovieSceneCapture.AutomatedLevelSequenceCapture\""
            .to_string(),
        format!("-LevelSequence=\"{}\"", settings.sequence_path),
        "-NoLoadingScreen".to_string(),
        format!("-ResX={}", settings.res_x),
        format!("-ResY={}", settings.res_y),
        "-ForceRes".to_string(),
        if settings.preview {
            "-NoVSync".to_string()
        } else {
            "-VSync".to_string()
        },
        format!("-MovieFrameRate={}", settings.frame_rate),
        "-NoTextureStreaming".to_string(),
        "-MovieCinematicMode=Yes".to_string(),
        format!("-MovieWarmUpFrames={}", settings.warmup_frames),
        format!("-MovieDelayBeforeWarmUp={}", settings.delay_frames),
        format!(
            "-MovieDelayBeforeShotWarmUp={}",
            settings.delay_before_shot_frames
        ),
        format!("-MovieDelayEveryFrame={}", settings.delay_every_frame_frames),
        format!("-MovieQuality={}", settings.quality),
        format!("-MovieFolder=\"{}\"", settings.output_folder),
        format!("-MovieName=\"{}\"", settings.output_name),
        format!("-MovieFormat=\"{}\"", settings.output_format),
        format!(
            "-UseBurnIn=\"{}\"",
            if settings.use_burn_in { "True" } else { "False" }
        ),
        "-NoScreenMessage".to_string(),
        "-WINDOWED".to_string(),
    ];

    if let Some(shot) = &settings.shot {
        args.push(format!("-Shot=\"{shot}\""));
    }
    if settings.start_frame != 0 {
        args.push(format!("-MovieStartFrame={}", settings.start_frame));
    }
    if settings.end_frame != 0 {
        args.push(format!("-MovieEndFrame={}", settings.end_frame));
    }
    if let Some(edl) = &settings.write_edit_decision_list {
        args.push(format!("-WriteEditDecisionList={edl}"));
    }
    if let Some(fcpxml) = &settings.write_final_cut_xml {
        args.push(format!("-WriteFinalCutProXML={fcpxml}"));
    }

    args
}

/// Console-variable overrides applied to every render: screen messages off,
/// motion blur and depth of field at full quality.
pub fn render_console_commands() -> Vec<String> {
    vec![
        "DisableAllScreenMessages".to_string(),
        "r.DepthOfFieldQuality=4".to_string(),
        "r.MotionBlurSeparable=1".to_string(),
        "r.MotionBlurQuality=4".to_string(),
    ]
}

/// Arguments for a Python script run. Quick mode drives the `pythonscript`
/// commandlet headlessly; full-initialize mode boots the whole editor and
/// executes the script once initialization completes.
pub fn script_args(script: &Utf8Path, fully_initialize: bool) -> Vec<String> {
    if fully_initialize {
        vec![format!("-ExecutePythonScript=\"{script}\"")]
    } else {
        vec![
            "-run=pythonscript".to_string(),
            format!("-script={script}"),
        ]
    }
}

/// Arguments for an `ImportAssets` commandlet run against a serialized
/// import spec.
pub fn import_args(
    spec_path: &Utf8Path,
    use_source_control: bool,
    submit_description: Option<&str>,
) -> Vec<String> {
    let mut args = vec![
        "-run=ImportAssets".to_string(),
        format!("-importsettings=\"{spec_path}\""),
        "-replaceexisting".to_string(),
    ];

    if !use_source_control {
        args.push("-nosourcecontrol".to_string());
    } else if let Some(description) = submit_description {
        args.push(format!("-submitdesc=\"{description}\""));
    }

    args
}

/// Composes and launches editor invocations against one configured install.
///
/// Owns an [`EditorInstall`] for path resolution and a [`ProcessLauncher`]
/// for spawning; each operation resolves paths, prepares the project
/// manifest and engine settings, composes the argument vector and hands it
/// to the launcher.
pub struct UnrealCmd {
    install: EditorInstall,
    launcher: ProcessLauncher,
}

impl UnrealCmd {
    pub fn new(install: EditorInstall) -> Self {
        Self {
            install,
            launcher: ProcessLauncher::new(),
        }
    }

    /// Use a custom launcher, typically a test double.
    pub fn with_launcher(install: EditorInstall, launcher: ProcessLauncher) -> Self {
        Self { install, launcher }
    }

    pub fn install(&self) -> &EditorInstall {
        &self.install
    }

    /// Launch the editor with `options`.
    ///
    /// Resolves the binary matching the headless flag and the project file,
    /// merges the required plugin set into the project manifest, writes the
    /// engine user settings when none were supplied, then spawns. Fails with
    /// [`UeCmdError::MissingEditor`] / [`UeCmdError::MissingProject`] before
    /// any subprocess exists.
    pub async fn run_editor(&self, options: LaunchOptions) -> Result<Launched, UeCmdError> {
        let editor = if options.headless {
            self.install.headless_binary()
        } else {
            self.install.interactive_binary()
        }
        .ok_or(UeCmdError::MissingEditor)?;

        let project = self
            .install
            .project_file()
            .ok_or(UeCmdError::MissingProject)?;

        ProjectFile::new(project.clone()).set_plugins(&required_plugins())?;

        let settings_ini = match &options.settings_ini {
            Some(path) => path.clone(),
            None => RemoteExecutionConfig::new().save(None)?,
        };

        let argv = compose_launch(&editor, &project, &options, &settings_ini);
        let wait = options.wait;
        self.launcher.launch(&argv, wait).await
    }

    /// Render a level sequence to disk. Always headless, always blocks until
    /// the editor exits.
    pub async fn run_render(&self, settings: &RenderSettings) -> Result<ExitStatus, UeCmdError> {
        let options = LaunchOptions {
            map_path: Some(settings.map_path.clone()),
            extra_args: render_args(settings),
            console_commands: render_console_commands(),
            log: settings.log.clone(),
            headless: true,
            wait: true,
            settings_ini: None,
        };
        self.run_to_completion(options).await
    }

    /// Execute a Python script in the editor. Quick mode runs the headless
    /// commandlet; `fully_initialize` boots the interactive editor instead.
    /// Always blocks until the editor exits.
    pub async fn run_script(
        &self,
        script: &Utf8Path,
        fully_initialize: bool,
        log: LogTarget,
    ) -> Result<ExitStatus, UeCmdError> {
        let options = LaunchOptions {
            map_path: None,
            extra_args: script_args(script, fully_initialize),
            console_commands: Vec::new(),
            log,
            headless: !fully_initialize,
            wait: true,
            settings_ini: None,
        };
        self.run_to_completion(options).await
    }

    /// Run the `ImportAssets` commandlet against a serialized import spec.
    /// Always headless, always blocks until the editor exits.
    pub async fn run_import(
        &self,
        spec_path: &Utf8Path,
        use_source_control: bool,
        submit_description: Option<&str>,
        log: LogTarget,
    ) -> Result<ExitStatus, UeCmdError> {
        let options = LaunchOptions {
            map_path: None,
            extra_args: import_args(spec_path, use_source_control, submit_description),
            console_commands: Vec::new(),
            log,
            headless: true,
            wait: true,
            settings_ini: None,
        };
        self.run_to_completion(options).await
    }

    async fn run_to_completion(&self, options: LaunchOptions) -> Result<ExitStatus, UeCmdError> {
        match self.run_editor(options).await? {
            Launched::Completed(status) => Ok(status),
            Launched::Detached(mut child) => {
                let status = child.wait().await.map_err(UeCmdError::Spawn)?;
                Ok(status)
            }
        }
    }
}
