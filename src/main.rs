//! uecmd - headless command-line orchestration for Unreal Editor pipelines
//!
//! CLI entry point. The binary is the outer boundary of the system: it reads
//! the `UE4Editor` / `UE4Project` environment variables and the tool
//! settings file once, resolves explicit paths, and hands them to the
//! library. The library itself never consults the environment during an
//! operation.
//!
//! # Execution Flow
//!
//! 1. Parse CLI arguments
//! 2. Load tool settings from `Uecmd Data/Uecmd Settings.yaml`
//! 3. Initialize logging -> logs/uecmd.<date>
//! 4. Build the editor install (flags > environment > settings file)
//! 5. Dispatch the subcommand on a tokio runtime

use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::process::ExitStatus;
use uecmd::models::launch::{LaunchOptions, LogTarget};
use uecmd::models::render::{RenderOutputFormat, RenderSettings};
use uecmd::services::launcher::Launched;
use uecmd::{
    APP_NAME, EditorInstall, ProjectFile, RemoteExecutionConfig, SettingsManager, ToolSettings,
    UnrealCmd, VERSION, required_plugins,
};

#[derive(Parser)]
#[command(name = "uecmd", version, about = "Drive the Unreal Editor headlessly")]
struct Cli {
    /// Editor install root, or a direct path to the editor binary.
    /// Falls back to the UE4Editor environment variable, then the settings
    /// file.
    #[arg(long, global = true)]
    editor: Option<Utf8PathBuf>,

    /// Project root, or a direct path to the .uproject file.
    /// Falls back to the UE4Project environment variable, then the settings
    /// file.
    #[arg(long, global = true)]
    project: Option<Utf8PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the editor, optionally opening a map.
    Launch {
        /// Map to open after the project loads.
        #[arg(long)]
        map: Option<String>,

        /// Use the headless command-line binary with unattended flags.
        #[arg(long)]
        headless: bool,

        /// Block until the editor exits.
        #[arg(long)]
        wait: bool,

        /// Console command to execute on startup; repeatable.
        #[arg(long = "exec-cmd")]
        exec_cmds: Vec<String>,

        /// Open the editor's log window.
        #[arg(long)]
        log_window: bool,

        /// Write the editor log to this file.
        #[arg(long, conflicts_with = "log_window")]
        log_file: Option<Utf8PathBuf>,

        /// Extra arguments passed through to the editor.
        #[arg(last = true)]
        extra_args: Vec<String>,
    },

    /// Render a level sequence to disk.
    Render {
        /// Map containing the sequence.
        map: String,

        /// Level sequence asset path.
        sequence: String,

        #[arg(long, default_value = "render")]
        output_folder: String,

        #[arg(long, default_value = "Render.{frame}")]
        output_name: String,

        /// Output format: jpg, bmp, png or video.
        #[arg(long, default_value = "png")]
        format: String,

        /// First frame to render; 0 uses the sequence's own range.
        #[arg(long, default_value_t = 0)]
        start_frame: u32,

        /// Last frame to render; 0 uses the sequence's own range.
        #[arg(long, default_value_t = 0)]
        end_frame: u32,

        #[arg(long, default_value_t = 1920)]
        res_x: u32,

        #[arg(long, default_value_t = 1080)]
        res_y: u32,

        #[arg(long, default_value_t = 30)]
        frame_rate: u32,

        #[arg(long, default_value_t = 100)]
        quality: u32,

        /// Drop vsync for a faster preview render.
        #[arg(long)]
        preview: bool,

        /// Render only this shot.
        #[arg(long)]
        shot: Option<String>,

        /// Enable the sequence's burn-in overlay.
        #[arg(long)]
        burn_in: bool,

        /// Export an edit decision list to this path.
        #[arg(long)]
        edl: Option<String>,

        /// Export a Final Cut Pro XML to this path.
        #[arg(long)]
        fcpxml: Option<String>,
    },

    /// Run a Python script inside the editor.
    RunScript {
        /// Path to the Python script.
        script: Utf8PathBuf,

        /// Boot the full editor before executing, instead of the quick
        /// commandlet.
        #[arg(long)]
        fully_initialize: bool,
    },

    /// Import assets described by a previously written import spec.
    Import {
        /// Path to the import spec JSON file.
        spec: Utf8PathBuf,

        /// Check imported assets into source control.
        #[arg(long)]
        source_control: bool,

        /// Source control submit description.
        #[arg(long)]
        submit_desc: Option<String>,
    },

    /// Enable the required scripting plugins in the project manifest.
    EnablePlugins,

    /// Write the engine user-settings file that enables remote scripting.
    WriteSettings {
        /// Destination path; defaults to the temp directory.
        #[arg(long)]
        output: Option<Utf8PathBuf>,

        /// Python startup script directive.
        #[arg(long)]
        startup_script: Option<Utf8PathBuf>,

        /// Additional Python search path; repeatable.
        #[arg(long = "python-path")]
        python_paths: Vec<Utf8PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_manager = SettingsManager::new("Uecmd Data")?;
    let settings = settings_manager.load().unwrap_or_default();

    let _guard = uecmd::logging::setup_logging(
        "logs",
        APP_NAME,
        cli.debug || settings.debug_mode,
        true,
    )?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    runtime.block_on(run(cli, settings))
}

async fn run(cli: Cli, settings: ToolSettings) -> Result<()> {
    let install = resolve_install(&cli, &settings);
    let cmd = UnrealCmd::new(install);

    match cli.command {
        Commands::Launch {
            map,
            headless,
            wait,
            exec_cmds,
            log_window,
            log_file,
            extra_args,
        } => {
            let options = LaunchOptions {
                map_path: map,
                extra_args,
                console_commands: exec_cmds,
                log: log_target(log_window, log_file),
                headless,
                wait,
                settings_ini: None,
            };
            match cmd.run_editor(options).await? {
                Launched::Completed(status) => check_status(status),
                Launched::Detached(_) => {
                    tracing::info!("Editor launched; not waiting for exit");
                    Ok(())
                }
            }
        }

        Commands::Render {
            map,
            sequence,
            output_folder,
            output_name,
            format,
            start_frame,
            end_frame,
            res_x,
            res_y,
            frame_rate,
            quality,
            preview,
            shot,
            burn_in,
            edl,
            fcpxml,
        } => {
            let output_format: RenderOutputFormat =
                format.parse().map_err(|message: String| anyhow::anyhow!(message))?;
            let mut render = RenderSettings::new(map, sequence);
            render.output_folder = output_folder;
            render.output_name = output_name;
            render.output_format = output_format;
            render.start_frame = start_frame;
            render.end_frame = end_frame;
            render.res_x = res_x;
            render.res_y = res_y;
            render.frame_rate = frame_rate;
            render.quality = quality;
            render.preview = preview;
            render.shot = shot;
            render.use_burn_in = burn_in;
            render.write_edit_decision_list = edl;
            render.write_final_cut_xml = fcpxml;

            check_status(cmd.run_render(&render).await?)
        }

        Commands::RunScript {
            script,
            fully_initialize,
        } => check_status(
            cmd.run_script(&script, fully_initialize, LogTarget::Disabled)
                .await?,
        ),

        Commands::Import {
            spec,
            source_control,
            submit_desc,
        } => check_status(
            cmd.run_import(
                &spec,
                source_control,
                submit_desc.as_deref(),
                LogTarget::Disabled,
            )
            .await?,
        ),

        Commands::EnablePlugins => {
            let project = cmd
                .install()
                .project_file()
                .ok_or(uecmd::UeCmdError::MissingProject)?;
            let written = ProjectFile::new(project).set_plugins(&required_plugins())?;
            println!("{written}");
            Ok(())
        }

        Commands::WriteSettings {
            output,
            startup_script,
            python_paths,
        } => {
            let mut config = RemoteExecutionConfig::new();
            if let Some(script) = startup_script {
                config.set_startup_script(script);
            }
            for path in python_paths {
                config.add_python_path(path);
            }
            let written = config.save(output.as_deref())?;
            println!("{written}");
            Ok(())
        }
    }
}

/// Explicit flags win over the environment, which wins over the settings
/// file.
fn resolve_install(cli: &Cli, settings: &ToolSettings) -> EditorInstall {
    let from_env = EditorInstall::from_env();

    let editor = cli
        .editor
        .clone()
        .or_else(|| from_env.editor_root().map(|p| p.to_path_buf()))
        .or_else(|| {
            (!settings.editor.is_empty()).then(|| Utf8PathBuf::from(settings.editor.clone()))
        });

    let project = cli
        .project
        .clone()
        .or_else(|| from_env.project_root().map(|p| p.to_path_buf()))
        .or_else(|| {
            (!settings.uproject.is_empty()).then(|| Utf8PathBuf::from(settings.uproject.clone()))
        });

    EditorInstall::new(editor, project)
}

fn log_target(log_window: bool, log_file: Option<Utf8PathBuf>) -> LogTarget {
    match (log_window, log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (true, None) => LogTarget::Window,
        (false, None) => LogTarget::Disabled,
    }
}

fn check_status(status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        bail!("editor exited with code {}", status.code().unwrap_or(-1));
    }
}
