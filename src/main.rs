//! pomotray - a system tray Pomodoro timer
//!
//! The Pomodoro Technique in the tray:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 pomodoros

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use pomotray::cli::{Cli, Commands, Display, IconArgs, RunArgs, SettingsCommand};
use pomotray::menubar::{spawn_stdin_reader, TrayIconManager};
use pomotray::render::IconRenderer;
use pomotray::session::{Intent, SessionController};
use pomotray::settings::SettingsStore;
use pomotray::sound::{clock_sound, AudioCues, CueEngine};

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli) {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
fn execute(cli: Cli) -> Result<()> {
    let store = SettingsStore::new(cli.settings.unwrap_or_else(SettingsStore::default_path));

    match cli.command {
        Some(Commands::Run(args)) => run_app(store, &args),
        None => run_app(store, &RunArgs::default()),
        Some(Commands::Icon(args)) => write_icon(&args),
        Some(Commands::Settings { action }) => manage_settings(&store, action),
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
    }
}

/// Runs the tray timer until the user quits.
fn run_app(store: SettingsStore, args: &RunArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("pomotray-worker")
        .build()
        .context("Failed to start the async runtime")?;

    let settings = store.load();
    info!(path = %store.path().display(), "Settings loaded");

    let audio: Arc<dyn AudioCues> = if args.no_audio {
        Arc::new(CueEngine::silent())
    } else {
        Arc::new(CueEngine::initialize(clock_sound()))
    };

    let (update_tx, update_rx) = crossbeam_channel::unbounded();
    let (intent_tx, intent_rx) = crossbeam_channel::unbounded();

    let controller = SessionController::new(settings.clone(), store, audio, update_tx);
    let manager = TrayIconManager::new(update_rx, intent_rx, settings.enable_clock_sound);

    runtime.block_on(controller.publish_initial());

    spawn_stdin_reader(intent_tx.clone()).context("Failed to start the console reader")?;
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted");
            let _ = intent_tx.send(Intent::Quit);
        }
    });

    manager.run(args.headless, move |intent| {
        runtime.block_on(controller.dispatch(intent))
    })
}

/// Renders an icon to a file.
fn write_icon(args: &IconArgs) -> Result<()> {
    let png = IconRenderer::new().render(&args.text, args.dots);
    fs::write(&args.output, &png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    Display::show_icon_written(&args.output, png.len());
    Ok(())
}

/// Handles the settings subcommands.
fn manage_settings(store: &SettingsStore, action: SettingsCommand) -> Result<()> {
    match action {
        SettingsCommand::Show => {
            Display::show_settings(&store.load()).context("Failed to format settings")?;
        }
        SettingsCommand::Path => Display::show_path(store.path()),
        SettingsCommand::Edit => match store.edit_interactively(&store.load()) {
            Some(updated) => Display::show_settings_updated(&updated),
            None => Display::show_settings_unchanged(),
        },
        SettingsCommand::Reset => {
            store.reset()?;
            Display::show_settings_reset(store.path());
        }
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
