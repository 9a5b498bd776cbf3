use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fontswap::audit::AuditLogger;
use fontswap::cli::{
    handle_history_command, handle_replace_command, handle_restore_command,
    handle_sessions_command, handle_source_command, handle_watch_command, ReplaceArgs,
    RestoreArgs, SessionsArgs,
};
use fontswap::config::{paths::SwapPaths, settings::Settings};
use fontswap::services::{SwapService, SwapState};

#[derive(Parser)]
#[command(
    name = "fontswap",
    author = "Kaylee Beyene",
    version,
    about = "Replace every font in a folder with one custom font, and put them back",
    long_about = "fontswap moves the font files (.ttf, .otf, .woff, .woff2, .eot) of a \
                  folder into a timestamped backup under Fonts.old and copies your custom \
                  font over each of them. Put exactly one font file in the source folder \
                  next to the program. Use 'restore' to move the originals back."
)]
struct Cli {
    /// Folder holding the custom font (defaults to the one next to the program)
    #[arg(long, global = true, env = "FONTSWAP_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Back up the fonts in a folder and replace them with the custom font
    Replace(ReplaceArgs),

    /// Move backed-up fonts back into a folder
    Restore(RestoreArgs),

    /// List the backups kept for a folder
    #[command(alias = "list")]
    Sessions(SessionsArgs),

    /// Show which custom font would be used
    Source,

    /// Keep checking the source folder and report changes
    Watch {
        /// Seconds between checks (defaults to the configured interval)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many seconds
        #[arg(long)]
        duration: Option<u64>,
    },

    /// Show recent replace, restore and cleanup runs
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the settings file (with defaults filled in)
        #[arg(long)]
        save: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FONTSWAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SwapPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut state = match &cli.source_dir {
        Some(dir) => SwapState::new(dir),
        None => SwapState::from_settings(&settings)?,
    };

    let journal = AuditLogger::new(paths.journal_file());
    let service = SwapService::new(settings.clone(), Some(journal));

    match cli.command {
        Some(Commands::Replace(args)) => handle_replace_command(&service, &mut state, args)?,
        Some(Commands::Restore(args)) => handle_restore_command(&service, &mut state, args)?,
        Some(Commands::Sessions(args)) => handle_sessions_command(args)?,
        Some(Commands::Source) => handle_source_command(&mut state)?,
        Some(Commands::Watch { interval, duration }) => {
            let interval = interval
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| settings.poll_interval());
            handle_watch_command(&mut state, interval, duration.map(Duration::from_secs))?;
        }
        Some(Commands::History { limit }) => handle_history_command(&paths, limit)?,
        Some(Commands::Config { save }) => {
            if save {
                settings.save(&paths)?;
                println!("Saved settings to {}", paths.settings_file().display());
                println!();
            }
            println!("fontswap Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Journal file:     {}", paths.journal_file().display());
            println!("Source folder:    {}", state.source_dir().display());
            println!();
            println!("Settings:");
            println!("  Backup layout:        {:?}", settings.backup_layout);
            println!("  Poll interval:        {}s", settings.poll_interval().as_secs());
            println!("  Confirmation phrase:  {}", settings.confirmation_phrase);
            println!("  Journal enabled:      {}", settings.journal_enabled);
        }
        None => {
            println!("fontswap - replace the fonts in a folder with one custom font");
            println!();
            println!("Run 'fontswap --help' for usage information.");
            println!("Run 'fontswap replace' to get started.");
        }
    }

    Ok(())
}
