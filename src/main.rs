// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, warn};
use std::io::Write;
use std::path::PathBuf;

use notesum::app_config::{self, Config};
use notesum::app_controller::Controller;
use notesum::file_utils::FileManager;
use notesum::text_utils::is_blank;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a note given as argument, file or standard input
    Summarize(SummarizeArgs),

    /// Detect the language of a text
    Detect {
        /// Text to analyse
        #[arg(value_name = "TEXT")]
        text: String,

        /// Show the French and English scores
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize every note file in a directory
    Scan {
        /// Directory to scan recursively
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Print one JSON object per note instead of text
        #[arg(long)]
        json: bool,
    },

    /// Inspect or empty the summary cache
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },

    /// Generate shell completions for notesum
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum CacheCommands {
    /// Show cache statistics
    Stats,
    /// Remove every cached summary
    Clear,
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    /// Note text (reads standard input when neither TEXT nor --file is given)
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    text: Option<String>,

    /// Read the note from a file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print the summary without cleaning it
    #[arg(short, long)]
    raw: bool,

    /// Neither read nor write the summary cache
    #[arg(long)]
    no_cache: bool,
}

/// notesum - offline note summarization
///
/// Summarizes French and English notes with a deterministic extractive
/// algorithm and caches the results on disk.
#[derive(Parser, Debug)]
#[command(name = "notesum")]
#[command(version)]
#[command(about = "Offline note summarization")]
#[command(long_about = "notesum summarizes notes on the device, detecting French or English and caching every summary it computes.

EXAMPLES:
    notesum summarize \"Une longue note...\"      # Summarize a text
    notesum summarize --file note.txt           # Summarize a file
    cat note.md | notesum summarize             # Summarize standard input
    notesum detect --verbose \"the cat is here\"  # Show language scores
    notesum scan ~/notes --json                 # Summarize a folder of notes
    notesum cache stats                         # Show cache statistics
    notesum completions bash > notesum.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    //
    // The logger accepts everything; the effective level is adjusted later
    // through `log::set_max_level` once the configuration is known.
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Warnings only until the config tells otherwise
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "notesum", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Summarize(args) => run_summarize(config, args),
        Commands::Detect { text, verbose } => run_detect(config, &text, verbose),
        Commands::Scan { dir, json } => run_scan(config, dir, json).await,
        Commands::Cache { action } => run_cache(config, action),
        Commands::Completions { .. } => Ok(()),
    }
}

fn run_summarize(mut config: Config, args: SummarizeArgs) -> Result<()> {
    if args.no_cache {
        config.cache.enabled = false;
    }
    let controller = Controller::with_config(config)?;

    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => FileManager::read_to_string(&path)?,
        (None, None) => FileManager::read_stdin()?,
    };

    if is_blank(&text) {
        warn!("The note is empty, its summary is empty too");
    }

    println!("{}", controller.summarize_text(&text, args.raw));
    Ok(())
}

fn run_detect(config: Config, text: &str, verbose: bool) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let scores = controller.detect(text);

    if verbose {
        println!(
            "{} ({}) - french: {}, english: {}",
            scores.language,
            scores.language.name(),
            scores.french,
            scores.english
        );
    } else {
        println!("{}", scores.language);
    }
    Ok(())
}

async fn run_scan(config: Config, dir: PathBuf, json: bool) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let entries = controller.scan_folder(&dir).await?;

    for entry in entries {
        if json {
            println!("{}", serde_json::to_string(&entry)?);
        } else {
            println!("{}: {}", entry.path.display(), entry.summary);
        }
    }
    Ok(())
}

fn run_cache(config: Config, action: CacheCommands) -> Result<()> {
    let controller = Controller::with_config(config)?;

    match action {
        CacheCommands::Stats => println!("{}", controller.cache_stats()?),
        CacheCommands::Clear => {
            let removed = controller.clear_cache()?;
            println!("Removed {} cached summaries", removed);
        }
    }
    Ok(())
}
