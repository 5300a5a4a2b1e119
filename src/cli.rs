//! Command-line interface for localshortcut.
//!
//! Handles argument parsing and the one-shot subcommands (`check`,
//! `explain`, `init-config`). Without a subcommand the windowed demo runs.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use localshortcut_config::ShortcutConfig;
use localshortcut_keybindings::{
    EventFlags, HeadlessRuntime, KeyPhase, ParseError, RawKeyEvent, RegisterOptions,
    normalize_modifiers, parse_accelerator,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// localshortcut - window-local keyboard shortcuts from accelerator strings
#[derive(Parser)]
#[command(name = "localshortcut")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (overrides RUST_LOG and the config file)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a key event would trigger an accelerator
    Check(CheckArgs),

    /// Show how an accelerator is parsed and which modifier flags it requires
    Explain {
        /// Accelerator, e.g. "CmdOrCtrl+Shift+P"
        accelerator: String,
    },

    /// Write the default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Open windows and register the configured shortcuts (default)
    Run {
        /// Number of windows to open at startup (overrides the config file)
        #[arg(long, value_name = "N")]
        windows: Option<usize>,
    },
}

/// Arguments of the `check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Accelerator, e.g. "Alt+F4"
    pub accelerator: String,

    /// Key value of the event, e.g. "p", "F4", "ArrowUp"
    #[arg(long)]
    pub key: String,

    /// Meta (Cmd/Super) held
    #[arg(long)]
    pub meta: bool,

    /// Control held
    #[arg(long)]
    pub control: bool,

    /// Shift held
    #[arg(long)]
    pub shift: bool,

    /// Alt held
    #[arg(long)]
    pub alt: bool,

    /// Require the exact modifier set
    #[arg(long)]
    pub strict: bool,

    /// Send a key-up instead of a key-down
    #[arg(long)]
    pub key_up: bool,
}

impl CheckArgs {
    /// The event described by these arguments.
    pub fn event(&self) -> RawKeyEvent {
        let mut flags = EventFlags::empty();
        flags.set(EventFlags::META, self.meta);
        flags.set(EventFlags::CONTROL, self.control);
        flags.set(EventFlags::SHIFT, self.shift);
        flags.set(EventFlags::ALT, self.alt);
        RawKeyEvent {
            phase: if self.key_up {
                KeyPhase::KeyUp
            } else {
                KeyPhase::KeyDown
            },
            key: self.key.clone(),
            flags,
        }
    }
}

/// Log level accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Config file override
    pub config_path: Option<PathBuf>,
    /// Log level from `--log-level`
    pub log_level: Option<log::LevelFilter>,
    /// Initial window count override
    pub windows: Option<usize>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();
    let config_path = cli.config.clone();
    let log_level = cli.log_level.map(LogLevelArg::to_level_filter);

    match cli.command {
        Some(Commands::Check(args)) => {
            let options = RegisterOptions {
                strict: args.strict,
            };
            match check_accelerator(&args.accelerator, &args.event(), options) {
                Ok(true) => {
                    println!("match");
                    CliResult::Exit(0)
                }
                Ok(false) => {
                    println!("no match");
                    CliResult::Exit(1)
                }
                Err(e) => {
                    eprintln!("localshortcut: {e}");
                    CliResult::Exit(2)
                }
            }
        }
        Some(Commands::Explain { accelerator }) => match explain(&accelerator) {
            Ok(text) => {
                print!("{text}");
                CliResult::Exit(0)
            }
            Err(e) => {
                eprintln!("localshortcut: {e}");
                CliResult::Exit(2)
            }
        },
        Some(Commands::InitConfig { force }) => {
            let path = config_path.unwrap_or_else(ShortcutConfig::config_path);
            match write_default_config(&path, force) {
                Ok(true) => {
                    println!("Wrote default config to {}", path.display());
                    CliResult::Exit(0)
                }
                Ok(false) => {
                    println!(
                        "Config already exists at {} (use --force to overwrite)",
                        path.display()
                    );
                    CliResult::Exit(0)
                }
                Err(e) => {
                    eprintln!("localshortcut: {e:#}");
                    CliResult::Exit(1)
                }
            }
        }
        Some(Commands::Run { windows }) => CliResult::Continue(RuntimeOptions {
            config_path,
            log_level,
            windows,
        }),
        None => CliResult::Continue(RuntimeOptions {
            config_path,
            log_level,
            windows: None,
        }),
    }
}

/// Register `accelerator` on a headless window and deliver `event` to it.
///
/// Returns whether the shortcut fired.
pub fn check_accelerator(
    accelerator: &str,
    event: &RawKeyEvent,
    options: RegisterOptions,
) -> Result<bool, ParseError> {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    runtime.register(
        accelerator,
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
        options,
        Some(window),
    )?;

    runtime.deliver(window, event);
    Ok(fired.load(Ordering::SeqCst) > 0)
}

/// Describe how `accelerator` is parsed.
pub fn explain(accelerator: &str) -> Result<String, ParseError> {
    let parsed = parse_accelerator(accelerator)?;
    let canonical = normalize_modifiers(parsed.modifiers.iter().copied());

    let tokens: Vec<&str> = parsed.modifiers.iter().map(|m| m.as_ref()).collect();
    Ok(format!(
        "accelerator: {accelerator}\n\
         modifier tokens: [{}]\n\
         key: {}\n\
         canonical modifiers: {canonical}\n\
         required flags: {}\n",
        tokens.join(", "),
        parsed.key,
        canonical.event_flags(),
    ))
}

/// Write the default config to `path`. Returns false if a file already
/// exists and `force` is not set.
pub fn write_default_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    ShortcutConfig::default()
        .save_to(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}
