//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use mdsite_content::{ContentClient, ReleasesData};
use mdsite_core::{Site, document_shell};
use mdsite_shared::{ThemeState, config_file_path, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// mdsite — render the documentation site from the command line.
#[derive(Parser)]
#[command(
    name = "mdsite",
    version,
    about = "Render documentation pages, releases, and site chrome to HTML.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the page at a navigation path to a full HTML document.
    Render {
        /// Navigation path, e.g. `/docs/quick-start` or `/releases`.
        path: String,

        /// Write the document here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Override the configured content base URL.
        #[arg(long)]
        base: Option<String>,
    },

    /// List changelog versions from the content origin.
    Releases {
        /// Override the configured content base URL.
        #[arg(long)]
        base: Option<String>,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Theme preference management.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Theme subcommands.
#[derive(Subcommand)]
pub(crate) enum ThemeAction {
    /// Show the current theme preference.
    Show,
    /// Toggle dark mode and persist the change.
    Toggle,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "mdsite=info",
        1 => "mdsite=debug",
        _ => "mdsite=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render { path, out, base } => cmd_render(&path, out.as_deref(), base).await,
        Command::Releases { base, json } => cmd_releases(base, json).await,
        Command::Theme { action } => match action {
            ThemeAction::Show => cmd_theme_show(),
            ThemeAction::Toggle => cmd_theme_toggle(),
        },
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_render(path: &str, out: Option<&std::path::Path>, base: Option<String>) -> Result<()> {
    let mut config = load_config()?;
    if let Some(base) = base {
        config.content.base_url = base;
    }

    let theme = ThemeState::load_with_default(config.theme.default_dark_mode)?;
    let site = Site::new(config);

    info!(path, "rendering page");
    let spinner = spinner(format!("Rendering {path}"));
    let page = site.render_path(path).await;
    spinner.finish_and_clear();

    let document = document_shell(&page, theme.dark_mode());
    match out {
        Some(file) => {
            std::fs::write(file, &document)
                .map_err(|e| mdsite_shared::MdsiteError::io(file, e))?;
            println!("  Wrote {} ({} bytes)", file.display(), document.len());
        }
        None => println!("{document}"),
    }
    Ok(())
}

async fn cmd_releases(base: Option<String>, json: bool) -> Result<()> {
    let mut config = load_config()?;
    if let Some(base) = base {
        config.content.base_url = base;
    }

    let client = ContentClient::new(&config.content);
    let spinner = spinner("Loading changelog".to_string());
    let data = ReleasesData::load(&client).await?;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&data.versions)?);
        return Ok(());
    }

    println!();
    for entry in &data.versions {
        let new_marker = if entry.is_new { " NEW" } else { "" };
        let date = entry.date.as_deref().unwrap_or("-");
        println!("  {date:>10}  {}{new_marker}", entry.title);
    }
    println!();
    Ok(())
}

fn cmd_theme_show() -> Result<()> {
    let theme = ThemeState::load()?;
    println!(
        "dark mode: {}",
        if theme.dark_mode() { "on" } else { "off" }
    );
    Ok(())
}

fn cmd_theme_toggle() -> Result<()> {
    let mut theme = ThemeState::load()?;
    theme.toggle()?;
    println!(
        "dark mode: {}",
        if theme.dark_mode() { "on" } else { "off" }
    );
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("  Created {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    println!("# {}", config_file_path()?.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------------------

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar.set_message(message);
    bar
}
