use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mdlink_config::Config;
use mdlink_engine::{PageReference, anchor_link, page_link};
use std::path::{Path, PathBuf};

mod clipboard;

#[derive(Parser)]
#[command(name = "mdlink")]
#[command(about = "Copy markdown links to pages, elements and text selections")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ~/.config/mdlink/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the link instead of copying it to the clipboard
    #[arg(short, long, global = true)]
    print: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link to a page, optionally scrolled to selected text
    Page {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        /// Selected text to turn into a text fragment
        #[arg(long)]
        selection: Option<String>,
    },

    /// Link to an element on a page by its ID
    Element {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        id: String,
        /// Selected text inside the element
        #[arg(long)]
        selection: Option<String>,
    },

    /// Link to a hyperlink found on a page
    Anchor {
        /// Link text, used as the title
        #[arg(long)]
        text: String,
        /// The href as written on the page, possibly relative
        #[arg(long)]
        href: String,
        /// URL of the page the hyperlink was found on
        #[arg(long)]
        base: String,
    },

    /// View or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Serve a copied link from the background (started by mdlink itself)
    #[command(name = clipboard::HOLD_COMMAND, hide = true)]
    HoldClipboard,
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the effective settings
    Show,
    /// Change one setting
    Set { key: String, value: String },
    /// Restore the default settings
    Reset,
}

/// What a command produced for the user.
#[derive(Debug, PartialEq)]
enum Outcome {
    Link(String),
    Message(String),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Commands::HoldClipboard = cli.command {
        return clipboard::hold(std::io::stdin().lock(), std::io::stdout().lock());
    }

    match execute(&cli)? {
        Outcome::Link(link) => clipboard::deliver(&link, cli.print),
        Outcome::Message(message) => println!("{message}"),
    }

    Ok(())
}

fn execute(cli: &Cli) -> Result<Outcome> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());

    let config = Config::load_or_default(&config_path)?;
    let options = config.link_options();

    match &cli.command {
        Commands::Page {
            title,
            url,
            selection,
        } => {
            let page = PageReference::new(title, url);
            let link = page_link(&page, selection.as_deref(), &options)
                .context("Could not build page link")?;
            Ok(Outcome::Link(link))
        }
        Commands::Element {
            title,
            url,
            id,
            selection,
        } => {
            let page = PageReference::new(title, url).with_element_id(id);
            let link = page_link(&page, selection.as_deref(), &options)
                .context("Could not build element link")?;
            Ok(Outcome::Link(link))
        }
        Commands::Anchor { text, href, base } => {
            let link = anchor_link(text, href, base).context("Could not build anchor link")?;
            Ok(Outcome::Link(link))
        }
        Commands::Settings { command } => settings(command, config, &config_path),
        Commands::HoldClipboard => {
            bail!("{} is only started by mdlink", clipboard::HOLD_COMMAND)
        }
    }
}

fn settings(command: &SettingsCommands, mut config: Config, path: &Path) -> Result<Outcome> {
    match command {
        SettingsCommands::Show => {
            let mut lines = vec![format!("# {}", path.display())];
            for key in Config::KEYS {
                lines.push(format!("{key} = {}", config.get_value(key)?));
            }
            Ok(Outcome::Message(lines.join("\n")))
        }
        SettingsCommands::Set { key, value } => {
            config.set_value(key, value)?;
            config
                .save_to_path(path)
                .with_context(|| format!("Failed to save settings to {}", path.display()))?;
            log::info!("Saved {key} = {value}");
            Ok(Outcome::Message(format!("{key} = {value}")))
        }
        SettingsCommands::Reset => {
            Config::default()
                .save_to_path(path)
                .with_context(|| format!("Failed to save settings to {}", path.display()))?;
            Ok(Outcome::Message("Settings reset to defaults".to_string()))
        }
    }
}
