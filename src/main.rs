//! folio - Terminal Portfolio Browser
//!
//! Browse a developer portfolio in the terminal, or query it from the command line.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use folio::prefs::{PreferenceStore, Preferences, ThemeMode};
use folio::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; filter with RUST_LOG
    env_logger::init();

    let matches = Command::new("folio")
        .version(folio::VERSION)
        .about("A terminal portfolio browser with instant global search")
        .long_about(
            "folio presents a developer portfolio as navigable terminal sections. \
             Press / or Ctrl-K to search every project, post, skill, achievement and \
             testimonial. Without --content the built-in sample portfolio is shown.",
        )
        .arg(
            Arg::new("content")
                .long("content")
                .short('c')
                .value_name("FILE")
                .help("Portfolio document (TOML, optionally gzip/bzip2/xz/zstd compressed)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Configuration file (default: <config dir>/folio/config.toml)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("preferences")
                .long("preferences")
                .value_name("FILE")
                .help("Preferences file (default: <config dir>/folio/preferences.toml)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .short('q')
                .value_name("TEXT")
                .help("Print search results for TEXT and exit"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("MODE")
                .help("Colour theme; the choice is saved to the preferences file")
                .value_parser(["light", "dark", "system"]),
        )
        .get_matches();

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .or_else(AppConfig::default_path);
    let mut config = match &config_path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };

    // Command-line flags override the configuration file
    if let Some(content) = matches.get_one::<PathBuf>("content") {
        config.content_path = Some(content.clone());
    }
    if let Some(preferences) = matches.get_one::<PathBuf>("preferences") {
        config.preferences_path = Some(preferences.clone());
    }

    if let Some(query) = matches.get_one::<String>("query") {
        let loaded = folio::app::load_content(config.content_path.as_deref()).await?;
        let results = loaded.index.query(query);
        if results.is_empty() {
            eprintln!("No results for \"{}\"", query.trim());
        }
        for record in results {
            println!("{}", folio::app::format_result_line(record));
        }
        return Ok(());
    }

    let prefs = Arc::new(match config.resolved_preferences_path() {
        Some(path) => PreferenceStore::load(path),
        None => PreferenceStore::in_memory(Preferences::default()),
    });
    if let Some(theme) = matches.get_one::<String>("theme") {
        let mode: ThemeMode = theme.parse()?;
        prefs.commit(|prefs| prefs.theme = mode).await;
    }

    // Initialize the Application and start the interactive event loop
    use folio::render::ui::TerminalUI;
    use folio::Application;

    let ui_renderer = Box::new(TerminalUI::new()?);
    let mut app = Application::new(config, prefs, ui_renderer).await?;

    app.run().await?;

    Ok(())
}
