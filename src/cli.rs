// Command-line entry point
use crate::commands::feed::{cache_report, clear_cache, load_catalog, refresh_catalog, CacheReport};
use crate::commands::feedback::submit_feedback;
use crate::commands::views::{render_active_view, render_all_views, switch_view};
use crate::feed::{CacheStatus, CacheStore, LoadOrigin, Loaded, SystemClock};
use crate::file_manager::{initialize_json_file, read_json_file};
use crate::logging::init_logging;
use crate::models::{ConfigError, Settings, ViewId};
use crate::state::AppState;
use crate::utils::{get_cache_dir, get_settings_json_path, initialize_data_directories, set_app_data_dir};
use crate::views::{render_error_panel, CatalogFilter};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "game-feed", version, about = "Free and discounted games, cached for 30 minutes")]
pub struct Cli {
    /// Application data directory (cache, settings, logs)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the API base URL from settings
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// error, warn, info, debug or trace
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to the daily file in the logs directory instead of stderr
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one view
    Show(ShowArgs),
    /// Render all three views from a single load
    Views(FilterArgs),
    /// Report cache age and validity without touching the network
    Status,
    /// Delete the cached catalog
    ClearCache,
    /// Leave a rating (1-5) and an optional comment
    Feedback {
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Case-insensitive title substring
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub platform: Option<String>,
    #[arg(long)]
    pub store: Option<String>,
}

impl From<FilterArgs> for CatalogFilter {
    fn from(args: FilterArgs) -> Self {
        CatalogFilter::new(args.search, args.platform, args.store)
    }
}

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    #[arg(long, default_value_t = ViewId::PrimaryCatalog)]
    pub view: ViewId,
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Ignore the cache and fetch now
    #[arg(long)]
    pub refresh: bool,
}

/// Level for the logger, which has to exist before the settings file is
/// created. Reads an existing settings file without logging anything.
fn startup_log_level(cli_level: Option<&str>, settings_path: &Path) -> Result<LevelFilter, ConfigError> {
    let mut settings = read_json_file::<Settings>(settings_path).unwrap_or_default();
    if let Some(level) = cli_level {
        settings.log_level = level.to_string();
    }
    settings.log_level_filter()
}

pub fn load_settings() -> Result<Settings, Box<dyn Error>> {
    let path = get_settings_json_path();
    initialize_json_file(&path, &Settings::default())?;
    Ok(read_json_file(&path)?)
}

fn origin_note(loaded: &Loaded) -> String {
    match loaded.origin {
        LoadOrigin::Network => String::from("(fresh from the server)"),
        LoadOrigin::Cache { age_ms } => {
            format!("(cached {} min ago)", age_ms.max(0) / 60_000)
        }
    }
}

fn load(state: &AppState, refresh: bool) -> Option<Loaded> {
    let result = if refresh {
        refresh_catalog(state)
    } else {
        load_catalog(state)
    };

    match result {
        Ok(loaded) => Some(loaded),
        Err(e) => {
            eprint!("{}", render_error_panel(&e));
            None
        }
    }
}

/// The cache alone, for commands that never reach the network.
fn local_cache() -> CacheStore {
    CacheStore::new(&get_cache_dir(), Arc::new(SystemClock))
}

fn status_text(settings: &Settings, report: &CacheReport) -> String {
    let mut out = match report.status {
        CacheStatus::Missing => String::from("No cached catalog.\n"),
        CacheStatus::Present { age_ms, valid } => format!(
            "Cached catalog is {} s old ({}; TTL {} min), {} games.\n",
            age_ms / 1000,
            if valid { "valid" } else { "expired" },
            report.ttl_ms / 60_000,
            report.games
        ),
    };
    if !report.platforms.is_empty() {
        out.push_str(&format!("Platforms: {}\n", report.platforms.join(", ")));
        out.push_str(&format!("Stores: {}\n", report.stores.join(", ")));
    }
    match settings.endpoint() {
        Ok(endpoint) => out.push_str(&format!("Endpoint: {}\n", endpoint)),
        Err(e) => out.push_str(&format!("Endpoint: {}\n", e)),
    }
    out
}

fn execute(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    if let Some(dir) = &cli.data_dir {
        set_app_data_dir(dir.clone());
    }
    let level = startup_log_level(cli.log_level.as_deref(), &get_settings_json_path())?;
    init_logging(level, cli.log_file)?;

    initialize_data_directories()?;
    let mut settings = load_settings()?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }

    let command = cli.command.unwrap_or(Command::Show(ShowArgs::default()));

    match command {
        Command::Show(args) => {
            let state = AppState::from_settings(settings, &get_cache_dir())?;
            state.set_filter(args.filter.into());
            let Some(loaded) = load(&state, args.refresh) else {
                return Ok(ExitCode::FAILURE);
            };
            let out = if args.view == state.active_view() {
                render_active_view(&state)?
            } else {
                switch_view(&state, args.view)?
            };
            print!("{}", out);
            println!("{}", origin_note(&loaded));
        }
        Command::Views(filter) => {
            let state = AppState::from_settings(settings, &get_cache_dir())?;
            state.set_filter(filter.into());
            let Some(loaded) = load(&state, false) else {
                return Ok(ExitCode::FAILURE);
            };
            for (_, out) in render_all_views(&state)? {
                println!("{}", out);
            }
            println!("{}", origin_note(&loaded));
        }
        Command::Status => {
            print!("{}", status_text(&settings, &cache_report(&local_cache())));
        }
        Command::ClearCache => {
            if clear_cache(&local_cache())? {
                println!("Cache cleared.");
            } else {
                println!("Nothing to clear.");
            }
        }
        Command::Feedback { rating, comment } => {
            let feedback = submit_feedback(rating, comment)?;
            println!("Thanks for the feedback! (reference {})", feedback.id);
        }
    }

    Ok(ExitCode::SUCCESS)
}

pub fn run() -> ExitCode {
    match execute(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_with_filters() {
        let cli = Cli::try_parse_from([
            "game-feed",
            "show",
            "--view",
            "time-limited",
            "--search",
            "portal",
            "--refresh",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Show(args)) => {
                assert_eq!(args.view, ViewId::TimeLimited);
                assert_eq!(args.filter.search.as_deref(), Some("portal"));
                assert!(args.refresh);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_view() {
        assert!(Cli::try_parse_from(["game-feed", "show", "--view", "sale"]).is_err());
    }

    #[test]
    fn test_global_flags_and_default_command() {
        let cli = Cli::try_parse_from(["game-feed", "--api-url", "http://localhost:5000/api"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:5000/api"));
        assert_eq!(ShowArgs::default().view, ViewId::PrimaryCatalog);
    }

    #[test]
    fn test_startup_log_level_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        assert_eq!(startup_log_level(None, &path).unwrap(), LevelFilter::Info);

        let settings = Settings {
            log_level: "debug".to_string(),
            ..Settings::default()
        };
        crate::file_manager::write_json_file(&path, &settings).unwrap();
        assert_eq!(startup_log_level(None, &path).unwrap(), LevelFilter::Debug);
        assert_eq!(startup_log_level(Some("warn"), &path).unwrap(), LevelFilter::Warn);
        assert!(startup_log_level(Some("loud"), &path).is_err());
    }

    #[test]
    fn test_status_works_with_invalid_api_url() {
        use crate::feed::test_support::portal_payload;
        use crate::feed::ManualClock;

        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path(), Arc::new(ManualClock::new(120_000)));
        let settings = Settings {
            api_url: "not a url".to_string(),
            ..Settings::default()
        };

        let missing = status_text(&settings, &cache_report(&cache));
        assert!(missing.starts_with("No cached catalog."));
        assert!(missing.contains("invalid api_url"));

        cache.write(&portal_payload()).unwrap();
        let present = status_text(&settings, &cache_report(&cache));
        assert!(present.contains("0 s old (valid; TTL 30 min), 1 games."));
        assert!(present.contains("Platforms: pc\n"));
        assert!(present.contains("Stores: steam\n"));
        assert!(clear_cache(&cache).unwrap());
    }
}
