use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use pokedex::app::{App, AppState, Msg};
use pokedex::catalog::{build_http_client, CatalogClient};
use pokedex::config::Config;
use pokedex::storage::{Database, DatabaseError, FavoritesStore};
use pokedex::theme::ThemeVariant;
use pokedex::ui;

/// Get the config directory path (~/.config/pokedex/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("pokedex"))
}

#[derive(Parser, Debug)]
#[command(name = "pokedex", about = "Terminal Pokédex backed by the PokeAPI")]
struct Args {
    /// Page to open first (1-based)
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Config file to use instead of ~/.config/pokedex/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print saved favorites and exit
    #[arg(long)]
    list_favorites: bool,

    /// Delete all saved favorites before starting
    #[arg(long)]
    reset_favorites: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land on the alternate screen
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // User-only access to the favorites database
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let db_path = config_dir.join("pokedex.db");
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of pokedex appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };
    let favorites_store = FavoritesStore::new(db);

    if args.reset_favorites {
        favorites_store
            .clear()
            .await
            .context("Failed to reset favorites")?;
        println!("Favorites cleared.");
    }

    let favorites = favorites_store.list().await;

    if args.list_favorites {
        if favorites.is_empty() {
            println!("No favorites saved.");
        }
        for record in &favorites {
            println!("{} - {}", record.id, record.name);
        }
        return Ok(());
    }

    let http = build_http_client(config.request_timeout()).context("Failed to build HTTP client")?;
    let api_base_url = config.effective_api_base_url();
    let catalog = CatalogClient::new(http, &api_base_url)
        .with_context(|| format!("Invalid API base URL: {}", api_base_url))?
        .with_timeout(config.request_timeout());
    tracing::info!(api = %api_base_url, page = args.page, "Starting");

    let mut app = App::new(catalog, favorites_store, AppState::new(args.page, favorites));
    app.sprite_base_url = config.sprite_base_url.clone();

    match ThemeVariant::from_str_name(&config.theme) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %config.theme, "Unknown theme, using dark"),
    }

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>(32);

    ui::run(&mut app, msg_tx, msg_rx).await?;

    Ok(())
}
