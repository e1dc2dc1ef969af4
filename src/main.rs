mod api;
mod cli;
mod config;
mod logging;
mod tui;
mod users;

use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::info;

use crate::api::UsersClient;
use crate::config::AppConfig;
use crate::logging::init_logging;
use crate::tui::event_loop::LoadEvent;
use crate::tui::state::DashboardApp;
use crate::users::assign_departments;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "user-dash",
    version,
    about = "Terminal dashboard: users grouped by department, with live search"
)]
pub struct Cli {
    /// Use plain CLI mode (print once, disable TUI)
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_tui: bool,

    /// Search term applied immediately in plain mode
    #[arg(long)]
    pub search: Option<String>,

    /// Users API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Page size requested from the API
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Seed for the department sampler (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error,warn,info,debug,trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let log_to_file = !cli.no_tui;
    init_logging(&cli.log_level, log_to_file)?;

    let cfg = AppConfig::from_cli(cli)?;
    info!(?cfg, "app config");

    if cfg.no_tui {
        cli::run_plain(&cfg).await
    } else {
        run_tui(cfg).await
    }
}

async fn run_tui(cfg: AppConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel(1);
    let client = UsersClient::new(cfg.base_url.clone(), &cfg.http)?;
    let per_page = cfg.per_page;
    let seed = cfg.seed;

    // one fetch per run, resolved off the UI loop
    tokio::spawn(async move {
        let ev = match client.fetch_page(per_page).await {
            Ok(raw) => {
                let users = match seed {
                    Some(seed) => assign_departments(raw, &mut StdRng::seed_from_u64(seed)),
                    None => assign_departments(raw, &mut rand::thread_rng()),
                };
                LoadEvent::Loaded(users)
            }
            Err(e) => LoadEvent::Failed(e.to_string()),
        };
        let _ = tx.send(ev).await;
    });

    let mut app = DashboardApp::new();
    app.run(rx, Duration::from_millis(cfg.debounce_ms)).await
}
