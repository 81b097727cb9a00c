use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use portfolio_terminal::{Config, Host, Repl, Session, Theme};

/// Run the portfolio terminal full screen.
#[derive(Parser, Debug)]
struct Args {
    /// TOML file overriding the built-in content
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the word-guess game and jokes
    #[arg(long)]
    seed: Option<u64>,
    /// Use the light colour scheme
    #[arg(long)]
    light: bool,
}

/// Stands in for the page: there is nothing to scroll, so just log.
struct LogHost;

impl Host for LogHost {
    fn navigate_to_section(&mut self, section_id: &str) {
        log::info!("Navigate to #{}", section_id);
    }

    fn open_resource(&mut self, url: &str) {
        log::info!("Open {}", url);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let mut session = match args.seed {
        Some(seed) => Session::with_seed(config, seed),
        None => Session::new(config),
    };
    if args.light {
        session.set_theme(Some(Theme::Light));
    }

    Repl::new_with_session(session).run_fullscreen(LogHost)?;
    Ok(())
}
