use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use multitimer_core::{spawn_scheduler, ConfigStore, TimerManager};
use tracing_subscriber::EnvFilter;

mod notify;
mod repl;
mod screen;

#[derive(Parser)]
#[command(
    name = "multitimer",
    version,
    about = "Run multiple work/break cycle timers in one terminal"
)]
struct Cli {
    /// Timer store file (default: ~/.config/multitimer/timers.json).
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they cannot corrupt the ANSI display.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("multitimer_core=warn,multitimer_cli=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = match cli.store {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::default_path()?,
    };

    let (manager, redraw_rx) = TimerManager::new(store, Arc::new(notify::DesktopNotifier));
    let manager = Arc::new(manager);

    match manager.load_saved() {
        Ok(n) if n > 0 => tracing::info!("restored {n} saved timers"),
        Ok(_) => {}
        Err(e) => eprintln!("Error loading timer configurations: {e}"),
    }

    spawn_scheduler(Arc::clone(&manager));

    let render_manager = Arc::clone(&manager);
    std::thread::spawn(move || {
        for () in redraw_rx {
            screen::draw(&render_manager, true);
        }
    });

    screen::clear();
    screen::draw(&manager, false);
    repl::run(&manager)
}
