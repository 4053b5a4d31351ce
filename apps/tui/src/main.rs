mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use exodo_tui::config::init_app_config;
use exodo_tui::headless::run_headless;
use logging::{init_tracing, LogTarget};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Check if we're running in a terminal
    if args.headless || !is_terminal() {
        init_tracing(config.debug, LogTarget::Stderr)?;
        return run_headless(&config, &args.fragment, args.format).await;
    }

    init_tracing(config.debug, LogTarget::File(&config.log_file))?;
    info!(data = %config.data, maps = %config.maps, "starting");

    // Both loads start before the first frame
    let loads = event::spawn_loads(&config)?;
    let mut app = App::new(&config.page, &args.fragment);

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, loads).await;
    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
