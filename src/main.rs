use clap::Parser;
use log::LevelFilter;
use pet_dance_run::args::Args;
use pet_dance_run::error::BotResult;
use pet_dance_run::game_automation::DanceOutcome;
use std::process::ExitCode;

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);
    if debug {
        builder.filter_module("pet_dance_run", LevelFilter::Debug);
    }
    // RUST_LOG wins over both
    builder.parse_default_env();
    builder.init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);
    log::info!(
        "🚀 Pet dance v{} (rounds={}, truncate={}, snack={:?})",
        env!("DANCE_VERSION_DISPLAY"),
        args.number,
        args.truncate,
        args.snack
    );

    match run(&args).await {
        Ok(outcome) => {
            log::info!(
                "✅ Played {} round(s) with {} replays",
                outcome.rounds_played,
                outcome.replays
            );
            println!("Dancing complete, exiting program.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("❌ {e}");
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(windows)]
async fn run(args: &Args) -> BotResult<DanceOutcome> {
    use pet_dance_run::capture::ScreenCapturer;
    use pet_dance_run::desktop::{EnigoInput, MonitorScreen, client_region, set_dpi_aware, spawn_exit_listener};
    use pet_dance_run::game_automation::{DanceAutomation, load_dance_templates};

    set_dpi_aware();
    spawn_exit_listener();

    let config = args.config();
    let region = client_region(&config.window_title)?;
    let library = load_dance_templates(&config.resources_dir)?;

    let capturer = ScreenCapturer::new(MonitorScreen::new(), region);
    let mut automation = DanceAutomation::new(capturer, EnigoInput::new()?, library, config, args.plan())?;
    automation.run().await
}

#[cfg(not(windows))]
async fn run(_args: &Args) -> BotResult<DanceOutcome> {
    Err(pet_dance_run::error::BotError::UnsupportedPlatform)
}
