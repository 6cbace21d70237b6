use anyhow::Result;
use clap::Parser;
use log::info;
use std::sync::Arc;

use bng_launcher::{logging, probe, start_game, Args, LauncherSession, Mode};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let session = Arc::new(LauncherSession::for_host(
        args.game_dir()?,
        args.launch_options(),
    ));
    info!(
        "v{} starting (platform={}, pid={})",
        env!("CARGO_PKG_VERSION"),
        session.platform().name(),
        std::process::id()
    );

    if args.mode == Mode::Probe {
        let report = probe::probe(&session);
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    let Some(user_path) = session.resolve_or_report() else {
        std::process::exit(1);
    };
    info!("Using user folder {}", user_path.display());

    // The game thread ends the process once the game exits.
    if let Some(task) = start_game(session)? {
        task.join();
    }
    Ok(())
}
