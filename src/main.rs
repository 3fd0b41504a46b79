//! Gesture engine replay tool: runs a recorded landmark session through the engine.

use anyhow::{bail, Context, Result};
use clap::Parser;
use gesture_engine::{
    config::{Config, EXAMPLE_CONFIG},
    engine::GestureEngine,
    modes::{drawing::DrawingTool, ui_control::ControlKey, Mode},
    replay::{play, ReplaySession, ReplaySource, ReplayTracker},
};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded landmark session to replay (YAML format)
    #[arg(short, long)]
    replay: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Initial interaction mode (drawing, navigation, ui_control)
    #[arg(short, long)]
    mode: Option<String>,

    /// Initial drawing tool (pinch, fist, two_hands, open_palm)
    #[arg(short, long)]
    tool: Option<String>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let Some(replay_path) = args.replay.as_deref() else {
        bail!("No input given: pass --replay <session.yaml> (or --print-config)");
    };

    info!("Gesture Engine - replay");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(mode) = &args.mode {
        config.engine.initial_mode = mode.parse::<Mode>()?;
    }
    if let Some(tool) = &args.tool {
        config.drawing.default_tool = tool.parse::<DrawingTool>()?;
    }
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }

    let session = ReplaySession::from_file(replay_path)
        .with_context(|| format!("Failed to load replay session {replay_path}"))?;

    let mut engine = GestureEngine::from_config(&config, ReplaySource::new(session), ReplayTracker)?;
    let summary = play(&mut engine, |timestamp_ms, output| {
        for command in &output.commands {
            info!("[{timestamp_ms:>7} ms] {}: {command}", output.mode);
        }
    })?;

    println!(
        "Processed {} frame(s), skipped {}, emitted {} command(s)",
        summary.frames, summary.skipped, summary.commands
    );
    println!("Final mode: {}", engine.mode());

    let ui = engine.ui_state();
    for key in ControlKey::ALL {
        if let Some(on) = ui.toggles.get(key) {
            println!("  {key}: {}", if on { "on" } else { "off" });
        }
    }
    println!("  volume: {}", ui.volume);

    let ranking = engine.ranking();
    if ranking.is_empty() {
        println!("No charge holds recorded");
    } else {
        println!("Charge ranking:");
        for (rank, record) in ranking.records().iter().enumerate() {
            println!(
                "  #{} {:.2}s strength {:.2} ({}) at {} ms",
                rank + 1,
                record.duration,
                record.strength,
                record.level,
                record.timestamp
            );
        }
    }

    Ok(())
}
