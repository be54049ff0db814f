use std::path::Path;
use std::{fs, process};

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use barn_door::{
    clock::WallTime,
    config::AppConfig,
    player::Player,
    scene::Scene,
    schedule::View,
    simulate::simulate,
};

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const PLAY_USAGE: &str = "barn-door play [config.json]";
const SIMULATE_USAGE: &str = "barn-door simulate <frames> <output.json> [toggle_frame ...]";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("play") => {
            let config = load_config(args.next().as_deref())?;
            play(&config)
        }
        Some("simulate") => {
            let frames = args
                .next()
                .context(SIMULATE_USAGE)?
                .parse::<usize>()
                .context("frames must be a non-negative integer")?;
            let output_path = args.next().context(SIMULATE_USAGE)?;
            let toggles = args
                .map(|a| {
                    a.parse::<usize>()
                        .with_context(|| format!("invalid toggle frame {a:?}"))
                })
                .collect::<Result<Vec<_>>>()?;
            run_simulation(frames, &output_path, &toggles)
        }
        _ => bail!(
            "barn-door: a barn, a sliding door and two figures, in the terminal\n\nUsage:\n  {PLAY_USAGE}\n  {SIMULATE_USAGE}"
        ),
    }
}

/// Logs go to stderr; `RUST_LOG` picks the level, warnings by default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(Path::new(path)),
        None => Ok(AppConfig::load()),
    }
}

fn play(config: &AppConfig) -> Result<()> {
    let view = View::for_time(WallTime::now_local());
    let scene = Scene::new(&config.scene, view);
    let mut player = Player::new(scene, config);
    player.play()
}

fn run_simulation(frames: usize, output_path: &str, toggles: &[usize]) -> Result<()> {
    let config = AppConfig::load();
    let trace = simulate(&config.scene, frames, toggles);

    let output_json = serde_json::to_string_pretty(&trace)?;
    fs::write(output_path, &output_json)
        .with_context(|| format!("Failed to write {output_path}"))?;

    eprintln!(
        "Simulated {} frames with {} toggles -> {}",
        trace.frames.len(),
        toggles.len(),
        output_path,
    );

    Ok(())
}
