use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use synsim_core::*;

#[derive(Parser)]
#[command(name = "synsim")]
#[command(about = "Binocular defocus simulator for refractive correction planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show per-eye defocus tables for the current session (default)
    Show,

    /// Set one session field and persist it
    Set {
        /// Field name: right-r0, right-lens, left-r0, left-lens,
        /// accommodation, monovision, dominant-eye, near-target
        field: String,

        /// New value (diopters; on/off for monovision; right/left for dominant-eye)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Restore and persist the default session
    Reset,
}

fn main() -> Result<()> {
    synsim_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let session_path = data_dir.join("session.json");

    match cli.command {
        Some(Commands::Set { field, value }) => cmd_set(&session_path, &config, &field, &value),
        Some(Commands::Reset) => cmd_reset(&session_path),
        Some(Commands::Show) | None => cmd_show(&session_path),
    }
}

fn cmd_show(session_path: &Path) -> Result<()> {
    let session = load_session(session_path);
    let cfg = session.config();

    if cfg.is_monovision {
        println!(
            "Mode: monovision (dominant: {}, near target: {})",
            cfg.dominant_eye,
            diopter_string(cfg.near_target)
        );
        println!(
            "Near-eye auto lens: {}",
            diopter_string(session.near_eye_auto_lens())
        );
    } else {
        println!("Mode: binocular");
    }
    println!("Accommodation: {}", diopter_string(cfg.accommodation));
    println!("DOF half-width: {}", diopter_string(session.dof_range()));
    println!();

    print_eye_table(
        "RIGHT EYE",
        session.is_right_near_eye(),
        &session.right_results(),
    );
    print_eye_table(
        "LEFT EYE",
        session.is_left_near_eye(),
        &session.left_results(),
    );

    Ok(())
}

fn print_eye_table(label: &str, is_near_eye: bool, results: &[DistanceResult]) {
    println!("╭──────────────────────────────────────────────────────────────╮");
    println!(
        "│  {}{}",
        label,
        if is_near_eye { "  (near eye)" } else { "" }
    );
    println!("╰──────────────────────────────────────────────────────────────╯");
    println!(
        "  {:<22} {:>10} {:>10} {:>14}",
        "Distance", "Demand", "Residual", "Rest defocus"
    );

    for result in results {
        println!(
            "  {:<22} {:>10} {:>10} {:>14}",
            result.distance.name,
            diopter_string(result.demand),
            diopter_string(result.residual),
            diopter_string(result.rest_defocus)
        );
    }

    println!();
}

fn cmd_set(session_path: &Path, config: &Config, field: &str, value: &str) -> Result<()> {
    let mut session = load_session(session_path);
    let limits = &config.limits;

    match field.to_lowercase().as_str() {
        "right-r0" => {
            let raw = parse_diopters(value)?;
            let v = clamped(raw, limits.clamp_r0(raw));
            session.set_right_r0(v)?;
            println!("right-r0 = {}", diopter_string(v));
        }
        "right-lens" => {
            let raw = parse_diopters(value)?;
            let v = clamped(raw, limits.clamp_lens(raw));
            session.set_right_lens_manual(v)?;
            println!("right-lens = {}", diopter_string(v));
        }
        "left-r0" => {
            let raw = parse_diopters(value)?;
            let v = clamped(raw, limits.clamp_r0(raw));
            session.set_left_r0(v)?;
            println!("left-r0 = {}", diopter_string(v));
        }
        "left-lens" => {
            let raw = parse_diopters(value)?;
            let v = clamped(raw, limits.clamp_lens(raw));
            session.set_left_lens_manual(v)?;
            println!("left-lens = {}", diopter_string(v));
        }
        "accommodation" => {
            let raw = parse_diopters(value)?;
            let v = clamped(raw, limits.clamp_accommodation(raw));
            session.set_accommodation(v)?;
            println!("accommodation = {}", diopter_string(v));
        }
        "near-target" => {
            let raw = parse_diopters(value)?;
            let v = clamped(raw, limits.clamp_near_target(raw));
            session.set_near_target(v)?;
            println!("near-target = {}", diopter_string(v));
        }
        "monovision" => {
            let enabled = parse_switch(value)?;
            session.set_monovision(enabled)?;
            println!("monovision = {}", if enabled { "on" } else { "off" });
        }
        "dominant-eye" => {
            let eye: DominantEye = value.parse()?;
            session.set_dominant_eye(eye)?;
            println!("dominant-eye = {eye}");
        }
        other => {
            return Err(Error::Parse(format!("unknown field: {other}")));
        }
    }

    Ok(())
}

fn cmd_reset(session_path: &Path) -> Result<()> {
    JsonStore::new(session_path).save(&SessionConfig::default())?;
    println!("Session reset to defaults.");
    Ok(())
}

fn parse_diopters(value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| Error::Parse(format!("not a number: {value}")))
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(Error::Parse(format!(
            "expected on/off, got: {other}"
        ))),
    }
}

/// Warn on stderr when a value had to be clamped to its configured range.
fn clamped(raw: f64, bounded: f64) -> f64 {
    if raw != bounded {
        eprintln!("Value {raw} out of range, clamped to {bounded}");
    }
    bounded
}
