#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots a headless chibi-pets run.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chibi_pets_audio::NullAudioSink;
use chibi_pets_cli::Session;
use chibi_pets_core::{AnchorRect, Command, DesiredPopulation, SurfaceFrame, ALL_SPECIES};
use chibi_pets_rendering::{FixedSurface, HeadlessPresenter};
use chibi_pets_world::query;
use clap::Parser;

/// Simulates the pet population against a fixed hosting surface.
#[derive(Debug, Parser)]
#[command(name = "chibi-pets")]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Seed for the behavior system's random source.
    #[arg(long, default_value_t = 0xC41B)]
    seed: u64,
    /// Path to a JSON file holding the stored population configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Desired number of Speaki pets; overrides the stored configuration.
    #[arg(long)]
    speaki: Option<u32>,
    /// Desired number of Erpin pets; overrides the stored configuration.
    #[arg(long)]
    erpin: Option<u32>,
    /// Uniform pet scale; overrides the stored configuration.
    #[arg(long)]
    scale: Option<f32>,
    /// Disables all sound playback.
    #[arg(long)]
    mute: bool,
    /// Viewport width in surface units.
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f32,
    /// Viewport height in surface units.
    #[arg(long, default_value_t = 720.0)]
    viewport_height: f32,
    /// Anchor region pets should stand on, as "left,top,right".
    #[arg(long, value_parser = parse_anchor)]
    anchor: Option<AnchorRect>,
    /// Frames a simulated audio clip lasts before completing.
    #[arg(long, default_value_t = 90)]
    clip_frames: u32,
}

fn parse_anchor(value: &str) -> Result<AnchorRect, String> {
    let parts: Vec<&str> = value.split(',').collect();
    let [left, top, right] = parts.as_slice() else {
        return Err("expected left,top,right".to_owned());
    };

    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .map_err(|error| format!("invalid coordinate {part:?}: {error}"))
    };

    Ok(AnchorRect {
        left: parse(*left)?,
        top: parse(*top)?,
        right: parse(*right)?,
    })
}

fn load_desired(args: &Args) -> Result<DesiredPopulation> {
    let mut desired = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read configuration {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse configuration {}", path.display()))?
        }
        None => DesiredPopulation::default(),
    };

    if let Some(count) = args.speaki {
        desired.speaki_count = count;
    }
    if let Some(count) = args.erpin {
        desired.erpin_count = count;
    }
    if let Some(scale) = args.scale {
        desired.scale = scale;
    }
    if args.mute {
        desired.sound_enabled = false;
    }

    Ok(desired)
}

/// Entry point for the chibi-pets command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let desired = load_desired(&args)?;
    let mut session = Session::new(args.seed);
    session.queue(Command::ConfigurePopulation { desired });

    println!("{}", query::welcome_banner(session.world()));

    let mut probe = FixedSurface::new(SurfaceFrame {
        viewport_width: args.viewport_width,
        viewport_height: args.viewport_height,
        anchor: args.anchor,
    });
    let mut sink = NullAudioSink::new(args.clip_frames);
    let mut presenter = HeadlessPresenter::default();

    let completed = session.run(args.frames, &mut probe, &mut sink, &mut presenter)?;

    println!("simulated {completed} frames");
    for species in ALL_SPECIES {
        println!(
            "  {}: {} live",
            species.name(),
            query::live_count(session.world(), species)
        );
    }
    println!("  sounds played: {}", sink.played().len());
    for instance in presenter.last_frame() {
        println!(
            "  pet {} at ({:.1}, {:.1}) showing {}",
            instance.pet.get(),
            instance.translation.x,
            instance.translation.y,
            instance.sprite
        );
    }

    Ok(())
}
