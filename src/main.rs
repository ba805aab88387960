#![forbid(unsafe_code)]
mod error;
mod niri;
mod scale;
mod state;

use clap::Parser;

use crate::error::Error;
use crate::scale::Direction;
use crate::state::OutputSelector;

#[derive(Parser)]
#[command(version, about = "Cycle a niri output through a list of display scale factors")]
struct Args {
    /// Target output scale. Can be given multiple times.
    #[arg(long, short)]
    scale: Vec<f64>,
    /// The output to scale. `@current` means the output holding the
    /// currently focused workspace.
    #[arg(long, short, default_value = "@current")]
    output: String,
    /// Which way to cycle through the target scales.
    #[arg(long, value_enum, default_value_t = Direction::Forwards)]
    direction: Direction,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(error) = run(args) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut target_scales = args.scale;
    target_scales.sort_by(f64::total_cmp);

    let mut client = niri::Client::new();
    let state = client.snapshot()?;
    log::trace!("state = {state:?}");

    if let Some(focused) = state.focused_workspace() {
        log::debug!(
            "focused workspace: id = {}, idx = {}, name = {:?}, active window = {:?}",
            focused.id,
            focused.idx,
            focused.name,
            focused.active_window_id,
        );
    }
    log::debug!(
        "active workspaces = {:?}",
        state
            .active_workspaces()
            .map(|workspace| (workspace.output.as_deref(), workspace.idx))
            .collect::<Vec<_>>()
    );

    let selector = OutputSelector::parse(&args.output);
    let output = state.resolve_output(&selector)?;
    log::debug!(
        "target output: {} ({} {}, serial {:?}, physical size {:?}, mode {:?}, vrr {}/{})",
        output.name,
        output.make,
        output.model,
        output.serial,
        output.physical_size,
        output.active_mode(),
        output.vrr_supported,
        output.vrr_enabled,
    );

    let logical = output
        .logical
        .as_ref()
        .ok_or_else(|| Error::OutputDisabled(output.name.clone()))?;
    log::debug!(
        "current logical state: position ({}, {}), size {}x{}, scale {}, transform {}",
        logical.x,
        logical.y,
        logical.width,
        logical.height,
        logical.scale,
        logical.transform,
    );

    match scale::select_next_scale(logical.scale, &target_scales, args.direction) {
        Some(next_scale) => {
            println!("Scaling {} to {}", output.name, next_scale);
            client.apply_scale(&output.name, next_scale)
        }
        None => {
            println!("No target scales given, leaving {} unchanged", output.name);
            Ok(())
        }
    }
}
