// SPDX-License-Identifier: MIT
//
// dodjo — explore a grid of chunks in the terminal.
//
// This is the main binary that wires together the two crates:
//
//   dodjo-term  → canvases, diff renderer, raw input, event loop
//   dodjo-world → chunks, decorations, player, hotbar
//
// The Game struct implements dodjo-term's App trait. Each keypress flows:
//
//   stdin → decode → on_input → player/hotbar mutation → placement calls
//   current canvas → dirty rows → changed spans → one flush per tick
//
// Screen layout (130×40, canvas row 0 at the bottom):
//
//   ╔══════════════════════════════╗  ← row 39
//   ║ chunk interior, label, actor ║
//   ╠══════════════════════════════╣  ← row 3
//   ║        ⎹ ⎹ ⎹ hotbar ⎹ ⎹ ⎹      ║  ← rows 2 (items) and 1 (selection)
//   ╚══════════════════════════════╝  ← row 0
//
// Logging goes to a file: stdout is the screen.

mod config;
mod game;

use std::fs::File;
use std::io;
use std::path::Path;
use std::process;
use std::sync::Mutex;

use clap::Parser;
use dodjo_term::canvas::{HEIGHT, WIDTH};
use dodjo_term::event_loop::EventLoop;
use dodjo_term::frame::FrameStore;
use dodjo_term::terminal;
use dodjo_world::World;
use tracing_subscriber::EnvFilter;

use crate::config::Cli;
use crate::game::Game;

/// Send `tracing` output to `path`. `RUST_LOG` overrides the `info` default.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_file) {
        eprintln!("dodjo: cannot open log file {}: {e}", cli.log_file.display());
        process::exit(1);
    }

    let world = World::new(&cli.assets, cli.world_size).unwrap_or_else(|e| {
        eprintln!("dodjo: {e}");
        process::exit(1);
    });

    match terminal::get_size() {
        Some(size) if !size.fits(WIDTH, HEIGHT) => tracing::warn!(
            cols = size.cols,
            rows = size.rows,
            "terminal smaller than {WIDTH}x{HEIGHT}, output will be clipped"
        ),
        _ => {}
    }

    let config = cli.loop_config();
    tracing::info!(layout = %config.layout, assets = %cli.assets.display(), "starting");

    let mut game = Game::new(world);
    let mut store = FrameStore::new();
    if let Err(e) = EventLoop::new(config).run(&mut game, &mut store) {
        tracing::error!(error = %e, "terminal session failed");
        eprintln!("dodjo: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dodjo.log");
        assert!(init_logging(&path).is_err());
    }
}
