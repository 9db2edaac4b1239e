// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop — the heartbeat of the game.
//
// One thread, one cooperative loop. Each tick:
//
//   1. read up to READ_BATCH bytes from stdin without blocking
//   2. decode them into inputs and dispatch each to the application, which
//      mutates the current canvas and reports what it repainted
//   3. if anything was repainted: one dirty-row pass, one span emission,
//      one flush
//   4. sleep for the tick's pace, the only point where the loop yields
//
// # Pacing
//
// There is no timer. The sleep at the end of a tick is chosen from what the
// tick did: vertical steps sleep longer than horizontal ones (terminal cells
// are about twice as tall as they are wide, so this evens out perceived
// speed) and arrow-key vertical steps longer still, to tame key repeat.
// Everything else, including idle ticks, sleeps the short idle interval.
//
// # Shutdown
//
// There is no quit key. SIGINT and SIGTERM set an atomic flag that the loop
// checks every tick; the loop then returns and the terminal guard restores
// the terminal on the way out.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use bitflags::bitflags;

use crate::diff::{RenderStats, Renderer};
use crate::error::Result;
use crate::frame::FrameStore;
use crate::input::{self, Input, KeySource, Layout};
use crate::reader::{ByteSource, READ_BATCH, StdinSource};
use crate::terminal::Terminal;

// ─── Signals ─────────────────────────────────────────────────────────────────

/// Set by the SIGINT/SIGTERM handler. Checked once per tick.
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Route SIGINT and SIGTERM to [`SHUTDOWN_REQUESTED`].
///
/// Storing to an atomic is async-signal-safe.
#[cfg(unix)]
fn install_shutdown_handlers() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = shutdown_handler as *const () as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &raw const sa, std::ptr::null_mut());
        libc::sigaction(libc::SIGTERM, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn shutdown_handler(_sig: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_shutdown_handlers() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

bitflags! {
    /// What an input handler redrew on the current canvas.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Repaint: u8 {
        /// Actor-only re-placement (cheap path).
        const ACTOR   = 1 << 0;
        /// Full composition after a context change.
        const CONTEXT = 1 << 1;
        /// Hotbar strip.
        const HOTBAR  = 1 << 2;
    }
}

/// Game logic as seen by the loop.
pub trait App {
    /// Draw the first full frame into `store` (called once, before any input).
    fn start(&mut self, store: &mut FrameStore);

    /// Handle one decoded input, drawing into `store` as needed.
    ///
    /// Return what was repainted; an empty set means nothing visible changed.
    fn on_input(&mut self, input: Input, store: &mut FrameStore) -> Repaint;
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Key layout and per-tick sleep intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Letter bindings.
    pub layout: Layout,
    /// Sleep after idle ticks, horizontal steps and hotbar commands (μs).
    pub idle_us: u64,
    /// Sleep after a vertical step typed with a letter (μs).
    pub typed_vertical_us: u64,
    /// Sleep after a vertical step entered with an arrow key (μs).
    pub arrow_vertical_us: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            idle_us: 10_000,
            typed_vertical_us: 30_000,
            arrow_vertical_us: 50_000,
        }
    }
}

impl LoopConfig {
    /// Sleep interval owed after handling `input`.
    #[must_use]
    pub const fn pace(&self, input: Input) -> Duration {
        let us = match input {
            Input::Move { dir, source } if dir.is_vertical() => match source {
                KeySource::Typed => self.typed_vertical_us,
                KeySource::Arrow => self.arrow_vertical_us,
            },
            _ => self.idle_us,
        };
        Duration::from_micros(us)
    }

    /// Sleep interval for a tick with no input.
    #[must_use]
    pub const fn idle(&self) -> Duration {
        Duration::from_micros(self.idle_us)
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Inputs decoded from this tick's batch.
    pub inputs: usize,
    /// Union of everything the application repainted.
    pub repaint: Repaint,
    /// Render statistics, if an update pass ran.
    pub stats: Option<RenderStats>,
    /// How long to sleep before the next tick.
    pub sleep: Duration,
}

/// The input/render loop.
///
/// # Example
///
/// ```no_run
/// use dodjo_term::event_loop::{App, EventLoop, LoopConfig, Repaint};
/// use dodjo_term::frame::FrameStore;
/// use dodjo_term::input::Input;
///
/// struct Noop;
///
/// impl App for Noop {
///     fn start(&mut self, _store: &mut FrameStore) {}
///     fn on_input(&mut self, _input: Input, _store: &mut FrameStore) -> Repaint {
///         Repaint::empty()
///     }
/// }
///
/// let mut store = FrameStore::new();
/// EventLoop::new(LoopConfig::default()).run(&mut Noop, &mut store)?;
/// # Ok::<(), dodjo_term::error::TermError>(())
/// ```
pub struct EventLoop<S = StdinSource> {
    source: S,
    renderer: Renderer,
    config: LoopConfig,
}

impl EventLoop<StdinSource> {
    /// A loop reading the real stdin.
    #[must_use]
    pub fn new(config: LoopConfig) -> Self {
        Self::with_source(StdinSource::new(), config)
    }
}

impl<S: ByteSource> EventLoop<S> {
    /// A loop reading from any byte source.
    #[must_use]
    pub fn with_source(source: S, config: LoopConfig) -> Self {
        Self {
            source,
            renderer: Renderer::new(),
            config,
        }
    }

    /// The loop's configuration.
    #[must_use]
    pub const fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Take over the terminal and run until SIGINT/SIGTERM.
    ///
    /// # Errors
    ///
    /// Fails if the terminal cannot be put into raw non-blocking mode, or if
    /// reading input or writing frames fails. The terminal is restored in
    /// every case.
    pub fn run(&mut self, app: &mut impl App, store: &mut FrameStore) -> Result<()> {
        // Before raw mode: an early SIGINT must not skip the restore.
        install_shutdown_handlers();
        let mut terminal = Terminal::new();
        terminal.enter()?;

        let result = self.run_inner(app, store);

        // Always clean up, even if the loop errored.
        let left = terminal.leave();
        result?;
        left
    }

    fn run_inner(&mut self, app: &mut impl App, store: &mut FrameStore) -> Result<()> {
        let stdout = io::stdout();

        self.start(app, store, &mut stdout.lock())?;

        while !SHUTDOWN_REQUESTED.load(Ordering::Relaxed) {
            let tick = self.tick(app, store, &mut stdout.lock())?;
            thread::sleep(tick.sleep);
        }

        tracing::info!("shutdown requested");
        Ok(())
    }

    /// Let the application draw its first frame and flush it in full.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn start(
        &mut self,
        app: &mut impl App,
        store: &mut FrameStore,
        out: &mut impl Write,
    ) -> io::Result<RenderStats> {
        app.start(store);
        let stats = self.renderer.update(store);
        self.renderer.flush_to(out)?;
        tracing::debug!(spans = stats.spans, bytes = stats.bytes_written, "first frame");
        Ok(stats)
    }

    /// Run one iteration: poll, dispatch, render if needed. Does not sleep.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing to `out` fails.
    pub fn tick(
        &mut self,
        app: &mut impl App,
        store: &mut FrameStore,
        out: &mut impl Write,
    ) -> io::Result<Tick> {
        let mut buf = [0u8; READ_BATCH];
        let n = self.source.read_batch(&mut buf)?;
        let inputs = input::decode(&buf[..n], self.config.layout);

        let mut repaint = Repaint::empty();
        let mut sleep = self.config.idle();
        for &input in &inputs {
            repaint |= app.on_input(input, store);
            sleep = sleep.max(self.config.pace(input));
        }

        let stats = if repaint.is_empty() {
            None
        } else {
            let stats = self.renderer.update(store);
            self.renderer.flush_to(out)?;
            Some(stats)
        };

        Ok(Tick {
            inputs: inputs.len(),
            repaint,
            stats,
            sleep,
        })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
