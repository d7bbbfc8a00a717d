//! Terminal stacker runner (default binary).
//!
//! One frame loop drives everything: input is polled until the next frame is
//! due, then the session ticks with the real elapsed time and the scene is
//! rasterized and flushed as a diff.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tui_stacker::core::{MotionMode, StackSession, StackerConfig, StatusSnapshot};
use tui_stacker::input::{should_quit, InputHandler};
use tui_stacker::physics::RapierWorld;
use tui_stacker::term::{FrameBuffer, StackView, TermScene, TerminalRenderer, Viewport};
use tui_stacker::types::{StackAction, FRAME_MS, PER_FRAME_STEP};

/// Longest frame fed to the session; a stalled terminal must not teleport
/// the moving layer across the stack.
const MAX_FRAME_DT: f32 = 0.1;

const DEFAULT_LOG_FILTER: &str = "tui_stacker=info,stacker_core=info";

#[derive(Parser, Debug)]
#[command(name = "tui-stacker")]
#[command(about = "Stack sliding blocks in the terminal")]
struct Cli {
    /// Slide speed in units per second
    #[arg(long)]
    speed: Option<f32>,

    /// Advance a fixed distance every frame instead of using elapsed time
    /// (0.15 when no value is given)
    #[arg(long, value_name = "UNITS", num_args = 0..=1)]
    per_frame: Option<Option<f32>>,

    /// Keep a layer sliding forever instead of ending the game once it passes the stack
    #[arg(long)]
    no_drift_check: bool,

    /// Write tracing output to this file (overrides STACKER_LOG)
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Print the final status as JSON on exit
    #[arg(long)]
    summary: bool,
}

impl Cli {
    /// Apply flags on top of an environment-derived config.
    fn apply(&self, mut config: StackerConfig) -> StackerConfig {
        if let Some(speed) = self.speed {
            config.motion = MotionMode::RealTime { speed };
        }
        if let Some(step) = self.per_frame {
            config.motion = MotionMode::PerFrame {
                step: step.unwrap_or(PER_FRAME_STEP),
            };
        }
        if self.no_drift_check {
            config.drift_check = false;
        }
        config
    }

    fn log_path(&self) -> Option<PathBuf> {
        self.log
            .clone()
            .or_else(|| std::env::var_os("STACKER_LOG").map(PathBuf::from))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(StackerConfig::from_env());
    config.validate().context("invalid configuration")?;

    if let Some(path) = cli.log_path() {
        init_logging(&path)?;
    }
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    let status = result?;

    info!(score = status.score, "exiting");
    if cli.summary {
        println!("{}", serde_json::to_string(&status)?);
    }
    Ok(())
}

/// The terminal belongs to the renderer, so logs go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

type Session = StackSession<TermScene, RapierWorld>;

fn new_session(config: &StackerConfig, viewport: Viewport) -> Session {
    let mut session = StackSession::new(
        config.clone(),
        TermScene::new(),
        RapierWorld::new(config.gravity),
    );
    let (w, h) = viewport.surface_size();
    session.resize(w, h);
    session
}

fn run(term: &mut TerminalRenderer, config: &StackerConfig) -> Result<StatusSnapshot> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut session = new_session(config, viewport);

    let mut view = StackView::new();
    let mut fb = FrameBuffer::new(w, h);
    let mut input = InputHandler::new();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Input with timeout until the next frame.
        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let ev = event::read()?;
            match &ev {
                Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(*key) => {
                    return Ok(session.status());
                }
                Event::Resize(cols, rows) => {
                    viewport = Viewport::new(*cols, *rows);
                    let (w, h) = viewport.surface_size();
                    session.resize(w, h);
                    term.invalidate();
                }
                _ => {}
            }

            match input.handle_event(&ev) {
                Some(StackAction::Activate) => {
                    session.activate();
                }
                Some(StackAction::Restart) => {
                    info!(score = session.score(), "restart");
                    session = new_session(config, viewport);
                }
                None => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed < frame {
            continue;
        }
        last_frame = Instant::now();

        input.update(elapsed.as_millis().min(u32::MAX as u128) as u32);
        session.tick(elapsed.as_secs_f32().min(MAX_FRAME_DT));
        if let Some(event) = session.take_last_event() {
            debug!(?event, "session event");
        }

        view.render_into(session.scene(), &session.status(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
