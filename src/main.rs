//! Terminal 2048 runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! from `tui_2048::term`. Logs go to a file because the terminal is in
//! alternate-screen mode while the game runs.

use std::fs::{self, OpenOptions};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_2048::config::AppConfig;
use tui_2048::core::{RandomSource, SimpleRng};
use tui_2048::input::{handle_key_event, should_quit, SwipeTracker};
use tui_2048::session::Session;
use tui_2048::storage::{FileStore, KeyValueStore, MemoryStore, Persistence};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::{FLASH_MS, FRAME_MS};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    if let Err(e) = init_logging(&config) {
        eprintln!("logging disabled: {e:#}");
    }
    info!("starting with {:?}", config);

    let rng = SimpleRng::new(config.seed);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = if config.save_enabled {
        let store = FileStore::new(&config.data_dir);
        run(&mut term, Session::restore(config.board_size, rng, Persistence::new(store)))
    } else {
        let store = MemoryStore::new();
        run(&mut term, Session::restore(config.board_size, rng, Persistence::new(store)))
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    if let Some(dir) = config.log_path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("opening {}", config.log_path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

fn run<S, R>(term: &mut TerminalRenderer, mut session: Session<S, R>) -> Result<()>
where
    S: KeyValueStore,
    R: RandomSource,
{
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut swipe = SwipeTracker::new();

    let frame = Duration::from_millis(FRAME_MS as u64);
    let flash = Duration::from_millis(FLASH_MS as u64);
    let mut highlighted_since: Option<Instant> = None;
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(session.state(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Spawn/merge highlights stay up for one flash, then settle.
        if highlighted_since.is_some_and(|t| t.elapsed() >= flash) {
            highlighted_since = None;
            dirty |= session.clear_transient_flags();
        }

        if !event::poll(frame)? {
            continue;
        }

        let changed = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                handle_key_event(key).is_some_and(|cmd| session.apply(cmd))
            }
            Event::Mouse(mouse) => swipe
                .handle_mouse_event(mouse)
                .is_some_and(|dir| session.apply_move(dir)),
            Event::Resize(..) => {
                term.invalidate();
                dirty = true;
                false
            }
            Event::FocusLost => {
                swipe.cancel();
                false
            }
            _ => false,
        };

        if changed {
            dirty = true;
            highlighted_since = Some(Instant::now());
        }
    }
}
