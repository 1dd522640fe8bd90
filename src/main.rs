mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tuna_portal::assets::AssetSet;
use tuna_portal::config::GameConfig;
use tuna_portal::entities::Direction;
use tuna_portal::game::Game;
use tuna_portal::input::InputSource;
use tuna_portal::level::BuiltinMaps;
use tuna_portal::render::{compose, Renderer};

use display::{GlyphAtlas, TerminalRenderer};

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// Environment variable naming an optional TOML config file.
const CONFIG_ENV: &str = "TUNA_PORTAL_CONFIG";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held-key snapshot for one frame, built from the last-seen frame of every
/// key press or repeat.
struct KeyboardInput<'a> {
    key_frame: &'a HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyboardInput<'_> {
    fn is_fresh(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

impl InputSource for KeyboardInput<'_> {
    fn is_held(&self, dir: Direction) -> bool {
        let keys: [KeyCode; 3] = match dir {
            Direction::Up => [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            Direction::Down => [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
            Direction::Left => [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            Direction::Right => [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        };
        keys.iter().any(|k| self.is_fresh(k))
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to a file only: the terminal belongs to the game screen.
fn setup_logging() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "tuna_portal.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process.
    std::mem::forget(guard);

    tracing::info!("Log file: {}/tuna_portal.log", log_dir.display());
    Ok(())
}

fn log_directory() -> PathBuf {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".cache")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("tuna_portal").join("logs")
}

fn load_config() -> Result<GameConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = Path::new(&path);
            tracing::info!("loading config from {}", path.display());
            GameConfig::load(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(GameConfig::default()),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map recording the frame of the last press/repeat event for
/// every key, and each frame ask which directions are still "fresh".
/// Terminals with keyboard enhancement also report releases, which drop the
/// key immediately.
fn game_loop<W: std::io::Write>(
    renderer: &mut TerminalRenderer<W>,
    game: &mut Game<BuiltinMaps>,
    assets: &AssetSet,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let mut rng = thread_rng();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            _ => {}
                        }
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(width, height) => renderer.resize(width, height),
                _ => {}
            }
        }

        let input = KeyboardInput {
            key_frame: &key_frame,
            frame,
        };
        let report = game.update(&input, &mut rng)?;
        for event in &report.events {
            tracing::debug!(?event, "frame event");
        }

        let (view_w, view_h) = renderer.view_size();
        renderer.present(&compose(game, assets, view_w, view_h))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    setup_logging()?;

    // Everything fatal is resolved before the terminal is taken over.
    let config = load_config()?;
    let atlas = GlyphAtlas::new();
    let assets = AssetSet::load(&atlas)?;
    let mut game = Game::new(config, BuiltinMaps, &mut thread_rng())?;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let (width, height) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(out, atlas, width, height);
    let result = game_loop(&mut renderer, &mut game, &assets, &rx);

    // Always restore the terminal
    let mut out = stdout();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("fatal: {err:#}");
    }
    result
}
