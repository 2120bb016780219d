mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::filter::EnvFilter;

use platform_quest::config::{GameConfig, Variant, DEFAULT_FPS};
use platform_quest::error::GameError;
use platform_quest::game::GameContext;
use platform_quest::input::{InputSnapshot, Key};
use platform_quest::levels::LevelIndex;
use platform_quest::render;

#[derive(Parser, Debug)]
#[command(name = "platform-quest")]
#[command(about = "A 32-level platformer for the terminal")]
struct Cli {
    /// Level scheme and feel
    #[arg(long, value_enum, default_value_t = Variant::Classic)]
    variant: Variant,
    /// Level the map opens on (1-32)
    #[arg(long, default_value_t = 1)]
    level: u8,
    /// Simulation ticks per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,
    /// Starting lives (defaults to the variant's own)
    #[arg(long)]
    lives: Option<u32>,
    /// Write logs here; nothing is logged otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Seed for cosmetic randomness
    #[arg(long)]
    seed: Option<u64>,
}

// ── Held-key model ────────────────────────────────────────────────────────────

/// Once a key auto-repeats, it stays "held" while repeats keep arriving
/// within this window. The OS repeat rate is ≥ 15 Hz, so the window is
/// refreshed before it expires.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// Window after the first press of a key, before any repeat has arrived.
/// Has to outlast the OS initial repeat delay (250-500 ms), otherwise a held
/// key drops out and comes back, reading as a second press. A quick tap is
/// therefore held for this long on terminals without release events.
const FIRST_PRESS_WINDOW: Duration = Duration::from_millis(500);

/// Press history of one logical key.
#[derive(Clone, Copy, Debug)]
struct Held {
    last: Instant,
    repeating: bool,
}

impl Held {
    fn window(&self) -> Duration {
        if self.repeating {
            HOLD_WINDOW
        } else {
            FIRST_PRESS_WINDOW
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last) <= self.window()
    }
}

/// Record a press or repeat of `key`. A press while the key is still held is
/// a repeat, since plain terminals report repeats as presses.
fn note_press(seen: &mut HashMap<Key, Held>, key: Key, now: Instant) {
    let repeating = seen.get(&key).is_some_and(|held| held.is_live(now));
    seen.insert(key, Held { last: now, repeating });
}

/// Logical keys a terminal key event stands for. Shift on any key counts as
/// the run key, since most terminals never report a bare Shift press.
fn keys_for(code: KeyCode, modifiers: KeyModifiers) -> Vec<Key> {
    let mut keys = Vec::with_capacity(2);
    if modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') | KeyCode::Char('C') = code {
            keys.push(Key::Quit);
        }
        return keys;
    }
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => keys.push(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => keys.push(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => keys.extend([Key::Up, Key::Jump]),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => keys.push(Key::Down),
        KeyCode::Char(' ') | KeyCode::Char('z') | KeyCode::Char('Z') => keys.push(Key::Jump),
        KeyCode::Char('x') | KeyCode::Char('X') => keys.push(Key::Run),
        KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Char('c') | KeyCode::Char('C') => {
            keys.push(Key::Action)
        }
        KeyCode::Enter => keys.push(Key::Confirm),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => keys.push(Key::Quit),
        _ => {}
    }
    if modifiers.contains(KeyModifiers::SHIFT) && !keys.contains(&Key::Run) {
        keys.push(Key::Run);
    }
    keys
}

/// Keys whose last press is still inside their hold window at `now`.
fn held_keys(last_seen: &HashMap<Key, Held>, now: Instant) -> InputSnapshot {
    last_seen
        .iter()
        .filter(|(_, held)| held.is_live(now))
        .map(|(&key, _)| key)
        .collect()
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we keep the
/// time of the last press/repeat event for every logical key and hand the
/// core the set of keys that are still "fresh" each frame; the core derives
/// pressed/released edges from consecutive sets.
///
/// * **Keyboard-enhancement capable** terminals send `Release` events, so
///   keys drop out immediately.
/// * **Classic terminals** only send `Press` (key repeat shows as repeated
///   `Press`); keys expire after `FIRST_PRESS_WINDOW` of silence following
///   the first press, then `HOLD_WINDOW` once repeats are flowing.
fn game_loop<W: Write>(
    out: &mut W,
    ctx: &mut GameContext,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> Result<()> {
    let mut last_seen: HashMap<Key, Held> = HashMap::new();

    while ctx.is_running() {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            for key in keys_for(code, modifiers) {
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        note_press(&mut last_seen, key, frame_start);
                    }
                    KeyEventKind::Release => {
                        last_seen.remove(&key);
                    }
                }
            }
        }

        ctx.update(held_keys(&last_seen, frame_start));

        let (cols, rows) = terminal::size().map_err(GameError::from)?;
        display::render(out, &render::frame(ctx), cols, rows).map_err(GameError::from)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    ensure!(cli.fps > 0, "--fps must be at least 1");
    let start = LevelIndex::new(cli.level)?;
    let mut config = GameConfig::for_variant(cli.variant);
    config.fps = cli.fps;
    let mut ctx = GameContext::new(config, start, cli.seed.unwrap_or_else(rand::random));
    if let Some(lives) = cli.lives {
        ctx = ctx.with_lives(lives);
    }
    tracing::info!(variant = ?cli.variant, level = start.get(), fps = cli.fps, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
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

    let frame_time = Duration::from_secs_f64(1.0 / f64::from(cli.fps));
    let result = game_loop(&mut out, &mut ctx, &rx, frame_time);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(score = ctx.progress.score, "exiting");
    result
}
