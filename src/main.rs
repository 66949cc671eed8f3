mod display;

use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pixel_shooter::config::Config;
use pixel_shooter::input::KeyTracker;
use pixel_shooter::render::render;
use pixel_shooter::surface::Surface;
use pixel_shooter::{GameLoop, Schedule};

use display::{Layout, TerminalPresenter};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The alternate screen owns stderr while we draw, so without a log file
/// only warnings and errors are let through.
fn init_logging(config: &Config) -> Result<()> {
    let default_filter = if config.log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(filter) = &config.log_level {
        builder.parse_filters(filter);
    }
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("failed to install logger")?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Control {
    Quit,
    Continue,
}

/// Fold every pending terminal event into the tracker.  Returns `Quit` on
/// Q / Esc / Ctrl-C, and an error once the reader thread has failed.
fn drain_events(
    rx: &mpsc::Receiver<io::Result<Event>>,
    game: &mut GameLoop<TerminalPresenter, StdRng>,
    tracker: &mut KeyTracker,
    layout: &mut Layout,
    config: &Config,
    frame: u64,
) -> Result<Control> {
    while let Ok(ev) = rx.try_recv() {
        match ev.context("terminal event reader failed")? {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                if kind == KeyEventKind::Press {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(Control::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(Control::Quit);
                        }
                        KeyCode::Char(' ') | KeyCode::Enter if !game.is_running() => {
                            tracker.clear();
                            game.start();
                            continue;
                        }
                        _ => {}
                    }
                }
                tracker.key(code, kind, frame);
            }
            Event::Mouse(MouseEvent { kind, column, .. }) => {
                if matches!(
                    kind,
                    MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)
                ) {
                    tracker.pointer(layout.logical_x(column));
                }
            }
            Event::Resize(w, h) => {
                *layout = Layout::fit(w, h, config.scale);
                log::info!("terminal resized to {}x{}, shrink {}", w, h, layout.shrink);
            }
            _ => {}
        }
    }
    Ok(Control::Continue)
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<io::Result<Event>>, config: &Config) -> Result<()> {
    let rng = match config.seed {
        Some(seed) => {
            log::info!("seeding RNG with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut game = GameLoop::new(TerminalPresenter::new(), rng);
    let mut tracker = KeyTracker::new();
    let mut surface = Surface::new();
    render(game.state(), &mut surface);

    let (w, h) = terminal::size()?;
    let mut layout = Layout::fit(w, h, config.scale);
    let frame_time = config.frame_duration();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let previous = layout;
        if let Control::Quit = drain_events(rx, &mut game, &mut tracker, &mut layout, config, frame)? {
            return Ok(());
        }
        if layout != previous {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        // One snapshot per frame; the step never sees a partial update.
        let intents = tracker.snapshot(frame);
        if game.is_running() && game.tick(&intents, &mut surface) == Schedule::Stop {
            log::info!("session over after {} frames", game.state().frame);
        }

        display::draw(out, &surface, game.presenter(), game.status(), &layout)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

/// Warnings about terminal features the setup could not turn on.
fn capability_notices(mouse: bool, keyboard_enhanced: bool) -> Vec<&'static str> {
    let mut notices = Vec::new();
    if !mouse {
        notices.push("mouse capture unavailable; keyboard only");
    }
    if !keyboard_enhanced {
        notices.push("keyboard enhancement unavailable; held keys expire by timeout");
    }
    notices
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_logging(&config)?;
    log::info!("pixel_shooter starting: {:?}", config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;

    let mouse = out.execute(EnableMouseCapture).is_ok();

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen on their own thread so the game loop never waits on I/O.
    // A read error is handed to the loop, which stops the game with it.
    let (tx, rx) = mpsc::channel::<io::Result<Event>>();
    thread::spawn(move || loop {
        let ev = event::read();
        let failed = ev.is_err();
        if tx.send(ev).is_err() || failed {
            break;
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    if mouse {
        let _ = out.execute(DisableMouseCapture);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    // Logged only now: while the alternate screen is up, stderr output
    // lands on top of the playfield.
    for notice in capability_notices(mouse, keyboard_enhanced) {
        log::warn!("{}", notice);
    }
    result
}
