use std::io::{BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};

use crate::canvas::TerminalCanvas;
use crate::config::Config;
use crate::error::Result;
use crate::simulation::Simulation;

/// Catch-up ticks allowed per frame after a stall.
const MAX_CATCH_UP: f32 = 3.0;

/// Takes over the terminal and runs the show until an exit key is pressed.
///
/// The terminal is restored even when the show fails.
pub fn run(config: &Config) -> Result<()> {
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout());

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All), EnableMouseCapture)?;

    let result = show(config, &mut stdout);

    let restored = execute!(stdout, Show, LeaveAlternateScreen, DisableMouseCapture)
        .and_then(|()| terminal::disable_raw_mode());

    result?;
    restored?;
    Ok(())
}

pub fn is_exit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('q')
        || key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Follows the terminal to its new size. A zero-sized report is ignored and
/// the canvas keeps its previous size.
fn apply_resize(canvas: &mut TerminalCanvas, cols: u16, rows: u16) -> bool {
    match canvas.resize(cols as usize, rows as usize) {
        Ok(()) => {
            info!("resized to {cols}x{rows}");
            true
        }
        Err(e) => {
            warn!("ignoring resize: {e}");
            false
        }
    }
}

fn show(config: &Config, stdout: &mut BufWriter<Stdout>) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(cols as usize, rows as usize, config.scale, config.background)?;
    let mut simulation = Simulation::new(config.simulation);
    info!(
        "starting show on {cols}x{rows} terminal, {} ticks/s, launch every {} ticks",
        config.fps, config.simulation.launch_interval
    );

    let tick = config.tick_duration().as_secs_f32();
    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    let mut ticks: u64 = 0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(key) if is_exit_key(key) => break,
                Event::Resize(cols, rows) => {
                    if apply_resize(&mut canvas, *cols, *rows) {
                        execute!(stdout, Clear(ClearType::All))?;
                    }
                }
                _ => {
                    if simulation.pointer_mut().handle_event(&event, canvas.scale()) {
                        debug!("pointer {:?}", simulation.pointer());
                    }
                }
            }
        }

        let now = Instant::now();
        accumulator += now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        accumulator = accumulator.min(tick * MAX_CATCH_UP);

        let mut advanced = false;
        while accumulator >= tick {
            simulation.tick(&mut canvas);
            accumulator -= tick;
            ticks += 1;
            advanced = true;
        }

        if advanced {
            canvas.present(stdout)?;
        }
    }

    stdout.flush()?;
    info!("show stopped after {ticks} ticks");
    Ok(())
}
