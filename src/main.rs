use std::io;
use std::thread;
use std::time;
use std::time::Duration;

use anyhow::Context;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;

use tracing_subscriber::EnvFilter;

use gridlife::board::Board;
use gridlife::render::Screen;

/// Delay between generations.
const FRAMETIME: Duration = Duration::from_millis(125);

enum Event {
    TogglePause,
    ScreenResize { cols: u16, rows: u16 },
    Exit,
}

fn handle_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Exit),
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => Some(Event::TogglePause),
            _ => None,
        },
        CtEvent::Resize(cols, rows) => Some(Event::ScreenResize { cols, rows }),
        _ => None,
    }
}

/// Each terminal character holds a 2x4 block of braille pixels.
fn screen_for(cols: u16, rows: u16) -> Screen {
    Screen::new(cols as usize * 2, rows as usize * 4)
}

/// Time left in the frame after `dt` has already been spent polling.
fn frame_budget(dt: Duration) -> Duration {
    FRAMETIME.saturating_sub(dt)
}

fn run() -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
    let mut screen = screen_for(cols, rows);

    let mut board = Board::with_default_size(None);
    let mut paused = false;

    loop {
        let t = time::SystemTime::now();

        // Poll events for as long as FRAMETIME. Polling eats into the frame
        // budget whether or not an event arrives, so the elapsed time is
        // measured either way.
        let event = if event::poll(FRAMETIME)? {
            handle_event(event::read()?)
        } else {
            None
        };
        let dt = t.elapsed()?;

        match event {
            None => {}
            Some(Event::Exit) => break,
            Some(Event::TogglePause) => paused = !paused,
            Some(Event::ScreenResize { cols, rows }) => {
                screen = screen_for(cols, rows);
            }
        }

        if !paused {
            board.step();
        }

        screen.clear();
        screen.draw_board(&board);
        let frame = screen.render();

        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for line in frame.lines() {
            execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        thread::sleep(frame_budget(dt));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::FRAMETIME;
    use super::frame_budget;

    #[test]
    fn idle_poll_spends_the_frame() {
        // An empty poll blocks the whole frame; nothing is left to sleep, so
        // the idle frame period stays at one FRAMETIME rather than two.
        assert_eq!(frame_budget(FRAMETIME), Duration::ZERO);
        assert_eq!(frame_budget(FRAMETIME * 2), Duration::ZERO);
    }

    #[test]
    fn partial_frame_sleeps_the_remainder() {
        let dt = Duration::from_millis(100);

        assert_eq!(frame_budget(dt), FRAMETIME - dt);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    terminal::enable_raw_mode().context("Failed to enable raw mode")?;

    let res = run();

    terminal::disable_raw_mode().context("Failed to disable raw mode")?;

    res
}
