use std::{thread::sleep, time::Duration, time::Instant};

use crate::config::Settings;
use crate::game::{Game, Phase};
use crate::geometry::Heading::*;
use crate::input::{InputEvent, KeySymbol, Point};
use crate::log;
use crate::render::{self, Frame};
use crate::score::Difficulty;
use crate::session::Session;
use crate::term::TermManager;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crossterm::Result;
use rand::Rng;

const POLL_INTERVAL_MS: u64 = 5;

pub struct SnakeApp<R: Rng> {
    term: TermManager,
    session: Session<R>,
    units_per_column: i32,
    units_per_row: i32,
}

impl<R: Rng> SnakeApp<R> {
    pub fn new(term: TermManager, game: Game, rng: R, settings: &Settings) -> Self {
        SnakeApp {
            term,
            session: Session::new(game, rng),
            units_per_column: settings.units_per_column,
            units_per_row: settings.units_per_row,
        }
    }

    /// Runs until Ctrl+C, or Q from the menu. The terminal is restored even
    /// when the loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.play();
        let restored = self.term.restore();
        res.and(restored)
    }

    fn play(&mut self) -> Result<()> {
        self.redraw()?;

        loop {
            let poll = Duration::from_millis(POLL_INTERVAL_MS);
            let due = self.session.timer().time_until_due(Instant::now());
            sleep(due.map_or(poll, |d| d.min(poll)));
            let mut dirty = false;

            for ev in self.term.read_events_queue()? {
                match ev {
                    Event::Key(key) if is_ctrl_c(&key) => return Ok(()),
                    Event::Key(key) => {
                        let symbol = match key_symbol(&key) {
                            Some(symbol) => symbol,
                            None => continue,
                        };
                        if self.exits_from_menu(symbol) {
                            log!("Leaving from the menu");
                            return Ok(());
                        }
                        self.session.handle(InputEvent::Key(symbol), Instant::now());
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        if let Some(input) = gesture_event(&mouse, self.units_per_column, self.units_per_row) {
                            dirty |= self.session.handle(input, Instant::now()).is_some();
                        }
                    }
                    Event::Resize(width, height) => {
                        self.term.resize(width, height)?;
                        dirty = true;
                    }
                }
            }

            if self.session.update(Instant::now()).is_some() {
                dirty = true;
            }

            if dirty {
                self.redraw()?;
            }
        }
    }

    fn exits_from_menu(&self, symbol: KeySymbol) -> bool {
        let game = self.session.game();
        symbol == KeySymbol::Quit && game.phase() == Phase::Menu && !game.help_visible()
    }

    fn redraw(&mut self) -> Result<()> {
        let frame = render::frame(self.session.game());
        let overlay = overlay_lines(&frame);
        self.term.draw_frame(&frame, &hud_line(&frame), overlay.as_deref())
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn key_symbol(ev: &KeyEvent) -> Option<KeySymbol> {
    let symbol = match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => KeySymbol::Direction(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeySymbol::Direction(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => KeySymbol::Direction(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeySymbol::Direction(Right),
        KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            KeySymbol::PauseToggle
        }
        KeyCode::Enter => KeySymbol::Confirm,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeySymbol::Quit,
        KeyCode::Char('1') => KeySymbol::Difficulty(Difficulty::Easy),
        KeyCode::Char('2') => KeySymbol::Difficulty(Difficulty::Medium),
        KeyCode::Char('3') => KeySymbol::Difficulty(Difficulty::Hard),
        KeyCode::Char('4') => KeySymbol::Difficulty(Difficulty::Extreme),
        KeyCode::Tab => KeySymbol::CycleDifficulty,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => KeySymbol::Help,
        _ => return None,
    };
    Some(symbol)
}

/// Left-button drags become gestures, scaled from terminal cells to distance units.
pub fn gesture_event(ev: &MouseEvent, units_per_column: i32, units_per_row: i32) -> Option<InputEvent> {
    let at = Point::new(ev.column as i32 * units_per_column, ev.row as i32 * units_per_row);
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::GestureStart(at)),
        MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::GestureMove(at)),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::GestureEnd(at)),
        _ => None,
    }
}

fn hud_line(frame: &Frame) -> String {
    format!(
        " Score: {}   High: {}   {}",
        frame.score, frame.high_score, frame.difficulty
    )
}

pub fn overlay_lines(frame: &Frame) -> Option<Vec<String>> {
    if frame.help_visible {
        return Some(help_lines());
    }

    let lines = match frame.phase {
        Phase::Playing => return None,
        Phase::Menu => vec![
            "T O R U S   S N A K E".to_string(),
            String::new(),
            format!("Difficulty: < {} >", frame.difficulty),
            "1-4 or Tab to change".to_string(),
            String::new(),
            "Enter to start".to_string(),
            "H for help, Q to quit".to_string(),
        ],
        Phase::Paused => vec![
            "Paused".to_string(),
            String::new(),
            "Esc or Enter to resume".to_string(),
            "Q for the menu".to_string(),
        ],
        Phase::GameOver => {
            let mut lines = vec!["Game over!".to_string(), format!("Score: {}", frame.score)];
            if frame.score > 0 && frame.score == frame.high_score {
                lines.push("New high score!".to_string());
            }
            lines.push(String::new());
            lines.push("Enter to play again".to_string());
            lines.push("Q for the menu".to_string());
            lines
        }
    };
    Some(lines)
}

fn help_lines() -> Vec<String> {
    let rows: [(&str, &str); 7] = [
        ("Arrows / WASD", "steer"),
        ("Mouse drag", "swipe to steer"),
        ("Esc / Space / P", "pause"),
        ("Enter", "start / resume / retry"),
        ("Q", "back to menu"),
        ("1-4 / Tab", "difficulty (menu)"),
        ("H / ?", "close this help"),
    ];

    let mut lines = vec!["Controls".to_string(), String::new()];
    lines.extend(rows.iter().map(|(key, action)| format!("{:<16}{:<22}", key, action)));
    lines
}
