use crate::game::Phase;
use crate::geometry::{Heading, BOARD_SIZE};
use crate::render::{CellView, Frame};
use crate::{Coords, TermInt};
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal, Result};

/// Screen column of the left border; cells start one column to its right.
const BOARD_LEFT: TermInt = 0;
/// Screen row of the top border; row 0 above it holds the score line.
const BOARD_TOP: TermInt = 1;
/// Every board cell is two terminal columns wide to look roughly square.
const CELL_WIDTH: TermInt = 2;

pub const SCREEN_WIDTH: TermInt = BOARD_LEFT + CELL_WIDTH * BOARD_SIZE as TermInt + 2;
pub const SCREEN_HEIGHT: TermInt = BOARD_TOP + BOARD_SIZE as TermInt + 2;

const SNAKE_BODY_CHAR: char = '█';
const SNAKE_TAIL_CHAR: char = '▓';
const DEAD_SNAKE_CHAR: char = 'X';
const EMPTY_CHARS: [char; 2] = [' ', '·'];
const FOOD_CHARS: [char; 2] = ['(', ')'];

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        if self.width < SCREEN_WIDTH || self.height < SCREEN_HEIGHT {
            let msg = format!(
                "terminal is {}x{}, the board needs at least {}x{}",
                self.width, self.height, SCREEN_WIDTH, SCREEN_HEIGHT
            );
            return Err(io::Error::new(io::ErrorKind::Other, msg).into());
        }

        execute!(self.stdout, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Show,
            cursor::EnableBlinking,
            DisableMouseCapture,
            LeaveAlternateScreen
        )
    }

    /// Drains every key, mouse and resize event already waiting.
    pub fn read_events_queue(&self) -> Result<Vec<Event>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            events.push(read()?);
        }

        Ok(events)
    }

    pub fn resize(&mut self, width: TermInt, height: TermInt) -> Result<()> {
        self.width = width;
        self.height = height;
        self.current_msg = None;
        self.clear()
    }

    pub fn draw_frame(&mut self, frame: &Frame, hud: &str, overlay: Option<&[String]>) -> Result<()> {
        let hud_line = format!("{hud:<width$}", hud = hud, width = SCREEN_WIDTH as usize);
        self.print_str((BOARD_LEFT, 0), &hud_line);
        self.draw_borders();

        let dead = frame.phase == Phase::GameOver;
        for (y, row) in frame.cells.iter().enumerate() {
            for (x, view) in row.iter().enumerate() {
                let chars = cell_chars(*view, dead);
                let pos = board_to_screen(x as TermInt, y as TermInt);
                self.print_at(pos, chars[0]);
                self.print_at((pos.0 + 1, pos.1), chars[1]);
            }
        }

        match overlay {
            Some(lines) => self.show_message(lines)?,
            None => self.hide_message()?,
        }
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[String]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let center = (SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        Ok(())
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(ch) = self.saved(x, y) {
                    self.print_at_no_save((x, y), ch)?;
                }
            }
        }
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) {
        let end_x = SCREEN_WIDTH - 1;
        let end_y = SCREEN_HEIGHT - 1;

        for x in BOARD_LEFT..SCREEN_WIDTH {
            let ch = if x == BOARD_LEFT || x == end_x { '+' } else { '-' };
            self.print_at((x, BOARD_TOP), ch);
            self.print_at((x, end_y), ch);
        }

        for y in BOARD_TOP + 1..end_y {
            self.print_at((BOARD_LEFT, y), '|');
            self.print_at((end_x, y), '|');
        }
    }

    fn print_str(&mut self, pos: Coords, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), ch);
        }
    }

    /// Queues a character and remembers it, skipping anything off screen.
    fn print_at(&mut self, pos: Coords, ch: char) {
        if pos.0 >= self.width || pos.1 >= self.height {
            return;
        }
        let idx = self.width as usize * pos.1 as usize + pos.0 as usize;
        if queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).is_ok() {
            self.screen[idx] = ch;
        }
    }

    // For messages: the local buffer keeps what is underneath so hiding the
    // message can restore it.
    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn saved(&self, x: TermInt, y: TermInt) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.screen.get(self.width as usize * y as usize + x as usize).copied()
    }
}

pub fn board_to_screen(x: TermInt, y: TermInt) -> Coords {
    (BOARD_LEFT + 1 + x * CELL_WIDTH, BOARD_TOP + 1 + y)
}

fn cell_chars(view: CellView, dead: bool) -> [char; 2] {
    match view {
        CellView::Head(_) | CellView::Body | CellView::Tail if dead => [DEAD_SNAKE_CHAR; 2],
        CellView::Empty => EMPTY_CHARS,
        CellView::Food => FOOD_CHARS,
        CellView::Head(heading) => head_chars(heading),
        CellView::Body => [SNAKE_BODY_CHAR; 2],
        CellView::Tail => [SNAKE_TAIL_CHAR; 2],
    }
}

fn head_chars(heading: Heading) -> [char; 2] {
    match heading {
        Heading::Up => ['/', '\\'],
        Heading::Down => ['\\', '/'],
        Heading::Left => ['<', '█'],
        Heading::Right => ['█', '>'],
    }
}
