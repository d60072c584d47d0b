use rand::Rng;

use crate::food::place_food;
use crate::geometry::{Cell, Heading};
use crate::input::{accept_heading, GestureTracker, InputEvent, KeySymbol};
use crate::log;
use crate::score::{Difficulty, ScoreBoard};
use crate::snake::{MoveResult, Snake, SPAWN_HEADING};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// What an input event asks the game to do, already resolved against the
/// current phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Restart,
    ToMenu,
    Steer(Heading),
    SelectDifficulty(Difficulty),
    ToggleHelp,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

/// The outcome of one tick, computed without touching the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Advance { snake: Snake, ate: bool },
    Collision { at: Cell },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate { score: u32 },
    Died { score: u32, new_record: bool },
}

pub struct Game {
    phase: Phase,
    snake: Snake,
    food: Cell,
    heading: Heading,
    pending_heading: Heading,
    help_visible: bool,
    gesture: GestureTracker,
    scores: ScoreBoard,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(scores: ScoreBoard, swipe_threshold: i32, rng: &mut R) -> Self {
        let snake = Snake::spawn();
        let food = place_food(&snake, rng);
        Game {
            phase: Phase::Menu,
            snake,
            food,
            heading: SPAWN_HEADING,
            pending_heading: SPAWN_HEADING,
            help_visible: false,
            gesture: GestureTracker::new(swipe_threshold),
            scores,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[cfg(test)]
    pub(crate) fn pending_heading(&self) -> Heading {
        self.pending_heading
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Ticks and gestures run only while playing with the board uncovered.
    pub fn wants_ticks(&self) -> bool {
        self.phase == Phase::Playing && !self.help_visible
    }

    /// Resolves an input event into a command. Gesture events update the
    /// swipe tracker as a side effect.
    pub fn command_for(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Key(symbol) => self.command_for_key(symbol),
            InputEvent::GestureStart(at) => {
                if self.wants_ticks() {
                    self.gesture.begin(at);
                }
                None
            }
            InputEvent::GestureMove(at) => {
                if !self.wants_ticks() {
                    self.gesture.cancel();
                    return None;
                }
                self.gesture.sample(at).map(Command::Steer)
            }
            InputEvent::GestureEnd(at) => {
                if !self.wants_ticks() {
                    self.gesture.cancel();
                    return None;
                }
                self.gesture.end(at).map(Command::Steer)
            }
        }
    }

    fn command_for_key(&self, symbol: KeySymbol) -> Option<Command> {
        if symbol == KeySymbol::Help {
            return Some(Command::ToggleHelp);
        }
        if self.help_visible {
            return None;
        }

        match (symbol, self.phase) {
            (KeySymbol::Direction(heading), Phase::Playing) => Some(Command::Steer(heading)),
            (KeySymbol::PauseToggle, Phase::Playing) => Some(Command::Pause),
            (KeySymbol::PauseToggle, Phase::Paused) => Some(Command::Resume),
            (KeySymbol::Confirm, Phase::Menu) => Some(Command::Start),
            (KeySymbol::Confirm, Phase::Paused) => Some(Command::Resume),
            (KeySymbol::Confirm, Phase::GameOver) => Some(Command::Restart),
            (KeySymbol::Quit, Phase::Paused) | (KeySymbol::Quit, Phase::GameOver) => {
                Some(Command::ToMenu)
            }
            (KeySymbol::Difficulty(difficulty), Phase::Menu) => {
                Some(Command::SelectDifficulty(difficulty))
            }
            (KeySymbol::CycleDifficulty, Phase::Menu) => {
                Some(Command::SelectDifficulty(self.scores.difficulty().next()))
            }
            _ => None,
        }
    }

    /// Applies a command if it is legal in the current phase; illegal ones are
    /// dropped. Returns the phase change, if any.
    pub fn apply<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) -> Option<Transition> {
        if command == Command::ToggleHelp {
            self.help_visible = !self.help_visible;
            self.gesture.cancel();
            return None;
        }
        if self.help_visible {
            return None;
        }

        let from = self.phase;
        let to = match (command, from) {
            (Command::Start, Phase::Menu) | (Command::Restart, Phase::GameOver) => {
                self.reset(rng);
                Phase::Playing
            }
            (Command::Pause, Phase::Playing) => Phase::Paused,
            (Command::Resume, Phase::Paused) => Phase::Playing,
            (Command::ToMenu, Phase::Paused) | (Command::ToMenu, Phase::GameOver) => Phase::Menu,
            (Command::Steer(heading), Phase::Playing) => {
                if accept_heading(heading, self.heading) {
                    self.pending_heading = heading;
                }
                return None;
            }
            (Command::SelectDifficulty(difficulty), Phase::Menu) => {
                if difficulty != self.scores.difficulty() {
                    log!("Difficulty set to {}", difficulty);
                }
                self.scores.select(difficulty);
                return None;
            }
            _ => return None,
        };

        if to != Phase::Playing {
            self.gesture.cancel();
        }
        self.phase = to;
        log!("Phase {:?} -> {:?}", from, to);
        Some(Transition { from, to })
    }

    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.snake = Snake::spawn();
        self.heading = SPAWN_HEADING;
        self.pending_heading = SPAWN_HEADING;
        self.food = place_food(&self.snake, rng);
        self.scores.reset_score();
        self.gesture.cancel();
    }

    /// Computes the next tick from the pending heading without committing it.
    pub fn step(&self) -> Step {
        match self.snake.move_step(self.pending_heading) {
            MoveResult::Crashed { at } => Step::Collision { at },
            MoveResult::Moved { new_head, grown } if new_head == self.food => {
                Step::Advance { snake: grown, ate: true }
            }
            MoveResult::Moved { grown, .. } => Step::Advance { snake: grown.without_tail(), ate: false },
        }
    }

    /// Commits a step produced by [`Game::step`] on this same state.
    pub fn commit<R: Rng + ?Sized>(&mut self, step: Step, rng: &mut R) -> TickOutcome {
        debug_assert_eq!(self.phase, Phase::Playing, "ticks only run while playing");
        self.heading = self.pending_heading;

        match step {
            Step::Collision { at } => {
                // the last valid snake stays on the board for the final frame
                let score = self.scores.score();
                self.phase = Phase::GameOver;
                self.gesture.cancel();
                let new_record = self.scores.record_death(score);
                log!(
                    "Crashed into ({}, {}) with score {}{}",
                    at.x,
                    at.y,
                    score,
                    if new_record { " (new record)" } else { "" }
                );
                TickOutcome::Died { score, new_record }
            }
            Step::Advance { snake, ate: true } => {
                self.snake = snake;
                self.scores.add_point();
                let eaten = self.food;
                self.food = place_food(&self.snake, rng);
                log!(
                    "Ate food at ({}, {}). Score: {}",
                    eaten.x,
                    eaten.y,
                    self.scores.score()
                );
                TickOutcome::Ate { score: self.scores.score() }
            }
            Step::Advance { snake, ate: false } => {
                self.snake = snake;
                TickOutcome::Moved
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        let step = self.step();
        self.commit(step, rng)
    }

    #[cfg(test)]
    pub(crate) fn arrange(&mut self, snake: Snake, food: Cell, heading: Heading) {
        self.snake = snake;
        self.food = food;
        self.heading = heading;
        self.pending_heading = heading;
    }
}
