use std::time::Instant;

use rand::Rng;

use crate::game::{Command, Game, Step, TickOutcome, Transition};
use crate::input::InputEvent;
use crate::scheduler::TickTimer;

/// Owns the game together with its tick timer and random source.
///
/// The timer is stopped before any command that can change the phase or cover
/// the board is applied, and re-created once the game wants ticks again.
pub struct Session<R: Rng> {
    game: Game,
    timer: TickTimer,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(game: Game, rng: R) -> Self {
        Session { game, timer: TickTimer::new(), rng }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Option<Transition> {
        let command = self.game.command_for(event)?;

        if !matches!(command, Command::Steer(_) | Command::SelectDifficulty(_)) {
            self.timer.stop();
        }
        let transition = self.game.apply(command, &mut self.rng);
        self.sync_timer(now);
        transition
    }

    /// Runs at most one tick if the timer is due.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.game.wants_ticks() {
            self.timer.stop();
            return None;
        }
        if !self.timer.is_running() {
            self.sync_timer(now);
            return None;
        }

        let interval = self.game.scores().effective_interval();
        if !self.timer.poll(now, interval) {
            return None;
        }

        let step = self.game.step();
        if let Step::Collision { .. } = step {
            self.timer.stop();
        }
        Some(self.game.commit(step, &mut self.rng))
    }

    fn sync_timer(&mut self, now: Instant) {
        if !self.game.wants_ticks() {
            self.timer.stop();
        } else if !self.timer.is_running() {
            self.timer.start(now, self.game.scores().effective_interval());
        }
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;
    use crate::geometry::{Cell, Heading};
    use crate::input::{KeySymbol, SWIPE_THRESHOLD};
    use crate::score::{Difficulty, ScoreBoard};
    use crate::snake::Snake;
    use crate::store::{HighScoreStore, MemoryStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn session(difficulty: Difficulty) -> Session<StdRng> {
        let scores = ScoreBoard::new(HighScoreStore::new(Box::new(MemoryStore::default())), difficulty);
        let mut rng = StdRng::seed_from_u64(3);
        let game = Game::new(scores, SWIPE_THRESHOLD, &mut rng);
        Session::new(game, rng)
    }

    fn press(session: &mut Session<StdRng>, symbol: KeySymbol, now: Instant) -> Option<Transition> {
        session.handle(InputEvent::Key(symbol), now)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn timer_exists_only_while_playing() {
        let mut s = session(Difficulty::Easy);
        let t0 = Instant::now();
        assert!(!s.timer().is_running());
        assert_eq!(s.update(t0 + ms(500)), None);

        press(&mut s, KeySymbol::Confirm, t0);
        assert!(s.timer().is_running());
        assert_eq!(s.timer().time_until_due(t0), Some(ms(180)));

        press(&mut s, KeySymbol::PauseToggle, t0 + ms(10));
        assert_eq!(s.game().phase(), Phase::Paused);
        assert!(!s.timer().is_running());
        assert_eq!(s.update(t0 + ms(400)), None);
    }

    #[test]
    fn resume_creates_a_fresh_timer() {
        let mut s = session(Difficulty::Medium);
        let t0 = Instant::now();
        press(&mut s, KeySymbol::Confirm, t0);
        press(&mut s, KeySymbol::PauseToggle, t0 + ms(100));
        press(&mut s, KeySymbol::PauseToggle, t0 + ms(1000));

        assert_eq!(s.update(t0 + ms(1100)), None);
        assert!(s.update(t0 + ms(1130)).is_some());
    }

    #[test]
    fn ticks_follow_the_selected_interval() {
        let mut s = session(Difficulty::Medium);
        let t0 = Instant::now();
        press(&mut s, KeySymbol::Difficulty(Difficulty::Extreme), t0);
        press(&mut s, KeySymbol::Confirm, t0);
        s.game_mut().arrange(Snake::spawn(), Cell::new(0, 0), Heading::Right);

        assert_eq!(s.update(t0 + ms(49)), None);
        assert_eq!(s.update(t0 + ms(50)), Some(TickOutcome::Moved));
        assert_eq!(s.update(t0 + ms(100)), Some(TickOutcome::Moved));
        assert_eq!(s.game().snake().head(), Cell::new(10, 8));
    }

    #[test]
    fn death_stops_the_timer() {
        let mut s = session(Difficulty::Hard);
        let t0 = Instant::now();
        press(&mut s, KeySymbol::Confirm, t0);
        let coiled = Snake::from_cells(vec![
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
        ]);
        s.game_mut().arrange(coiled, Cell::new(0, 0), Heading::Down);

        assert!(matches!(s.update(t0 + ms(80)), Some(TickOutcome::Died { .. })));
        assert_eq!(s.game().phase(), Phase::GameOver);
        assert!(!s.timer().is_running());

        let transition = press(&mut s, KeySymbol::Confirm, t0 + ms(500));
        assert_eq!(transition, Some(Transition { from: Phase::GameOver, to: Phase::Playing }));
        assert_eq!(s.timer().time_until_due(t0 + ms(500)), Some(ms(80)));
    }

    #[test]
    fn quit_after_death_returns_to_menu() {
        let mut s = session(Difficulty::Hard);
        let t0 = Instant::now();
        press(&mut s, KeySymbol::Confirm, t0);
        let coiled = Snake::from_cells(vec![
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
        ]);
        s.game_mut().arrange(coiled, Cell::new(0, 0), Heading::Down);
        assert!(matches!(s.update(t0 + ms(80)), Some(TickOutcome::Died { .. })));

        let transition = press(&mut s, KeySymbol::Quit, t0 + ms(200));
        assert_eq!(transition, Some(Transition { from: Phase::GameOver, to: Phase::Menu }));
        assert_eq!(s.game().phase(), Phase::Menu);
        assert!(!s.timer().is_running());
        assert_eq!(s.update(t0 + ms(1000)), None);

        let confirm = s.game_mut().command_for(InputEvent::Key(KeySymbol::Confirm));
        assert_eq!(confirm, Some(Command::Start));
    }

    #[test]
    fn help_overlay_suspends_ticks() {
        let mut s = session(Difficulty::Medium);
        let t0 = Instant::now();
        press(&mut s, KeySymbol::Confirm, t0);
        press(&mut s, KeySymbol::Help, t0 + ms(10));
        assert!(!s.timer().is_running());
        assert_eq!(s.update(t0 + ms(500)), None);

        press(&mut s, KeySymbol::Help, t0 + ms(600));
        assert_eq!(s.game().phase(), Phase::Playing);
        assert!(s.update(t0 + ms(730)).is_some());
    }

    #[test]
    fn steering_keeps_the_running_timer() {
        let mut s = session(Difficulty::Medium);
        let t0 = Instant::now();
        press(&mut s, KeySymbol::Confirm, t0);
        press(&mut s, KeySymbol::Direction(Heading::Up), t0 + ms(100));
        assert_eq!(s.timer().time_until_due(t0 + ms(100)), Some(ms(30)));
        assert_eq!(s.game().pending_heading(), Heading::Up);
    }
}
