use crate::geometry::Heading;
use crate::score::Difficulty;

/// Default minimum drag distance before a gesture turns the snake.
pub const SWIPE_THRESHOLD: i32 = 30;

/// Front-end independent key meanings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeySymbol {
    Direction(Heading),
    PauseToggle,
    Confirm,
    Quit,
    Difficulty(Difficulty),
    CycleDifficulty,
    Help,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeySymbol),
    GestureStart(Point),
    GestureMove(Point),
    GestureEnd(Point),
}

/// A proposed heading is accepted unless it exactly reverses `current`.
pub fn accept_heading(proposed: Heading, current: Heading) -> bool {
    !proposed.is_opposite(current)
}

/// Turns a stream of drag samples into headings.
///
/// The reference point moves to every sample that produced a heading, so one
/// long drag can steer several times.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    threshold: i32,
    reference: Option<Point>,
}

impl GestureTracker {
    pub fn new(threshold: i32) -> Self {
        GestureTracker { threshold, reference: None }
    }

    #[cfg(test)]
    pub(crate) fn is_tracking(&self) -> bool {
        self.reference.is_some()
    }

    pub fn begin(&mut self, at: Point) {
        self.reference = Some(at);
    }

    pub fn sample(&mut self, at: Point) -> Option<Heading> {
        let start = self.reference?;
        let heading = resolve_swipe(at.x - start.x, at.y - start.y, self.threshold)?;
        self.reference = Some(at);
        Some(heading)
    }

    pub fn end(&mut self, at: Point) -> Option<Heading> {
        let heading = self.sample(at);
        self.reference = None;
        heading
    }

    pub fn cancel(&mut self) {
        self.reference = None;
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        GestureTracker::new(SWIPE_THRESHOLD)
    }
}

/// Dominant-axis resolution of a displacement. Ties go to the vertical axis.
pub fn resolve_swipe(dx: i32, dy: i32, threshold: i32) -> Option<Heading> {
    if dx.abs().max(dy.abs()) < threshold {
        return None;
    }

    let heading = if dx.abs() > dy.abs() {
        if dx > 0 { Heading::Right } else { Heading::Left }
    } else if dy > 0 {
        Heading::Down
    } else {
        Heading::Up
    };
    Some(heading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Heading::*;

    #[test]
    fn rejects_exactly_the_four_reversals() {
        let mut rejected = 0;
        for proposed in Heading::ALL.iter().copied() {
            for current in Heading::ALL.iter().copied() {
                if !accept_heading(proposed, current) {
                    rejected += 1;
                    assert_eq!(proposed, current.opposite());
                }
            }
        }
        assert_eq!(rejected, 4);
    }

    #[test]
    fn swipes_resolve_on_the_dominant_axis() {
        assert_eq!(resolve_swipe(40, 5, SWIPE_THRESHOLD), Some(Right));
        assert_eq!(resolve_swipe(5, -40, SWIPE_THRESHOLD), Some(Up));
        assert_eq!(resolve_swipe(-31, 30, SWIPE_THRESHOLD), Some(Left));
        assert_eq!(resolve_swipe(30, 30, SWIPE_THRESHOLD), Some(Down));
        assert_eq!(resolve_swipe(29, -12, SWIPE_THRESHOLD), None);
    }

    #[test]
    fn tracker_rebases_after_each_turn() {
        let mut tracker = GestureTracker::default();
        tracker.begin(Point::new(100, 100));

        assert_eq!(tracker.sample(Point::new(110, 100)), None);
        assert_eq!(tracker.sample(Point::new(140, 105)), Some(Right));
        // measured from (140, 105) now, not from the gesture start
        assert_eq!(tracker.sample(Point::new(150, 120)), None);
        assert_eq!(tracker.sample(Point::new(145, 140)), Some(Down));
        assert!(tracker.is_tracking());
    }

    #[test]
    fn samples_without_a_start_are_ignored() {
        let mut tracker = GestureTracker::default();
        assert_eq!(tracker.sample(Point::new(500, 0)), None);
        assert_eq!(tracker.end(Point::new(500, 0)), None);
    }

    #[test]
    fn end_resolves_and_clears() {
        let mut tracker = GestureTracker::new(10);
        tracker.begin(Point::new(0, 0));
        assert_eq!(tracker.end(Point::new(-12, 3)), Some(Left));
        assert!(!tracker.is_tracking());
    }
}
