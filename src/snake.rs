use crate::geometry::{add_delta, wrap, Cell, Heading};
use MoveResult::*;

pub const SPAWN_HEAD: Cell = Cell::new(8, 8);
pub const SPAWN_LENGTH: usize = 2;
pub const SPAWN_HEADING: Heading = Heading::Right;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// The head advanced; `grown` is the old body with the new head prepended
    /// and nothing dropped yet.
    Moved { new_head: Cell, grown: Snake },
    Crashed { at: Cell },
}

/// Head-first sequence of distinct cells. Never mutated in place: every step
/// produces a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Lays out `size` cells trailing behind `head`, opposite to `heading`.
    pub fn new(head: Cell, size: usize, heading: Heading) -> Self {
        assert!(size >= 1, "a snake needs at least one cell");
        let (dx, dy) = heading.delta();

        let body = (0..size as i32)
            .map(|i| Cell::new(wrap(head.x - dx * i), wrap(head.y - dy * i)))
            .collect();
        Snake { body }
    }

    pub fn spawn() -> Self {
        Snake::new(SPAWN_HEAD, SPAWN_LENGTH, SPAWN_HEADING)
    }

    #[cfg(test)]
    pub(crate) fn from_cells(body: Vec<Cell>) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Snake { body }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// The collision check runs against the whole current body, tail included,
    /// even though the tail would be vacated by a non-growing move.
    pub fn move_step(&self, heading: Heading) -> MoveResult {
        let new_head = add_delta(self.head(), heading);

        if self.contains(new_head) {
            return Crashed { at: new_head };
        }

        let mut body = Vec::with_capacity(self.body.len() + 1);
        body.push(new_head);
        body.extend_from_slice(&self.body);
        Moved { new_head, grown: Snake { body } }
    }

    pub fn without_tail(&self) -> Snake {
        let keep = self.body.len().saturating_sub(1).max(1);
        Snake { body: self.body[..keep].to_vec() }
    }
}
