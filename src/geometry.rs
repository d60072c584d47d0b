use Heading::*;

/// Side length of the square, toroidal board.
pub const BOARD_SIZE: i32 = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    #[cfg(test)]
    pub const ALL: [Heading; 4] = [Up, Down, Left, Right];

    /// Unit delta in screen coordinates (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Heading) -> bool {
        other == self.opposite()
    }
}

pub fn wrap(v: i32) -> i32 {
    ((v % BOARD_SIZE) + BOARD_SIZE) % BOARD_SIZE
}

pub fn add_delta(cell: Cell, heading: Heading) -> Cell {
    let (dx, dy) = heading.delta();
    Cell::new(wrap(cell.x + dx), wrap(cell.y + dy))
}

/// Every cell of the board, column by column.
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Cell::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_lands_in_range_and_is_idempotent() {
        for v in -100..100 {
            let w = wrap(v);
            assert!((0..BOARD_SIZE).contains(&w), "wrap({}) = {}", v, w);
            assert_eq!(wrap(w), w);
        }
        assert_eq!(wrap(-1), BOARD_SIZE - 1);
        assert_eq!(wrap(BOARD_SIZE), 0);
        for v in [i32::MIN, i32::MAX].iter().copied() {
            assert!((0..BOARD_SIZE).contains(&wrap(v)));
        }
    }

    #[test]
    fn add_delta_wraps_at_every_edge() {
        assert_eq!(add_delta(Cell::new(19, 5), Right), Cell::new(0, 5));
        assert_eq!(add_delta(Cell::new(0, 5), Left), Cell::new(19, 5));
        assert_eq!(add_delta(Cell::new(5, 0), Up), Cell::new(5, 19));
        assert_eq!(add_delta(Cell::new(5, 19), Down), Cell::new(5, 0));
        assert_eq!(add_delta(Cell::new(8, 8), Right), Cell::new(9, 8));
    }

    #[test]
    fn only_exact_reversals_are_opposite() {
        for a in Heading::ALL.iter().copied() {
            for b in Heading::ALL.iter().copied() {
                let (ax, ay) = a.delta();
                let (bx, by) = b.delta();
                assert_eq!(a.is_opposite(b), ax + bx == 0 && ay + by == 0);
            }
        }
    }

    #[test]
    fn board_has_n_squared_cells() {
        assert_eq!(all_cells().count(), (BOARD_SIZE * BOARD_SIZE) as usize);
    }
}
