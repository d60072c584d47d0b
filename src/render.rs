use crate::game::{Game, Phase};
use crate::geometry::{Heading, BOARD_SIZE};
use crate::score::Difficulty;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Empty,
    Food,
    Head(Heading),
    Body,
    Tail,
}

/// Everything a renderer needs, derived from the game and nothing else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Row-major: `cells[y][x]`.
    pub cells: Vec<Vec<CellView>>,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub difficulty: Difficulty,
    pub help_visible: bool,
}

impl Frame {
    #[cfg(test)]
    pub(crate) fn at(&self, x: i32, y: i32) -> CellView {
        self.cells[y as usize][x as usize]
    }
}

pub fn frame(game: &Game) -> Frame {
    let size = BOARD_SIZE as usize;
    let mut cells = vec![vec![CellView::Empty; size]; size];

    let food = game.food();
    cells[food.y as usize][food.x as usize] = CellView::Food;

    let snake = game.snake();
    for cell in snake.body() {
        cells[cell.y as usize][cell.x as usize] = CellView::Body;
    }
    if snake.len() > 1 {
        let tail = snake.tail();
        cells[tail.y as usize][tail.x as usize] = CellView::Tail;
    }
    let head = snake.head();
    cells[head.y as usize][head.x as usize] = CellView::Head(game.heading());

    let scores = game.scores();
    Frame {
        cells,
        phase: game.phase(),
        score: scores.score(),
        high_score: scores.high_score(),
        difficulty: scores.difficulty(),
        help_visible: game.help_visible(),
    }
}
