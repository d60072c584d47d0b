use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::{all_cells, Cell};
use crate::snake::Snake;

/// Picks a uniformly random cell not covered by `snake`.
///
/// Panics when the snake covers the whole board: the self-collision rule ends
/// the game long before that can happen.
pub fn place_food<R: Rng + ?Sized>(snake: &Snake, rng: &mut R) -> Cell {
    let free: Vec<Cell> = all_cells().filter(|cell| !snake.contains(*cell)).collect();

    *free
        .choose(rng)
        .expect("no free cell left for food; self-collision should have ended the game")
}
