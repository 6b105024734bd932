use super::snake::Snake;
use super::types::{Cell, GridBounds};

/// Read-only occupancy view over the board. Cells need not be occupied or in bounds to be
/// queried, so callers can probe where a head would land next tick.
pub struct GridModel<'a> {
    bounds: GridBounds,
    snakes: [&'a Snake; 2],
    food: &'a [Cell],
}

impl<'a> GridModel<'a> {
    pub fn new(bounds: GridBounds, snakes: [&'a Snake; 2], food: &'a [Cell]) -> Self {
        Self {
            bounds,
            snakes,
            food,
        }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.bounds.contains(cell)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snakes.iter().any(|snake| snake.occupies_cell(cell, 0)) || self.food.contains(&cell)
    }

    pub fn free_cell_count(&self) -> usize {
        (0..self.bounds.height as i32)
            .flat_map(|y| (0..self.bounds.width as i32).map(move |x| Cell::new(x, y)))
            .filter(|&cell| !self.is_occupied(cell))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::types::Direction;

    #[test]
    fn test_occupancy() {
        let player = Snake::new(Cell::new(1, 1), Direction::Right);
        let ai = Snake::new(Cell::new(4, 4), Direction::Left);
        let food = [Cell::new(2, 3)];
        let grid = GridModel::new(GridBounds::new(6, 6), [&player, &ai], &food);

        assert!(grid.is_occupied(Cell::new(1, 1)));
        assert!(grid.is_occupied(Cell::new(4, 4)));
        assert!(grid.is_occupied(Cell::new(2, 3)));
        assert!(!grid.is_occupied(Cell::new(0, 0)));
        assert!(!grid.is_occupied(Cell::new(-1, 7)));
        assert_eq!(grid.free_cell_count(), 33);
    }

    #[test]
    fn test_in_bounds() {
        let player = Snake::new(Cell::new(0, 0), Direction::Right);
        let ai = Snake::new(Cell::new(1, 0), Direction::Right);
        let grid = GridModel::new(GridBounds::new(3, 2), [&player, &ai], &[]);
        assert!(grid.in_bounds(Cell::new(2, 1)));
        assert!(!grid.in_bounds(Cell::new(3, 1)));
        assert!(!grid.in_bounds(Cell::new(0, -1)));
    }
}
