use std::collections::VecDeque;

use super::types::{Cell, Direction, GridBounds};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction,
            pending_direction: direction,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Head first.
    pub fn body(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Reversals are dropped silently; the last accepted request before `advance` wins.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(self.direction) {
            self.pending_direction = direction;
        }
    }

    /// Moves one cell along the pending direction. The length is unchanged, except that a
    /// segment added by `grow` is absorbed here.
    pub fn advance(&mut self) {
        self.direction = self.pending_direction;
        let next_head = self.head().step(self.direction);
        self.body.push_front(next_head);
        self.body.pop_back();
    }

    pub fn grow(&mut self) {
        if let Some(&tail) = self.body.back() {
            self.body.push_back(tail);
        }
    }

    pub fn self_collision(&self) -> bool {
        self.occupies_cell(self.head(), 1)
    }

    /// Whether any segment at index `exclude_head_count` or later sits on `cell`.
    pub fn occupies_cell(&self, cell: Cell, exclude_head_count: usize) -> bool {
        self.body.iter().skip(exclude_head_count).any(|&segment| segment == cell)
    }

    /// Rebuilds a snake from a snapshot body, head first.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Cell>,
        direction: Direction,
    ) -> Result<Self, String> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return Err("Snake body must have at least one segment".to_string());
        }
        Ok(Self {
            body,
            direction,
            pending_direction: direction,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[(i32, i32)], direction: Direction) -> Self {
        Self::from_segments(cells.iter().map(|&(x, y)| Cell::new(x, y)), direction)
            .expect("test snake needs a body")
    }

    pub(super) fn clamp_into(&mut self, bounds: GridBounds) {
        for segment in self.body.iter_mut() {
            *segment = bounds.clamp(*segment);
        }
    }
}
