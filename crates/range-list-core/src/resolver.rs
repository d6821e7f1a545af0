//! Boundary inference for configured levels
//!
//! Admins rarely fill in both ends of every level. A typical configuration
//! looks like `[{max: 50}, {}, {min: 50, max: 100}, {min: 100}]` and expects
//! the blanks to be filled from the neighbours.
//!
//! For each level and each side the resolver:
//! 1. Uses the level's explicit value if it has one.
//! 2. Otherwise, unless the level is the first one, steps to the neighbour in
//!    the side's direction (previous level for `min`, next level for `max`)
//!    and looks at that neighbour's *opposite* side.
//! 3. Repeats steps 1 and 2 from the neighbour. The side flips on every hop,
//!    the direction never changes.
//! 4. Stops with an open bound when the walk reaches the first level or steps
//!    past the last one without finding a value.
//!
//! The first level never infers anything. The last level's `min` is taken
//! from the level before it; its `max` walks off the end and stays open.
//!
//! Every hop moves one index toward an edge, so a lookup takes at most
//! `levels.len()` steps.

use crate::model::{BoundSide, Level, ResolvedRange};

/// Direction of a neighbour walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
}

impl Direction {
    const fn for_side(side: BoundSide) -> Self {
        match side {
            BoundSide::Min => Self::Down,
            BoundSide::Max => Self::Up,
        }
    }

    /// Next index in this direction. `None` from the first level, which
    /// never consults a neighbour. Stepping up from the last level yields an
    /// index past the end.
    const fn step(self, index: usize) -> Option<usize> {
        if index == 0 {
            return None;
        }
        match self {
            Self::Down => Some(index - 1),
            Self::Up => Some(index + 1),
        }
    }
}

/// Resolve every level into a [`ResolvedRange`] with `count = 0`.
///
/// Output has exactly one entry per input level, in input order.
#[must_use]
pub fn resolve(levels: &[Level]) -> Vec<ResolvedRange> {
    let ranges: Vec<ResolvedRange> = (0..levels.len())
        .map(|index| ResolvedRange {
            min: resolve_bound(levels, index, BoundSide::Min),
            max: resolve_bound(levels, index, BoundSide::Max),
            label: levels[index].label.clone(),
            count: 0,
        })
        .collect();

    tracing::debug!(
        levels = levels.len(),
        open_min = ranges.iter().filter(|r| r.min.is_none()).count(),
        open_max = ranges.iter().filter(|r| r.max.is_none()).count(),
        "resolved range boundaries"
    );

    ranges
}

/// Effective value of one side of the level at `index`.
///
/// Returns `None` for an open bound, and for an out-of-range `index`.
#[must_use]
pub fn resolve_bound(levels: &[Level], index: usize, side: BoundSide) -> Option<f64> {
    let direction = Direction::for_side(side);

    let mut index = index;
    let mut side = side;
    for _ in 0..=levels.len() {
        if let Some(value) = levels.get(index)?.bound(side) {
            return Some(value);
        }
        index = direction.step(index)?;
        side = side.opposite();
    }
    None
}
