//! Coordinate placement for the tree and radial layout modes
//!
//! Position state flows top-down through [`PositionContext`] values: a parent's
//! context places the parent and yields one context per child. No state is
//! shared between siblings, so any subtree can be laid out on its own.

use super::LayoutMode;
use serde::{Deserialize, Serialize};

/// Horizontal distance between siblings in tree mode
pub const TREE_SIBLING_SPACING: f64 = 180.0;
/// Vertical distance between depth levels in tree mode
pub const TREE_LEVEL_SPACING: f64 = 150.0;
/// Radius increment per depth level in radial mode
pub const RADIAL_RING_SPACING: f64 = 250.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Span of angles, in degrees, a radial node and its descendants occupy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularInterval {
    pub start: f64,
    pub end: f64,
}

impl AngularInterval {
    pub const FULL: AngularInterval = AngularInterval {
        start: 0.0,
        end: 360.0,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Splits the interval into `count` equal, contiguous parts in order
    pub fn split(&self, count: usize) -> Vec<AngularInterval> {
        if count == 0 {
            return Vec::new();
        }
        let step = self.width() / count as f64;
        (0..count)
            .map(|i| {
                let start = self.start + i as f64 * step;
                AngularInterval::new(start, start + step)
            })
            .collect()
    }
}

/// Placement state inherited from a node's parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionContext {
    /// Tree mode: the coordinate assigned by the parent
    Tree { at: Position },
    /// Radial mode: the angular interval assigned by the parent
    Radial { interval: AngularInterval },
}

impl PositionContext {
    pub fn root(mode: LayoutMode) -> Self {
        match mode {
            LayoutMode::Tree => PositionContext::Tree {
                at: Position::default(),
            },
            LayoutMode::Radial => PositionContext::Radial {
                interval: AngularInterval::FULL,
            },
        }
    }

    /// Coordinate of a node at `depth` carrying this context
    pub fn place(&self, depth: usize) -> Position {
        match self {
            PositionContext::Tree { at } => *at,
            PositionContext::Radial { interval } => {
                if depth == 0 {
                    return Position::default();
                }
                let radius = depth as f64 * RADIAL_RING_SPACING;
                let radians = interval.midpoint().to_radians();
                Position::new(radians.cos() * radius, radians.sin() * radius)
            }
        }
    }

    /// Contexts for `count` children of a node placed at `position`
    ///
    /// Tree mode centers the children as a group under the parent with fixed
    /// spacing; subtree widths are not taken into account, so wide cousins can
    /// overlap. Radial mode divides the parent's interval evenly.
    pub fn children(&self, position: Position, count: usize) -> Vec<PositionContext> {
        match self {
            PositionContext::Tree { .. } => {
                let center = (count as f64 - 1.0) / 2.0;
                (0..count)
                    .map(|i| PositionContext::Tree {
                        at: Position::new(
                            position.x + (i as f64 - center) * TREE_SIBLING_SPACING,
                            position.y + TREE_LEVEL_SPACING,
                        ),
                    })
                    .collect()
            }
            PositionContext::Radial { interval } => interval
                .split(count)
                .into_iter()
                .map(|interval| PositionContext::Radial { interval })
                .collect(),
        }
    }
}
