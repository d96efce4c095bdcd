//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic attached, making them usable
//! in any context (core engine, renderers, replay tooling, persistence).
//!
//! # Grid Dimensions
//!
//! The default playfield is an 8x8 grid:
//!
//! - **Width**: 8 columns (x indexed 0-7, left to right)
//! - **Height**: 8 rows (y indexed 0-7, bottom to top)
//! - **Palette**: 6 tile colors
//!
//! Note that `+y` points *up*: row 0 is the bottom edge and a swipe with a
//! positive y delta is [`SwipeDirection::Up`].
//!
//! # Zones
//!
//! Every coordinate belongs to a zone derived from its distance to the
//! nearest border:
//!
//! | Distance | Zone | Score multiplier | Pressure multiplier |
//! |----------|------|------------------|---------------------|
//! | 0 | Edge | 1.0 | 0.5 |
//! | 1 | Transition | 1.5 | 1.0 |
//! | 2+ | Center | 2.0 | 2.0 |
//!
//! # Match Size Multipliers
//!
//! | Run length | Multiplier |
//! |------------|------------|
//! | 3 | 1.0 |
//! | 4 | 1.5 |
//! | 5 | 2.0 |
//! | 6+ | 2.5 |
//!
//! # Examples
//!
//! ```
//! use flow_crush_types::{FlowSource, GridPos, SwipeDirection, TileColor};
//!
//! // Parse a color (case-insensitive)
//! assert_eq!(TileColor::from_str("Blue"), Some(TileColor::Blue));
//!
//! // Selecting a tile and then its right-hand neighbour is a swipe to the right,
//! // which makes new tiles flow in from the left edge.
//! let dir = SwipeDirection::between(GridPos::new(2, 3), GridPos::new(3, 3));
//! assert_eq!(dir, SwipeDirection::Right);
//! assert_eq!(dir.flow_source(), FlowSource::Left);
//! ```

use serde::{Deserialize, Serialize};

/// Default grid width in cells (8 columns)
pub const DEFAULT_GRID_WIDTH: usize = 8;

/// Default grid height in cells (8 rows)
pub const DEFAULT_GRID_HEIGHT: usize = 8;

/// Largest accepted grid dimension on either axis
pub const MAX_GRID_DIMENSION: usize = 64;

/// Smallest run length that may be configured as a match
pub const MIN_MATCH_SIZE_FLOOR: usize = 3;

/// Default minimum run length
pub const DEFAULT_MIN_MATCH_SIZE: usize = 3;

/// Base points awarded per tile of a match
pub const DEFAULT_BASE_SCORE_PER_MATCH: u32 = 100;

/// Cap on the combo counter used for the combo bonus
pub const DEFAULT_MAX_COMBO_BONUS: u32 = 5;

/// Upper bound on scan/remove/refill passes for a single resolve
///
/// Only reachable with a degenerate color source (for example one that
/// always yields the same color).
pub const MAX_CASCADE_PASSES: u32 = 256;

/// Number of colors in the tile palette
pub const PALETTE_SIZE: usize = 6;

/// Score multipliers indexed by [`ZoneType::index`]
pub const ZONE_SCORE_MULTIPLIERS: [f32; 3] = [1.0, 1.5, 2.0];

/// Pressure multipliers indexed by [`ZoneType::index`]
pub const ZONE_PRESSURE_MULTIPLIERS: [f32; 3] = [0.5, 1.0, 2.0];

/// Size multipliers for runs of 3, 4, 5 and 6+ tiles
pub const SIZE_MULTIPLIERS: [f32; 4] = [1.0, 1.5, 2.0, 2.5];

/// Pressure added per matched tile before zone and curve scaling
pub const DEFAULT_PRESSURE_STRENGTH: f32 = 2.0;

/// Fixed pressure simulation step in seconds
pub const DEFAULT_PRESSURE_UPDATE_SECS: f32 = 0.1;

/// Ceiling for both the global meter and any single coordinate
pub const DEFAULT_MAX_PRESSURE: f32 = 10.0;

/// Radius (in cells) over which a pressure point influences its neighbours
pub const DEFAULT_INFLUENCE_RADIUS: f32 = 2.0;

/// Local pressure below this value is treated as gone
pub const PRESSURE_FLOOR: f32 = 0.1;

/// The six tile colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl TileColor {
    /// Every palette entry, in declaration order
    pub const ALL: [TileColor; PALETTE_SIZE] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Yellow,
        TileColor::Purple,
        TileColor::Orange,
    ];

    /// Palette index (0-5)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Palette entry for an index, wrapping past the end
    ///
    /// ```
    /// use flow_crush_types::TileColor;
    ///
    /// assert_eq!(TileColor::from_index(1), TileColor::Blue);
    /// assert_eq!(TileColor::from_index(7), TileColor::Blue);
    /// ```
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % PALETTE_SIZE]
    }

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" | "r" => Some(TileColor::Red),
            "blue" | "b" => Some(TileColor::Blue),
            "green" | "g" => Some(TileColor::Green),
            "yellow" | "y" => Some(TileColor::Yellow),
            "purple" | "p" => Some(TileColor::Purple),
            "orange" | "o" => Some(TileColor::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Blue => "blue",
            TileColor::Green => "green",
            TileColor::Yellow => "yellow",
            TileColor::Purple => "purple",
            TileColor::Orange => "orange",
        }
    }
}

/// Region of the grid a coordinate falls in
///
/// Derived from the coordinate and the grid dimensions only; never stored
/// on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    /// Outermost ring (distance 0 from the border)
    Edge,
    /// Second ring (distance 1)
    Transition,
    /// Everything at distance 2 or more
    Center,
}

impl ZoneType {
    pub const ALL: [ZoneType; 3] = [ZoneType::Edge, ZoneType::Transition, ZoneType::Center];

    /// Stable index used for per-zone tables
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Edge => "edge",
            ZoneType::Transition => "transition",
            ZoneType::Center => "center",
        }
    }
}

/// Edge of the grid that new tiles enter from during a refill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowSource {
    /// Tiles enter at the top row and settle toward the bottom
    Top,
    /// Tiles enter at the bottom row and settle toward the top
    Bottom,
    /// Tiles enter at the left column and settle toward the right
    Left,
    /// Tiles enter at the right column and settle toward the left
    Right,
}

impl FlowSource {
    /// True when refills move tiles along columns
    pub fn is_vertical(self) -> bool {
        matches!(self, FlowSource::Top | FlowSource::Bottom)
    }
}

/// Player swipe direction
///
/// The swipe decides where the refill comes from: tiles flow *in the
/// direction of the swipe*, so they enter from the opposite edge.
///
/// | Swipe | Flow source |
/// |-------|-------------|
/// | Right | Left edge |
/// | Left | Right edge |
/// | Down | Top edge |
/// | Up | Bottom edge |
/// | None | Top edge (plain gravity) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    /// Direction of a two-tile selection, from the first tile to the second
    ///
    /// The dominant axis wins; ties (including identical positions with a
    /// non-zero vertical part) resolve to the vertical axis.
    ///
    /// ```
    /// use flow_crush_types::{GridPos, SwipeDirection};
    ///
    /// let a = GridPos::new(4, 4);
    /// assert_eq!(SwipeDirection::between(a, GridPos::new(4, 5)), SwipeDirection::Up);
    /// assert_eq!(SwipeDirection::between(a, GridPos::new(3, 4)), SwipeDirection::Left);
    /// assert_eq!(SwipeDirection::between(a, a), SwipeDirection::None);
    /// ```
    pub fn between(from: GridPos, to: GridPos) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx == 0 && dy == 0 {
            return SwipeDirection::None;
        }
        if dx.abs() > dy.abs() {
            if dx > 0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if dy > 0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        }
    }

    /// Classify a swipe vector by angle in 90-degree sectors centred on the axes
    ///
    /// ```
    /// use flow_crush_types::SwipeDirection;
    ///
    /// assert_eq!(SwipeDirection::from_vector(10.0, 1.0), SwipeDirection::Right);
    /// assert_eq!(SwipeDirection::from_vector(-1.0, 10.0), SwipeDirection::Up);
    /// assert_eq!(SwipeDirection::from_vector(0.0, 0.0), SwipeDirection::None);
    /// ```
    pub fn from_vector(dx: f32, dy: f32) -> Self {
        if dx == 0.0 && dy == 0.0 {
            return SwipeDirection::None;
        }
        let mut angle = dy.atan2(dx).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        if (45.0..135.0).contains(&angle) {
            SwipeDirection::Up
        } else if (135.0..225.0).contains(&angle) {
            SwipeDirection::Left
        } else if (225.0..315.0).contains(&angle) {
            SwipeDirection::Down
        } else {
            SwipeDirection::Right
        }
    }

    /// Edge new tiles enter from after a swipe in this direction
    pub fn flow_source(self) -> FlowSource {
        match self {
            SwipeDirection::Right => FlowSource::Left,
            SwipeDirection::Left => FlowSource::Right,
            SwipeDirection::Up => FlowSource::Bottom,
            SwipeDirection::Down | SwipeDirection::None => FlowSource::Top,
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(SwipeDirection::None),
            "up" | "u" => Some(SwipeDirection::Up),
            "down" | "d" => Some(SwipeDirection::Down),
            "left" | "l" => Some(SwipeDirection::Left),
            "right" | "r" => Some(SwipeDirection::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::None => "none",
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }
}

/// A grid coordinate
///
/// Signed so that callers can express (and have rejected) out-of-bounds
/// positions such as `(-1, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(self, other: GridPos) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// Coordinate shifted by `(dx, dy)`
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A cell on the grid
///
/// `matched` is transient: it is raised while a scan pass is being resolved
/// and the cell is emptied before the pass ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Occupied { color: TileColor, matched: bool },
}

impl Cell {
    /// An occupied, unmatched cell
    pub fn tile(color: TileColor) -> Self {
        Cell::Occupied {
            color,
            matched: false,
        }
    }

    /// Color of the tile, if any
    pub fn color(&self) -> Option<TileColor> {
        match self {
            Cell::Empty => None,
            Cell::Occupied { color, .. } => Some(*color),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Cell::Occupied { matched: true, .. })
    }
}
