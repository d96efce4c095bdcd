//! Zone classification
//!
//! A zone is a function of the coordinate and the grid size only: the
//! distance to the nearest border decides it.

use crate::types::{GridPos, ZoneType};

/// Classify `(x, y)` on a `width` x `height` grid
///
/// `d = min(x, width - 1 - x, y, height - 1 - y)`; 0 is Edge, 1 is
/// Transition, anything larger is Center. Out-of-bounds coordinates
/// classify as Edge.
///
/// ```
/// use flow_crush_core::zone::classify;
/// use flow_crush_core::types::ZoneType;
///
/// assert_eq!(classify(0, 4, 8, 8), ZoneType::Edge);
/// assert_eq!(classify(1, 4, 8, 8), ZoneType::Transition);
/// assert_eq!(classify(3, 4, 8, 8), ZoneType::Center);
/// ```
pub fn classify(x: i32, y: i32, width: usize, height: usize) -> ZoneType {
    let w = width as i32;
    let h = height as i32;
    let d = x.min(w - 1 - x).min(y).min(h - 1 - y);
    match d {
        i32::MIN..=0 => ZoneType::Edge,
        1 => ZoneType::Transition,
        _ => ZoneType::Center,
    }
}

/// [`classify`] for a [`GridPos`]
pub fn zone_of(pos: GridPos, width: usize, height: usize) -> ZoneType {
    classify(pos.x, pos.y, width, height)
}

/// Number of coordinates in each zone, indexed by [`ZoneType::index`]
pub fn zone_counts(width: usize, height: usize) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            counts[classify(x, y, width, height).index()] += 1;
        }
    }
    counts
}
