//! Waypoint path followed by every enemy.
//!
//! The path is built once from configuration and never changes during a game.

use rampart_core::config::ConfigError;
use rampart_core::types::{grid_to_world, GridCell, Position};

/// Ordered waypoints in world space. Always holds at least two points and no
/// two consecutive points coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Position>,
}

impl Path {
    /// Build a path from world-space waypoints.
    pub fn new(waypoints: Vec<Position>) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::PathTooShort {
                len: waypoints.len(),
            });
        }
        for (index, pair) in waypoints.windows(2).enumerate() {
            if pair[0] == pair[1] {
                return Err(ConfigError::CoincidentWaypoints { index: index + 1 });
            }
        }
        Ok(Self { waypoints })
    }

    /// Build a path through the centers of the given grid cells.
    pub fn from_cells(cells: &[GridCell]) -> Result<Self, ConfigError> {
        Self::new(cells.iter().copied().map(grid_to_world).collect())
    }

    /// Waypoint at `index`, or `None` once the path is exhausted.
    pub fn waypoint(&self, index: usize) -> Option<Position> {
        self.waypoints.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Spawn point.
    pub fn start(&self) -> Position {
        self.waypoints[0]
    }

    /// Exit point. Enemies that walk past it leak into the base.
    pub fn end(&self) -> Position {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Length of the segment from waypoint `index` to waypoint `index + 1`.
    pub fn segment_length(&self, index: usize) -> Option<f64> {
        let from = self.waypoint(index)?;
        let to = self.waypoint(index + 1)?;
        Some(from.distance(to))
    }

    /// Sum of every segment length.
    pub fn total_length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::config::default_path_cells;
    use rampart_core::constants::CELL_SIZE;

    #[test]
    fn test_stock_path_geometry() {
        let path = Path::from_cells(&default_path_cells()).unwrap();
        assert_eq!(path.len(), 32);
        assert_eq!(path.start(), Position::new(48.0, 48.0));
        assert_eq!(path.end(), Position::new(336.0, 368.0));
        assert_eq!(path.segment_length(0), Some(CELL_SIZE));
        assert!((path.total_length() - 31.0 * CELL_SIZE).abs() < 1e-9);
    }

    #[test]
    fn test_waypoint_past_end_is_none() {
        let path = Path::new(vec![Position::ZERO, Position::new(10.0, 0.0)]).unwrap();
        assert!(path.waypoint(1).is_some());
        assert_eq!(path.waypoint(2), None);
        assert_eq!(path.waypoint(usize::MAX), None);
        assert_eq!(path.segment_length(1), None);
    }

    #[test]
    fn test_rejects_degenerate_paths() {
        assert!(matches!(
            Path::new(vec![Position::ZERO]),
            Err(ConfigError::PathTooShort { len: 1 })
        ));
        assert!(matches!(
            Path::new(vec![Position::ZERO, Position::ZERO]),
            Err(ConfigError::CoincidentWaypoints { index: 1 })
        ));
    }
}
