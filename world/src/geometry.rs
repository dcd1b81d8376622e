//! Path and grid geometry backing enemy motion and placement checks.

use trail_defence_core::{CellCoord, ConfigError, FieldConfig, Vec2};

/// Polyline enemies walk from the first point to the last.
#[derive(Clone, Debug)]
pub(crate) struct Path {
    points: Vec<Vec2>,
    lengths: Vec<f32>,
}

impl Path {
    /// Builds a path, rejecting fewer than two points or zero-length segments.
    pub(crate) fn new(points: Vec<Vec2>) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::PathTooShort(points.len()));
        }

        let mut lengths = Vec::with_capacity(points.len() - 1);
        for (index, pair) in points.windows(2).enumerate() {
            let length = pair[0].distance(pair[1]);
            if length <= f32::EPSILON || !length.is_finite() {
                return Err(ConfigError::DegenerateSegment(index));
            }
            lengths.push(length);
        }

        Ok(Self { points, lengths })
    }

    /// Index of the final point. Enemies at or past it have left the field.
    pub(crate) fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    pub(crate) fn start(&self) -> Vec2 {
        self.points[0]
    }

    pub(crate) fn end(&self) -> Vec2 {
        self.points[self.last_index()]
    }

    pub(crate) fn segment_length(&self, index: usize) -> f32 {
        self.lengths[index]
    }

    /// Position at `progress` along segment `index`.
    pub(crate) fn interpolate(&self, index: usize, progress: f32) -> Vec2 {
        if index >= self.last_index() {
            return self.end();
        }
        self.points[index].lerp(self.points[index + 1], progress)
    }

    /// Shortest distance from `point` to any segment of the path.
    pub(crate) fn distance_to(&self, point: Vec2) -> f32 {
        self.points
            .windows(2)
            .map(|pair| distance_to_segment(point, pair[0], pair[1]))
            .fold(f32::INFINITY, f32::min)
    }
}

fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let segment = end - start;
    let length_squared = segment.length_squared();
    if length_squared <= f32::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(segment) / length_squared).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}

/// Uniform cell grid over the playable rectangle.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Grid {
    cell_size: f32,
    width: f32,
    top: f32,
    bottom: f32,
    columns: u32,
    rows: u32,
}

impl Grid {
    pub(crate) fn new(field: &FieldConfig) -> Result<Self, ConfigError> {
        if !(field.cell_size.is_finite() && field.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(field.cell_size));
        }

        let grid = Self {
            cell_size: field.cell_size,
            width: field.width,
            top: field.playable_top,
            bottom: field.playable_bottom,
            columns: (field.width / field.cell_size).ceil().max(0.0) as u32,
            rows: (field.playable_bottom / field.cell_size).ceil().max(0.0) as u32,
        };

        if grid.cells().next().is_none() {
            return Err(ConfigError::EmptyPlayableArea);
        }
        Ok(grid)
    }

    pub(crate) fn center(&self, cell: CellCoord) -> Vec2 {
        cell.center(self.cell_size)
    }

    /// Reports whether the cell center lies inside the playable rectangle.
    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        let center = self.center(cell);
        center.x >= 0.0 && center.x < self.width && center.y >= self.top && center.y < self.bottom
    }

    /// Playable cells in row-major order.
    pub(crate) fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.columns).map(move |column| CellCoord::new(column, row)))
            .filter(move |cell| self.contains(*cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail_defence_core::MatchConfig;

    #[test]
    fn path_rejects_single_point() {
        let result = Path::new(vec![Vec2::new(0.0, 0.0)]);
        assert_eq!(result.err(), Some(ConfigError::PathTooShort(1)));
    }

    #[test]
    fn path_rejects_repeated_points() {
        let result = Path::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 0.0),
        ]);
        assert_eq!(result.err(), Some(ConfigError::DegenerateSegment(1)));
    }

    #[test]
    fn distance_uses_the_closest_segment() {
        let path = Path::new(MatchConfig::default().path).expect("valid path");
        assert!((path.distance_to(Vec2::new(60.0, 500.0)) - 40.0).abs() < 1e-3);
        assert!(path.distance_to(Vec2::new(300.0, 300.0)).abs() < 1e-3);
        assert!((path.distance_to(Vec2::new(-30.0, 460.0)) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn interpolation_walks_segments() {
        let path = Path::new(vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)]).expect("path");
        assert_eq!(path.interpolate(0, 0.25), Vec2::new(25.0, 0.0));
        assert_eq!(path.interpolate(1, 0.0), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn default_grid_skips_reserved_margins() {
        let grid = Grid::new(&MatchConfig::default().field).expect("grid");
        let cells: Vec<CellCoord> = grid.cells().collect();

        assert_eq!(cells.len(), 30 * 15);
        assert_eq!(cells.first(), Some(&CellCoord::new(0, 2)));
        assert_eq!(cells.last(), Some(&CellCoord::new(29, 16)));
        assert!(!grid.contains(CellCoord::new(0, 1)));
        assert!(!grid.contains(CellCoord::new(0, 17)));
        assert!(!grid.contains(CellCoord::new(30, 5)));
    }

    #[test]
    fn grid_rejects_non_positive_cells() {
        let mut field = MatchConfig::default().field;
        field.cell_size = 0.0;
        assert_eq!(Grid::new(&field).err(), Some(ConfigError::InvalidCellSize(0.0)));
    }

    #[test]
    fn grid_rejects_empty_playable_area() {
        let mut field = MatchConfig::default().field;
        field.playable_top = 300.0;
        field.playable_bottom = 300.0;
        assert_eq!(Grid::new(&field).err(), Some(ConfigError::EmptyPlayableArea));
    }
}
