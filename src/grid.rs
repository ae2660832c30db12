//! The wrap-around obstacle grid the rover drives on.

use crate::error::GridError;
use crate::rover::Heading;
use serde::Serialize;

/// A rectangular grid of cells, each either free or blocked by an obstacle.
///
/// The grid behaves like a crude sphere: leaving through the east or west edge
/// re-enters on the opposite side with the heading untouched, while leaving
/// through the top or bottom edge ("crossing a pole") re-enters on the opposite
/// side with the heading forced to [`Heading::North`] or [`Heading::South`].
///
/// Dimensions never change after construction. Obstacles may be added through
/// `&mut` access (see [`generate_obstacles`](crate::generate_obstacles)) before
/// any rover borrows the grid; rovers only ever hold `&Grid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: u32,
    height: u32,

    /// Row-major obstacle mask, `cells[y * width + x]`.
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an obstacle-free grid.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        })
    }

    /// Creates a grid from a pre-seeded layout indexed `rows[y][x]`.
    ///
    /// The layout must be exactly `height` rows of exactly `width` cells. Cells
    /// are `0` (free) or non-zero (obstacle); use [`from_rows`](Self::from_rows)
    /// for `bool` layouts.
    pub fn from_layout<R, C>(width: u32, height: u32, rows: R) -> Result<Self, GridError>
    where
        R: AsRef<[C]>,
        C: AsRef<[u8]>,
    {
        check_dimensions(width, height)?;
        let rows = rows.as_ref();

        let mismatch = |columns: usize| GridError::DimensionMismatch {
            width,
            height,
            rows: rows.len(),
            columns,
        };

        if rows.len() != height as usize {
            return Err(mismatch(rows.first().map_or(0, |r| r.as_ref().len())));
        }

        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width as usize {
                return Err(mismatch(row.len()));
            }
            cells.extend(row.iter().map(|&cell| cell != 0));
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Creates a grid whose dimensions are inferred from a rectangular layout.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(GridError::RaggedLayout {
                row,
                len: r.len(),
                expected,
            });
        }

        let width = u32::try_from(expected).map_err(|_| GridError::DimensionTooLarge(u32::MAX))?;
        let height =
            u32::try_from(rows.len()).map_err(|_| GridError::DimensionTooLarge(u32::MAX))?;
        check_dimensions(width, height)?;

        Ok(Self {
            width,
            height,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if `(x, y)` lies inside the grid.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Returns whether the cell at `(x, y)` holds an obstacle.
    ///
    /// The coordinates must be in bounds. Rovers only ask about cells that
    /// have already been through [`wrap`](Self::wrap).
    pub fn is_obstacle(&self, x: u32, y: u32) -> bool {
        debug_assert!(
            self.contains(x, y),
            "is_obstacle({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.cells[self.index(x, y)]
    }

    /// Marks `(x, y)` as an obstacle.
    pub fn set_obstacle(&mut self, x: u32, y: u32) -> Result<(), GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.cells[idx] = true;
        Ok(())
    }

    /// Number of cells flagged as obstacles.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterates over the coordinates of every obstacle, row by row.
    pub fn obstacles(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(|(i, _)| self.coords(i))
    }

    /// Folds a tentative position back onto the grid.
    ///
    /// Vertical crossings take priority for the heading: stepping above row 0
    /// lands on the last row facing North, stepping below the last row lands
    /// on row 0 facing South. Horizontal crossings move to the opposite column
    /// and leave the heading alone. The two axes are handled independently.
    pub fn wrap(&self, x: i32, y: i32, heading: Heading) -> (u32, u32, Heading) {
        // Dimensions are checked against i32::MAX at construction.
        let (w, h) = (self.width as i32, self.height as i32);

        let (y, heading) = if y < 0 {
            (h - 1, Heading::North)
        } else if y >= h {
            (0, Heading::South)
        } else {
            (y, heading)
        };

        let x = if x < 0 {
            w - 1
        } else if x >= w {
            0
        } else {
            x
        };

        (x as u32, y as u32, heading)
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub(crate) fn coords(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::ZeroDimension { width, height });
    }
    for dim in [width, height] {
        if dim > i32::MAX as u32 {
            return Err(GridError::DimensionTooLarge(dim));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal(n: u32) -> Grid {
        let rows: Vec<Vec<u8>> = (0..n)
            .map(|y| (0..n).map(|x| u8::from(x == y)).collect())
            .collect();
        Grid::from_layout(n, n, rows).unwrap()
    }

    #[test]
    fn layout_is_indexed_row_then_column() {
        let grid = Grid::from_layout(3, 2, [[0u8, 0, 1], [1, 0, 0]]).unwrap();
        assert!(grid.is_obstacle(2, 0));
        assert!(grid.is_obstacle(0, 1));
        assert!(!grid.is_obstacle(0, 0));
        assert_eq!(grid.obstacle_count(), 2);
        assert_eq!(grid.obstacles().collect::<Vec<_>>(), vec![(2, 0), (0, 1)]);
    }

    #[test]
    fn layout_with_wrong_row_count_is_rejected() {
        let err = Grid::from_layout(2, 3, [[0u8, 0], [0, 0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::DimensionMismatch {
                width: 2,
                height: 3,
                rows: 2,
                columns: 2
            }
        );
    }

    #[test]
    fn layout_with_short_row_is_rejected() {
        let rows = vec![vec![0u8, 0, 0], vec![0, 0]];
        assert!(matches!(
            Grid::from_layout(3, 2, rows),
            Err(GridError::DimensionMismatch { columns: 2, .. })
        ));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(GridError::ZeroDimension { .. })
        ));
        assert!(matches!(
            Grid::from_rows(&[]),
            Err(GridError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![false, true], vec![true]];
        assert_eq!(
            Grid::from_rows(&rows).unwrap_err(),
            GridError::RaggedLayout {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn from_rows_infers_dimensions() {
        let grid = Grid::from_rows(&[vec![false, true, false], vec![false; 3]]).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert!(grid.is_obstacle(1, 0));
    }

    #[test]
    fn set_obstacle_checks_bounds() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_obstacle(3, 3).unwrap();
        assert!(grid.is_obstacle(3, 3));
        assert!(matches!(
            grid.set_obstacle(4, 0),
            Err(GridError::OutOfBounds { x: 4, y: 0, .. })
        ));
    }

    #[test]
    fn north_pole_forces_north() {
        let grid = diagonal(10);
        for heading in Heading::ALL {
            assert_eq!(grid.wrap(2, -1, heading), (2, 9, Heading::North));
        }
    }

    #[test]
    fn south_pole_forces_south() {
        let grid = diagonal(10);
        for heading in Heading::ALL {
            assert_eq!(grid.wrap(2, 10, heading), (2, 0, Heading::South));
        }
    }

    #[test]
    fn horizontal_wrap_keeps_heading() {
        let grid = diagonal(10);
        for heading in Heading::ALL {
            assert_eq!(grid.wrap(-1, 4, heading), (9, 4, heading));
            assert_eq!(grid.wrap(10, 4, heading), (0, 4, heading));
        }
    }

    #[test]
    fn corner_crossing_wraps_both_axes() {
        let grid = Grid::new(7, 5).unwrap();
        assert_eq!(grid.wrap(-1, -1, Heading::West), (6, 4, Heading::North));
        assert_eq!(grid.wrap(7, 5, Heading::East), (0, 0, Heading::South));
        assert_eq!(grid.wrap(-1, 5, Heading::North), (6, 0, Heading::South));
        assert_eq!(grid.wrap(7, -1, Heading::South), (0, 4, Heading::North));
    }

    #[test]
    fn in_bounds_positions_pass_through() {
        let grid = Grid::new(7, 5).unwrap();
        assert_eq!(grid.wrap(3, 2, Heading::East), (3, 2, Heading::East));
    }
}
