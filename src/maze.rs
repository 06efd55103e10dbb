//! Maze grid data and generation module.
//!
//! This module contains the [`Maze`] grid of wall and path tiles together with the coordinate
//! types used to address it, the randomized depth-first carving that produces new mazes, and the
//! flood fill used to check connectivity.

use std::collections::{HashSet, VecDeque};

use color_eyre::eyre::{bail, ensure, OptionExt as _, Result};
use rand::{seq::SliceRandom as _, Rng};

/// Smallest accepted side length for a generated maze.
///
/// Five is the smallest odd size that leaves room for a carved interior between the start cell at
/// `(1, 1)` and the exit cell at `(rows - 2, cols - 2)`.
pub const MIN_SIDE: usize = 5;

/// Largest accepted side length for a generated maze.
///
/// Keeps the tile count well inside memory and every side inside terminal coordinates.
pub const MAX_SIDE: usize = 1001;

/// State of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    /// Impassable cell.
    Wall,
    /// Walkable cell.
    Path,
}

/// Cardinal movement direction.
///
/// This enumeration is shared by the carving walk, which jumps two cells at a time, and by the
/// player movement, which steps a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Away from row zero.
    Down,
    /// Towards column zero.
    Left,
    /// Away from column zero.
    Right,
}

impl Direction {
    /// Every direction, in a fixed order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(row, column)` offset of a single step in this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Grid coordinate of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring position one step away in `direction`.
    ///
    /// Returns [`None`] when the step would leave the non-negative quadrant. Upper bounds are the
    /// concern of the [`Maze`] being addressed.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        let Some(row) = self.row.checked_add_signed(d_row) else {
            return None;
        };
        let Some(col) = self.col.checked_add_signed(d_col) else {
            return None;
        };

        Some(Self { row, col })
    }

    /// Returns the Chebyshev distance between two positions.
    ///
    /// This is the larger of the row and column deltas, so every cell of the square ring around a
    /// position sits at distance one.
    pub const fn chebyshev(self, other: Self) -> usize {
        let rows = self.row.abs_diff(other.row);
        let cols = self.col.abs_diff(other.col);
        if rows > cols {
            rows
        } else {
            cols
        }
    }
}

/// Rectangular grid of wall and path tiles.
///
/// The start cell is always `(1, 1)` and the exit cell is always `(rows - 2, cols - 2)`. Both are
/// guaranteed to be path tiles for every maze this type hands out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Number of rows in the grid.
    rows: usize,
    /// Number of columns in the grid.
    cols: usize,
    /// Row-major tile storage of length `rows * cols`.
    tiles: Vec<Tile>,
}

/// Pending work for one cell of the carving walk.
///
/// The directions are shuffled once when the walk first enters the cell and consumed from the
/// back, so popping a frame off the stack is the backtracking step.
struct CarveFrame {
    /// Cell this frame carves from.
    cell: Position,
    /// Directions not yet tried from [`cell`](CarveFrame::cell).
    remaining: Vec<Direction>,
}

impl CarveFrame {
    /// Enters a cell by shuffling its four jump directions.
    fn enter<R: Rng + ?Sized>(cell: Position, rng: &mut R) -> Self {
        let mut remaining = Direction::ALL.to_vec();
        remaining.shuffle(rng);

        Self { cell, remaining }
    }
}

/// Checks that both sides of a maze are odd and between [`MIN_SIDE`] and [`MAX_SIDE`].
///
/// # Errors
///
/// This function returns an error naming the first offending dimension.
pub fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    for (name, side) in [("rows", rows), ("cols", cols)] {
        ensure!(
            side >= MIN_SIDE,
            "maze {name} must be at least {MIN_SIDE}, got {side}"
        );
        ensure!(
            side <= MAX_SIDE,
            "maze {name} must be at most {MAX_SIDE}, got {side}"
        );
        ensure!(side % 2 == 1, "maze {name} must be odd, got {side}");
    }

    Ok(())
}

impl Maze {
    /// Generates a random maze by depth-first carving from the start cell.
    ///
    /// The grid starts out as solid wall. The walk marks `(1, 1)` as path and, from every cell it
    /// enters, tries the four two-step jumps in a shuffled order. A jump that lands on a wall cell
    /// strictly inside the border carves both the landing cell and the cell in between, then
    /// continues from the landing cell. The walk uses an explicit stack, so grid size is bounded
    /// by memory rather than by call depth. The exit cell is forced to path once the walk ends.
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is even or outside [`MIN_SIDE`] to
    /// [`MAX_SIDE`].
    pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        check_dimensions(rows, cols)?;
        let area = rows
            .checked_mul(cols)
            .ok_or_eyre("maze area overflows the address space")?;

        let mut maze = Self {
            rows,
            cols,
            tiles: vec![Tile::Wall; area],
        };

        let start = maze.start();
        maze.set(start, Tile::Path);
        let mut stack = vec![CarveFrame::enter(start, rng)];

        while let Some(frame) = stack.last_mut() {
            let cell = frame.cell;
            let Some(direction) = frame.remaining.pop() else {
                let _ = stack.pop();
                continue;
            };

            let Some(between) = cell.step(direction) else {
                continue;
            };
            let Some(target) = between.step(direction) else {
                continue;
            };
            if !maze.is_interior(target) || maze.tile(target) != Some(Tile::Wall) {
                continue;
            }

            maze.set(between, Tile::Path);
            maze.set(target, Tile::Path);
            stack.push(CarveFrame::enter(target, rng));
        }

        let exit = maze.exit();
        maze.set(exit, Tile::Path);

        Ok(maze)
    }

    /// Builds a maze from a textual layout where `#` is wall and `.` is path.
    ///
    /// This is the fixed-layout counterpart of [`Maze::generate`]: rows must share one width, and
    /// the start and exit cells must be path.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The layout is smaller than [`MIN_SIDE`] in either direction
    /// - The rows have different widths
    /// - A character other than `#` or `.` appears
    /// - The start or exit cell is a wall
    pub fn from_layout(layout: &[&str]) -> Result<Self> {
        let rows = layout.len();
        let cols = layout
            .first()
            .ok_or_eyre("maze layout has no rows")?
            .len();
        ensure!(
            rows >= MIN_SIDE && cols >= MIN_SIDE,
            "maze layout must be at least {MIN_SIDE}x{MIN_SIDE}, got {rows}x{cols}"
        );

        let mut tiles = Vec::with_capacity(rows * cols);
        for (row, line) in layout.iter().enumerate() {
            ensure!(
                line.len() == cols,
                "maze layout row {row} has width {}, expected {cols}",
                line.len()
            );
            for byte in line.bytes() {
                tiles.push(match byte {
                    b'#' => Tile::Wall,
                    b'.' => Tile::Path,
                    other => bail!(
                        "invalid maze layout character {:?} in row {row}",
                        char::from(other)
                    ),
                });
            }
        }

        let maze = Self { rows, cols, tiles };
        ensure!(maze.is_path(maze.start()), "maze start cell is a wall");
        ensure!(maze.is_path(maze.exit()), "maze exit cell is a wall");

        Ok(maze)
    }

    /// Returns the number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the fixed start cell `(1, 1)`.
    #[expect(
        clippy::unused_self,
        reason = "Read through the maze like its exit so callers never hard-code the start."
    )]
    pub const fn start(&self) -> Position {
        Position::new(1, 1)
    }

    /// Returns the fixed exit cell `(rows - 2, cols - 2)`.
    pub const fn exit(&self) -> Position {
        Position::new(self.rows - 2, self.cols - 2)
    }

    /// Returns the tile at `position`, or [`None`] when it lies outside the grid.
    pub fn tile(&self, position: Position) -> Option<Tile> {
        self.index(position)
            .and_then(|index| self.tiles.get(index))
            .copied()
    }

    /// Returns whether `position` is inside the grid and walkable.
    pub fn is_path(&self, position: Position) -> bool {
        self.tile(position) == Some(Tile::Path)
    }

    /// Returns whether `position` lies strictly inside the outer border.
    pub const fn is_interior(&self, position: Position) -> bool {
        position.row > 0
            && position.col > 0
            && position.row < self.rows - 1
            && position.col < self.cols - 1
    }

    /// Iterates over every position strictly inside the outer border, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (1..self.rows - 1).flat_map(move |row| (1..cols - 1).map(move |col| Position::new(row, col)))
    }

    /// Collects every path cell reachable from `origin` through orthogonal steps.
    ///
    /// The result is empty when `origin` is not a path cell.
    pub fn reachable_from(&self, origin: Position) -> HashSet<Position> {
        let mut seen = HashSet::new();
        if !self.is_path(origin) {
            return seen;
        }

        let mut queue = VecDeque::from([origin]);
        let _ = seen.insert(origin);
        while let Some(cell) = queue.pop_front() {
            for direction in Direction::ALL {
                let Some(next) = cell.step(direction) else {
                    continue;
                };
                if self.is_path(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen
    }

    /// Maps a position to its row-major storage index.
    const fn index(&self, position: Position) -> Option<usize> {
        if position.row < self.rows && position.col < self.cols {
            Some(position.row * self.cols + position.col)
        } else {
            None
        }
    }

    /// Overwrites the tile at `position`; positions outside the grid are ignored.
    fn set(&mut self, position: Position, tile: Tile) {
        if let Some(slot) = self
            .index(position)
            .and_then(|index| self.tiles.get_mut(index))
        {
            *slot = tile;
        }
    }
}
