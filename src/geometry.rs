use crate::serde::Serialize;

/// Extra steps a line walk may take beyond the image diagonal.
const STEP_MARGIN: usize = 10;

/// A pin location in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "({:>8.2}, {:>8.2})", self.x, self.y)
    }
}

/// A grid cell. Line walks may produce cells outside the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "({:>6}, {:>6})", self.x, self.y)
    }
}

impl std::convert::From<Point> for Cell {
    fn from(point: Point) -> Self {
        Self::new(point.x.round() as i32, point.y.round() as i32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line(Cell, Cell);

impl Line {
    pub fn new(a: Cell, b: Cell) -> Self {
        Self(a, b)
    }

    /// Walks the cells from the first endpoint to the second.
    ///
    /// Ties on the half-cell mark are always settled relative to the smaller
    /// endpoint, so both directions visit the same cells. The walk stops after
    /// at most `ceil(sqrt(width² + height²)) + 10` cells.
    pub fn iter(&self, width: u32, height: u32) -> LineIter {
        let Self(start, end) = *self;
        let dx = (end.x as i64 - start.x as i64).abs();
        let dy = (end.y as i64 - start.y as i64).abs();
        let diagonal = ((width as f64).powi(2) + (height as f64).powi(2)).sqrt().ceil();
        let steps = i64::max(dx, dy) as usize + 1;

        LineIter {
            current: start,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            dx,
            dy,
            err: 0,
            advance_on_tie: start <= end,
            remaining: usize::min(steps, diagonal as usize + STEP_MARGIN),
        }
    }
}

impl<T: Into<Cell>> std::convert::From<(T, T)> for Line {
    fn from((a, b): (T, T)) -> Self {
        Self::new(a.into(), b.into())
    }
}

/// Incremental Bresenham walk. `err` holds twice the distance the minor axis
/// lags behind the ideal line, in units of the major-axis delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineIter {
    current: Cell,
    sx: i32,
    sy: i32,
    dx: i64,
    dy: i64,
    err: i64,
    advance_on_tie: bool,
    remaining: usize,
}

impl LineIter {
    fn behind(&self, major: i64) -> bool {
        if self.advance_on_tie {
            self.err >= major
        } else {
            self.err > major
        }
    }
}

impl Iterator for LineIter {
    type Item = Cell;
    fn next(&mut self) -> std::option::Option<<Self as std::iter::Iterator>::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let cell = self.current;

        if self.dx >= self.dy {
            self.current.x += self.sx;
            self.err += 2 * self.dy;
            if self.behind(self.dx) {
                self.current.y += self.sy;
                self.err -= 2 * self.dx;
            }
        } else {
            self.current.y += self.sy;
            self.err += 2 * self.dx;
            if self.behind(self.dy) {
                self.current.x += self.sx;
                self.err -= 2 * self.dy;
            }
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LineIter {}
