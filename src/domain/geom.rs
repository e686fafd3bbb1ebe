/// Beam geometry: cardinal directions and points in board space.
///
/// Board space uses abstract cell units: every cell is 1.0 × 1.0,
/// `x` grows with columns, `y` grows with rows. The center of cell
/// `(row, col)` is `(col + 0.5, row + 0.5)`.

/// One of the four cardinal beam directions, as a row/column delta pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Row delta when stepping one cell in this direction.
    pub fn dr(self) -> i32 {
        match self {
            Dir::Up => -1,
            Dir::Down => 1,
            Dir::Left | Dir::Right => 0,
        }
    }

    /// Column delta when stepping one cell in this direction.
    pub fn dc(self) -> i32 {
        match self {
            Dir::Left => -1,
            Dir::Right => 1,
            Dir::Up | Dir::Down => 0,
        }
    }

    /// Reflection off a `/` mirror: `(dr, dc) → (-dc, -dr)`.
    pub fn reflect_slash(self) -> Dir {
        match self {
            Dir::Right => Dir::Up,
            Dir::Up => Dir::Right,
            Dir::Left => Dir::Down,
            Dir::Down => Dir::Left,
        }
    }

    /// Reflection off a `\` mirror: `(dr, dc) → (dc, dr)`.
    pub fn reflect_backslash(self) -> Dir {
        match self {
            Dir::Right => Dir::Down,
            Dir::Down => Dir::Right,
            Dir::Left => Dir::Up,
            Dir::Up => Dir::Left,
        }
    }
}

/// A point in board space (cell units).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Center of cell `(row, col)`. Rows/cols may be off-board (negative);
    /// the tracer relies on that for origins just outside the grid.
    pub fn center(row: i32, col: i32) -> Self {
        Point {
            x: col as f32 + 0.5,
            y: row as f32 + 0.5,
        }
    }

    pub fn dist(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_reflects_all_four() {
        assert_eq!(Dir::Right.reflect_slash(), Dir::Up);
        assert_eq!(Dir::Up.reflect_slash(), Dir::Right);
        assert_eq!(Dir::Left.reflect_slash(), Dir::Down);
        assert_eq!(Dir::Down.reflect_slash(), Dir::Left);
    }

    #[test]
    fn backslash_reflects_all_four() {
        assert_eq!(Dir::Right.reflect_backslash(), Dir::Down);
        assert_eq!(Dir::Down.reflect_backslash(), Dir::Right);
        assert_eq!(Dir::Left.reflect_backslash(), Dir::Up);
        assert_eq!(Dir::Up.reflect_backslash(), Dir::Left);
    }

    #[test]
    fn double_reflection_is_identity() {
        for d in [Dir::Up, Dir::Down, Dir::Left, Dir::Right] {
            assert_eq!(d.reflect_slash().reflect_slash(), d);
            assert_eq!(d.reflect_backslash().reflect_backslash(), d);
        }
    }

    #[test]
    fn cell_center() {
        let p = Point::center(2, 3);
        assert!((p.x - 3.5).abs() < 1e-6);
        assert!((p.y - 2.5).abs() < 1e-6);
    }
}
