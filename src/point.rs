use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Add, Sub};

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Manhattan distance
    pub fn dist(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// 90° counter-clockwise around the origin
    pub fn rotate_left(self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// 90° clockwise around the origin
    pub fn rotate_right(self) -> Point {
        Point::new(self.y, -self.x)
    }

    pub fn neighbor(self, direction: usize) -> Point {
        self + Dir::from_index(direction).offset()
    }

    pub fn neighbors(self) -> [Point; 4] {
        [
            self + Dir::Right.offset(),
            self + Dir::Down.offset(),
            self + Dir::Left.offset(),
            self + Dir::Up.offset(),
        ]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Directions in the order used for facing: turning clockwise adds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Right,
    Down,
    Left,
    Up,
}

pub const DIRECTIONS: [Dir; 4] = [Dir::Right, Dir::Down, Dir::Left, Dir::Up];

impl Dir {
    pub fn from_index(index: usize) -> Dir {
        DIRECTIONS[index % 4]
    }

    pub fn offset(self) -> Point {
        match self {
            Dir::Right => Point::new(1, 0),
            Dir::Down => Point::new(0, -1),
            Dir::Left => Point::new(-1, 0),
            Dir::Up => Point::new(0, 1),
        }
    }

    /// Direction of a single step, `None` if the points are not adjacent.
    pub fn between(from: Point, to: Point) -> Option<Dir> {
        DIRECTIONS
            .iter()
            .cloned()
            .find(|dir| from + dir.offset() == to)
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = match *self {
            Dir::Up => 'W',
            Dir::Left => 'A',
            Dir::Down => 'S',
            Dir::Right => 'D',
        };
        write!(f, "{}", c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating() {
        let p = Point::new(0, 1);
        assert_eq!(p.rotate_left(), Point::new(-1, 0));
        assert_eq!(p.rotate_right(), Point::new(1, 0));

        let p = Point::new(3, -7);
        assert_eq!(p.rotate_left().rotate_right(), p);
        assert_eq!(p.rotate_right().rotate_left(), p);
        assert_eq!(
            p.rotate_right().rotate_right().rotate_right().rotate_right(),
            p
        );
    }

    #[test]
    fn distances_and_neighbors() {
        let a = Point::new(2, 3);
        let b = Point::new(-1, 7);
        assert_eq!(a.dist(b), 7);
        assert_eq!(b.dist(a), 7);
        assert_eq!(a - b + b, a);

        assert_eq!(a.neighbor(0), Point::new(3, 3));
        assert_eq!(a.neighbor(1), Point::new(2, 2));
        assert_eq!(a.neighbor(2), Point::new(1, 3));
        assert_eq!(a.neighbor(3), Point::new(2, 4));
        assert_eq!(a.neighbor(5), a.neighbor(1));
        for &n in &a.neighbors() {
            assert_eq!(a.dist(n), 1);
        }
    }

    #[test]
    fn directions() {
        let p = Point::new(5, 5);
        for &dir in &DIRECTIONS {
            assert_eq!(Dir::between(p, p + dir.offset()), Some(dir));
        }
        assert_eq!(Dir::between(p, p), None);
        assert_eq!(Dir::between(p, Point::new(6, 6)), None);
        assert_eq!(Point::new(-4, 2).to_string(), "(-4,2)");
    }
}
