use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::point::Point;

/// Dense grid indexed by `Point`, `(0, 0)` is the bottom left corner.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Vec2d<T> {
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn contains(&self, pos: Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub(crate) fn get(&self, pos: Point) -> Option<&T> {
        if self.contains(pos) {
            Some(&self.data[self.offset(pos)])
        } else {
            None
        }
    }

    /// Row by row, starting at the bottom.
    pub(crate) fn positions(&self) -> Positions {
        Positions {
            width: self.width as i32,
            height: self.height as i32,
            next: Point::new(0, 0),
        }
    }

    pub(crate) fn scratchpad<U: Copy>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            width: self.width,
            height: self.height,
        }
    }

    fn offset(&self, pos: Point) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }
}

impl<T: Copy> Vec2d<T> {
    pub(crate) fn new(width: usize, height: usize, default: T) -> Self {
        Vec2d {
            data: vec![default; width * height],
            width,
            height,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Positions {
    width: i32,
    height: i32,
    next: Point,
}

impl Iterator for Positions {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.width == 0 || self.next.y >= self.height {
            return None;
        }

        let ret = self.next;
        self.next.x += 1;
        if self.next.x == self.width {
            self.next.x = 0;
            self.next.y += 1;
        }
        Some(ret)
    }
}

impl<T: Display> Display for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // top row first so it looks like the puzzle
        for row in self.data.chunks(self.width.max(1)).rev() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Display> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<Point> for Vec2d<T> {
    type Output = T;

    fn index(&self, pos: Point) -> &Self::Output {
        let index = self.offset(pos);
        &self.data[index]
    }
}

impl<T> IndexMut<Point> for Vec2d<T> {
    fn index_mut(&mut self, pos: Point) -> &mut Self::Output {
        let index = self.offset(pos);
        &mut self.data[index]
    }
}
