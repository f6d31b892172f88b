use std::fmt::{self, Debug, Display, Formatter};

use crate::board::Board;
use crate::point::Point;
use crate::state::State;

/// The authoritative board and robot, everything else works on copies.
#[derive(Clone)]
pub struct Level {
    pub board: Board,
    pub state: State,
}

impl Level {
    pub fn new(board: Board, state: State) -> Self {
        Level { board, state }
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // the board with the robot drawn on top
        let pos = self.state.pos();
        for y in (0..self.board.height() as i32).rev() {
            for x in 0..self.board.width() as i32 {
                if (x, y) == (pos.x, pos.y) {
                    write!(f, "@")?;
                } else {
                    write!(f, "{}", self.board.cell(Point::new(x, y)))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.state)?;
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_level() {
        let level: Level = "(0,0),(5,0),(5,3),(0,3)#(1,1)#(3,1),(4,1),(4,2),(3,2)#F(4,0);B(0,2)"
            .parse()
            .unwrap();
        let expected = "B .  \n @.# \n  . F\n";
        assert_eq!(level.to_string(), expected);
        assert_eq!(format!("{:?}", level).lines().count(), 4);
        assert!(!level.is_solved());
    }
}
