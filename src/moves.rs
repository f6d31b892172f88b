use std::fmt::{self, Debug, Display, Formatter};

use crate::point::{Dir, Point};

/// One robot action, taking one tick.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Dir),
    TurnRight,
    TurnLeft,
    FastWheels,
    Drill,
    Attach(Point),
    Beacon,
    Teleport(Point),
}

pub const TRANSLATIONS: [Command; 4] = [
    Command::Move(Dir::Up),
    Command::Move(Dir::Left),
    Command::Move(Dir::Down),
    Command::Move(Dir::Right),
];

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Command::Move(dir) => write!(f, "{}", dir),
            Command::TurnRight => write!(f, "E"),
            Command::TurnLeft => write!(f, "Q"),
            Command::FastWheels => write!(f, "F"),
            Command::Drill => write!(f, "L"),
            Command::Attach(offset) => write!(f, "B{}", offset),
            Command::Beacon => write!(f, "R"),
            Command::Teleport(target) => write!(f, "T{}", target),
        }
    }
}

impl Debug for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Command>);

impl Moves {
    pub fn new(commands: Vec<Command>) -> Self {
        Moves(commands)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self, command: Command) {
        self.0.push(command);
    }

    pub fn extend(&mut self, moves: &Moves) {
        self.0.extend_from_slice(&moves.0);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Command> {
        self.0.iter()
    }

    /// Steps between consecutive points of a path.
    pub fn from_path(path: &[Point]) -> Option<Moves> {
        let mut moves = Moves::default();
        for pair in path.windows(2) {
            moves.add(Command::Move(Dir::between(pair[0], pair[1])?));
        }
        Some(moves)
    }
}

impl IntoIterator for Moves {
    type Item = Command;
    type IntoIter = ::std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Command;
    type IntoIter = ::std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for command in self {
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
