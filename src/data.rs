use std::fmt::{self, Debug, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boost {
    Manipulator,
    FastWheels,
    Drill,
    Teleport,
    Clone,
    Mystery,
}

pub const BOOSTS: [Boost; 6] = [
    Boost::Manipulator,
    Boost::FastWheels,
    Boost::Drill,
    Boost::Teleport,
    Boost::Clone,
    Boost::Mystery,
];

impl Boost {
    pub fn from_letter(c: char) -> Option<Boost> {
        BOOSTS.iter().cloned().find(|boost| boost.letter() == c)
    }

    pub fn letter(self) -> char {
        match self {
            Boost::Manipulator => 'B',
            Boost::FastWheels => 'F',
            Boost::Drill => 'L',
            Boost::Teleport => 'R',
            Boost::Clone => 'C',
            Boost::Mystery => 'X',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Display for Boost {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What is stored in the board.
///
/// Boost pickups keep their own painted bit so walking over one paints it
/// and picking it up afterwards doesn't lose the paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Unpainted,
    Painted,
    Boost { kind: Boost, painted: bool },
}

impl Cell {
    pub fn is_painted(self) -> bool {
        match self {
            Cell::Painted | Cell::Boost { painted: true, .. } => true,
            _ => false,
        }
    }

    /// `None` for walls which can't be painted.
    pub fn painted(self) -> Option<Cell> {
        match self {
            Cell::Wall => None,
            Cell::Unpainted | Cell::Painted => Some(Cell::Painted),
            Cell::Boost { kind, .. } => Some(Cell::Boost {
                kind,
                painted: true,
            }),
        }
    }

    /// The cell with its pickup removed, keeping the paint.
    pub fn picked_up(self) -> Cell {
        match self {
            Cell::Boost { painted: true, .. } => Cell::Painted,
            Cell::Boost { painted: false, .. } => Cell::Unpainted,
            cell => cell,
        }
    }

    pub fn tile(self) -> Tile {
        match self {
            Cell::Wall => Tile::Wall,
            Cell::Unpainted | Cell::Painted => Tile::Floor,
            Cell::Boost { kind, .. } => Tile::Pickup(kind),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Cell::Wall => write!(f, "#"),
            Cell::Unpainted => write!(f, " "),
            Cell::Painted => write!(f, "."),
            Cell::Boost {
                kind,
                painted: false,
            } => write!(f, "{}", kind.letter()),
            Cell::Boost {
                kind,
                painted: true,
            } => write!(f, "{}", kind.letter().to_ascii_lowercase()),
        }
    }
}

/// A cell ignoring paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Floor,
    Pickup(Boost),
}

/// Boosts held by the robot.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Inventory {
    counts: [u16; 6],
}

impl Inventory {
    pub fn count(&self, boost: Boost) -> u16 {
        self.counts[boost.index()]
    }

    pub fn has(&self, boost: Boost) -> bool {
        self.count(boost) > 0
    }

    pub fn add(&mut self, boost: Boost) {
        self.counts[boost.index()] += 1;
    }

    /// Returns false if there was nothing to take.
    pub fn take(&mut self, boost: Boost) -> bool {
        let count = &mut self.counts[boost.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| u32::from(c)).sum()
    }
}

impl Display for Inventory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for &boost in &BOOSTS {
            for _ in 0..self.count(boost) {
                write!(f, "{}", boost)?;
            }
        }
        Ok(())
    }
}

impl Debug for Inventory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Inventory({})", self)
    }
}
