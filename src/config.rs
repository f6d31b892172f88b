use std::fmt::{self, Display, Formatter};
use std::time::{Duration, Instant};

/// How the bounded search values newly painted cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Locality {
    /// Cells next to walls are worth more so edges get painted first.
    WallAdjacency,
    /// Cells far from the start are worth more.
    StartDistance,
}

impl Display for Locality {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Locality::WallAdjacency => write!(f, "wall-adjacency"),
            Locality::StartDistance => write!(f, "start-distance"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Depth limit of the bounded search.
    pub max_depth: usize,
    /// Wall clock limit for the whole solve.
    pub time_budget: Option<Duration>,
    pub locality: Locality,
    /// How far the walk toward a manipulator pickup may go.
    pub pickup_radius: usize,
    /// How many commands a drill or teleport route must save to be taken.
    pub reroute_margin: usize,
    /// Compare the tracked unpainted count with a full scan before each plan.
    pub check_consistency: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: 4,
            time_budget: None,
            locality: Locality::WallAdjacency,
            pickup_radius: 8,
            reroute_margin: 3,
            check_consistency: cfg!(debug_assertions),
        }
    }
}

/// Deadline shared by the driver and all strategies.
#[derive(Clone, Copy, Debug)]
pub struct Budget {
    deadline: Option<Instant>,
}

impl Budget {
    pub fn new(time_budget: Option<Duration>) -> Self {
        Budget {
            deadline: time_budget.map(|budget| Instant::now() + budget),
        }
    }

    pub fn unlimited() -> Self {
        Budget { deadline: None }
    }

    pub fn is_exhausted(&self) -> bool {
        self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}
