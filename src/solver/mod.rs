mod best_first;
mod boost;
mod composite;
mod node;
mod stats;
mod walk;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use log::{debug, info, warn};

use crate::board::Board;
use crate::config::{Budget, Config};
use crate::data::Boost;
use crate::level::Level;
use crate::moves::Moves;
use crate::state::State;
use crate::Solve;

pub use self::best_first::{BestFirst, Weights};
pub use self::boost::BoostRule;
pub use self::composite::Composite;
pub use self::stats::Stats;
pub use self::walk::{Goal, Walk};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    AlreadySolved,
    Exhausted,
    Stalled,
    OutOfTime,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::AlreadySolved => write!(f, "Nothing left to paint"),
            SolverErr::Exhausted => write!(f, "No strategy found a plan"),
            SolverErr::Stalled => write!(f, "Plan didn't change the state"),
            SolverErr::OutOfTime => write!(f, "Time budget exceeded"),
        }
    }
}

impl Error for SolverErr {}

pub struct SolverOk {
    pub moves: Moves,
    pub stats: Stats,
}

impl SolverOk {
    fn new(moves: Moves, stats: Stats) -> Self {
        Self { moves, stats }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Moves: {}", self.moves.len())?;
        write!(f, "{:?}", self.stats)
    }
}

/// One way of choosing what to do next.
///
/// Returns `None` when it has nothing to offer. The board is the authoritative
/// one and must not be changed, strategies work on their own copies.
pub trait Strategy: Debug {
    fn name(&self) -> &'static str;

    fn plan(&self, board: &Board, state: &State, budget: &Budget, stats: &mut Stats) -> Option<Moves>;
}

/// Asks strategies in order, the first plan wins.
pub struct Planner {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Planner {
    /// The default chain for this level.
    pub fn new(level: &Level, config: &Config) -> Self {
        let weights = Weights::new(&level.board, level.state.pos(), config.locality);
        Planner::with_strategies(vec![
            Box::new(BoostRule),
            Box::new(BestFirst::new(config.max_depth, weights)),
            Box::new(Walk::to_pickup(Boost::Manipulator, config.pickup_radius)),
            Box::new(Composite::new(config.reroute_margin)),
            Box::new(Walk::nearest_unpainted()),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Planner { strategies }
    }

    pub fn plan(
        &self,
        board: &Board,
        state: &State,
        budget: &Budget,
        stats: &mut Stats,
    ) -> Result<Moves, SolverErr> {
        if state.is_solved() {
            return Err(SolverErr::AlreadySolved);
        }

        for strategy in &self.strategies {
            if let Some(moves) = strategy.plan(board, state, budget, stats) {
                debug!("{}: {}", strategy.name(), moves);
                stats.add_plan(strategy.name());
                return Ok(moves);
            }
            if budget.is_exhausted() {
                return Err(SolverErr::OutOfTime);
            }
        }

        Err(SolverErr::Exhausted)
    }
}

impl Debug for Planner {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        write!(f, "Planner({})", names.join(", "))
    }
}

impl Solve for Level {
    fn solve(&self, config: Config) -> Result<SolverOk, SolverErr> {
        solve(self, config)
    }
}

fn solve(level: &Level, config: Config) -> Result<SolverOk, SolverErr> {
    let planner = Planner::new(level, &config);
    solve_with(level, &planner, &config)
}

/// Runs the planner until everything is painted, applying each plan to a copy of the level.
pub fn solve_with(level: &Level, planner: &Planner, config: &Config) -> Result<SolverOk, SolverErr> {
    let budget = Budget::new(config.time_budget);
    info!(
        "Solving {}x{} level with {:?}, {} cells to paint",
        level.board.width(),
        level.board.height(),
        planner,
        level.state.unpainted()
    );

    let mut board = level.board.clone();
    let mut state = level.state.clone();
    let mut moves = Moves::default();
    let mut stats = Stats::new();

    while !state.is_solved() {
        if budget.is_exhausted() {
            info!("Out of time after {} moves", moves.len());
            return Err(SolverErr::OutOfTime);
        }

        if config.check_consistency {
            let actual = board.unpainted_count();
            if actual != state.unpainted() {
                warn!(
                    "Unpainted count drifted: tracked {}, actual {}",
                    state.unpainted(),
                    actual
                );
            }
        }

        let plan = planner.plan(&board, &state, &budget, &mut stats)?;
        let next = state.multi_move(&mut board, &plan);
        if next == state {
            return Err(SolverErr::Stalled);
        }
        state = next;
        moves.extend(&plan);
    }

    info!("Solved in {} moves", moves.len());
    Ok(SolverOk::new(moves, stats))
}
