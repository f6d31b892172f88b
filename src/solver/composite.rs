use log::trace;

use crate::board::Board;
use crate::config::Budget;
use crate::data::Boost;
use crate::moves::{Command, Moves};
use crate::point::Point;
use crate::state::{State, DRILL_TICKS};

use super::stats::Stats;
use super::walk::Walk;
use super::Strategy;

/// Heads for the smallest unpainted region so no islands are left behind,
/// cutting through walls or teleporting when that is clearly shorter.
#[derive(Debug, Clone, Copy)]
pub struct Composite {
    reroute_margin: usize,
}

impl Composite {
    pub fn new(reroute_margin: usize) -> Self {
        Composite { reroute_margin }
    }

    /// The walk to use and the cell it's expected to end near.
    fn target(board: &Board, pos: Point) -> Option<(Walk, Point)> {
        let regions = board.regions();
        let nearest = |cells: &[Point]| cells.iter().cloned().min_by_key(|&p| pos.dist(p));

        if regions.len() > 1 {
            let region = regions
                .iter()
                .min_by_key(|region| (region.len(), nearest(&region[..]).map(|p| pos.dist(p))))?;
            Some((Walk::into_region(region), nearest(&region[..])?))
        } else {
            let cells = regions.into_iter().next()?;
            Some((Walk::nearest_unpainted(), nearest(&cells[..])?))
        }
    }

    fn drill_route(board: &Board, state: &State, target: Point) -> Option<Moves> {
        let mut moves = Moves::default();
        let ticks = if state.drill() > 0 {
            state.drill()
        } else if state.inventory().has(Boost::Drill) {
            moves.add(Command::Drill);
            DRILL_TICKS
        } else {
            return None;
        };

        let path = board.path_find_with(state.pos(), target, |p| board.is_in_bounds(p))?;
        if path.len() - 1 > ticks as usize {
            return None;
        }
        moves.extend(&Moves::from_path(&path)?);
        Some(moves)
    }

    fn teleport_route(board: &Board, beacon: Point, target: Point) -> Option<Moves> {
        let path = board.path_find(beacon, target)?;
        let mut moves = Moves::new(vec![Command::Teleport(beacon)]);
        moves.extend(&Moves::from_path(&path)?);
        Some(moves)
    }

    fn ends_on(board: &Board, state: &State, moves: &Moves, target: Point) -> bool {
        let mut board = board.clone();
        state.multi_move(&mut board, moves).pos() == target
    }
}

impl Strategy for Composite {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn plan(&self, board: &Board, state: &State, budget: &Budget, stats: &mut Stats) -> Option<Moves> {
        if state.inventory().has(Boost::Teleport) && state.beacons().is_empty() {
            return Some(Moves::new(vec![Command::Beacon]));
        }

        let (walk, target) = Self::target(board, state.pos())?;
        let mut best = walk.plan(board, state, budget, stats);

        let mut alternatives = Vec::new();
        alternatives.extend(Self::drill_route(board, state, target).map(|moves| ("drill", moves)));
        for &beacon in state.beacons() {
            alternatives.extend(Self::teleport_route(board, beacon, target).map(|moves| ("teleport", moves)));
        }

        for (kind, moves) in alternatives {
            let shorter = best
                .as_ref()
                .map_or(true, |best| moves.len() + self.reroute_margin < best.len());
            if shorter && Self::ends_on(board, state, &moves, target) {
                trace!("composite: {} route to {} in {} commands", kind, target, moves.len());
                best = Some(moves);
            }
        }

        best
    }
}
