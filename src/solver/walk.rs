use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};

use fnv::FnvHashSet;
use log::trace;
use typed_arena::Arena;

use crate::board::{Board, BoardUndo};
use crate::config::Budget;
use crate::data::{Boost, Cell};
use crate::moves::{Moves, TRANSLATIONS};
use crate::point::Point;
use crate::state::State;

use super::node::SearchNode;
use super::stats::Stats;
use super::Strategy;

/// What the walk is looking for.
#[derive(Clone)]
pub enum Goal {
    /// Any step that paints something.
    Unpainted,
    /// Picking up a boost of this kind.
    Pickup(Boost),
    /// Standing on one of these cells.
    Cells(FnvHashSet<Point>),
    /// Standing where the predicate holds, given the board as it is after the step.
    Custom(fn(&Board, Point) -> bool),
}

impl Goal {
    fn is_reached(&self, board: &Board, start: &State, next: &State, undo: &BoardUndo) -> bool {
        match self {
            Goal::Unpainted => undo
                .touched()
                .any(|(_, old)| old != Cell::Wall && !old.is_painted()),
            Goal::Pickup(kind) => next.inventory().count(*kind) > start.inventory().count(*kind),
            Goal::Cells(cells) => cells.contains(&next.pos()),
            Goal::Custom(predicate) => predicate(board, next.pos()),
        }
    }
}

impl Debug for Goal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Unpainted => write!(f, "Unpainted"),
            Goal::Pickup(kind) => write!(f, "Pickup({})", kind),
            Goal::Cells(cells) => write!(f, "Cells({})", cells.len()),
            Goal::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Breadth first search over translations only, returns the first plan reaching the goal.
///
/// Positions are visited once so the search stays linear in the size of the board
/// even though the states it finds carry timers and inventory.
#[derive(Debug, Clone)]
pub struct Walk {
    goal: Goal,
    max_depth: Option<usize>,
    name: &'static str,
}

impl Walk {
    pub fn new(goal: Goal, max_depth: Option<usize>) -> Self {
        Walk {
            goal,
            max_depth,
            name: "walk",
        }
    }

    pub fn nearest_unpainted() -> Self {
        Walk {
            name: "walk-unpainted",
            ..Walk::new(Goal::Unpainted, None)
        }
    }

    pub fn to_pickup(kind: Boost, radius: usize) -> Self {
        Walk {
            name: "walk-pickup",
            ..Walk::new(Goal::Pickup(kind), Some(radius))
        }
    }

    pub fn into_region(region: &[Point]) -> Self {
        Walk {
            name: "walk-region",
            ..Walk::new(Goal::Cells(region.iter().cloned().collect()), None)
        }
    }

    pub fn to_point(target: Point) -> Self {
        let mut cells = FnvHashSet::default();
        cells.insert(target);
        Walk::new(Goal::Cells(cells), None)
    }

    /// The plan and the state it leads to.
    pub fn route(
        &self,
        board: &Board,
        state: &State,
        budget: &Budget,
        stats: &mut Stats,
    ) -> Option<(Moves, State)> {
        // only the path to the node being expanded is ever applied to the scratch board
        let mut scratch = board.clone();

        let arena = Arena::new();
        let root: &SearchNode<'_> = arena.alloc(SearchNode::root(state.clone()));
        stats.add_created(0);

        let mut visited = FnvHashSet::default();
        visited.insert(state.pos());
        let mut to_visit = VecDeque::new();
        to_visit.push_back(root);

        while let Some(node) = to_visit.pop_front() {
            if self.max_depth.map_or(false, |max| node.depth >= max) {
                continue;
            }
            if budget.is_exhausted() {
                trace!("{}: out of time at depth {}", self.name, node.depth);
                return None;
            }
            stats.add_unique_visited(node.depth);

            let path = Self::replay(&mut scratch, state, &node.moves());
            debug_assert_eq!(path.0, node.state);

            for &command in &TRANSLATIONS {
                let (next, undo) = match node.state.apply(&mut scratch, command) {
                    Some(applied) => applied,
                    None => continue,
                };
                let fresh = visited.insert(next.pos());
                let reached = fresh && self.goal.is_reached(&scratch, state, &next, &undo);
                scratch.undo(&undo);

                if !fresh {
                    stats.add_reached_duplicate(node.depth + 1);
                    continue;
                }

                let child = arena.alloc(SearchNode::child(node, next, command, 0));
                stats.add_created(child.depth);
                if reached {
                    trace!("{}: reached {} in {} steps", self.name, child.state.pos(), child.depth);
                    scratch.undo(&path.1);
                    return Some((child.moves(), child.state.clone()));
                }
                to_visit.push_back(child);
            }

            scratch.undo(&path.1);
        }

        None
    }

    /// Applies `moves` from `state` and returns where they lead with one log reverting all of them.
    fn replay(board: &mut Board, state: &State, moves: &Moves) -> (State, BoardUndo) {
        let mut state = state.clone();
        let mut path_undo = BoardUndo::new();
        for &command in moves {
            if let Some((next, undo)) = state.apply(board, command) {
                state = next;
                path_undo.append(undo);
            }
        }
        (state, path_undo)
    }
}

impl Strategy for Walk {
    fn name(&self) -> &'static str {
        self.name
    }

    fn plan(&self, board: &Board, state: &State, budget: &Budget, stats: &mut Stats) -> Option<Moves> {
        self.route(board, state, budget, stats).map(|(moves, _)| moves)
    }
}
