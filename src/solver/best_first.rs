use fnv::FnvHashMap;
use log::trace;
use typed_arena::Arena;

use crate::board::Board;
use crate::config::{Budget, Locality};
use crate::moves::{Command, Moves};
use crate::point::{Dir, Point};
use crate::priority_queue::PriorityQueue;
use crate::state::{Fingerprint, State};
use crate::vec2d::Vec2d;

use super::node::SearchNode;
use super::stats::Stats;
use super::Strategy;

const FIRST_COMMANDS: [Command; 8] = [
    Command::FastWheels,
    Command::Drill,
    Command::Move(Dir::Up),
    Command::Move(Dir::Left),
    Command::Move(Dir::Down),
    Command::Move(Dir::Right),
    Command::TurnLeft,
    Command::TurnRight,
];

const COMMANDS: [Command; 6] = [
    Command::Move(Dir::Up),
    Command::Move(Dir::Left),
    Command::Move(Dir::Down),
    Command::Move(Dir::Right),
    Command::TurnLeft,
    Command::TurnRight,
];

type Entry<'a> = (&'a SearchNode<'a>, Board);

/// Shallower first so the whole tree up to the depth limit gets explored,
/// best score first within a depth.
fn precedes(a: &Entry<'_>, b: &Entry<'_>) -> bool {
    let (a, b) = (a.0, b.0);
    a.depth < b.depth || (a.depth == b.depth && a.score() > b.score())
}

/// Per cell value of painting it.
#[derive(Debug, Clone)]
pub struct Weights {
    weights: Vec2d<u32>,
}

impl Weights {
    pub fn new(board: &Board, start: Point, locality: Locality) -> Self {
        let mut weights = board.scratchpad(1);
        match locality {
            Locality::WallAdjacency => {
                for pos in board.points() {
                    let walls = pos.neighbors().iter().filter(|&&n| board.is_wall(n)).count();
                    weights[pos] = 1 + walls as u32;
                }
            }
            Locality::StartDistance => {
                // nothing is ever the goal, this only records the depth of every reachable cell
                board.breadth_first_search(
                    start,
                    |pos, depth| {
                        weights[pos] = 1 + depth as u32;
                        false
                    },
                    |_, _| false,
                );
            }
        }
        Weights { weights }
    }

    /// Cells outside the board are worth nothing.
    pub fn get(&self, pos: Point) -> u32 {
        self.weights.get(pos).cloned().unwrap_or(0)
    }
}

/// Bounded best-first search over all single-robot commands except attaching and teleporting.
#[derive(Debug, Clone)]
pub struct BestFirst {
    max_depth: usize,
    weights: Weights,
}

impl BestFirst {
    pub fn new(max_depth: usize, weights: Weights) -> Self {
        BestFirst { max_depth, weights }
    }
}

impl Strategy for BestFirst {
    fn name(&self) -> &'static str {
        "best-first"
    }

    fn plan(&self, board: &Board, state: &State, budget: &Budget, stats: &mut Stats) -> Option<Moves> {
        let arena = Arena::new();
        let root: &SearchNode<'_> = arena.alloc(SearchNode::root(state.clone()));
        stats.add_created(0);

        let mut best = root;
        let mut seen: FnvHashMap<Fingerprint, &SearchNode<'_>> = FnvHashMap::default();
        seen.insert(state.fingerprint(), root);

        let mut to_visit = PriorityQueue::new(precedes);
        to_visit.push((root, board.clone()));

        while let Some((node, mut node_board)) = to_visit.pop() {
            if node.depth >= self.max_depth || best.state.is_solved() {
                break;
            }
            if budget.is_exhausted() {
                trace!("best-first: out of time at depth {}", node.depth);
                break;
            }
            stats.add_unique_visited(node.depth);

            let commands: &[Command] = if node.depth == 0 {
                &FIRST_COMMANDS
            } else {
                &COMMANDS
            };
            for &command in commands {
                let (next, undo) = match node.state.apply(&mut node_board, command) {
                    Some(applied) => applied,
                    None => continue,
                };

                let fingerprint = next.fingerprint();
                if seen.contains_key(&fingerprint) {
                    stats.add_reached_duplicate(node.depth + 1);
                    node_board.undo(&undo);
                    continue;
                }

                let painted: u64 = undo
                    .touched()
                    .filter(|&(pos, old)| !old.is_painted() && node_board.is_painted(pos))
                    .map(|(pos, _)| u64::from(self.weights.get(pos)))
                    .sum();
                let child = arena.alloc(SearchNode::child(node, next, command, painted));
                stats.add_created(child.depth);
                seen.insert(fingerprint, child);
                if child.score() > best.score() {
                    best = child;
                }

                // the child gets its own copy, the parent's is rolled back for the next sibling
                to_visit.push((child, node_board.clone()));
                node_board.undo(&undo);
            }
        }

        if best.score() > root.score() {
            trace!(
                "best-first: {:?} after {} states, {} left unexplored",
                best.score(),
                seen.len(),
                to_visit.len()
            );
            Some(best.moves())
        } else {
            None
        }
    }
}
