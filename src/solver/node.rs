use std::cmp::Ordering;

use crate::moves::{Command, Moves};
use crate::state::State;

/// How promising a search node is, greater is better.
///
/// Compares collected boosts first, then locality, then fewer unpainted cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Score {
    pub(crate) boosts: u32,
    pub(crate) locality: u64,
    pub(crate) unpainted: usize,
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.boosts
            .cmp(&other.boosts)
            .then(self.locality.cmp(&other.locality))
            .then(other.unpainted.cmp(&self.unpainted))
    }
}

/// Node of a search tree living in a `typed_arena::Arena`.
#[derive(Debug)]
pub(crate) struct SearchNode<'a> {
    pub(crate) state: State,
    pub(crate) command: Option<Command>,
    pub(crate) prev: Option<&'a SearchNode<'a>>,
    pub(crate) depth: usize,
    /// Sum of weights of all cells painted on the way here.
    pub(crate) locality: u64,
}

impl<'a> SearchNode<'a> {
    pub(crate) fn root(state: State) -> Self {
        SearchNode {
            state,
            command: None,
            prev: None,
            depth: 0,
            locality: 0,
        }
    }

    pub(crate) fn child(
        prev: &'a SearchNode<'a>,
        state: State,
        command: Command,
        painted_weight: u64,
    ) -> Self {
        SearchNode {
            state,
            command: Some(command),
            prev: Some(prev),
            depth: prev.depth + 1,
            locality: prev.locality + painted_weight,
        }
    }

    pub(crate) fn score(&self) -> Score {
        Score {
            boosts: self.state.boosts_collected(),
            locality: self.locality,
            unpainted: self.state.unpainted(),
        }
    }

    /// Commands leading from the root to this node.
    pub(crate) fn moves(&self) -> Moves {
        let mut commands = Vec::with_capacity(self.depth);
        let mut cur = Some(self);
        while let Some(node) = cur {
            if let Some(command) = node.command {
                commands.push(command);
            }
            cur = node.prev;
        }
        commands.reverse();
        Moves::new(commands)
    }
}
