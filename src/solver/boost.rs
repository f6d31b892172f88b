use crate::board::Board;
use crate::config::Budget;
use crate::data::Boost;
use crate::moves::{Command, Moves};
use crate::point::Point;
use crate::state::State;

use super::stats::Stats;
use super::Strategy;

/// Attaches held manipulators right away.
///
/// New arms extend the line in front of the robot, alternating sides:
/// `(1, 2)`, `(1, -2)`, `(1, 3)`, ... relative to the robot facing right.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoostRule;

impl BoostRule {
    pub fn next_arm(state: &State) -> Point {
        let mut n = state.arms().len() as i32;
        loop {
            let side = if n % 2 == 0 { -1 } else { 1 };
            let mut offset = Point::new(1, (n + 1) / 2 * side);
            for _ in 0..state.facing() {
                offset = offset.rotate_right();
            }
            if !state.has_arm(offset) {
                return offset;
            }
            n += 1;
        }
    }
}

impl Strategy for BoostRule {
    fn name(&self) -> &'static str {
        "boost"
    }

    fn plan(&self, _board: &Board, state: &State, _budget: &Budget, _stats: &mut Stats) -> Option<Moves> {
        if !state.inventory().has(Boost::Manipulator) {
            return None;
        }
        Some(Moves::new(vec![Command::Attach(Self::next_arm(state))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::level::Level;

    fn plan(level: &Level) -> Option<Moves> {
        BoostRule.plan(&level.board, &level.state, &Budget::unlimited(), &mut Stats::new())
    }

    #[test]
    fn no_manipulator() {
        let level: Level = "(0,0),(4,0),(4,4),(0,4)#(1,1)##".parse().unwrap();
        assert_eq!(plan(&level), None);
    }

    #[test]
    fn attaching_alternates_sides() {
        let mut level: Level = "(0,0),(4,0),(4,4),(0,4)#(0,0)##B(0,1);B(0,2);B(0,3)".parse().unwrap();
        let moves: Moves = "WWW".parse().unwrap();
        level.state = level.state.multi_move(&mut level.board, &moves);
        assert_eq!(level.state.inventory().count(Boost::Manipulator), 3);

        let mut offsets = Vec::new();
        while let Some(moves) = plan(&level) {
            assert_eq!(moves.len(), 1);
            let (next, _) = level.state.apply(&mut level.board, moves.iter().cloned().next().unwrap()).unwrap();
            level.state = next;
            offsets.push(level.state.arms().last().unwrap().offset());
        }
        assert_eq!(
            offsets,
            vec![Point::new(1, 2), Point::new(1, -2), Point::new(1, 3)]
        );
    }

    #[test]
    fn attaching_follows_facing() {
        let mut level: Level = "(0,0),(4,0),(4,4),(0,4)#(0,0)##B(0,1)".parse().unwrap();
        let moves: Moves = "WE".parse().unwrap();
        level.state = level.state.multi_move(&mut level.board, &moves);
        assert_eq!(level.state.facing(), 1);

        let moves = plan(&level).unwrap();
        assert_eq!(moves.to_string(), "B(2,-1)");
        assert!(level.state.multi_move(&mut level.board, &moves).arms().len() == 4);
    }

    #[test]
    fn skips_existing_arms() {
        let mut level: Level = "(0,0),(4,0),(4,4),(0,4)#(0,0)##B(0,1);B(0,2)".parse().unwrap();
        let moves: Moves = "WWB(1,-2)".parse().unwrap();
        level.state = level.state.multi_move(&mut level.board, &moves);
        assert_eq!(BoostRule::next_arm(&level.state), Point::new(1, 3));
    }
}
