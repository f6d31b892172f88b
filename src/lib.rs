// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod board;
pub mod config;
pub mod data;
pub mod level;
pub mod moves;
pub mod point;
pub mod solver;
pub mod state;

mod parser;
mod priority_queue;
mod vec2d;

pub use crate::parser::ParserErr;

use crate::config::Config;
use crate::solver::{SolverErr, SolverOk};

pub trait Solve {
    fn solve(&self, config: Config) -> Result<SolverOk, SolverErr>;
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    #[test]
    fn solving_from_descriptor() {
        let descriptor = "(0,0),(8,0),(8,3),(5,3),(5,6),(0,6)#(0,0)#(2,1),(3,1),(3,4),(2,4)#B(1,5);L(6,0);F(4,5);R(0,3)";
        let level: Level = descriptor.parse().unwrap();
        let solution = level.solve(Config::default()).unwrap();
        assert!(!solution.moves.is_empty());

        let mut replayed: Level = descriptor.parse().unwrap();
        let state = replayed.state.multi_move(&mut replayed.board, &solution.moves);
        assert!(state.is_solved());
        assert_eq!(replayed.board.unpainted_count(), 0);
    }
}
