use std::fmt::{self, Display, Formatter};

use log::trace;

use crate::board::{Board, BoardUndo};
use crate::data::{Boost, Cell, Inventory};
use crate::moves::{Command, Moves};
use crate::point::{Dir, Point};

pub const FAST_WHEELS_TICKS: u32 = 50;
pub const DRILL_TICKS: u32 = 30;

/// A manipulator arm relative to the robot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arm {
    offset: Point,
    /// Cells between the robot and the arm, any wall among them stops the arm from painting.
    blockers: Vec<Point>,
}

impl Arm {
    pub fn new(offset: Point) -> Self {
        Arm {
            offset,
            blockers: blockers(offset),
        }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn blockers(&self) -> &[Point] {
        &self.blockers
    }

    fn rotate_left(&mut self) {
        self.offset = self.offset.rotate_left();
        for b in &mut self.blockers {
            *b = b.rotate_left();
        }
    }

    fn rotate_right(&mut self) {
        self.offset = self.offset.rotate_right();
        for b in &mut self.blockers {
            *b = b.rotate_right();
        }
    }
}

/// Cells the straight line between the centres of the robot's cell and `offset`'s cell passes through.
/// Arms touching the robot (including diagonally) are never blocked.
pub fn blockers(offset: Point) -> Vec<Point> {
    if offset.x.abs() < 2 && offset.y.abs() < 2 {
        return Vec::new();
    }

    let (sx, sy) = (i64::from(offset.x.signum()), i64::from(offset.y.signum()));
    let (ax, ay) = (i64::from(offset.x).abs(), i64::from(offset.y).abs());
    let swapped = ay > ax;
    let (x, y) = if swapped { (ay, ax) } else { (ax, ay) };

    // first octant: the line is y = t * Y / X, a cell blocks when the line
    // enters the open square around its centre (everything scaled by 2X)
    let mut ret = Vec::new();
    for cx in 0..=x {
        for cy in 0..=y {
            if (cx, cy) == (0, 0) || (cx, cy) == (x, y) {
                continue;
            }
            let lo = (2 * cx - 1) * y;
            let hi = (2 * cx + 1) * y;
            if lo < x * (2 * cy + 1) && hi > x * (2 * cy - 1) {
                let (bx, by) = if swapped { (cy, cx) } else { (cx, cy) };
                ret.push(Point::new((bx * sx) as i32, (by * sy) as i32));
            }
        }
    }
    ret
}

/// Lossy summary of a state used to prune duplicates during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub pos: Point,
    pub facing: u8,
    pub unpainted: usize,
    pub timers: u32,
    pub boosts_collected: u32,
}

/// The robot. The board is passed to every transition so many states can share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pos: Point,
    facing: u8,
    arms: Vec<Arm>,
    inventory: Inventory,
    fast_wheels: u32,
    drill: u32,
    boosts_collected: u32,
    unpainted: usize,
    beacons: Vec<Point>,
}

impl State {
    /// Places the robot and paints what it covers at the start.
    pub fn new(board: &mut Board, start: Point) -> Self {
        let mut state = State {
            pos: start,
            facing: 0,
            arms: vec![
                Arm::new(Point::new(1, -1)),
                Arm::new(Point::new(1, 0)),
                Arm::new(Point::new(1, 1)),
            ],
            inventory: Inventory::default(),
            fast_wheels: 0,
            drill: 0,
            boosts_collected: 0,
            unpainted: board.unpainted_count(),
            beacons: Vec::new(),
        };
        // the initial paint isn't part of any move so there's nothing to undo
        state.paint(board, &mut BoardUndo::new());
        state
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn facing(&self) -> u8 {
        self.facing
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn has_arm(&self, offset: Point) -> bool {
        self.arms.iter().any(|arm| arm.offset == offset)
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory
    }

    pub fn fast_wheels(&self) -> u32 {
        self.fast_wheels
    }

    pub fn drill(&self) -> u32 {
        self.drill
    }

    pub fn boosts_collected(&self) -> u32 {
        self.boosts_collected
    }

    pub fn unpainted(&self) -> usize {
        self.unpainted
    }

    pub fn beacons(&self) -> &[Point] {
        &self.beacons
    }

    pub fn is_solved(&self) -> bool {
        self.unpainted == 0
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint {
            pos: self.pos,
            facing: self.facing,
            unpainted: self.unpainted,
            timers: self.drill + self.fast_wheels,
            boosts_collected: self.boosts_collected,
        }
    }

    /// Performs one tick. Returns `None` if the command is not possible here,
    /// the board is untouched in that case. Otherwise the board holds the new
    /// contents and the returned log reverts them.
    pub fn apply(&self, board: &mut Board, command: Command) -> Option<(State, BoardUndo)> {
        let mut next = self.clone();
        let mut undo = BoardUndo::new();

        let accepted = match command {
            Command::Move(dir) => next.translate(board, dir, &mut undo),
            Command::TurnRight => {
                next.tick();
                next.facing = (next.facing + 1) % 4;
                for arm in &mut next.arms {
                    arm.rotate_right();
                }
                next.paint(board, &mut undo);
                true
            }
            Command::TurnLeft => {
                next.tick();
                next.facing = (next.facing + 3) % 4;
                for arm in &mut next.arms {
                    arm.rotate_left();
                }
                next.paint(board, &mut undo);
                true
            }
            Command::FastWheels => {
                next.tick();
                if next.inventory.take(Boost::FastWheels) {
                    next.fast_wheels = (next.fast_wheels + FAST_WHEELS_TICKS).max(FAST_WHEELS_TICKS);
                    true
                } else {
                    false
                }
            }
            Command::Drill => {
                next.tick();
                if next.inventory.take(Boost::Drill) {
                    next.drill = (next.drill + DRILL_TICKS).max(DRILL_TICKS);
                    true
                } else {
                    false
                }
            }
            Command::Attach(offset) => {
                if offset == Point::new(0, 0) || next.has_arm(offset) || !Self::fits(board, offset) {
                    false
                } else if next.inventory.take(Boost::Manipulator) {
                    next.tick();
                    next.arms.push(Arm::new(offset));
                    next.paint(board, &mut undo);
                    true
                } else {
                    false
                }
            }
            Command::Beacon => {
                if next.beacons.contains(&next.pos) || !next.inventory.take(Boost::Teleport) {
                    false
                } else {
                    next.tick();
                    next.beacons.push(next.pos);
                    true
                }
            }
            Command::Teleport(target) => {
                if next.beacons.contains(&target) {
                    next.tick();
                    next.pos = target;
                    next.paint(board, &mut undo);
                    true
                } else {
                    false
                }
            }
        };

        if accepted {
            Some((next, undo))
        } else {
            board.undo(&undo);
            None
        }
    }

    /// Applies commands in order, skipping rejected ones.
    /// The board keeps all the changes.
    pub fn multi_move(&self, board: &mut Board, moves: &Moves) -> State {
        let mut state = self.clone();
        for &command in moves {
            match state.apply(board, command) {
                Some((next, _)) => state = next,
                None => trace!("skipping rejected {} at {}", command, state.pos),
            }
        }
        state
    }

    fn translate(&mut self, board: &mut Board, dir: Dir, undo: &mut BoardUndo) -> bool {
        // timers are checked before this tick counts down
        let drilling = self.drill > 0;
        let fast = self.fast_wheels > 0;

        if !self.step(board, dir, drilling, undo) {
            return false;
        }
        if fast {
            // blocked second step keeps the first
            self.step(board, dir, drilling, undo);
        }
        self.tick();
        true
    }

    fn step(&mut self, board: &mut Board, dir: Dir, drilling: bool, undo: &mut BoardUndo) -> bool {
        let target = self.pos + dir.offset();
        let cell = board.cell(target);
        match cell {
            Cell::Wall => {
                if !drilling || !board.is_in_bounds(target) {
                    return false;
                }
                board.set(target, Cell::Unpainted, undo);
                self.unpainted += 1;
            }
            Cell::Boost { kind, .. } => {
                self.inventory.add(kind);
                self.boosts_collected += 1;
                board.set(target, cell.picked_up(), undo);
            }
            Cell::Unpainted | Cell::Painted => {}
        }
        self.pos = target;
        self.paint(board, undo);
        true
    }

    fn paint(&mut self, board: &mut Board, undo: &mut BoardUndo) {
        if board.paint(self.pos, undo) {
            self.unpainted -= 1;
        }
        for arm in &self.arms {
            if arm.blockers.iter().all(|&b| !board.is_wall(self.pos + b))
                && board.paint(self.pos + arm.offset, undo)
            {
                self.unpainted -= 1;
            }
        }
    }

    /// An arm longer than the board could never paint anything.
    fn fits(board: &Board, offset: Point) -> bool {
        offset.x.unsigned_abs() as usize <= board.width() && offset.y.unsigned_abs() as usize <= board.height()
    }

    fn tick(&mut self) {
        self.fast_wheels = self.fast_wheels.saturating_sub(1);
        self.drill = self.drill.saturating_sub(1);
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pos: {}, facing: {}, unpainted: {}, drill: {}, wheels: {}, boosts: {}",
            self.pos,
            Dir::from_index(self.facing as usize),
            self.unpainted,
            self.drill,
            self.fast_wheels,
            self.inventory
        )
    }
}
