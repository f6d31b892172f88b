use std::collections::VecDeque;
use std::fmt::{self, Debug, Display, Formatter};

use fnv::{FnvHashMap, FnvHashSet};

use crate::data::{Boost, Cell, Tile};
use crate::point::Point;
use crate::priority_queue::PriorityQueue;
use crate::vec2d::Vec2d;

/// Log of overwritten cells, replayed backwards by `Board::undo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardUndo {
    entries: Vec<(Point, Cell)>,
}

impl BoardUndo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(Point, Cell)] {
        &self.entries
    }

    /// Appends a later transaction so both can be undone at once.
    pub fn append(&mut self, mut later: BoardUndo) {
        self.entries.append(&mut later.entries);
    }

    /// Each touched position once, with the value it had before the whole transaction.
    pub fn touched(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        let mut seen = FnvHashSet::default();
        self.entries
            .iter()
            .cloned()
            .filter(move |&(pos, _)| seen.insert(pos))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: Vec2d<Cell>,
}

impl Board {
    /// An open rectangle with nothing painted.
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            grid: Vec2d::new(width, height, Cell::Unpainted),
        }
    }

    /// Rasterizes the polygons using even-odd fill along each row.
    /// Only vertical edges matter since all edges are axis aligned.
    pub fn from_polygons(
        boundary: &[Point],
        obstacles: &[Vec<Point>],
        boosts: &[(Boost, Point)],
    ) -> Self {
        let width = boundary.iter().map(|p| p.x).max().unwrap_or(0).max(0) as usize;
        let height = boundary.iter().map(|p| p.y).max().unwrap_or(0).max(0) as usize;

        // (x, y_min, y_max)
        let mut vertical = Vec::new();
        for polygon in Some(boundary).into_iter().chain(obstacles.iter().map(|o| &o[..])) {
            for (i, &a) in polygon.iter().enumerate() {
                let b = polygon[(i + 1) % polygon.len()];
                if a.x == b.x && a.y != b.y {
                    vertical.push((a.x, a.y.min(b.y), a.y.max(b.y)));
                }
            }
        }

        let mut grid = Vec2d::new(width, height, Cell::Wall);
        for y in 0..height as i32 {
            let mut inside = false;
            for x in 0..width as i32 {
                let crossings = vertical
                    .iter()
                    .filter(|&&(sx, y1, y2)| sx == x && y >= y1 && y < y2)
                    .count();
                if crossings % 2 == 1 {
                    inside = !inside;
                }
                grid[Point::new(x, y)] = if inside { Cell::Unpainted } else { Cell::Wall };
            }
        }

        for &(kind, pos) in boosts {
            if grid.contains(pos) {
                grid[pos] = Cell::Boost {
                    kind,
                    painted: false,
                };
            }
        }

        Board { grid }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn is_in_bounds(&self, pos: Point) -> bool {
        self.grid.contains(pos)
    }

    /// Everything outside is wall.
    pub fn cell(&self, pos: Point) -> Cell {
        self.grid.get(pos).cloned().unwrap_or(Cell::Wall)
    }

    pub fn get(&self, pos: Point) -> Tile {
        self.cell(pos).tile()
    }

    pub fn is_wall(&self, pos: Point) -> bool {
        self.cell(pos) == Cell::Wall
    }

    pub fn is_painted(&self, pos: Point) -> bool {
        self.cell(pos).is_painted()
    }

    /// Writes only when the value changes so the undo log has no redundant entries.
    pub fn set(&mut self, pos: Point, cell: Cell, undo: &mut BoardUndo) {
        if let Some(&old) = self.grid.get(pos) {
            if old != cell {
                undo.entries.push((pos, old));
                self.grid[pos] = cell;
            }
        }
    }

    pub fn undo(&mut self, undo: &BoardUndo) {
        for &(pos, old) in undo.entries.iter().rev() {
            self.grid[pos] = old;
        }
    }

    /// Returns true if the cell was unpainted before.
    pub fn paint(&mut self, pos: Point, undo: &mut BoardUndo) -> bool {
        let cell = self.cell(pos);
        if cell.is_painted() {
            return false;
        }
        match cell.painted() {
            Some(painted) => {
                self.set(pos, painted, undo);
                true
            }
            None => false,
        }
    }

    /// A grid of the same size for per-cell bookkeeping.
    pub(crate) fn scratchpad<U: Copy>(&self, default: U) -> Vec2d<U> {
        self.grid.scratchpad(default)
    }

    pub fn points(&self) -> impl Iterator<Item = Point> {
        self.grid.positions()
    }

    /// Ground truth for the count the robot state tracks incrementally.
    pub fn unpainted_count(&self) -> usize {
        self.points()
            .filter(|&p| !self.is_wall(p) && !self.is_painted(p))
            .count()
    }

    pub fn path_find(&self, from: Point, to: Point) -> Option<Vec<Point>> {
        self.path_find_with(from, to, |p| !self.is_wall(p))
    }

    /// A* using manhattan distance, which never overestimates on a 4-connected grid.
    pub fn path_find_with<P>(&self, from: Point, to: Point, passable: P) -> Option<Vec<Point>>
    where
        P: Fn(Point) -> bool,
    {
        let mut trail = Trail::new(from);
        let mut best_depth = FnvHashMap::default();
        best_depth.insert(from, 0);

        // (trail index, depth, pos), ties go to the deeper node which is closer to the target
        let mut to_visit = PriorityQueue::new(|a: &(usize, usize, Point), b: &(usize, usize, Point)| {
            let cost_a = a.1 + to.dist(a.2) as usize;
            let cost_b = b.1 + to.dist(b.2) as usize;
            cost_a < cost_b || (cost_a == cost_b && a.1 > b.1)
        });
        to_visit.push((0, 0, from));

        while let Some((index, depth, pos)) = to_visit.pop() {
            if best_depth.get(&pos).map_or(false, |&d| d < depth) {
                continue; // stale entry
            }
            if pos == to {
                return Some(trail.path(index));
            }

            for &next in &pos.neighbors() {
                if !passable(next) {
                    continue;
                }
                let next_depth = depth + 1;
                if best_depth.get(&next).map_or(false, |&d| d <= next_depth) {
                    continue;
                }
                best_depth.insert(next, next_depth);
                let next_index = trail.add(next, next_depth, index);
                to_visit.push((next_index, next_depth, next));
            }
        }

        None
    }

    /// Visits cells in non-decreasing distance from `from` and returns the path
    /// to the first one satisfying `goal`. `from` itself is never tested.
    pub fn breadth_first_search<G, F>(&self, from: Point, goal: G, forbidden: F) -> Option<Vec<Point>>
    where
        G: FnMut(Point, usize) -> bool,
        F: FnMut(Point, usize) -> bool,
    {
        self.search(from, goal, forbidden, false)
    }

    /// Same contract as `breadth_first_search` but expands the newest cell first.
    pub fn depth_first_search<G, F>(&self, from: Point, goal: G, forbidden: F) -> Option<Vec<Point>>
    where
        G: FnMut(Point, usize) -> bool,
        F: FnMut(Point, usize) -> bool,
    {
        self.search(from, goal, forbidden, true)
    }

    /// Shortest path to a cell next to a wall, avoiding `forbidden`.
    pub fn path_find_to_wall(
        &self,
        from: Point,
        forbidden: &FnvHashSet<Point>,
    ) -> Option<Vec<Point>> {
        self.breadth_first_search(
            from,
            |p, _| p.neighbors().iter().any(|&n| self.is_wall(n)),
            |p, _| forbidden.contains(&p),
        )
    }

    /// Maximal 4-connected sets of unpainted cells.
    pub fn regions(&self) -> Vec<Vec<Point>> {
        let mut assigned = self.grid.scratchpad(false);
        let mut regions = Vec::new();

        for start in self.points() {
            if assigned[start] || self.is_wall(start) || self.is_painted(start) {
                continue;
            }

            let mut region = vec![start];
            assigned[start] = true;
            self.breadth_first_search(
                start,
                |p, _| {
                    assigned[p] = true;
                    region.push(p);
                    false
                },
                |p, _| self.is_painted(p),
            );
            regions.push(region);
        }

        regions
    }

    fn search<G, F>(&self, from: Point, mut goal: G, mut forbidden: F, depth_first: bool) -> Option<Vec<Point>>
    where
        G: FnMut(Point, usize) -> bool,
        F: FnMut(Point, usize) -> bool,
    {
        let mut trail = Trail::new(from);
        let mut visited = FnvHashSet::default();
        visited.insert(from);

        let mut to_visit = VecDeque::new();
        to_visit.push_back(0);

        loop {
            let index = if depth_first {
                to_visit.pop_back()
            } else {
                to_visit.pop_front()
            };
            let index = match index {
                Some(index) => index,
                None => return None,
            };
            let (pos, depth) = (trail.nodes[index].0, trail.nodes[index].1);

            for &next in &pos.neighbors() {
                if self.is_wall(next) || visited.contains(&next) || forbidden(next, depth + 1) {
                    continue;
                }

                let next_index = trail.add(next, depth + 1, index);
                if goal(next, depth + 1) {
                    return Some(trail.path(next_index));
                }

                visited.insert(next);
                to_visit.push_back(next_index);
            }
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Arena of visited cells with back links, instead of nodes pointing at each other.
struct Trail {
    // (pos, depth, prev)
    nodes: Vec<(Point, usize, Option<usize>)>,
}

impl Trail {
    fn new(start: Point) -> Self {
        Trail {
            nodes: vec![(start, 0, None)],
        }
    }

    fn add(&mut self, pos: Point, depth: usize, prev: usize) -> usize {
        self.nodes.push((pos, depth, Some(prev)));
        self.nodes.len() - 1
    }

    fn path(&self, mut index: usize) -> Vec<Point> {
        let mut path = Vec::new();
        loop {
            let (pos, _, prev) = self.nodes[index];
            path.push(pos);
            match prev {
                Some(prev) => index = prev,
                None => {
                    path.reverse();
                    return path;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_sealed() -> Board {
        let mut board = Board::new(30, 30);
        let mut undo = BoardUndo::new();
        board.set(Point::new(0, 1), Cell::Wall, &mut undo);
        board.set(Point::new(1, 0), Cell::Wall, &mut undo);
        board
    }

    fn assert_walk(board: &Board, path: &[Point]) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].dist(pair[1]), 1);
            assert!(!board.is_wall(pair[1]));
        }
    }

    #[test]
    fn rasterizing() {
        // 6x4 room with a 2x2 pillar and a notch cut into the bottom edge
        let boundary = vec![
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(3, 1),
            Point::new(3, 0),
            Point::new(6, 0),
            Point::new(6, 4),
            Point::new(0, 4),
        ];
        let pillar = vec![
            Point::new(4, 2),
            Point::new(5, 2),
            Point::new(5, 3),
            Point::new(4, 3),
        ];
        let boosts = vec![(Boost::Drill, Point::new(0, 3))];
        let board = Board::from_polygons(&boundary, &[pillar], &boosts);

        assert_eq!(board.width(), 6);
        assert_eq!(board.height(), 4);
        let expected = "\
L     
    # 
      
  #   
";
        assert_eq!(board.to_string(), expected);
        assert_eq!(board.get(Point::new(0, 3)), Tile::Pickup(Boost::Drill));
        assert_eq!(board.get(Point::new(-1, 0)), Tile::Wall);
        assert_eq!(board.get(Point::new(6, 0)), Tile::Wall);
        assert_eq!(board.unpainted_count(), 22);
    }

    #[test]
    fn obstacle_sharing_boundary_edge() {
        let boundary = vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 3),
            Point::new(0, 3),
        ];
        let obstacle = vec![
            Point::new(0, 1),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(0, 2),
        ];
        let board = Board::from_polygons(&boundary, &[obstacle], &[]);
        assert!(board.is_wall(Point::new(0, 1)));
        assert!(board.is_wall(Point::new(1, 1)));
        assert!(!board.is_wall(Point::new(2, 1)));
        assert!(!board.is_wall(Point::new(0, 0)));
    }

    #[test]
    fn undo_restores_everything() {
        let mut board = Board::new(5, 5);
        let drill = Cell::Boost {
            kind: Boost::Drill,
            painted: false,
        };
        let mut setup = BoardUndo::new();
        board.set(Point::new(2, 2), drill, &mut setup);
        let before = board.clone();

        let mut undo = BoardUndo::new();
        board.set(Point::new(2, 2), Cell::Painted, &mut undo);
        board.set(Point::new(2, 2), Cell::Wall, &mut undo);
        board.set(Point::new(0, 0), Cell::Wall, &mut undo);
        board.paint(Point::new(1, 1), &mut undo);
        board.set(Point::new(2, 2), Cell::Unpainted, &mut undo);
        board.set(Point::new(0, 0), Cell::Painted, &mut undo);
        board.set(Point::new(9, 9), Cell::Wall, &mut undo);
        assert_eq!(undo.len(), 6);
        assert_eq!(
            undo.touched().collect::<Vec<_>>(),
            vec![
                (Point::new(2, 2), drill),
                (Point::new(0, 0), Cell::Unpainted),
                (Point::new(1, 1), Cell::Unpainted),
            ]
        );

        board.undo(&undo);
        assert_eq!(board, before);
    }

    #[test]
    fn setting_same_value_is_not_logged() {
        let mut board = Board::new(3, 3);
        let mut undo = BoardUndo::new();
        board.set(Point::new(1, 1), Cell::Unpainted, &mut undo);
        assert!(undo.is_empty());

        assert!(board.paint(Point::new(1, 1), &mut undo));
        assert_eq!(undo.len(), 1);
        assert!(!board.paint(Point::new(1, 1), &mut undo));
        assert!(!board.paint(Point::new(-1, 1), &mut undo));
        assert_eq!(undo.len(), 1);
        assert_eq!(board.unpainted_count(), 8);
    }

    #[test]
    fn path_finding() {
        let board = corner_sealed();
        assert_eq!(board.path_find(Point::new(0, 0), Point::new(15, 15)), None);

        let path = board
            .path_find(Point::new(29, 29), Point::new(15, 15))
            .unwrap();
        assert_eq!(path.len(), 29);
        assert_eq!(path[0], Point::new(29, 29));
        assert_eq!(path[28], Point::new(15, 15));
        assert_walk(&board, &path);

        assert_eq!(
            board.path_find(Point::new(3, 3), Point::new(3, 3)),
            Some(vec![Point::new(3, 3)])
        );
    }

    #[test]
    fn path_finding_around_walls() {
        // wall across the middle with a gap at the far end
        let mut board = Board::new(8, 5);
        let mut undo = BoardUndo::new();
        for x in 0..7 {
            board.set(Point::new(x, 2), Cell::Wall, &mut undo);
        }
        let path = board.path_find(Point::new(0, 0), Point::new(0, 4)).unwrap();
        assert_eq!(path.len(), 19);
        assert_walk(&board, &path);

        let through = board
            .path_find_with(Point::new(0, 0), Point::new(0, 4), |p| board.is_in_bounds(p))
            .unwrap();
        assert_eq!(through.len(), 5);
    }

    #[test]
    fn breadth_and_depth_first() {
        let board = corner_sealed();
        let target = Point::new(20, 5);

        let bfs = board
            .breadth_first_search(Point::new(10, 10), |p, _| p == target, |_, _| false)
            .unwrap();
        assert_eq!(bfs.len(), 16);
        assert_walk(&board, &bfs);

        let dfs = board
            .depth_first_search(Point::new(10, 10), |p, _| p == target, |_, _| false)
            .unwrap();
        assert_eq!(dfs[0], Point::new(10, 10));
        assert_eq!(*dfs.last().unwrap(), target);
        assert!(dfs.len() >= bfs.len());
        assert_walk(&board, &dfs);

        // the sealed corner is never reached
        assert_eq!(
            board.breadth_first_search(Point::new(5, 5), |p, _| p == Point::new(0, 0), |_, _| false),
            None
        );
        // forbidden cells are not expanded
        assert_eq!(
            board.breadth_first_search(
                Point::new(5, 5),
                |p, _| p == Point::new(7, 5),
                |p, _| p.x == 6
            ),
            None
        );
        // the start is never a goal
        let next = board
            .breadth_first_search(Point::new(5, 5), |_, _| true, |_, _| false)
            .unwrap();
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn depth_is_reported_to_predicates() {
        let board = Board::new(10, 1);
        let path = board
            .breadth_first_search(Point::new(0, 0), |_, depth| depth == 4, |_, _| false)
            .unwrap();
        assert_eq!(*path.last().unwrap(), Point::new(4, 0));
    }

    #[test]
    fn path_to_wall() {
        let board = Board::new(9, 9);
        let forbidden: FnvHashSet<_> = (0..9).map(|y| Point::new(3, y)).collect();
        let path = board
            .path_find_to_wall(Point::new(5, 4), &forbidden)
            .unwrap();
        // left is blocked by the forbidden column, so the nearest wall-adjacent cells are 3 away
        assert_eq!(path.len(), 4);
        let end = *path.last().unwrap();
        assert!(end.neighbors().iter().any(|&n| board.is_wall(n)));
        assert!(path.iter().all(|p| !forbidden.contains(p)));
    }

    #[test]
    fn regions() {
        let mut board = Board::new(5, 3);
        let mut undo = BoardUndo::new();
        for y in 0..3 {
            board.paint(Point::new(2, y), &mut undo);
        }
        board.set(Point::new(4, 1), Cell::Wall, &mut undo);
        board.paint(Point::new(4, 0), &mut undo);
        board.paint(Point::new(3, 2), &mut undo);

        let mut regions = board.regions();
        regions.sort_by_key(|r| r.len());
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0], vec![Point::new(4, 2)]);
        assert_eq!(regions[1].len(), 2);
        assert_eq!(regions[2].len(), 6);
    }
}
