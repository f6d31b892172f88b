use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::board::Board;
use crate::data::Boost;
use crate::level::Level;
use crate::moves::{Command, Moves};
use crate::point::{Dir, Point};
use crate::state::State;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    MissingField(&'static str),
    Point(String),
    BoostLetter(char),
    CommandLetter(char),
    EmptyBoundary,
    NegativeCoordinate(Point),
    StartOutOfBounds(Point),
    BoostOutOfBounds(Point),
    StartInWall(Point),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParserErr::MissingField(name) => write!(f, "Missing field: {}", name),
            ParserErr::Point(s) => write!(f, "Invalid point: {:?}", s),
            ParserErr::BoostLetter(c) => write!(f, "Unknown boost: {}", c),
            ParserErr::CommandLetter(c) => write!(f, "Unknown command: {}", c),
            ParserErr::EmptyBoundary => write!(f, "Boundary has no vertices"),
            ParserErr::NegativeCoordinate(p) => write!(f, "Negative coordinate: {}", p),
            ParserErr::StartOutOfBounds(p) => write!(f, "Start outside the map: {}", p),
            ParserErr::BoostOutOfBounds(p) => write!(f, "Boost outside the map: {}", p),
            ParserErr::StartInWall(p) => write!(f, "Start inside a wall: {}", p),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl FromStr for Moves {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_moves(s)
    }
}

impl FromStr for Point {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (point, rest) = parse_point(s.trim())?;
        if rest.is_empty() {
            Ok(point)
        } else {
            Err(ParserErr::Point(s.to_string()))
        }
    }
}

/// Parses `VERTICES#START#OBSTACLES#BOOSTS`.
/// Trailing empty fields may be left out.
pub(crate) fn parse(descriptor: &str) -> Result<Level, ParserErr> {
    // trim so descriptors can be read straight from files
    let mut fields = descriptor.trim().split('#');

    let boundary = parse_point_list(fields.next().unwrap_or(""))?;
    if boundary.is_empty() {
        return Err(ParserErr::EmptyBoundary);
    }

    let start = fields.next().ok_or(ParserErr::MissingField("start"))?;
    let start: Point = start.parse()?;

    let mut obstacles = Vec::new();
    for obstacle in fields.next().unwrap_or("").split(';').filter(|s| !s.is_empty()) {
        obstacles.push(parse_point_list(obstacle)?);
    }

    let mut boosts = Vec::new();
    for boost in fields.next().unwrap_or("").split(';').filter(|s| !s.is_empty()) {
        boosts.push(parse_boost(boost)?);
    }

    for &p in boundary
        .iter()
        .chain(obstacles.iter().flatten())
        .chain(Some(&start))
    {
        if p.x < 0 || p.y < 0 {
            return Err(ParserErr::NegativeCoordinate(p));
        }
    }

    let mut board = Board::from_polygons(&boundary, &obstacles, &boosts);
    if !board.is_in_bounds(start) {
        return Err(ParserErr::StartOutOfBounds(start));
    }
    if board.is_wall(start) {
        return Err(ParserErr::StartInWall(start));
    }
    if let Some(&(_, p)) = boosts.iter().find(|&&(_, p)| !board.is_in_bounds(p)) {
        return Err(ParserErr::BoostOutOfBounds(p));
    }

    let state = State::new(&mut board, start);
    Ok(Level::new(board, state))
}

fn parse_boost(s: &str) -> Result<(Boost, Point), ParserErr> {
    let mut chars = s.trim().chars();
    let letter = chars.next().ok_or_else(|| ParserErr::Point(s.to_string()))?;
    let kind = Boost::from_letter(letter).ok_or(ParserErr::BoostLetter(letter))?;
    let pos = chars.as_str().parse()?;
    Ok((kind, pos))
}

fn parse_point_list(s: &str) -> Result<Vec<Point>, ParserErr> {
    let mut points = Vec::new();
    let mut rest = s.trim();
    while !rest.is_empty() {
        let (point, after) = parse_point(rest)?;
        points.push(point);
        rest = after.trim_start_matches(',');
    }
    Ok(points)
}

/// Parses `(x,y)` at the start of `s`, returns the point and the rest.
fn parse_point(s: &str) -> Result<(Point, &str), ParserErr> {
    let err = || ParserErr::Point(s.to_string());

    if !s.starts_with('(') {
        return Err(err());
    }
    let end = s.find(')').ok_or_else(err)?;
    let mut coords = s[1..end].split(',');
    let x = coords.next().and_then(|c| c.trim().parse().ok()).ok_or_else(err)?;
    let y = coords.next().and_then(|c| c.trim().parse().ok()).ok_or_else(err)?;
    if coords.next().is_some() {
        return Err(err());
    }
    Ok((Point::new(x, y), &s[end + 1..]))
}

fn parse_moves(s: &str) -> Result<Moves, ParserErr> {
    let mut moves = Moves::default();
    let mut rest = s.trim();
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        let command = match c {
            'W' => Command::Move(Dir::Up),
            'A' => Command::Move(Dir::Left),
            'S' => Command::Move(Dir::Down),
            'D' => Command::Move(Dir::Right),
            'E' => Command::TurnRight,
            'Q' => Command::TurnLeft,
            'F' => Command::FastWheels,
            'L' => Command::Drill,
            'R' => Command::Beacon,
            'B' | 'T' => {
                let (point, after) = parse_point(rest)?;
                rest = after;
                if c == 'B' {
                    Command::Attach(point)
                } else {
                    Command::Teleport(point)
                }
            }
            _ => return Err(ParserErr::CommandLetter(c)),
        };
        moves.add(command);
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Cell;

    #[test]
    fn simplest() {
        let level = parse("(0,0),(2,0),(2,1),(0,1)#(0,0)##").unwrap();
        assert_eq!(level.board.width(), 2);
        assert_eq!(level.board.height(), 1);
        assert_eq!(level.state.pos(), Point::new(0, 0));
    }

    #[test]
    fn missing_trailing_fields() {
        let full = parse("(0,0),(3,0),(3,3),(0,3)#(1,1)##").unwrap();
        let short = parse("(0,0),(3,0),(3,3),(0,3)#(1,1)").unwrap();
        assert_eq!(full.board, short.board);
        assert_eq!(full.state, short.state);
    }

    #[test]
    fn obstacles_and_boosts() {
        let level = parse(
            "(0,0),(6,0),(6,6),(0,6)#(0,0)#(2,2),(4,2),(4,4),(2,4);(5,5),(6,5),(6,6),(5,6)#B(0,5);F(5,0);L(1,4);X(3,0)",
        )
        .unwrap();
        assert!(level.board.is_wall(Point::new(2, 2)));
        assert!(level.board.is_wall(Point::new(3, 3)));
        assert!(!level.board.is_wall(Point::new(4, 4)));
        assert!(level.board.is_wall(Point::new(5, 5)));
        assert_eq!(
            level.board.cell(Point::new(5, 0)),
            Cell::Boost {
                kind: Boost::FastWheels,
                painted: false
            }
        );
        assert_eq!(
            level.board.cell(Point::new(3, 0)),
            Cell::Boost {
                kind: Boost::Mystery,
                painted: false
            }
        );
        assert_eq!(level.state.unpainted(), level.board.unpainted_count());
    }

    #[test]
    fn whitespace_around_descriptor() {
        assert!(parse("\n(0,0),(2,0),(2,2),(0,2)#(0,0)##\n").is_ok());
    }

    #[test]
    fn failures() {
        assert_failure("", ParserErr::EmptyBoundary);
        assert_failure("(0,0),(2,0),(2,2),(0,2)", ParserErr::MissingField("start"));
        assert_failure(
            "(0,0),(2,0),(2,x),(0,2)#(0,0)##",
            ParserErr::Point("(2,x),(0,2)".to_string()),
        );
        assert_failure("(0,0),(2,0),(2,2),(0,2)#(0,0)##Z(1,1)", ParserErr::BoostLetter('Z'));
        assert_failure(
            "(0,0),(2,0),(2,2),(0,2)#(5,0)##",
            ParserErr::StartOutOfBounds(Point::new(5, 0)),
        );
        assert_failure(
            "(0,0),(2,0),(2,2),(0,2)#(0,0)##B(2,2)",
            ParserErr::BoostOutOfBounds(Point::new(2, 2)),
        );
        assert_failure(
            "(0,0),(2,0),(2,2),(0,2)#(-1,0)##",
            ParserErr::NegativeCoordinate(Point::new(-1, 0)),
        );
        assert_failure(
            "(0,0),(3,0),(3,3),(0,3)#(1,1)#(1,1),(2,1),(2,2),(1,2)#",
            ParserErr::StartInWall(Point::new(1, 1)),
        );
    }

    #[test]
    fn parsing_points() {
        assert_eq!("(3,-4)".parse::<Point>(), Ok(Point::new(3, -4)));
        assert_eq!(" ( 1, 2 ) ".parse::<Point>(), Ok(Point::new(1, 2)));
        assert!("(1,2".parse::<Point>().is_err());
        assert!("(1,2,3)".parse::<Point>().is_err());
        assert!("(1,2)x".parse::<Point>().is_err());
    }

    #[test]
    fn parsing_moves() {
        let s = "WASDEQFLB(1,-2)RT(3,4)";
        let moves: Moves = s.parse().unwrap();
        assert_eq!(moves.len(), 11);
        assert_eq!(moves.to_string(), s);
        assert_eq!("".parse::<Moves>(), Ok(Moves::default()));
        assert_eq!("WX".parse::<Moves>(), Err(ParserErr::CommandLetter('X')));
        assert!("B(1,".parse::<Moves>().is_err());
    }

    #[test]
    fn errors_display() {
        assert_eq!(ParserErr::BoostLetter('Z').to_string(), "Unknown boost: Z");
        assert_eq!(
            ParserErr::StartInWall(Point::new(1, 1)).to_string(),
            "Start inside a wall: (1,1)"
        );
    }

    fn assert_failure(descriptor: &str, expected_err: ParserErr) {
        assert_eq!(descriptor.parse::<Level>().unwrap_err(), expected_err);
    }
}
