//! Rover state and the motion primitives that drive it.

use crate::command::{Command, parse_commands};
use crate::error::{GridError, ParseSymbolError};
use crate::grid::Grid;
use crate::observer::{Event, Movement, RoverObserver};
use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, trace};

/// One of the four compass directions the rover can face.
///
/// Row 0 is the northern edge, so North decreases `y` and South increases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Ordered as a left-turn cycle: each entry is a left turn from the previous.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::West, Heading::South, Heading::East];

    /// Unit step taken by a forward move.
    pub fn step(self) -> IVec2 {
        match self {
            Self::North => IVec2::NEG_Y,
            Self::East => IVec2::X,
            Self::South => IVec2::Y,
            Self::West => IVec2::NEG_X,
        }
    }

    /// A quarter turn counter-clockwise: N → W → S → E → N.
    pub fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// A quarter turn clockwise: N → E → S → W → N.
    pub fn right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn opposite(self) -> Self {
        self.left().left()
    }

    pub fn symbol(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parses `N`, `E`, `S` or `W`, ignoring case.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Heading {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let parsed = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_symbol(c),
            _ => None,
        };
        parsed.ok_or_else(|| ParseSymbolError {
            kind: "heading",
            symbol: s.to_owned(),
        })
    }
}

/// A snapshot of the rover: where it is and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoverState {
    pub x: u32,
    pub y: u32,
    pub heading: Heading,
}

impl RoverState {
    pub fn new(x: u32, y: u32, heading: Heading) -> Self {
        Self { x, y, heading }
    }

    pub fn position(&self) -> UVec2 {
        UVec2::new(self.x, self.y)
    }
}

impl fmt::Display for RoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) facing {}", self.x, self.y, self.heading)
    }
}

/// Why a command run stopped early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collision {
    /// Index of the blocked command within the parsed sequence.
    pub index: usize,
    pub command: Command,
    /// The obstacle cell the rover tried to enter, after wrapping.
    pub blocked: (u32, u32),
}

/// Outcome of [`Rover::execute`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Commands carried out before the run ended.
    pub applied: usize,
    /// Set when a move hit an obstacle and the remaining commands were dropped.
    pub collision: Option<Collision>,
}

impl ExecutionReport {
    /// True if every command was applied.
    pub fn completed(&self) -> bool {
        self.collision.is_none()
    }
}

/// A rover driving over a shared, read-only [`Grid`].
///
/// Every move attempt and every turn is reported to all registered observers,
/// in registration order, before the primitive returns.
pub struct Rover<'a> {
    state: RoverState,
    grid: &'a Grid,
    observers: Vec<Box<dyn RoverObserver + 'a>>,
}

impl<'a> Rover<'a> {
    /// Places a rover at `start` facing `heading`.
    ///
    /// No wrapping is applied; a start outside the grid is rejected.
    pub fn new(start: (u32, u32), heading: Heading, grid: &'a Grid) -> Result<Self, GridError> {
        let (x, y) = start;
        if !grid.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(Self {
            state: RoverState::new(x, y, heading),
            grid,
            observers: Vec::new(),
        })
    }

    /// Appends an observer. There is no removal; the rover keeps it until dropped.
    pub fn add_observer(&mut self, observer: impl RoverObserver + 'a) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn state(&self) -> RoverState {
        self.state
    }

    pub fn x(&self) -> u32 {
        self.state.x
    }

    pub fn y(&self) -> u32 {
        self.state.y
    }

    pub fn heading(&self) -> Heading {
        self.state.heading
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Moves one cell along the heading. Returns false, without moving, if the
    /// target cell holds an obstacle.
    pub fn move_forward(&mut self) -> bool {
        self.step(self.state.heading.step(), Movement::Forward).is_ok()
    }

    /// Moves one cell against the heading. Returns false, without moving, if
    /// the target cell holds an obstacle.
    pub fn move_backward(&mut self) -> bool {
        self.step(-self.state.heading.step(), Movement::Backward).is_ok()
    }

    pub fn turn_left(&mut self) {
        self.state.heading = self.state.heading.left();
        debug!(state = %self.state, "turned left");
        self.notify(Some(Movement::Left), None);
    }

    pub fn turn_right(&mut self) {
        self.state.heading = self.state.heading.right();
        debug!(state = %self.state, "turned right");
        self.notify(Some(Movement::Right), None);
    }

    /// Runs a command string such as `"ffrbl"`.
    ///
    /// Symbols are case-insensitive. Anything other than `F`, `B`, `L`, `R` is
    /// skipped without touching the rover or its observers. Processing stops
    /// at the first move that hits an obstacle; the report's collision index
    /// counts recognized commands only.
    pub fn execute_commands(&mut self, commands: &str) -> ExecutionReport {
        if tracing::enabled!(tracing::Level::TRACE) {
            for symbol in commands.chars().filter(|c| Command::from_symbol(*c).is_none()) {
                trace!(?symbol, "ignoring unrecognized command symbol");
            }
        }
        self.execute(parse_commands(commands))
    }

    /// Runs a typed command sequence, stopping at the first collision.
    pub fn execute(&mut self, commands: impl IntoIterator<Item = Command>) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        for (index, command) in commands.into_iter().enumerate() {
            let outcome = match command {
                Command::Forward => self.step(self.state.heading.step(), Movement::Forward),
                Command::Backward => self.step(-self.state.heading.step(), Movement::Backward),
                Command::TurnLeft => {
                    self.turn_left();
                    Ok(())
                }
                Command::TurnRight => {
                    self.turn_right();
                    Ok(())
                }
            };

            if let Err(blocked) = outcome {
                report.collision = Some(Collision {
                    index,
                    command,
                    blocked,
                });
                break;
            }
            report.applied += 1;
        }

        report
    }

    /// Attempts a one-cell move by `delta`. On collision returns the blocked
    /// cell and leaves the state untouched.
    fn step(&mut self, delta: IVec2, movement: Movement) -> Result<(), (u32, u32)> {
        // Grid dimensions fit in i32, so in-bounds coordinates do too.
        let current = IVec2::new(self.state.x as i32, self.state.y as i32);
        let target = current + delta;
        let (x, y, heading) = self.grid.wrap(target.x, target.y, self.state.heading);

        if self.grid.is_obstacle(x, y) {
            info!(state = %self.state, x, y, %movement, "collision avoided");
            self.notify(Some(movement), Some(Event::Collision));
            return Err((x, y));
        }

        self.state = RoverState::new(x, y, heading);
        debug!(state = %self.state, %movement, "moved");
        self.notify(Some(movement), None);
        Ok(())
    }

    fn notify(&mut self, movement: Option<Movement>, event: Option<Event>) {
        let state = self.state;
        for observer in &mut self.observers {
            observer.notify(&state, movement, event);
        }
    }
}

impl fmt::Debug for Rover<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rover")
            .field("state", &self.state)
            .field("grid", &(self.grid.width(), self.grid.height()))
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;

    fn open_grid() -> Grid {
        Grid::new(25, 25).unwrap()
    }

    #[test]
    fn heading_parses_case_insensitively() {
        assert_eq!("n".parse::<Heading>(), Ok(Heading::North));
        assert_eq!("E".parse::<Heading>(), Ok(Heading::East));
        assert_eq!("s".parse::<Heading>(), Ok(Heading::South));
        assert_eq!("W".parse::<Heading>(), Ok(Heading::West));
        assert!("X".parse::<Heading>().is_err());
        assert!("NE".parse::<Heading>().is_err());
    }

    #[test]
    fn initial_state_is_kept_verbatim() {
        let grid = open_grid();
        for (x, y, heading) in [
            (0, 0, Heading::North),
            (5, 5, Heading::East),
            (10, 10, Heading::South),
            (15, 15, Heading::West),
        ] {
            let rover = Rover::new((x, y), heading, &grid).unwrap();
            assert_eq!(rover.state(), RoverState::new(x, y, heading));
        }
    }

    #[test]
    fn start_outside_grid_is_rejected() {
        let grid = open_grid();
        assert!(matches!(
            Rover::new((25, 0), Heading::North, &grid),
            Err(GridError::OutOfBounds { x: 25, y: 0, .. })
        ));
    }

    #[test]
    fn forward_moves_along_heading() {
        let grid = open_grid();
        for (start, heading, expected) in [
            ((0, 1), Heading::North, (0, 0)),
            ((5, 5), Heading::East, (6, 5)),
            ((10, 10), Heading::South, (10, 11)),
            ((15, 15), Heading::West, (14, 15)),
        ] {
            let mut rover = Rover::new(start, heading, &grid).unwrap();
            assert!(rover.move_forward());
            assert_eq!((rover.x(), rover.y()), expected);
            assert_eq!(rover.heading(), heading);
        }
    }

    #[test]
    fn backward_moves_against_heading() {
        let grid = open_grid();
        for (start, heading, expected) in [
            ((0, 0), Heading::North, (0, 1)),
            ((5, 5), Heading::East, (4, 5)),
            ((10, 10), Heading::South, (10, 9)),
            ((15, 15), Heading::West, (16, 15)),
        ] {
            let mut rover = Rover::new(start, heading, &grid).unwrap();
            assert!(rover.move_backward());
            assert_eq!((rover.x(), rover.y()), expected);
            assert_eq!(rover.heading(), heading);
        }
    }

    #[test]
    fn turns_follow_the_compass() {
        let grid = open_grid();
        for (heading, left, right) in [
            (Heading::North, Heading::West, Heading::East),
            (Heading::West, Heading::South, Heading::North),
            (Heading::South, Heading::East, Heading::West),
            (Heading::East, Heading::North, Heading::South),
        ] {
            let mut rover = Rover::new((0, 0), heading, &grid).unwrap();
            rover.turn_left();
            assert_eq!(rover.heading(), left);

            let mut rover = Rover::new((0, 0), heading, &grid).unwrap();
            rover.turn_right();
            assert_eq!(rover.heading(), right);
            assert_eq!((rover.x(), rover.y()), (0, 0));
        }
    }

    #[test]
    fn heading_cycle_order() {
        for pair in Heading::ALL.windows(2) {
            assert_eq!(pair[0].left(), pair[1]);
        }
        for heading in Heading::ALL {
            assert_eq!(heading.step(), -heading.opposite().step());
        }
    }

    #[test]
    fn backward_over_the_pole_flips_heading() {
        let grid = Grid::new(10, 10).unwrap();
        // Facing South, backing up steps north past row 0.
        let mut rover = Rover::new((4, 0), Heading::South, &grid).unwrap();
        assert!(rover.move_backward());
        assert_eq!(rover.state(), RoverState::new(4, 9, Heading::North));
    }

    #[test]
    fn collision_reports_blocked_cell_and_stops() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_obstacle(3, 2).unwrap();
        let mut log = RecordingObserver::new();
        let mut rover = Rover::new((1, 2), Heading::East, &grid).unwrap();
        rover.add_observer(&mut log);

        let report = rover.execute_commands("ffflf");
        assert_eq!(report.applied, 1);
        assert_eq!(
            report.collision,
            Some(Collision {
                index: 1,
                command: Command::Forward,
                blocked: (3, 2),
            })
        );
        assert_eq!(rover.state(), RoverState::new(2, 2, Heading::East));
        drop(rover);

        assert_eq!(log.notifications.len(), 2);
        assert_eq!(log.collisions(), 1);
    }

    #[test]
    fn unknown_symbols_do_not_notify() {
        let grid = open_grid();
        let mut log = RecordingObserver::new();
        let mut rover = Rover::new((3, 3), Heading::North, &grid).unwrap();
        rover.add_observer(&mut log);

        let report = rover.execute_commands("x?z ");
        assert_eq!(report, ExecutionReport::default());
        assert!(report.completed());
        assert_eq!(rover.state(), RoverState::new(3, 3, Heading::North));
        drop(rover);
        assert!(log.notifications.is_empty());
    }
}
