//! Console renderer for the rover and its grid.

use crate::grid::Grid;
use crate::observer::{Event, Movement, RoverObserver};
use crate::rover::RoverState;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tracing::warn;

const ROVER: &str = "🤖";
const ROCK: &str = "🪨 ";
const EMPTY: &str = "  ";

/// ANSI "clear screen, cursor home".
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Draws a full frame of the grid after every notification.
///
/// Each frame is one line per grid row, followed by a status line with the
/// rover's position, heading and last movement, plus a warning when a move was
/// blocked. Write failures are logged and otherwise ignored so that a closed
/// terminal never stops the simulation.
pub struct ConsoleDisplay<'g, W: Write> {
    grid: &'g Grid,
    out: W,
    clear_screen: bool,
    frame_delay: Option<Duration>,
}

impl<'g> ConsoleDisplay<'g, io::Stdout> {
    /// A display writing to standard output.
    pub fn stdout(grid: &'g Grid) -> Self {
        Self::new(grid, io::stdout())
    }
}

impl<'g, W: Write> ConsoleDisplay<'g, W> {
    /// A display writing to `out`, without screen clearing or frame delay.
    pub fn new(grid: &'g Grid, out: W) -> Self {
        Self {
            grid,
            out,
            clear_screen: false,
            frame_delay: None,
        }
    }

    /// Emits an ANSI clear before every frame.
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Sleeps after every frame. A zero duration disables the delay.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = (!delay.is_zero()).then_some(delay);
        self
    }

    /// Writes one frame.
    pub fn render(
        &mut self,
        rover: &RoverState,
        movement: Option<Movement>,
        event: Option<Event>,
    ) -> io::Result<()> {
        let mut frame = String::new();
        if self.clear_screen {
            frame.push_str(CLEAR);
        }

        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                frame.push_str(if rover.x == x && rover.y == y {
                    ROVER
                } else if self.grid.is_obstacle(x, y) {
                    ROCK
                } else {
                    EMPTY
                });
            }
            frame.push('\n');
        }

        let movement = movement.map_or("None", Movement::label);
        frame.push_str(&format!(
            "\nRover Position: ({:03}, {:03})   Direction: {}   Movement: {}\n\n",
            rover.x, rover.y, rover.heading, movement
        ));
        if event == Some(Event::Collision) {
            frame.push_str("⚠️  Collision avoided with an obstacle!\n");
        }

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RoverObserver for ConsoleDisplay<'_, W> {
    fn notify(&mut self, rover: &RoverState, movement: Option<Movement>, event: Option<Event>) {
        if let Err(err) = self.render(rover, movement, event) {
            warn!(%err, "failed to render frame");
        }
        if let Some(delay) = self.frame_delay {
            thread::sleep(delay);
        }
    }
}
