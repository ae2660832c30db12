//! # mars-rover
//!
//! A rover driving over a wrap-around grid of obstacles, steered by single-letter
//! commands (`F`, `B`, `L`, `R`), with observers notified after every action.
//!
//! The [`Grid`] wraps horizontally like a cylinder and treats its top and bottom
//! edges as poles: crossing one lands on the opposite edge with the heading
//! forced North or South. A [`Rover`] borrows the grid read-only, so several
//! rovers may share one. A move into an obstacle leaves the rover in place,
//! fires a [`Event::Collision`] notification and ends the current command run.
//!
//! Random setup (obstacles, scripts, starting pose) lives in [`generate`] and
//! always takes an explicit RNG. [`ConsoleDisplay`] is a ready-made observer
//! that draws the grid to a terminal.

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod generate;
pub mod grid;
pub mod observer;
pub mod rover;

pub use command::*;
pub use config::*;
pub use display::*;
pub use error::*;
pub use generate::*;
pub use grid::*;
pub use observer::*;
pub use rover::*;
