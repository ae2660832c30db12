//! Observer hooks notified after every rover action.

use crate::rover::RoverState;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The kind of action that triggered a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

impl Movement {
    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Backward => "Backward",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something noteworthy that happened during an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// The move target held an obstacle; the rover stayed put.
    Collision,
}

impl Event {
    pub fn label(self) -> &'static str {
        match self {
            Self::Collision => "collision",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A sink for rover notifications.
///
/// The rover calls [`notify`](Self::notify) exactly once per move attempt or
/// turn, synchronously and in registration order, before the action returns.
/// Observers only see a snapshot, so they cannot drive the rover themselves.
pub trait RoverObserver {
    fn notify(&mut self, rover: &RoverState, movement: Option<Movement>, event: Option<Event>);
}

impl<T: RoverObserver + ?Sized> RoverObserver for &mut T {
    fn notify(&mut self, rover: &RoverState, movement: Option<Movement>, event: Option<Event>) {
        (**self).notify(rover, movement, event);
    }
}

/// Shared handle, for callers that want to keep reading the observer while
/// the rover holds it.
impl<T: RoverObserver + ?Sized> RoverObserver for Rc<RefCell<T>> {
    fn notify(&mut self, rover: &RoverState, movement: Option<Movement>, event: Option<Event>) {
        self.borrow_mut().notify(rover, movement, event);
    }
}

/// One recorded notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub state: RoverState,
    pub movement: Option<Movement>,
    pub event: Option<Event>,
}

/// An observer that keeps every notification it receives, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub notifications: Vec<Notification>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications flagged as collisions.
    pub fn collisions(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.event == Some(Event::Collision))
            .count()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

impl RoverObserver for RecordingObserver {
    fn notify(&mut self, rover: &RoverState, movement: Option<Movement>, event: Option<Event>) {
        self.notifications.push(Notification {
            state: *rover,
            movement,
            event,
        });
    }
}
