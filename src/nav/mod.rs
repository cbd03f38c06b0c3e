//! Screen navigation core: registry, transitions, menu widgets and the
//! background work tied to the active player

pub mod command;
pub mod controller;
pub mod error;
pub mod factory;
pub mod listeners;
pub mod player;
pub mod polling;
pub mod registry;
pub mod screen;
pub mod session;
pub mod state;
pub mod timer;
pub mod widgets;

pub use command::{Command, CommandQueue};
pub use controller::NavigationController;
pub use error::NavError;
pub use factory::{FactoryRegistry, ScreenFactory};
pub use listeners::{Listener, ListenerKey, ListenerMap};
pub use player::{PlayerLifecycle, TrackListCache};
pub use polling::PositionPoller;
pub use registry::{Lookup, ScreenRegistry};
pub use screen::{Capabilities, InputEvent, Screen, ScreenView};
pub use session::{PlayerState, Session, SessionState};
pub use state::{StateObject, StateValue};
pub use timer::{SleepTimer, TimerAction};
