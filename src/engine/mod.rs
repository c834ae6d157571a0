//! Turn sequencing, rule resolution, and run reporting.

mod event;
mod observer;
mod result;
pub mod rules;
mod turn;

pub use event::{GameEvent, ScoreCause};
pub use observer::{Observer, Snapshot, TracingObserver};
pub use result::{Outcome, SimulationResult};
pub use turn::{Phase, TurnEngine};
