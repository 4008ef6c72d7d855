#![forbid(unsafe_code)]

pub mod model;
pub mod navigation;
pub mod progression;
pub mod time;

pub use progression::{Badge, Progression};
pub use time::Clock;
