#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chamber;
pub mod collision;
pub mod error;
pub mod layout;
pub mod simulation;
pub mod steps;
pub mod types;

pub use chamber::{Chamber, ChamberError};
pub use collision::{apply_ball_collision, apply_collision, Surface};
pub use error::SimError;
pub use layout::ChamberLayout;
pub use simulation::Simulation;
pub use steps::view::{AdjustedBall, SourceDirection};
pub use types::{Ball, Point2, Vec2};
