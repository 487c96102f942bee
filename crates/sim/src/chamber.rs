//! The external chamber capability.
//!
//! A chamber is an opaque program that perturbs the balls intersecting its
//! grid cell. The engine never inspects a chamber's internals; the sandbox
//! host that loads, meters and isolates chamber programs lives outside this
//! crate and hands the engine a boxed [`Chamber`] implementation.

use thiserror::Error;

use crate::types::Ball;

/// Failure modes of an untrusted chamber program's `step`.
///
/// All of these are best-effort from the engine's point of view: the tick
/// logs the error, discards the chamber's effect on its view, and continues.
#[derive(Error, Debug)]
pub enum ChamberError {
    /// The program crashed or raised a trap inside the sandbox.
    #[error("chamber program trapped: {0}")]
    Trap(String),
    /// The sandbox host cut the call off at its execution-time budget.
    #[error("chamber program exceeded its time budget")]
    Timeout,
    /// The program exceeded a sandbox resource limit.
    #[error("chamber program exceeded its resource budget")]
    ResourceLimit,
}

/// Capability exposed by a chamber program.
///
/// `Send` because producer threads may register chambers while a driver
/// thread holds the simulation on another thread.
pub trait Chamber: Send {
    /// Called once when the chamber joins the simulation.
    fn init(&mut self, num_balls: u32);

    /// Called once per tick with the balls overlapping this chamber, in the
    /// chamber's local coordinate frame.
    ///
    /// The callee may mutate positions, radii and velocities. The slice type
    /// makes the contract that the view's length and ordering are fixed
    /// structural. On `Err`, the engine proceeds as if the call had been a
    /// no-op.
    fn step(&mut self, balls: &mut [Ball], dt: f32) -> Result<(), ChamberError>;
}
