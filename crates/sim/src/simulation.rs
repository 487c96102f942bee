//! # Simulation engine
//!
//! [`Simulation`] owns the ball population, the parallel owner array, the
//! registered chamber programs and the derived grid topology, and advances
//! them in fixed ticks of [`STEP_LEN_NS`] nanoseconds.
//!
//! ## Tick order
//!
//! A tick integrates every ball, wraps positions and owners back into the
//! unit cell, then walks the chambers in ascending index order. For each
//! cell it assembles the local view, delegates to the chamber program (if
//! one is registered for that cell), resolves pairwise collisions inside the
//! view, and writes the adjusted balls back. The tick always completes;
//! chamber failures are logged and absorbed.
//!
//! ## Determinism
//!
//! Ball layout is a pure function of the seed, and ticks are strictly
//! serial, so the same seed and chamber sequence reproduce the same ball
//! array after any number of ticks (modulo platform floating point). The
//! seed and the tick count are exposed for replay harnesses.

use std::time::Duration;

use crate::chamber::Chamber;
use crate::collision::apply_ball_collision;
use crate::error::SimError;
use crate::layout::ChamberLayout;
use crate::steps::integration::integrate;
use crate::steps::view::{assemble_view, write_back, AdjustedBall};
use crate::steps::wrap::apply_wrap;
use crate::types::{
    Ball, Point2, Vec2, BALL_RADIUS, CHAMBER_HEIGHT, MAX_CHAMBERS, NUM_BALLS, STEP_DT, STEP_LEN_NS,
};

/// The chambered ball simulation.
///
/// Balls and owners are parallel arrays of [`NUM_BALLS`] entries. They are
/// public for inspection by drivers and test harnesses but are meant to be
/// mutated only by [`tick`](Self::tick).
pub struct Simulation {
    /// Ball population, positions in each ball's owning chamber's frame.
    pub balls: Vec<Ball>,
    /// Owning chamber index per ball, parallel to `balls`.
    pub owners: Vec<usize>,
    chambers: Vec<Box<dyn Chamber>>,
    layout: ChamberLayout,
    seed: u64,
    num_steps_taken: u64,
    // Scratch reused across ticks to keep the per-tick allocation count at
    // zero once the buffers have grown to steady state.
    view: Vec<AdjustedBall>,
    chamber_balls: Vec<Ball>,
}

impl Simulation {
    /// Creates a simulation with a deterministic ball layout drawn from
    /// `seed` and no chambers.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut sim = Self {
            balls: Vec::with_capacity(NUM_BALLS),
            owners: Vec::with_capacity(NUM_BALLS),
            chambers: Vec::new(),
            layout: ChamberLayout::new(0),
            seed,
            num_steps_taken: 0,
            view: Vec::new(),
            chamber_balls: Vec::new(),
        };
        sim.spawn_balls();
        sim
    }

    /// Reseeds the ball population in place.
    ///
    /// Chambers and the step counter are untouched; a paced driver keeps its
    /// wall-clock cadence across a reset.
    pub fn reset(&mut self) {
        self.spawn_balls();
    }

    fn spawn_balls(&mut self) {
        let mut rng = fastrand::Rng::with_seed(self.seed);
        self.balls.clear();
        self.owners.clear();
        for _ in 0..NUM_BALLS {
            // Upper half of the cell, clear of the wrap boundaries, at rest.
            let x = BALL_RADIUS + rng.f32() * (1.0 - 2.0 * BALL_RADIUS);
            let y = CHAMBER_HEIGHT * 0.5 + rng.f32() * (CHAMBER_HEIGHT * 0.5 - BALL_RADIUS);
            self.balls
                .push(Ball::new(Point2::new(x, y), Vec2::new(0.0, 0.0)));
            self.owners.push(0);
        }
    }

    /// Registers a chamber program, invoking its `init` with the ball count.
    ///
    /// Returns the chamber's cell index. The topology re-derives from the
    /// new count; a partially filled row is padded with empty cells.
    ///
    /// # Errors
    ///
    /// [`SimError::ChamberCapacity`] when the deployment limit is reached;
    /// the simulation state is unchanged and `init` is not called.
    pub fn add_chamber(&mut self, mut chamber: Box<dyn Chamber>) -> Result<usize, SimError> {
        if self.chambers.len() >= MAX_CHAMBERS {
            return Err(SimError::ChamberCapacity {
                limit: MAX_CHAMBERS,
            });
        }
        chamber.init(self.balls.len() as u32);
        let index = self.chambers.len();
        self.chambers.push(chamber);
        self.layout = ChamberLayout::new(self.chambers.len());
        Ok(index)
    }

    /// Padded chamber count of the current layout.
    #[must_use]
    pub fn num_chambers(&self) -> usize {
        self.layout.num_chambers()
    }

    /// Seed the ball layout was drawn from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ticks advanced since construction.
    #[must_use]
    pub fn num_steps_taken(&self) -> u64 {
        self.num_steps_taken
    }

    /// The grid topology derived from the registered chambers.
    #[must_use]
    pub fn layout(&self) -> &ChamberLayout {
        &self.layout
    }

    /// Advances the simulation by one fixed step.
    ///
    /// Never fails: chamber-program errors and non-finite ball states are
    /// logged, their effects discarded, and the tick runs to completion.
    pub fn tick(&mut self) {
        let dt = STEP_DT;

        integrate(&mut self.balls, dt);
        apply_wrap(&mut self.balls, &mut self.owners, &self.layout);

        for target in 0..self.layout.num_chambers() {
            assemble_view(
                target,
                &self.balls,
                &self.owners,
                &self.layout,
                &mut self.view,
            );

            // Padded cells have no program; their views still collide below.
            if let Some(chamber) = self.chambers.get_mut(target) {
                self.chamber_balls.clear();
                self.chamber_balls
                    .extend(self.view.iter().map(|entry| entry.adjusted));
                match chamber.step(&mut self.chamber_balls, dt) {
                    Ok(()) => {
                        for (entry, ball) in self.view.iter_mut().zip(&self.chamber_balls) {
                            entry.adjusted = *ball;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            chamber = target,
                            error = %err,
                            "chamber step failed; discarding its view"
                        );
                    }
                }
            }

            // Pairwise collisions over the local view, ascending (k, j).
            for k in 0..self.view.len() {
                let (head, tail) = self.view.split_at_mut(k + 1);
                let first = &mut head[k];
                for other in tail.iter_mut() {
                    apply_ball_collision(&mut first.adjusted, &mut other.adjusted);
                }
            }

            write_back(&self.view, &mut self.balls);
        }

        self.num_steps_taken += 1;
    }

    /// Catches the simulation up to `elapsed` of wall-clock time, ticking
    /// until `num_steps_taken * STEP_LEN_NS` covers it. Returns the number
    /// of ticks taken; there is no frame dropping.
    pub fn step_by(&mut self, elapsed: Duration) -> u64 {
        let elapsed_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        let mut ticked = 0;
        while self.num_steps_taken * STEP_LEN_NS < elapsed_ns {
            self.tick();
            ticked += 1;
        }
        ticked
    }
}
