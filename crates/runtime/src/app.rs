//! Wall-clock paced driver.
//!
//! The simulation sits behind one exclusive lock. A driver thread owns the
//! pacing: it locks, catches the tick count up to the elapsed wall clock,
//! unlocks, and naps for about one step length. The main thread takes the
//! same lock to register chambers and to report progress, and raises a
//! relaxed atomic flag when it wants the driver to exit between ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use sim::types::{CHAMBERS_PER_ROW, STEP_LEN_NS};
use sim::{Ball, Chamber, ChamberError, Point2, Simulation, Surface};

/// Demo chamber: a slightly tilted platform the balls rain onto.
///
/// Implemented the way an external chamber program would be, with the
/// surface kernel doing the bouncing.
struct Platform {
    surface: Surface,
    bounces: u64,
}

impl Platform {
    fn new(left_y: f32, right_y: f32) -> Self {
        // Wider than the cell so balls never straddle an endpoint.
        Self {
            surface: Surface::new(Point2::new(-0.5, left_y), Point2::new(1.5, right_y)),
            bounces: 0,
        }
    }
}

impl Chamber for Platform {
    fn init(&mut self, num_balls: u32) {
        tracing::info!(num_balls, "platform chamber initialized");
    }

    fn step(&mut self, balls: &mut [Ball], dt: f32) -> Result<(), ChamberError> {
        for ball in balls.iter_mut() {
            if self.surface.push_ball(ball, dt) {
                self.bounces += 1;
                if self.bounces % 500 == 0 {
                    tracing::debug!(bounces = self.bounces, "platform bounce milestone");
                }
            }
        }
        Ok(())
    }
}

pub fn run(seed: u64, run_for: Duration) -> Result<()> {
    tracing_subscriber::fmt::init();

    let simulation = Arc::new(Mutex::new(Simulation::new(seed)));
    {
        let mut sim = lock(&simulation)?;
        for _ in 0..CHAMBERS_PER_ROW {
            sim.add_chamber(Box::new(Platform::new(0.1, 0.15)))?;
        }
        tracing::info!(
            seed,
            chambers = sim.num_chambers(),
            balls = sim.balls.len(),
            "simulation initialized"
        );
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let driver = thread::spawn({
        let simulation = Arc::clone(&simulation);
        let shutdown = Arc::clone(&shutdown);
        move || {
            let start = Instant::now();
            while !shutdown.load(Ordering::Relaxed) {
                {
                    let Ok(mut sim) = simulation.lock() else { break };
                    sim.step_by(start.elapsed());
                }
                // Caught up; nap for about one step.
                thread::sleep(Duration::from_nanos(STEP_LEN_NS));
            }
        }
    });

    let report_every = Duration::from_millis(500);
    let mut remaining = run_for;
    while remaining > Duration::ZERO {
        let nap = report_every.min(remaining);
        thread::sleep(nap);
        remaining = remaining.saturating_sub(nap);

        let sim = lock(&simulation)?;
        let ball = sim.balls[0];
        tracing::info!(
            steps = sim.num_steps_taken(),
            x = f64::from(ball.pos.x),
            y = f64::from(ball.pos.y),
            owner = sim.owners[0],
            "simulation progress"
        );
    }

    shutdown.store(true, Ordering::Relaxed);
    driver
        .join()
        .map_err(|_| anyhow!("driver thread panicked"))?;

    let sim = lock(&simulation)?;
    tracing::info!(steps = sim.num_steps_taken(), "simulation finished");
    for (i, ball) in sim.balls.iter().enumerate() {
        tracing::info!(
            ball = i,
            x = f64::from(ball.pos.x),
            y = f64::from(ball.pos.y),
            "final ball position"
        );
    }
    Ok(())
}

fn lock(simulation: &Mutex<Simulation>) -> Result<MutexGuard<'_, Simulation>> {
    simulation
        .lock()
        .map_err(|_| anyhow!("simulation lock poisoned"))
}
