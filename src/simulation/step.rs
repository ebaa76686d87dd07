/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{info, trace, warn};
use std::time::Instant;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{Config, SimulationConfig};
use crate::elevator::{CarPhaseController, MotionIntegrator};
use crate::render::Frame;
use crate::shared::{ElevatorSeed, ElevatorState};
use crate::simulation::clock::Clock;
use crate::simulation::random::{RandomSource, SimRng};

/**
 * Everything one run of the simulation owns.
 *
 * The elevator collection, the clock reference and the pause flag live here
 * and are only touched through `&mut self`, so the scheduler that owns the
 * `Simulation` is the single writer.
 *
 * # Fields
 * - `elevators`:   One state per car, in slot order. Length is fixed.
 * - `clock`:       Reference point for measuring each tick's step.
 * - `paused`:      When set, `tick` is a no-op.
 * - `ticks`:       Number of ticks that advanced the simulation.
 * - `motion`:      Physics stage.
 * - `controller`:  Door and phase stage.
 * - `rng`:         Source for target draws and dwell rolls.
 */
pub struct Simulation<R: RandomSource = SimRng> {
    elevators: Vec<ElevatorState>,
    clock: Clock,
    paused: bool,
    ticks: u64,
    motion: MotionIntegrator,
    controller: CarPhaseController,
    rng: R,
}

impl Simulation<SimRng> {
    /// Builds the production simulation; a missing seed is drawn from entropy.
    pub fn from_config(config: &Config, now: Instant) -> Simulation<SimRng> {
        let rng = match config.simulation.seed {
            Some(seed) => {
                info!("Seeding random source with {}", seed);
                SimRng::from_seed_u64(seed)
            }
            None => SimRng::from_entropy(),
        };

        let mut simulation = Simulation::new(&config.simulation, &config.elevators, rng, now);
        simulation.paused = config.scheduler.start_paused;
        simulation
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(config: &SimulationConfig, seeds: &[ElevatorSeed], rng: R, now: Instant) -> Simulation<R> {
        Simulation {
            elevators: seeds.iter().map(ElevatorState::from).collect(),
            clock: Clock::new(now, config.max_step_secs),
            paused: false,
            ticks: 0,
            motion: MotionIntegrator::new(config),
            controller: CarPhaseController::new(config),
            rng,
        }
    }

    /// Advances every car by `dt` seconds: physics first, then doors and phases.
    pub fn step(&mut self, dt: f64) {
        self.motion.integrate(&mut self.elevators, dt);
        self.controller.update(&mut self.elevators, dt, &mut self.rng);
    }

    /// Runs one scheduled tick sampled at `now`. Returns `false` when paused.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.paused {
            return false;
        }

        let dt = self.clock.elapsed(now);
        if dt >= self.clock.max_step_secs() {
            warn!("Tick {} capped at {}s", self.ticks, dt);
        }
        trace!("Tick {}: dt = {:.4}s", self.ticks, dt);

        self.step(dt);
        self.clock.reset(now);
        self.ticks += 1;
        true
    }

    /// Flips the pause flag. The clock reference is reset so that the first
    /// tick after resuming does not simulate the time spent paused.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        self.paused = !self.paused;
        self.clock.reset(now);
        if self.paused {
            info!("Paused at tick {}", self.ticks);
        } else {
            info!("Resumed at tick {}", self.ticks);
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elevators(&self) -> &[ElevatorState] {
        &self.elevators
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tick: self.ticks,
            paused: self.paused,
            elevators: &self.elevators,
        }
    }

    #[cfg(test)]
    pub fn elevators_mut(&mut self) -> &mut [ElevatorState] {
        &mut self.elevators
    }
}
