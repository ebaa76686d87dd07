use crate::config::SimulationConfig;
use crate::shared::{CarPhase, ElevatorState};
use crate::simulation::random::{self, RandomSource};
use log::debug;

/**
 * Drives the door and phase state machine of every car.
 *
 * Runs after the `MotionIntegrator` each tick. The rules are checked in a
 * fixed order and each one sees what the previous one did, so a car can move
 * through more than one phase in a single tick:
 *
 * - `Opening`: door opens; at exactly 1 the car is `Arrived`.
 * - `Closing`: door closes; at exactly 0 the car is `Moving` towards a new
 *   random target.
 * - `Arrived`: with `close_probability` per tick, start `Closing`.
 * - `Moving`: when close enough and slow enough, snap onto the target and
 *   start `Opening`.
 *
 * # Fields
 * - `n_floors`:                 Upper bound for target draws.
 * - `visible_floors_only`:      Exclude the line above the top floor from target draws.
 * - `door_speed`:               Door travel per second.
 * - `arrival_tolerance`:        Maximum altitude error at arrival.
 * - `arrival_speed_tolerance`:  Maximum speed at arrival.
 * - `close_probability`:        Per-tick chance of leaving `Arrived`.
 */
#[derive(Debug, Clone, Copy)]
pub struct CarPhaseController {
    n_floors: u32,
    visible_floors_only: bool,
    door_speed: f64,
    arrival_tolerance: f64,
    arrival_speed_tolerance: f64,
    close_probability: f64,
}

impl CarPhaseController {
    pub fn new(config: &SimulationConfig) -> CarPhaseController {
        CarPhaseController {
            n_floors: config.n_floors,
            visible_floors_only: config.visible_floors_only,
            door_speed: config.door_speed,
            arrival_tolerance: config.arrival_tolerance,
            arrival_speed_tolerance: config.arrival_speed_tolerance,
            close_probability: config.close_probability,
        }
    }

    pub fn update<R: RandomSource + ?Sized>(
        &self,
        elevators: &mut [ElevatorState],
        dt: f64,
        rng: &mut R,
    ) {
        for (index, elevator) in elevators.iter_mut().enumerate() {
            self.update_one(index, elevator, dt, rng);
        }
    }

    fn update_one<R: RandomSource + ?Sized>(
        &self,
        index: usize,
        elevator: &mut ElevatorState,
        dt: f64,
        rng: &mut R,
    ) {
        if elevator.phase == CarPhase::Opening {
            elevator.door_position = (elevator.door_position + self.door_speed * dt).clamp(0.0, 1.0);
            // Exact comparison: the clamp lands on the boundary value
            if elevator.door_position == 1.0 {
                transition(index, elevator, CarPhase::Arrived);
            }
        }

        if elevator.phase == CarPhase::Closing {
            elevator.door_position = (elevator.door_position - self.door_speed * dt).clamp(0.0, 1.0);
            if elevator.door_position == 0.0 {
                transition(index, elevator, CarPhase::Moving);
                elevator.target_floor =
                    random::draw_target_floor(rng, self.n_floors, self.visible_floors_only);
                debug!("Elevator {} heading for floor {}", index, elevator.target_floor);
            }
        }

        if elevator.phase == CarPhase::Arrived && random::roll(rng, self.close_probability) {
            transition(index, elevator, CarPhase::Closing);
        }

        if elevator.phase == CarPhase::Moving && self.has_arrived(elevator) {
            elevator.altitude = elevator.target_floor as f64;
            transition(index, elevator, CarPhase::Opening);
        }
    }

    fn has_arrived(&self, elevator: &ElevatorState) -> bool {
        (elevator.altitude - elevator.target_floor as f64).abs() < self.arrival_tolerance
            && elevator.speed.abs() < self.arrival_speed_tolerance
    }
}

fn transition(index: usize, elevator: &mut ElevatorState, to: CarPhase) {
    debug!("Elevator {}: {} -> {}", index, elevator.phase, to);
    elevator.phase = to;
}
