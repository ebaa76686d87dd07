use crate::config::SimulationConfig;
use crate::shared::ElevatorState;

/**
 * Advances altitude and speed of every car.
 *
 * Bang-bang control: each car accelerates toward the side of its stopping
 * position that holds the target, which traces a trapezoidal velocity profile
 * ending near the target floor. Integration is forward Euler, so landing is
 * approximate and the phase controller uses a tolerance to detect arrival.
 *
 * # Fields
 * - `max_speed`:       Speed clamp in floors per second.
 * - `acceleration`:    Acceleration magnitude in floors per second squared.
 */
#[derive(Debug, Clone, Copy)]
pub struct MotionIntegrator {
    max_speed: f64,
    acceleration: f64,
}

impl MotionIntegrator {
    pub fn new(config: &SimulationConfig) -> MotionIntegrator {
        MotionIntegrator {
            max_speed: config.max_speed,
            acceleration: config.acceleration,
        }
    }

    pub fn integrate(&self, elevators: &mut [ElevatorState], dt: f64) {
        for elevator in elevators.iter_mut() {
            self.integrate_one(elevator, dt);
        }
    }

    /// Altitude at which the car would come to rest if it began braking now.
    pub fn stopping_position(&self, elevator: &ElevatorState) -> f64 {
        elevator.altitude + (elevator.speed.abs() / self.acceleration) * (elevator.speed / 2.0)
    }

    fn integrate_one(&self, elevator: &mut ElevatorState, dt: f64) {
        let stopping_position = self.stopping_position(elevator);
        let target = elevator.target_floor as f64;

        if target > stopping_position {
            elevator.speed += self.acceleration * dt;
        } else if target < stopping_position {
            elevator.speed -= self.acceleration * dt;
        }

        if elevator.speed.abs() > self.max_speed {
            elevator.speed = self.max_speed.copysign(elevator.speed);
        }

        elevator.altitude += elevator.speed * dt;
    }
}
