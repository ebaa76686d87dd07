/*
 * Unit tests for the simulation step
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_converges_onto_target_floor
 * - test_zero_step_is_idempotent
 * - test_invariants_hold_over_long_run
 * - test_speed_clamped_on_capped_tick
 * - test_paused_tick_is_noop
 * - test_resume_resets_clock_reference
 * - test_tick_uses_measured_time
 * - test_clock_regression_does_not_move_cars
 * - test_same_seed_same_run
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod step_tests {
    use crate::config::{Config, SimulationConfig};
    use crate::shared::CarPhase::{Arrived, Closing, Moving, Opening};
    use crate::shared::ElevatorSeed;
    use crate::simulation::random::{ScriptedSource, SimRng};
    use crate::simulation::Simulation;
    use std::time::{Duration, Instant};

    fn seed(altitude: f64, speed: f64, target_floor: i32) -> ElevatorSeed {
        ElevatorSeed {
            altitude,
            speed,
            target_floor,
        }
    }

    fn setup_simulation(seeds: &[ElevatorSeed], start: Instant) -> Simulation<ScriptedSource> {
        Simulation::new(&SimulationConfig::default(), seeds, ScriptedSource::never(), start)
    }

    #[test]
    fn test_converges_onto_target_floor() {
        // Arrange
        let mut simulation = setup_simulation(&[seed(0.0, 0.0, 5)], Instant::now());

        // Act
        let mut steps = 0;
        while simulation.elevators()[0].phase == Moving && steps < 2000 {
            simulation.step(0.016);
            steps += 1;
        }

        // Assert
        let car = &simulation.elevators()[0];
        assert!(steps < 2000, "did not arrive within 2000 steps");
        assert_eq!(car.phase, Opening);
        assert_eq!(car.altitude, 5.0);
        assert!(car.speed.abs() < 0.1);
    }

    #[test]
    fn test_zero_step_is_idempotent() {
        // Arrange: one car per phase
        let mut simulation = setup_simulation(
            &[seed(2.0, -0.5, 5), seed(7.0, 1.0, 1), seed(3.0, 0.0, 3), seed(4.0, 0.0, 4)],
            Instant::now(),
        );
        {
            let elevators = simulation.elevators_mut();
            elevators[2].phase = Opening;
            elevators[2].door_position = 0.4;
            elevators[3].phase = Arrived;
            elevators[3].door_position = 1.0;
        }
        let before = simulation.elevators().to_vec();

        // Act
        for _ in 0..10 {
            simulation.step(0.0);
        }

        // Assert
        assert_eq!(simulation.elevators(), &before[..]);
    }

    #[test]
    fn test_invariants_hold_over_long_run() {
        // Arrange
        let config = Config::default();
        let mut simulation = Simulation::new(
            &config.simulation,
            &config.elevators,
            SimRng::from_seed_u64(2024),
            Instant::now(),
        );
        let mut previous = simulation.elevators().to_vec();
        let mut arrivals = 0;

        // Act + Assert
        for i in 0..60_000 {
            let dt = [0.01, 0.016, 0.033, 0.0, 0.25][i % 5];
            simulation.step(dt);

            for (car, before) in simulation.elevators().iter().zip(previous.iter()) {
                assert!(car.speed.abs() <= 1.5);
                assert!((0.0..=1.0).contains(&car.door_position));
                assert!((0..=10).contains(&car.target_floor));
                if car.phase == Moving {
                    assert_eq!(car.door_position, 0.0);
                }
                // Retargeting only happens on the way out of Closing
                if car.target_floor != before.target_floor {
                    assert_eq!(before.phase, Closing);
                    assert!(car.phase == Moving || car.phase == Opening);
                }
                if car.phase == Opening && before.phase == Moving {
                    arrivals += 1;
                }
            }
            previous = simulation.elevators().to_vec();
        }

        assert!(arrivals > 3);
    }

    #[test]
    fn test_speed_clamped_on_capped_tick() {
        // Arrange
        let start = Instant::now();
        let mut simulation = setup_simulation(&[seed(0.0, 0.0, 10), seed(10.0, 0.0, 0)], start);

        // Act: an hour later, capped to 100 seconds
        assert!(simulation.tick(start + Duration::from_secs(3600)));

        // Assert
        assert_eq!(simulation.elevators()[0].speed, 1.5);
        assert_eq!(simulation.elevators()[0].altitude, 150.0);
        assert_eq!(simulation.elevators()[1].speed, -1.5);
    }

    #[test]
    fn test_paused_tick_is_noop() {
        // Arrange
        let start = Instant::now();
        let mut simulation = setup_simulation(&[seed(2.0, -0.5, 5)], start);
        simulation.toggle_pause(start);
        let before = simulation.elevators().to_vec();

        // Act
        let advanced = simulation.tick(start + Duration::from_secs(5));

        // Assert
        assert!(!advanced);
        assert!(simulation.is_paused());
        assert_eq!(simulation.ticks(), 0);
        assert_eq!(simulation.elevators(), &before[..]);
    }

    #[test]
    fn test_resume_resets_clock_reference() {
        // Arrange: paused for 50 seconds
        let start = Instant::now();
        let mut simulation = setup_simulation(&[seed(0.0, 0.0, 5)], start);
        simulation.toggle_pause(start);
        let resumed_at = start + Duration::from_secs(50);
        assert!(!simulation.toggle_pause(resumed_at));

        // Act: first tick after resuming
        simulation.tick(resumed_at + Duration::from_millis(100));

        // Assert: only the 100 ms since resuming was simulated
        let car = &simulation.elevators()[0];
        assert!((car.speed - 0.02).abs() < 1e-9);
        assert_eq!(simulation.ticks(), 1);
    }

    #[test]
    fn test_tick_uses_measured_time() {
        let start = Instant::now();
        let mut simulation = setup_simulation(&[seed(0.0, 0.0, 5)], start);

        simulation.tick(start + Duration::from_millis(10));
        simulation.tick(start + Duration::from_millis(40));

        // 10 ms then 30 ms of acceleration at 0.2 floors/s^2
        let car = &simulation.elevators()[0];
        assert!((car.speed - 0.008).abs() < 1e-9);
        assert_eq!(simulation.ticks(), 2);
    }

    #[test]
    fn test_clock_regression_does_not_move_cars() {
        let start = Instant::now();
        let mut simulation = setup_simulation(&[seed(2.0, -0.5, 5)], start + Duration::from_secs(1));
        let before = simulation.elevators().to_vec();

        assert!(simulation.tick(start));

        assert_eq!(simulation.elevators(), &before[..]);
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = Config::default();
        let start = Instant::now();
        let mut a = Simulation::new(&config.simulation, &config.elevators, SimRng::from_seed_u64(9), start);
        let mut b = Simulation::new(&config.simulation, &config.elevators, SimRng::from_seed_u64(9), start);

        for _ in 0..5_000 {
            a.step(0.02);
            b.step(0.02);
        }

        assert_eq!(a.elevators(), b.elevators());
    }
}
