/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CarPhase {
    Moving,
    Opening,
    Arrived,
    Closing,
}

impl CarPhase {
    pub fn as_str(&self) -> &'static str {
        match *self {
            CarPhase::Moving => "moving",
            CarPhase::Opening => "opening",
            CarPhase::Arrived => "arrived",
            CarPhase::Closing => "closing",
        }
    }
}

impl std::fmt::Display for CarPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/**
 * State of one elevator car.
 *
 * # Fields
 * - `altitude`:        Vertical position in floors, fractional while moving.
 * - `speed`:           Signed velocity in floors per second, positive is upward.
 * - `target_floor`:    Floor currently being sought.
 * - `phase`:           Which rule set applies to the car this tick.
 * - `door_position`:   0 is fully closed, 1 is fully open.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorState {
    pub altitude: f64,
    pub speed: f64,
    #[serde(rename = "targetFloor")]
    pub target_floor: i32,
    pub phase: CarPhase,
    #[serde(rename = "doorPosition")]
    pub door_position: f64,
}

impl ElevatorState {
    pub fn new(altitude: f64, speed: f64, target_floor: i32) -> ElevatorState {
        ElevatorState {
            altitude,
            speed,
            target_floor,
            phase: CarPhase::Moving,
            door_position: 0.0,
        }
    }
}

impl From<&ElevatorSeed> for ElevatorState {
    fn from(seed: &ElevatorSeed) -> Self {
        ElevatorState::new(seed.altitude, seed.speed, seed.target_floor)
    }
}

/// Starting values for one car, as read from the `[[elevators]]` config table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorSeed {
    pub altitude: f64,
    pub speed: f64,
    pub target_floor: i32,
}

impl ElevatorSeed {
    pub fn defaults() -> Vec<ElevatorSeed> {
        vec![
            ElevatorSeed { altitude: 2.0, speed: -0.5, target_floor: 5 },
            ElevatorSeed { altitude: 7.0, speed: 1.0, target_floor: 1 },
            ElevatorSeed { altitude: 7.2, speed: -0.1, target_floor: 7 },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_moving_with_closed_doors() {
        // Arrange
        let seed = ElevatorSeed { altitude: 3.5, speed: 0.25, target_floor: 8 };

        // Act
        let state = ElevatorState::from(&seed);

        // Assert
        assert_eq!(state.phase, CarPhase::Moving);
        assert_eq!(state.door_position, 0.0);
        assert_eq!(state.altitude, 3.5);
        assert_eq!(state.speed, 0.25);
        assert_eq!(state.target_floor, 8);
    }

    #[test]
    fn test_state_serializes_with_camel_case_keys() {
        let state = ElevatorState::new(1.0, 0.0, 4);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["targetFloor"], 4);
        assert_eq!(json["doorPosition"], 0.0);
        assert_eq!(json["phase"], "moving");
    }
}
