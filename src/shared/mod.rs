pub mod macros;
pub mod structs;

pub use structs::CarPhase;
pub use structs::ElevatorSeed;
pub use structs::ElevatorState;
