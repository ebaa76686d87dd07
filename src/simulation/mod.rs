pub mod clock;
pub mod random;
pub mod scheduler;
pub mod step;
pub mod step_tests;

pub use scheduler::FrameScheduler;
pub use step::Simulation;
