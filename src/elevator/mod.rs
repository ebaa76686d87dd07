pub mod fsm;
pub mod motion;

pub use fsm::CarPhaseController;
pub use motion::MotionIntegrator;
