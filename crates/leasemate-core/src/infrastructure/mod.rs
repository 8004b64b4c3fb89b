pub mod clients;
pub mod scheduler;
pub mod storage;

pub use scheduler::NoDelayScheduler;
pub use scheduler::TokioScheduler;
