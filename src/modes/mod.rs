pub mod play;
pub mod scheduler;
pub mod session;

pub use play::PlayMode;
pub use scheduler::TickScheduler;
pub use session::{Mode, Session, Variant};
