pub mod fare;
pub mod location;
pub mod queue;
pub mod range;
pub mod selection;
pub mod session;
