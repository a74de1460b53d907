pub mod director;
pub mod session;
