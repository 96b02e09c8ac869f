//! Domain models for route safety analysis

mod alert;
mod hazard;
mod route;
mod verdict;
mod weather;

pub use alert::*;
pub use hazard::*;
pub use route::*;
pub use verdict::*;
pub use weather::*;
