//! HTTP handlers for Route Safety Commander

pub mod health;
pub mod route;
pub mod trip;

pub use health::*;
pub use route::*;
pub use trip::*;
