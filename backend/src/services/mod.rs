//! Business logic services for Route Safety Commander

pub mod forecast;
pub mod trip;

pub use forecast::ForecastService;
pub use trip::TripService;
