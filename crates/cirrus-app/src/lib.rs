//! Application layer: wires the weather pipeline, the city-list store, and
//! the screen fetch state together.

pub mod controller;

pub use controller::WeatherController;
