pub mod vector;
pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod universe;
pub mod integrator;
pub mod scenario;
pub mod driver;
pub mod controller;
