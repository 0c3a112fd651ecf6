pub mod business;
pub mod citizen;
pub mod country;
pub mod metrics;
pub mod model;
pub mod rng;
pub mod scenario;

#[cfg(test)]
mod scenario_test;
