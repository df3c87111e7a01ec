pub mod annotation;
pub mod detection;
pub mod errors;
pub mod geometry;
pub mod model;
pub mod overlap;
