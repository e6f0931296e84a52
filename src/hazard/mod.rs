//! Hazard event sets defined on a set of centroids.
pub mod base;
pub mod centroids;

pub use base::Hazard;
pub use centroids::Centroids;
