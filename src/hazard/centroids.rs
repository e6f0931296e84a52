//! Spatial points on which hazard intensities are defined.
use crate::error::Result;
use crate::tag::Tag;
use crate::util::checker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Centroids {
    pub tag: Tag,
    pub id: Vec<i64>,
    /// `[latitude, longitude]` per centroid.
    pub coord: Vec<[f64; 2]>,
    /// Optional; empty when unknown.
    pub region_id: Vec<i64>,
}

impl Centroids {
    pub fn size(&self) -> usize {
        self.id.len()
    }

    pub fn check(&self) -> Result<()> {
        let num = self.id.len();
        checker::check_size("Centroids", "coord row", num, self.coord.len())?;
        checker::check_optionals("Centroids", num, &[("region_id", self.region_id.len())])?;
        Ok(())
    }
}
