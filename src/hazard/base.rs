//! The format independent hazard.
use super::centroids::Centroids;
use crate::entity::Entity;
use crate::error::Result;
use crate::tag::Tag;
use crate::util::checker;
use crate::util::sparse::SparseMatrix;
use serde::{Deserialize, Serialize};

/// A set of events, each with a frequency and an intensity/fraction at every
/// centroid.
///
/// `intensity` and `fraction` are `events x centroids`. Reading is left to
/// format specific hazards; on this type `read`, `load` and `from_file` fail
/// with `NotImplemented`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub tag: Tag,
    pub haz_type: String,
    pub units: String,
    pub centroids: Centroids,
    pub event_id: Vec<i64>,
    /// Optional; empty when events are unnamed.
    pub event_name: Vec<String>,
    pub frequency: Vec<f64>,
    pub intensity: SparseMatrix,
    pub fraction: SparseMatrix,
}

impl Hazard {
    pub fn new(haz_type: impl Into<String>) -> Self {
        Self { haz_type: haz_type.into(), ..Default::default() }
    }

    pub fn num_events(&self) -> usize {
        self.event_id.len()
    }

    /// Name of the event with the given id, if both exist.
    pub fn event_name_of(&self, event_id: i64) -> Option<&str> {
        let pos = self.event_id.iter().position(|&id| id == event_id)?;
        self.event_name.get(pos).map(String::as_str)
    }
}

impl Entity for Hazard {
    const NAME: &'static str = "Hazard";

    fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Centroids first, then event vectors, then matrix shapes.
    fn check(&self) -> Result<()> {
        self.centroids.check()?;
        let num_ev = self.num_events();
        let num_cen = self.centroids.size();
        checker::check_obligatories(Self::NAME, num_ev, &[("frequency", self.frequency.len())])?;
        checker::check_optionals(Self::NAME, num_ev, &[("event_name", self.event_name.len())])?;
        checker::check_shape(Self::NAME, "intensity", (num_ev, num_cen), self.intensity.shape())?;
        checker::check_shape(Self::NAME, "fraction", (num_ev, num_cen), self.fraction.shape())?;
        Ok(())
    }
}
