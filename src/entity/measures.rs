//! Adaptation measures and their effect on hazard and vulnerability.
use super::impact_funcs::ImpactFunc;
use super::{Entity, Mergeable};
use crate::config::MeasuresFields;
use crate::error::Result;
use crate::tag::Tag;
use crate::util::checker;
use crate::util::raw::{RawTable, RawWorkbook};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::warn;

/// A linear change `x * factor + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactAdjust {
    pub factor: f64,
    pub offset: f64,
}

impl Default for ImpactAdjust {
    fn default() -> Self {
        Self { factor: 1.0, offset: 0.0 }
    }
}

impl From<(f64, f64)> for ImpactAdjust {
    fn from((factor, offset): (f64, f64)) -> Self {
        Self { factor, offset }
    }
}

impl ImpactAdjust {
    pub fn apply(&self, x: f64) -> f64 {
        x * self.factor + self.offset
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub color_rgb: [f64; 3],
    pub cost: f64,
    pub hazard_freq_cutoff: f64,
    pub hazard_event_set: String,
    pub hazard_intensity: ImpactAdjust,
    pub mdd_impact: ImpactAdjust,
    pub paa_impact: ImpactAdjust,
    pub risk_transf_attach: f64,
    pub risk_transf_cover: f64,
}

impl Measure {
    /// The impact function as seen after this measure is implemented.
    ///
    /// The hazard intensity change moves the curve along the intensity axis,
    /// `mdd`/`paa` changes act on the curve values, which never go below zero.
    /// A zero intensity factor leaves the intensity axis unchanged.
    pub fn apply_to_impact_func(&self, func: &ImpactFunc) -> ImpactFunc {
        let haz = self.hazard_intensity;
        let intensity = if haz.factor == 0.0 {
            func.intensity.clone()
        } else {
            func.intensity.iter().map(|&x| (x - haz.offset) / haz.factor).collect()
        };
        let adjust = |values: &[f64], adj: ImpactAdjust| -> Vec<f64> {
            values.iter().map(|&v| adj.apply(v).max(0.0)).collect()
        };
        ImpactFunc {
            intensity,
            mdd: adjust(&func.mdd, self.mdd_impact),
            paa: adjust(&func.paa, self.paa_impact),
            ..func.clone()
        }
    }
}

/// Measures in definition order, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureSet {
    pub tag: Tag,
    data: Vec<Measure>,
}

impl MeasureSet {
    /// Adds a measure, replacing in place any with the same name.
    pub fn add_measure(&mut self, measure: Measure) {
        if self.replace(measure.clone()) {
            warn!("Existing measure {} is overwritten.", measure.name);
        }
    }

    pub fn get_measure(&self, name: &str) -> Option<&Measure> {
        self.data.iter().find(|m| m.name == name)
    }

    pub fn get_names(&self) -> Vec<&str> {
        self.data.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn measures(&self) -> &[Measure] {
        &self.data
    }

    pub fn num_measures(&self) -> usize {
        self.data.len()
    }

    // Returns whether a measure of that name existed.
    fn replace(&mut self, measure: Measure) -> bool {
        match self.data.iter_mut().find(|m| m.name == measure.name) {
            Some(slot) => {
                *slot = measure;
                true
            }
            None => {
                self.data.push(measure);
                false
            }
        }
    }

    /// Reads the measures sheet of a JSON workbook, one measure per row.
    pub fn read_with(
        &mut self,
        file_name: &Path,
        description: &str,
        fields: &MeasuresFields,
    ) -> Result<()> {
        let workbook = RawWorkbook::from_json_file(file_name)?;
        let table = workbook.table(&fields.sheet_name, file_name)?;

        let names = table.texts(&fields.name)?;
        let event_sets = table.texts(&fields.hazard_event_set)?;
        let columns = [
            numeric(table, &fields.color_r)?,
            numeric(table, &fields.color_g)?,
            numeric(table, &fields.color_b)?,
            numeric(table, &fields.cost)?,
            numeric(table, &fields.hazard_freq_cutoff)?,
            numeric(table, &fields.hazard_intensity_a)?,
            numeric(table, &fields.hazard_intensity_b)?,
            numeric(table, &fields.mdd_a)?,
            numeric(table, &fields.mdd_b)?,
            numeric(table, &fields.paa_a)?,
            numeric(table, &fields.paa_b)?,
            numeric(table, &fields.risk_transf_attach)?,
            numeric(table, &fields.risk_transf_cover)?,
        ];
        let mut sizes = vec![(fields.hazard_event_set.as_str(), event_sets.len())];
        sizes.extend(columns.iter().map(|&(field, col)| (field, col.len())));
        checker::check_obligatories(table.name(), names.len(), &sizes)?;

        let [r, g, b, cost, cutoff, haz_a, haz_b, mdd_a, mdd_b, paa_a, paa_b, attach, cover] =
            columns.map(|(_, col)| col);
        self.data.clear();
        for (i, name) in names.iter().enumerate() {
            self.add_measure(Measure {
                name: name.clone(),
                color_rgb: [r[i], g[i], b[i]],
                cost: cost[i],
                hazard_freq_cutoff: cutoff[i],
                hazard_event_set: event_sets[i].clone(),
                hazard_intensity: (haz_a[i], haz_b[i]).into(),
                mdd_impact: (mdd_a[i], mdd_b[i]).into(),
                paa_impact: (paa_a[i], paa_b[i]).into(),
                risk_transf_attach: attach[i],
                risk_transf_cover: cover[i],
            });
        }
        self.tag = Tag::new(file_name.display().to_string(), description);
        Ok(())
    }
}

fn numeric<'a>(table: &'a RawTable, field: &'a str) -> Result<(&'a str, &'a [f64])> {
    Ok((field, table.numbers(field)?))
}

impl Entity for MeasureSet {
    const NAME: &'static str = "MeasureSet";

    fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Names must be unique; deserialized sets are not guaranteed to be.
    fn check(&self) -> Result<()> {
        let unique: BTreeSet<&str> = self.data.iter().map(|m| m.name.as_str()).collect();
        checker::check_size(Self::NAME, "name", self.data.len(), unique.len())?;
        Ok(())
    }

    fn read(&mut self, file_name: &Path, description: &str) -> Result<()> {
        self.read_with(file_name, description, &MeasuresFields::default())
    }
}

impl Mergeable for MeasureSet {
    /// Measures of `other` replace those with the same name; new ones are
    /// added at the end.
    fn append(&mut self, other: &Self) {
        self.tag.append(&other.tag);
        for measure in &other.data {
            self.replace(measure.clone());
        }
    }
}
