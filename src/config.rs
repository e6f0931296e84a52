//! Table and column names used by the entity readers.
//!
//! Every name can be overridden, either in code or from a JSON file. Any field
//! left out of the file keeps its default.
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscRatesFields {
    pub sheet_name: String,
    pub year: String,
    pub rate: String,
}

impl Default for DiscRatesFields {
    fn default() -> Self {
        Self {
            sheet_name: "discount".into(),
            year: "year".into(),
            rate: "discount_rate".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactFuncsFields {
    pub sheet_name: String,
    pub func_id: String,
    pub func_name: String,
    pub peril_id: String,
    pub intensity: String,
    pub mdd: String,
    pub paa: String,
    pub unit: String,
}

impl Default for ImpactFuncsFields {
    fn default() -> Self {
        Self {
            sheet_name: "impact_functions".into(),
            func_id: "if_id".into(),
            func_name: "name".into(),
            peril_id: "peril_id".into(),
            intensity: "intensity".into(),
            mdd: "mdd".into(),
            paa: "paa".into(),
            unit: "intensity_unit".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasuresFields {
    pub sheet_name: String,
    pub name: String,
    pub color_r: String,
    pub color_g: String,
    pub color_b: String,
    pub cost: String,
    pub hazard_freq_cutoff: String,
    pub hazard_event_set: String,
    pub hazard_intensity_a: String,
    pub hazard_intensity_b: String,
    pub mdd_a: String,
    pub mdd_b: String,
    pub paa_a: String,
    pub paa_b: String,
    pub risk_transf_attach: String,
    pub risk_transf_cover: String,
}

impl Default for MeasuresFields {
    fn default() -> Self {
        Self {
            sheet_name: "measures".into(),
            name: "name".into(),
            color_r: "color_r".into(),
            color_g: "color_g".into(),
            color_b: "color_b".into(),
            cost: "cost".into(),
            hazard_freq_cutoff: "hazard_freq_cutoff".into(),
            hazard_event_set: "hazard_event_set".into(),
            hazard_intensity_a: "hazard_intensity_impact_a".into(),
            hazard_intensity_b: "hazard_intensity_impact_b".into(),
            mdd_a: "mdd_impact_a".into(),
            mdd_b: "mdd_impact_b".into(),
            paa_a: "paa_impact_a".into(),
            paa_b: "paa_impact_b".into(),
            risk_transf_attach: "risk_transfer_attachement".into(),
            risk_transf_cover: "risk_transfer_cover".into(),
        }
    }
}

/// Field names for all readers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub disc_rates: DiscRatesFields,
    pub impact_funcs: ImpactFuncsFields,
    pub measures: MeasuresFields,
}

impl ReaderConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
