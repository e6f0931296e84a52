//! Impact (vulnerability) functions keyed by hazard type and id.
use super::{Entity, Mergeable};
use crate::config::ImpactFuncsFields;
use crate::error::Result;
use crate::tag::Tag;
use crate::util::checker;
use crate::util::raw::RawWorkbook;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Mean damage degree (`mdd`) and percentage of affected assets (`paa`) as a
/// function of hazard intensity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactFunc {
    pub haz_type: String,
    pub id: i64,
    pub name: String,
    pub intensity_unit: String,
    pub intensity: Vec<f64>,
    pub mdd: Vec<f64>,
    pub paa: Vec<f64>,
}

impl ImpactFunc {
    pub fn check(&self) -> Result<()> {
        checker::check_obligatories(
            "ImpactFunc",
            self.intensity.len(),
            &[("mdd", self.mdd.len()), ("paa", self.paa.len())],
        )?;
        Ok(())
    }

    /// Mean damage ratio (`mdd * paa`) at `intensity`, linearly interpolated
    /// between the grid points and held constant outside of them.
    ///
    /// Fails when the curve arrays disagree in length. A NaN intensity, or a
    /// grid that is not sorted around it, yields NaN.
    pub fn calc_mdr(&self, intensity: f64) -> Result<f64> {
        self.check()?;
        let mdr = |i: usize| self.mdd[i] * self.paa[i];
        let grid = &self.intensity;
        let Some(&last) = grid.last() else {
            return Ok(0.0);
        };
        if intensity.is_nan() {
            return Ok(f64::NAN);
        }
        if intensity <= grid[0] {
            return Ok(mdr(0));
        }
        if intensity >= last {
            return Ok(mdr(grid.len() - 1));
        }
        let hi = grid.partition_point(|&x| x <= intensity);
        if hi == 0 || hi >= grid.len() {
            return Ok(f64::NAN);
        }
        let lo = hi - 1;
        let span = grid[hi] - grid[lo];
        if span == 0.0 {
            return Ok(mdr(hi));
        }
        let w = (intensity - grid[lo]) / span;
        Ok(mdr(lo) + w * (mdr(hi) - mdr(lo)))
    }
}

/// All impact functions of an entity: hazard type -> id -> function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactFuncSet {
    pub tag: Tag,
    data: BTreeMap<String, BTreeMap<i64, ImpactFunc>>,
}

impl ImpactFuncSet {
    /// Adds a function, replacing any with the same hazard type and id.
    pub fn add_func(&mut self, func: ImpactFunc) {
        let funcs = self.data.entry(func.haz_type.clone()).or_default();
        if funcs.contains_key(&func.id) {
            warn!("Existing impact function {} {} is overwritten.", func.haz_type, func.id);
        }
        funcs.insert(func.id, func);
    }

    pub fn get_func(&self, haz_type: &str, id: i64) -> Option<&ImpactFunc> {
        self.data.get(haz_type)?.get(&id)
    }

    /// All functions of a hazard type, ordered by id.
    pub fn get_funcs(&self, haz_type: &str) -> impl Iterator<Item = &ImpactFunc> {
        self.data.get(haz_type).into_iter().flat_map(|funcs| funcs.values())
    }

    pub fn get_hazard_types(&self) -> Vec<&str> {
        self.data.keys().map(String::as_str).collect()
    }

    pub fn get_ids(&self, haz_type: &str) -> Vec<i64> {
        self.data
            .get(haz_type)
            .map(|funcs| funcs.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn num_funcs(&self) -> usize {
        self.data.values().map(BTreeMap::len).sum()
    }

    pub fn remove_func(&mut self, haz_type: &str, id: i64) -> Option<ImpactFunc> {
        let funcs = self.data.get_mut(haz_type)?;
        let removed = funcs.remove(&id);
        if funcs.is_empty() {
            self.data.remove(haz_type);
        }
        removed
    }

    /// Reads the impact function sheet of a JSON workbook.
    ///
    /// Each row holds one intensity point; rows sharing peril and function id
    /// form one function, whose name and unit come from its first row.
    pub fn read_with(
        &mut self,
        file_name: &Path,
        description: &str,
        fields: &ImpactFuncsFields,
    ) -> Result<()> {
        let workbook = RawWorkbook::from_json_file(file_name)?;
        let table = workbook.table(&fields.sheet_name, file_name)?;

        let ids = table.integers(&fields.func_id)?;
        let perils = table.texts(&fields.peril_id)?;
        let names = table.texts(&fields.func_name)?;
        let units = table.texts(&fields.unit)?;
        let intensity = table.numbers(&fields.intensity)?;
        let mdd = table.numbers(&fields.mdd)?;
        let paa = table.numbers(&fields.paa)?;
        checker::check_obligatories(
            table.name(),
            ids.len(),
            &[
                (fields.peril_id.as_str(), perils.len()),
                (fields.func_name.as_str(), names.len()),
                (fields.unit.as_str(), units.len()),
                (fields.intensity.as_str(), intensity.len()),
                (fields.mdd.as_str(), mdd.len()),
                (fields.paa.as_str(), paa.len()),
            ],
        )?;

        let mut funcs: BTreeMap<(String, i64), ImpactFunc> = BTreeMap::new();
        for row in 0..ids.len() {
            let func = funcs
                .entry((perils[row].clone(), ids[row]))
                .or_insert_with(|| ImpactFunc {
                    haz_type: perils[row].clone(),
                    id: ids[row],
                    name: names[row].clone(),
                    intensity_unit: units[row].clone(),
                    ..Default::default()
                });
            func.intensity.push(intensity[row]);
            func.mdd.push(mdd[row]);
            func.paa.push(paa[row]);
        }

        self.data.clear();
        for func in funcs.into_values() {
            self.add_func(func);
        }
        self.tag = Tag::new(file_name.display().to_string(), description);
        Ok(())
    }
}

impl Entity for ImpactFuncSet {
    const NAME: &'static str = "ImpactFuncSet";

    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn check(&self) -> Result<()> {
        self.data.values().flat_map(BTreeMap::values).try_for_each(ImpactFunc::check)
    }

    fn read(&mut self, file_name: &Path, description: &str) -> Result<()> {
        self.read_with(file_name, description, &ImpactFuncsFields::default())
    }
}

impl Mergeable for ImpactFuncSet {
    /// Functions of `other` replace those with the same hazard type and id.
    fn append(&mut self, other: &Self) {
        self.tag.append(&other.tag);
        for func in other.data.values().flat_map(BTreeMap::values) {
            self.data
                .entry(func.haz_type.clone())
                .or_default()
                .insert(func.id, func.clone());
        }
    }
}
