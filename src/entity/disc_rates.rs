//! Yearly discount rates.
use super::{Entity, Mergeable};
use crate::config::DiscRatesFields;
use crate::error::Result;
use crate::tag::Tag;
use crate::util::raw::RawWorkbook;
use crate::util::{checker, finance};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Discount rate per year. `rates[i]` belongs to `years[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscRates {
    pub tag: Tag,
    pub years: Vec<i64>,
    pub rates: Vec<f64>,
}

impl DiscRates {
    pub fn new(years: Vec<i64>, rates: Vec<f64>) -> Self {
        Self { tag: Tag::default(), years, rates }
    }

    /// Keeps the entries whose year is in `year_range`, in their current order.
    ///
    /// Returns `None` when no year matches.
    pub fn select(&self, year_range: &[i64]) -> Option<DiscRates> {
        let (years, rates): (Vec<i64>, Vec<f64>) = self
            .years
            .iter()
            .zip(&self.rates)
            .filter(|(year, _)| year_range.contains(year))
            .map(|(&year, &rate)| (year, rate))
            .unzip();
        if years.is_empty() {
            return None;
        }
        Some(DiscRates { tag: self.tag.clone(), years, rates })
    }

    /// Net present value of `values`, one per year in `[year_start, year_end]`.
    ///
    /// Returns `Ok(None)` when no discount rate is defined for any of those
    /// years. Fails when `values` does not have one entry per year, or when
    /// only part of the years have a rate.
    pub fn net_present_value(
        &self,
        year_start: i64,
        year_end: i64,
        values: &[f64],
    ) -> Result<Option<f64>> {
        // An inverted range has no years; one too wide for `usize` can never match.
        let num_years = (i128::from(year_end) - i128::from(year_start) + 1).max(0);
        let num_years = usize::try_from(num_years).unwrap_or(usize::MAX);
        checker::check_size("DiscRates", "values", num_years, values.len())?;

        let Some(sel) = self.select_between(year_start, year_end) else {
            return Ok(None);
        };
        checker::check_size("DiscRates", "rates", num_years, sel.rates.len())?;
        Ok(Some(finance::net_present_value(&sel.rates, values)))
    }

    // Same as `select` over the inclusive range, without building the year list.
    fn select_between(&self, year_start: i64, year_end: i64) -> Option<DiscRates> {
        let (years, rates): (Vec<i64>, Vec<f64>) = self
            .years
            .iter()
            .zip(&self.rates)
            .filter(|(&year, _)| year_start <= year && year <= year_end)
            .map(|(&year, &rate)| (year, rate))
            .unzip();
        if years.is_empty() {
            return None;
        }
        Some(DiscRates { tag: self.tag.clone(), years, rates })
    }

    /// Reads the discount sheet of a JSON workbook with the given column names.
    pub fn read_with(
        &mut self,
        file_name: &Path,
        description: &str,
        fields: &DiscRatesFields,
    ) -> Result<()> {
        let workbook = RawWorkbook::from_json_file(file_name)?;
        let table = workbook.table(&fields.sheet_name, file_name)?;
        self.years = table.integers(&fields.year)?;
        self.rates = table.numbers(&fields.rate)?.to_vec();
        self.tag = Tag::new(file_name.display().to_string(), description);
        Ok(())
    }
}

impl Entity for DiscRates {
    const NAME: &'static str = "DiscRates";

    fn tag(&self) -> &Tag {
        &self.tag
    }

    fn check(&self) -> Result<()> {
        checker::check_obligatories(Self::NAME, self.years.len(), &[("rates", self.rates.len())])?;
        Ok(())
    }

    fn read(&mut self, file_name: &Path, description: &str) -> Result<()> {
        self.read_with(file_name, description, &DiscRatesFields::default())
    }
}

impl Mergeable for DiscRates {
    /// Union of both year sets, sorted ascending. Years present in `other`
    /// take `other`'s rate.
    fn append(&mut self, other: &Self) {
        self.tag.append(&other.tag);
        let merged: BTreeMap<i64, f64> = self
            .years
            .iter()
            .copied()
            .zip(self.rates.iter().copied())
            .chain(other.years.iter().copied().zip(other.rates.iter().copied()))
            .collect();
        debug!("DiscRates merged into {} years", merged.len());
        let (years, rates): (Vec<i64>, Vec<f64>) = merged.into_iter().unzip();
        self.years = years;
        self.rates = rates;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{from_sources, Descriptions, Sources};
    use crate::error::EntityError;
    use crate::util::testing::capture_logs;
    use std::io::Write;

    fn tagged(file: &str, descr: &str, years: Vec<i64>, rates: Vec<f64>) -> DiscRates {
        DiscRates { tag: Tag::new(file, descr), years, rates }
    }

    fn fifty_years(rate: impl Fn(usize) -> f64) -> DiscRates {
        let years: Vec<i64> = (2000..2050).collect();
        let rates = (0..years.len()).map(rate).collect();
        tagged("file1.txt", "descr1", years, rates)
    }

    #[test]
    fn test_check_wrong_rates_fail() {
        let disc = DiscRates::new(vec![1], vec![3.0, 4.0]);
        let (result, logs) = capture_logs(|| disc.check());
        let err = result.unwrap_err();
        assert!(err.as_validation().is_some());
        assert_eq!(err.to_string(), "Invalid DiscRates.rates size: 1 != 2");
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("util::checker"));
        assert!(logs.contains("Invalid DiscRates.rates size: 1 != 2."));
    }

    #[test]
    fn test_default_is_empty_and_valid() {
        let disc = DiscRates::default();
        assert!(disc.years.is_empty() && disc.rates.is_empty());
        assert!(disc.check().is_ok());
    }

    #[test]
    fn test_append_to_empty_same() {
        let mut disc = DiscRates::default();
        let add = tagged("file1.txt", "descr1", vec![2000, 2001, 2002], vec![0.1, 0.2, 0.3]);
        disc.append(&add);
        disc.check().unwrap();
        assert_eq!(disc, add);
    }

    #[test]
    fn test_append_equal_same() {
        let mut disc = tagged("file1.txt", "descr1", vec![2000, 2001, 2002], vec![0.1, 0.2, 0.3]);
        let add = disc.clone();
        disc.append(&add);
        disc.check().unwrap();
        assert_eq!(disc.years, add.years);
        assert_eq!(disc.rates, add.rates);
        assert_eq!(disc.tag.file_name(), add.tag.file_name());
        assert_eq!(disc.tag.description(), "descr1");
    }

    #[test]
    fn test_append_different_append() {
        let mut disc = tagged("file1.txt", "descr1", vec![2000, 2001, 2002], vec![0.1, 0.2, 0.3]);
        let add = tagged("file2.txt", "descr2", vec![2000, 2001, 2003], vec![0.11, 0.22, 0.33]);
        disc.append(&add);
        disc.check().unwrap();
        assert_eq!(disc.years, vec![2000, 2001, 2002, 2003]);
        assert_eq!(disc.rates, vec![0.11, 0.22, 0.3, 0.33]);
        assert_eq!(disc.tag.file_name(), "file1.txt + file2.txt");
        assert_eq!(disc.tag.description(), "descr1 + descr2");
    }

    #[test]
    fn test_append_sorts_unordered_input() {
        let mut disc = DiscRates::new(vec![2005, 2001], vec![0.5, 0.1]);
        disc.append(&DiscRates::new(vec![2003], vec![0.3]));
        assert_eq!(disc.years, vec![2001, 2003, 2005]);
        assert_eq!(disc.rates, vec![0.1, 0.3, 0.5]);
    }

    #[test]
    fn test_select_pass() {
        let disc = fifty_years(|i| i as f64);
        let year_range: Vec<i64> = (2010..2020).collect();
        let sel = disc.select(&year_range).unwrap();
        assert_eq!(sel.years, year_range);
        assert_eq!(sel.rates, disc.rates[10..20].to_vec());
        assert_eq!(sel.tag, disc.tag);
    }

    #[test]
    fn test_select_non_contiguous() {
        let disc = fifty_years(|i| i as f64);
        let sel = disc.select(&[2049, 2003, 1990]).unwrap();
        assert_eq!(sel.years, vec![2003, 2049]);
        assert_eq!(sel.rates, vec![3.0, 49.0]);
    }

    #[test]
    fn test_select_wrong_pass() {
        let disc = fifty_years(|i| i as f64);
        let year_range: Vec<i64> = (2050..2060).collect();
        assert_eq!(disc.select(&year_range), None);
    }

    #[test]
    fn test_net_present_value_pass() {
        let disc = fifty_years(|_| 0.02);
        let values = vec![6.512201157564418e9; 23];
        let npv = disc.net_present_value(2018, 2040, &values).unwrap();
        assert_eq!(npv, Some(1.215049630691397e+11));
    }

    #[test]
    fn test_net_present_value_wrong_pass() {
        let disc = fifty_years(|i| i as f64);
        let values = vec![6.512201157564418e9; 11];
        assert_eq!(disc.net_present_value(2050, 2060, &values).unwrap(), None);
    }

    #[test]
    fn test_net_present_value_wrong_values_size() {
        let disc = fifty_years(|_| 0.02);
        let err = disc.net_present_value(2018, 2040, &[1.0; 3]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid DiscRates.values size: 23 != 3");
    }

    #[test]
    fn test_net_present_value_partial_coverage_fail() {
        let disc = fifty_years(|_| 0.02);
        let err = disc.net_present_value(2045, 2054, &[1.0; 10]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid DiscRates.rates size: 10 != 5");
    }

    #[test]
    fn test_net_present_value_extreme_range_fail() {
        let disc = DiscRates::new(vec![2000], vec![0.02]);
        let err = disc.net_present_value(i64::MIN, i64::MAX, &[1.0]).unwrap_err();
        let err = err.as_validation().unwrap();
        assert_eq!(err.field, "values");
        assert_eq!(err.expected, usize::MAX);
    }

    #[test]
    fn test_net_present_value_inverted_range() {
        let disc = fifty_years(|_| 0.02);
        assert_eq!(disc.net_present_value(2010, 2000, &[]).unwrap(), None);
        let err = disc.net_present_value(2010, 2000, &[1.0]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid DiscRates.values size: 0 != 1");
    }

    fn write_workbook(years: std::ops::Range<i64>) -> tempfile::NamedTempFile {
        let years: Vec<i64> = years.collect();
        let rates = vec![0.02; years.len()];
        let body = serde_json::json!({ "discount": { "year": years, "discount_rate": rates } });
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();
        file
    }

    #[test]
    fn test_read_two_pass() {
        let file = write_workbook(2000..2051);
        let path = file.path().to_path_buf();
        let sources = Sources::multiple(
            vec![path.clone(), path.clone()],
            Descriptions::PerFile(vec!["desc1".into(), "desc2".into()]),
        );
        let disc: DiscRates = from_sources(&sources).unwrap();
        assert_eq!(disc.tag.file_name(), path.display().to_string().as_str());
        assert_eq!(disc.tag.description(), "desc1 + desc2");
        assert_eq!(disc.years.len(), 51);
    }

    #[test]
    fn test_read_later_file_overrides() {
        let first = write_workbook(2000..2010);
        let mut second = tempfile::NamedTempFile::new().unwrap();
        write!(second, r#"{{ "discount": {{ "year": [2009, 2010], "discount_rate": [0.05, 0.06] }} }}"#)
            .unwrap();
        let sources = Sources::multiple(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            Descriptions::Shared("demo".into()),
        );
        let disc: DiscRates = from_sources(&sources).unwrap();
        assert_eq!(disc.years.len(), 11);
        assert_eq!(disc.rates[8], 0.02);
        assert_eq!(&disc.rates[9..], &[0.05, 0.06]);
        assert_eq!(disc.tag.description(), "demo");
    }

    #[test]
    fn test_read_wrong_field_fail() {
        let file = write_workbook(2000..2003);
        let fields = DiscRatesFields { rate: "wrong name".into(), ..Default::default() };
        let err = DiscRates::default()
            .read_with(file.path(), "", &fields)
            .unwrap_err();
        assert!(matches!(err, EntityError::MissingField { ref field, .. } if field == "wrong name"));
    }

    #[test]
    fn test_from_file_checks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "discount": {{ "year": [2000, 2001], "discount_rate": [0.05] }} }}"#)
            .unwrap();
        let err = DiscRates::from_file(file.path(), "broken").unwrap_err();
        assert_eq!(err.to_string(), "Invalid DiscRates.rates size: 2 != 1");
    }
}
