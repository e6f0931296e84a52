//! Checkable, mergeable risk entities and their construction from sources.
pub mod disc_rates;
pub mod impact_funcs;
pub mod measures;

pub use disc_rates::DiscRates;
pub use impact_funcs::{ImpactFunc, ImpactFuncSet};
pub use measures::{ImpactAdjust, Measure, MeasureSet};

use crate::error::{EntityError, Result};
use crate::tag::Tag;
use crate::util::checker;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A validated record used as input to risk calculations.
///
/// `read` and `load` are extension points: the default implementations fail
/// with [`EntityError::NotImplemented`] and format specific entities override
/// them.
pub trait Entity: Default + Send + Sized {
    /// Owner name used in checker messages.
    const NAME: &'static str;

    fn tag(&self) -> &Tag;

    /// Verifies that all per-item arrays agree in length.
    fn check(&self) -> Result<()>;

    /// Fills this entity from one source file.
    fn read(&mut self, _file_name: &Path, _description: &str) -> Result<()> {
        Err(EntityError::not_implemented(Self::NAME, "read"))
    }

    /// Reads and checks one source file.
    fn load(&mut self, file_name: &Path, description: &str) -> Result<()> {
        self.read(file_name, description)?;
        self.check()
    }

    /// Constructs a checked entity from one source file.
    fn from_file(file_name: &Path, description: &str) -> Result<Self> {
        let mut entity = Self::default();
        entity.load(file_name, description)?;
        Ok(entity)
    }
}

/// An entity that can absorb another one of the same kind.
pub trait Mergeable: Entity {
    /// Merges `other` into `self`; on conflicting keys `other` wins.
    ///
    /// The result is not checked.
    fn append(&mut self, other: &Self);
}

/// Descriptions attached to a list of source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptions {
    /// One description for every file.
    Shared(String),
    /// One description per file, in file order.
    PerFile(Vec<String>),
}

/// The files an entity is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    files: Vec<PathBuf>,
    descriptions: Descriptions,
}

impl Default for Sources {
    fn default() -> Self {
        Self::none()
    }
}

impl Sources {
    pub fn none() -> Self {
        Self { files: Vec::new(), descriptions: Descriptions::Shared(String::new()) }
    }

    pub fn single(file: impl Into<PathBuf>, description: impl Into<String>) -> Self {
        Self {
            files: vec![file.into()],
            descriptions: Descriptions::Shared(description.into()),
        }
    }

    pub fn multiple(files: Vec<PathBuf>, descriptions: Descriptions) -> Self {
        Self { files, descriptions }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Pairs every file with its description.
    pub fn pairs(&self) -> Result<Vec<(&Path, &str)>> {
        match &self.descriptions {
            Descriptions::Shared(descr) => {
                Ok(self.files.iter().map(|f| (f.as_path(), descr.as_str())).collect())
            }
            Descriptions::PerFile(descrs) => {
                checker::check_size("Sources", "description", self.files.len(), descrs.len())?;
                Ok(self
                    .files
                    .iter()
                    .zip(descrs)
                    .map(|(f, d)| (f.as_path(), d.as_str()))
                    .collect())
            }
        }
    }
}

/// Builds an entity from every source, merged in list order, then checks it.
///
/// Files are read in parallel; the first one initializes the entity and each
/// following one is appended on top. No sources yields an empty entity.
pub fn from_sources<E: Mergeable>(sources: &Sources) -> Result<E> {
    let pairs = sources.pairs()?;
    let parts = pairs
        .par_iter()
        .map(|&(file, descr)| {
            info!("Reading {} from {}", E::NAME, file.display());
            let mut part = E::default();
            part.read(file, descr)?;
            Ok(part)
        })
        .collect::<Result<Vec<E>>>()?;

    let mut parts = parts.into_iter();
    let mut entity = parts.next().unwrap_or_default();
    for part in parts {
        debug!("Appending {} from {}", E::NAME, part.tag().file_name());
        entity.append(&part);
    }
    entity.check()?;
    Ok(entity)
}
