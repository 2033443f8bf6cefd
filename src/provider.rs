//! Where species and move records come from.
//!
//! The engine only sees the [`DataProvider`] trait. The remote PokeAPI
//! implementation lives in [`crate::pokeapi`]; this module holds the offline
//! dataset and the memoising wrapper.

use crate::errors::{DataError, DataResult};
use schema::{MoveDetails, SpeciesStats};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Source of species and move records.
///
/// Lookups are blocking. A failed lookup must say whether the record is
/// missing ([`DataError::NotFound`]) or the source itself failed.
pub trait DataProvider {
    fn fetch_species(&self, name: &str) -> DataResult<SpeciesStats>;

    /// `move_ref` is whatever a learnset entry carries: a move name or a
    /// resource URL, depending on the provider.
    fn fetch_move(&self, move_ref: &str) -> DataResult<MoveDetails>;
}

impl<P: DataProvider + ?Sized> DataProvider for &P {
    fn fetch_species(&self, name: &str) -> DataResult<SpeciesStats> {
        (**self).fetch_species(name)
    }

    fn fetch_move(&self, move_ref: &str) -> DataResult<MoveDetails> {
        (**self).fetch_move(move_ref)
    }
}

impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    fn fetch_species(&self, name: &str) -> DataResult<SpeciesStats> {
        (**self).fetch_species(name)
    }

    fn fetch_move(&self, move_ref: &str) -> DataResult<MoveDetails> {
        (**self).fetch_move(move_ref)
    }
}

/// On-disk dataset format: species and moves keyed by lowercase name.
///
/// ```ron
/// (
///     species: {
///         "bulbasaur": (
///             name: "bulbasaur",
///             base_stats: (hp: 45, attack: 49, defense: 49, speed: 45),
///             types: [Grass, Poison],
///             learnable_moves: [(move_ref: "tackle", min_level: 1)],
///         ),
///     },
///     moves: {
///         "tackle": (name: "tackle", power: Some(40), move_type: Normal),
///     },
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub species: BTreeMap<String, SpeciesStats>,
    pub moves: BTreeMap<String, MoveDetails>,
}

/// Serves records from an in-memory [`Dataset`]. Lookups ignore case.
#[derive(Debug, Clone, Default)]
pub struct StaticDataProvider {
    dataset: Dataset,
}

impl StaticDataProvider {
    pub fn new(dataset: Dataset) -> Self {
        let species = dataset
            .species
            .into_iter()
            .map(|(name, stats)| (name.to_lowercase(), stats))
            .collect();
        let moves = dataset
            .moves
            .into_iter()
            .map(|(name, details)| (name.to_lowercase(), details))
            .collect();
        Self {
            dataset: Dataset { species, moves },
        }
    }

    pub fn from_ron_str(source: &str) -> DataResult<Self> {
        let dataset: Dataset = ron::from_str(source)?;
        Ok(Self::new(dataset))
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let source = std::fs::read_to_string(path)?;
        let provider = Self::from_ron_str(&source)?;
        tracing::info!(
            path = %path.display(),
            species = provider.dataset.species.len(),
            moves = provider.dataset.moves.len(),
            "loaded dataset"
        );
        Ok(provider)
    }

    pub fn with_species(mut self, species: SpeciesStats) -> Self {
        self.dataset
            .species
            .insert(species.name.to_lowercase(), species);
        self
    }

    pub fn with_move(mut self, key: &str, details: MoveDetails) -> Self {
        self.dataset.moves.insert(key.to_lowercase(), details);
        self
    }
}

impl DataProvider for StaticDataProvider {
    fn fetch_species(&self, name: &str) -> DataResult<SpeciesStats> {
        self.dataset
            .species
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| DataError::species_not_found(name))
    }

    fn fetch_move(&self, move_ref: &str) -> DataResult<MoveDetails> {
        self.dataset
            .moves
            .get(&move_ref.to_lowercase())
            .cloned()
            .ok_or_else(|| DataError::move_not_found(move_ref))
    }
}

/// Remembers successful lookups of the wrapped provider. Failures are not
/// cached, so a transient network error is retried on the next request.
#[derive(Debug)]
pub struct CachingProvider<P> {
    inner: P,
    species: RefCell<HashMap<String, SpeciesStats>>,
    moves: RefCell<HashMap<String, MoveDetails>>,
}

impl<P: DataProvider> CachingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            species: RefCell::new(HashMap::new()),
            moves: RefCell::new(HashMap::new()),
        }
    }
}

impl<P: DataProvider> DataProvider for CachingProvider<P> {
    fn fetch_species(&self, name: &str) -> DataResult<SpeciesStats> {
        let key = name.to_lowercase();
        if let Some(hit) = self.species.borrow().get(&key) {
            return Ok(hit.clone());
        }
        let species = self.inner.fetch_species(name)?;
        self.species.borrow_mut().insert(key, species.clone());
        Ok(species)
    }

    fn fetch_move(&self, move_ref: &str) -> DataResult<MoveDetails> {
        let key = move_ref.to_lowercase();
        if let Some(hit) = self.moves.borrow().get(&key) {
            return Ok(hit.clone());
        }
        let details = self.inner.fetch_move(move_ref)?;
        self.moves.borrow_mut().insert(key, details.clone());
        Ok(details)
    }
}
