//! Track terrain and its generator.
//!
//! A track is a fixed run of cells, each carrying a terrain factor that scales
//! the chance of a horse moving while it stands on that cell.

use crate::config::{
    DIFFICULT_FACTOR, FAVORABLE_FACTOR, NORMAL_FACTOR, NORMAL_TERRAIN_SHARE, TRACK_LENGTH,
};
use once_cell::sync::Lazy;
use rand::distr::weighted::WeightedIndex;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Difficult,
    Normal,
    Favorable,
}

impl Terrain {
    /// Movement multiplier for this terrain.
    pub fn factor(self) -> f64 {
        match self {
            Terrain::Difficult => DIFFICULT_FACTOR,
            Terrain::Normal => NORMAL_FACTOR,
            Terrain::Favorable => FAVORABLE_FACTOR,
        }
    }

    /// CSS class used when drawing a cell of this terrain.
    pub fn css_class(self) -> &'static str {
        match self {
            Terrain::Difficult => "cell-difficult",
            Terrain::Normal => "cell-normal",
            Terrain::Favorable => "cell-favorable",
        }
    }
}

const TERRAIN_ORDER: [Terrain; 3] = [Terrain::Normal, Terrain::Difficult, Terrain::Favorable];

static TERRAIN_MIX: Lazy<WeightedIndex<f64>> = Lazy::new(|| {
    let rest = (1.0 - NORMAL_TERRAIN_SHARE) / 2.0;
    WeightedIndex::new([NORMAL_TERRAIN_SHARE, rest, rest]).unwrap()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    cells: Vec<Terrain>,
}

impl Track {
    /// Generate a fresh track of `TRACK_LENGTH` cells.
    pub fn generate<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self::generate_with_len(TRACK_LENGTH, rng)
    }

    pub fn generate_with_len<R: rand::Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let cells = (0..len)
            .map(|_| TERRAIN_ORDER[TERRAIN_MIX.sample(rng)])
            .collect();
        Self { cells }
    }

    /// A track with the given cells, mostly useful for scripted races.
    pub fn from_cells(cells: Vec<Terrain>) -> Self {
        Self { cells }
    }

    /// Uniform normal track of the standard length.
    pub fn flat() -> Self {
        Self::from_cells(vec![Terrain::Normal; TRACK_LENGTH])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Terrain] {
        &self.cells
    }

    /// Terrain under a horse at `position`; positions past the end read the last cell.
    pub fn terrain_at(&self, position: f64) -> Terrain {
        let last = self.cells.len().saturating_sub(1);
        let idx = (position.max(0.0).floor() as usize).min(last);
        self.cells.get(idx).copied().unwrap_or(Terrain::Normal)
    }

    pub fn factor_at(&self, position: f64) -> f64 {
        self.terrain_at(position).factor()
    }
}
