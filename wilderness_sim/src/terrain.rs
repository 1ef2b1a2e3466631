// Terrain catalog and per-cell terrain instances.
//
// A `TerrainKind` is a catalog entry: movement cost plus display metadata.
// The catalog pairs each kind with a sampling weight. A draw picks a number
// in `[0, total_weight)` and walks the cumulative weights, which is the same
// distribution as a bag holding each kind `weight` times without ever
// materializing the bag. Weights come from user config and may be as large
// as `u32::MAX`. The catalog is plain data (see `config.rs`), so new kinds
// can be added without touching code.
//
// A `TerrainCell` is what actually sits in the grid: a fresh copy of the
// drawn kind's cost and display tag plus a `CellId` from the generator.
// Cells are never shared between coordinates.

use crate::types::{CellId, DisplayTag, Displayable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use wilderness_prng::GameRng;

/// A kind of terrain that can be generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainKind {
    pub name: String,
    /// Cost added to an agent's score when it enters a cell of this kind.
    pub cost: u32,
    pub display: DisplayTag,
}

impl TerrainKind {
    pub fn new(name: impl Into<String>, cost: u32, display: DisplayTag) -> Self {
        Self {
            name: name.into(),
            cost,
            display,
        }
    }

    /// Open ground. Free to enter.
    pub fn plains() -> Self {
        Self::new("plains", 0, DisplayTag::new(' ', "#edae28"))
    }

    pub fn forest() -> Self {
        Self::new("forest", 3, DisplayTag::new('F', "#167722"))
    }

    pub fn swamp() -> Self {
        Self::new("swamp", 7, DisplayTag::new('S', "#846315"))
    }
}

/// A catalog entry with its relative sampling weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: TerrainKind,
    pub weight: u32,
}

/// The weighted set of terrain kinds available to the map generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl Default for TerrainCatalog {
    /// Plains most common, swamp rarest.
    fn default() -> Self {
        Self {
            entries: vec![
                CatalogEntry {
                    kind: TerrainKind::swamp(),
                    weight: 2,
                },
                CatalogEntry {
                    kind: TerrainKind::forest(),
                    weight: 5,
                },
                CatalogEntry {
                    kind: TerrainKind::plains(),
                    weight: 8,
                },
            ],
        }
    }
}

impl TerrainCatalog {
    /// A catalog holding one kind with weight 1.
    pub fn single(kind: TerrainKind) -> Self {
        Self {
            entries: vec![CatalogEntry { kind, weight: 1 }],
        }
    }

    pub fn with_entry(mut self, kind: TerrainKind, weight: u32) -> Self {
        self.entries.push(CatalogEntry { kind, weight });
        self
    }

    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// Draw one kind with probability `weight / total_weight`. `None` when
    /// the total weight is zero.
    pub fn draw(&self, rng: &mut GameRng) -> Option<&TerrainKind> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let mut ticket = rng.range_u64(0, total);
        for entry in &self.entries {
            let weight = u64::from(entry.weight);
            if ticket < weight {
                return Some(&entry.kind);
            }
            ticket -= weight;
        }
        None
    }

    /// Every cost that generation can produce (kinds with weight 0 excluded).
    pub fn costs(&self) -> BTreeSet<u32> {
        self.entries
            .iter()
            .filter(|e| e.weight > 0)
            .map(|e| e.kind.cost)
            .collect()
    }
}

/// One grid cell's terrain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainCell {
    pub id: CellId,
    /// Name of the kind this cell was drawn from.
    pub kind: String,
    pub cost: u32,
    pub display: DisplayTag,
}

impl TerrainCell {
    pub fn from_kind(kind: &TerrainKind, id: CellId) -> Self {
        Self {
            id,
            kind: kind.name.clone(),
            cost: kind.cost,
            display: kind.display.clone(),
        }
    }
}

impl Displayable for TerrainCell {
    fn display_tag(&self) -> &DisplayTag {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_counts(catalog: &TerrainCatalog, draws: usize) -> Vec<(String, usize)> {
        let mut rng = GameRng::new(99);
        let mut counts: Vec<(String, usize)> = catalog
            .entries
            .iter()
            .map(|e| (e.kind.name.clone(), 0))
            .collect();
        for _ in 0..draws {
            let kind = catalog.draw(&mut rng).unwrap();
            if let Some(slot) = counts.iter_mut().find(|(name, _)| *name == kind.name) {
                slot.1 += 1;
            }
        }
        counts
    }

    #[test]
    fn default_catalog_matches_classic_weights() {
        let catalog = TerrainCatalog::default();
        assert_eq!(catalog.total_weight(), 15);
        // 15_000 draws: expect about 2_000 swamp, 5_000 forest, 8_000 plains.
        let counts = draw_counts(&catalog, 15_000);
        assert_eq!(counts[0].0, "swamp");
        assert!((1_700..2_300).contains(&counts[0].1), "{counts:?}");
        assert!((4_600..5_400).contains(&counts[1].1), "{counts:?}");
        assert!((7_550..8_450).contains(&counts[2].1), "{counts:?}");
    }

    #[test]
    fn huge_weights_draw_without_allocating() {
        let catalog = TerrainCatalog::single(TerrainKind::forest())
            .with_entry(TerrainKind::swamp(), u32::MAX)
            .with_entry(TerrainKind::plains(), u32::MAX);
        assert_eq!(catalog.total_weight(), 1 + 2 * u64::from(u32::MAX));
        let counts = draw_counts(&catalog, 2_000);
        assert!(counts[1].1 > 800 && counts[2].1 > 800, "{counts:?}");
    }

    #[test]
    fn default_costs() {
        let costs: Vec<u32> = TerrainCatalog::default().costs().into_iter().collect();
        assert_eq!(costs, vec![0, 3, 7]);
    }

    #[test]
    fn zero_weight_kind_never_drawn() {
        let catalog = TerrainCatalog::single(TerrainKind::forest())
            .with_entry(TerrainKind::swamp(), 0);
        let mut rng = GameRng::new(4);
        for _ in 0..500 {
            assert_eq!(catalog.draw(&mut rng).unwrap().name, "forest");
        }
        assert!(!catalog.costs().contains(&7));
    }

    #[test]
    fn empty_catalog_draws_nothing() {
        let catalog = TerrainCatalog { entries: vec![] };
        assert_eq!(catalog.total_weight(), 0);
        assert!(catalog.draw(&mut GameRng::new(1)).is_none());
    }

    #[test]
    fn cell_copies_kind_data() {
        let kind = TerrainKind::swamp();
        let cell = TerrainCell::from_kind(&kind, CellId(9));
        assert_eq!(cell.id, CellId(9));
        assert_eq!(cell.cost, 7);
        assert_eq!(cell.kind, "swamp");
        assert_eq!(cell.display_tag(), &kind.display);
    }

    #[test]
    fn catalog_serializes_as_list() {
        let catalog = TerrainCatalog::single(TerrainKind::plains());
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.starts_with('['), "expected a JSON array, got {json}");
        let restored: TerrainCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, catalog);
    }
}
