//! Static game catalogs: maps with their coordinate bounds and the item
//! table used when synthesizing pickups, drops and equips.
//!
//! A [`Catalog`] is built once and handed to the generator; nothing in the
//! crate reads catalog data from process-wide state.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::TelemetryError;

/// The eight battlegrounds a synthetic match can be played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapName {
    /// Erangel, 8x8 km.
    Erangel,
    /// Miramar, 8x8 km.
    Miramar,
    /// Sanhok, 4x4 km.
    Sanhok,
    /// Vikendi, 8x8 km.
    Vikendi,
    /// Karakin, 2x2 km.
    Karakin,
    /// Taego, 8x8 km.
    Taego,
    /// Deston, 8x8 km.
    Deston,
    /// Haven, 1x1 km.
    Haven,
}

impl MapName {
    /// Every map, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Erangel,
        Self::Miramar,
        Self::Sanhok,
        Self::Vikendi,
        Self::Karakin,
        Self::Taego,
        Self::Deston,
        Self::Haven,
    ];

    /// Returns the map name as it appears in telemetry.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Erangel => "Erangel",
            Self::Miramar => "Miramar",
            Self::Sanhok => "Sanhok",
            Self::Vikendi => "Vikendi",
            Self::Karakin => "Karakin",
            Self::Taego => "Taego",
            Self::Deston => "Deston",
            Self::Haven => "Haven",
        }
    }

    /// Playable area of the map in centimetres.
    #[must_use]
    pub const fn default_bounds(&self) -> MapBounds {
        let extent = match self {
            Self::Erangel | Self::Miramar | Self::Vikendi | Self::Taego | Self::Deston => 816_000.0,
            Self::Sanhok => 408_000.0,
            Self::Karakin => 204_000.0,
            Self::Haven => 102_000.0,
        };
        MapBounds {
            map: *self,
            max_x: extent,
            max_y: extent,
        }
    }
}

/// Coordinate bounds of a map. Locations are drawn from `[0, max_x]` by
/// `[0, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    /// Map these bounds belong to.
    pub map: MapName,
    /// Maximum x coordinate (cm).
    pub max_x: f64,
    /// Maximum y coordinate (cm).
    pub max_y: f64,
}

/// Item reference as it appears inside telemetry payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Blueprint id, e.g. `Item_Weapon_AK47_C`.
    pub item_id: String,
    /// Top-level category, e.g. `Weapon`.
    pub category: String,
    /// Subcategory, e.g. `Main`.
    pub sub_category: String,
}

/// One subcategory and the item ids it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSubCategory {
    /// Subcategory name.
    pub name: String,
    /// Item blueprint ids.
    pub item_ids: Vec<String>,
}

/// One category and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCategory {
    /// Category name.
    pub name: String,
    /// Subcategories of this category.
    pub subcategories: Vec<ItemSubCategory>,
}

impl ItemCategory {
    fn new(name: &str, subcategories: &[(&str, &[&str])]) -> Self {
        Self {
            name: name.to_string(),
            subcategories: subcategories
                .iter()
                .map(|(sub, ids)| ItemSubCategory {
                    name: (*sub).to_string(),
                    item_ids: ids.iter().map(|id| (*id).to_string()).collect(),
                })
                .collect(),
        }
    }
}

/// Immutable map and item tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    maps: Vec<MapBounds>,
    items: Vec<ItemCategory>,
}

impl Catalog {
    /// Builds a catalog from explicit tables.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidConfig`] if there are no maps, if a
    /// map has non-positive or non-finite bounds, or if any level of the
    /// item table is empty.
    pub fn new(maps: Vec<MapBounds>, items: Vec<ItemCategory>) -> Result<Self, TelemetryError> {
        if maps.is_empty() {
            return Err(TelemetryError::InvalidConfig(
                "catalog needs at least one map".to_string(),
            ));
        }
        if let Some(bad) = maps
            .iter()
            .find(|b| !(b.max_x.is_finite() && b.max_y.is_finite() && b.max_x > 0.0 && b.max_y > 0.0))
        {
            return Err(TelemetryError::InvalidConfig(format!(
                "map {} has invalid bounds",
                bad.map.as_str()
            )));
        }
        if items.is_empty() {
            return Err(TelemetryError::InvalidConfig(
                "catalog needs at least one item category".to_string(),
            ));
        }
        for category in &items {
            if category.subcategories.is_empty() {
                return Err(TelemetryError::InvalidConfig(format!(
                    "item category {} has no subcategories",
                    category.name
                )));
            }
            if let Some(sub) = category.subcategories.iter().find(|s| s.item_ids.is_empty()) {
                return Err(TelemetryError::InvalidConfig(format!(
                    "item subcategory {}/{} is empty",
                    category.name, sub.name
                )));
            }
        }
        Ok(Self { maps, items })
    }

    /// The built-in PUBG catalog: all eight maps and the standard item
    /// table.
    #[must_use]
    pub fn standard() -> Self {
        let maps = MapName::ALL.iter().map(MapName::default_bounds).collect();
        let items = vec![
            ItemCategory::new(
                "Weapon",
                &[
                    (
                        "Main",
                        &[
                            "Item_Weapon_AK47_C",
                            "Item_Weapon_M416_C",
                            "Item_Weapon_SCAR-L_C",
                            "Item_Weapon_M16A4_C",
                            "Item_Weapon_Kar98k_C",
                            "Item_Weapon_AWM_C",
                        ],
                    ),
                    (
                        "Handgun",
                        &[
                            "Item_Weapon_P92_C",
                            "Item_Weapon_P1911_C",
                            "Item_Weapon_Glock_C",
                        ],
                    ),
                ],
            ),
            ItemCategory::new(
                "Equipment",
                &[
                    (
                        "Head",
                        &[
                            "Item_Head_E_01_Lv1_C",
                            "Item_Head_E_02_Lv2_C",
                            "Item_Head_E_03_Lv3_C",
                        ],
                    ),
                    (
                        "Torso",
                        &[
                            "Item_Armor_E_01_Lv1_C",
                            "Item_Armor_E_02_Lv2_C",
                            "Item_Armor_E_03_Lv3_C",
                        ],
                    ),
                ],
            ),
            ItemCategory::new(
                "Use",
                &[
                    (
                        "Heal",
                        &[
                            "Item_Heal_FirstAid_C",
                            "Item_Heal_Medkit_C",
                            "Item_Heal_Bandage_C",
                        ],
                    ),
                    (
                        "Boost",
                        &[
                            "Item_Boost_EnergyDrink_C",
                            "Item_Boost_PainKiller_C",
                            "Item_Boost_Adrenaline_C",
                        ],
                    ),
                ],
            ),
            ItemCategory::new(
                "Attachment",
                &[(
                    "None",
                    &[
                        "Item_Attach_Weapon_Muzzle_Compensator_C",
                        "Item_Attach_Weapon_Upper_ACOG_01_C",
                        "Item_Attach_Weapon_Stock_AR_Composite_C",
                    ],
                )],
            ),
        ];
        Self { maps, items }
    }

    /// Maps a match can be played on.
    #[must_use]
    pub fn maps(&self) -> &[MapBounds] {
        &self.maps
    }

    /// Item categories.
    #[must_use]
    pub fn items(&self) -> &[ItemCategory] {
        &self.items
    }

    /// Bounds for `map`, or its built-in bounds if this catalog does not
    /// list it.
    #[must_use]
    pub fn bounds(&self, map: MapName) -> MapBounds {
        self.maps
            .iter()
            .find(|b| b.map == map)
            .copied()
            .unwrap_or_else(|| map.default_bounds())
    }

    /// Picks a map uniformly at random.
    pub fn sample_map<R: Rng + ?Sized>(&self, rng: &mut R) -> MapName {
        self.maps
            .choose(rng)
            .map_or(MapName::Erangel, |bounds| bounds.map)
    }

    /// Picks an item: uniform category, then uniform subcategory, then
    /// uniform id. Returns `None` only for an empty level, which
    /// [`Catalog::new`] rejects.
    pub fn sample_item<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Item> {
        let category = self.items.choose(rng)?;
        let sub = category.subcategories.choose(rng)?;
        let item_id = sub.item_ids.choose(rng)?;
        Some(Item {
            item_id: item_id.clone(),
            category: category.name.clone(),
            sub_category: sub.name.clone(),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn standard_catalog_passes_validation() {
        let standard = Catalog::standard();
        let rebuilt = Catalog::new(standard.maps().to_vec(), standard.items().to_vec());
        assert!(rebuilt.is_ok());
        assert_eq!(standard.maps().len(), 8);
        assert_eq!(standard.items().len(), 4);
    }

    #[test]
    fn map_extents_match_game_sizes() {
        assert_eq!(MapName::Erangel.default_bounds().max_x, 816_000.0);
        assert_eq!(MapName::Sanhok.default_bounds().max_y, 408_000.0);
        assert_eq!(MapName::Karakin.default_bounds().max_x, 204_000.0);
        assert_eq!(MapName::Haven.default_bounds().max_x, 102_000.0);
    }

    #[test]
    fn empty_tables_are_rejected() {
        assert!(Catalog::new(Vec::new(), Catalog::standard().items().to_vec()).is_err());
        assert!(Catalog::new(Catalog::standard().maps().to_vec(), Vec::new()).is_err());

        let hollow = vec![ItemCategory {
            name: "Weapon".to_string(),
            subcategories: vec![ItemSubCategory {
                name: "Main".to_string(),
                item_ids: Vec::new(),
            }],
        }];
        assert!(Catalog::new(Catalog::standard().maps().to_vec(), hollow).is_err());
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let maps = vec![MapBounds {
            map: MapName::Haven,
            max_x: 0.0,
            max_y: 100.0,
        }];
        assert!(Catalog::new(maps, Catalog::standard().items().to_vec()).is_err());
    }

    #[test]
    fn sampled_items_belong_to_their_subcategory() {
        let catalog = Catalog::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let Some(item) = catalog.sample_item(&mut rng) else {
                panic!("standard catalog is never empty");
            };
            let listed = catalog
                .items()
                .iter()
                .filter(|c| c.name == item.category)
                .flat_map(|c| c.subcategories.iter())
                .filter(|s| s.name == item.sub_category)
                .any(|s| s.item_ids.contains(&item.item_id));
            assert!(listed, "{item:?} not in catalog");
        }
    }

    #[test]
    fn item_serializes_camel_case() {
        let item = Item {
            item_id: "Item_Heal_Medkit_C".to_string(),
            category: "Use".to_string(),
            sub_category: "Heal".to_string(),
        };
        let Ok(value) = serde_json::to_value(&item) else {
            panic!("serialization failed");
        };
        assert_eq!(value["itemId"], "Item_Heal_Medkit_C");
        assert_eq!(value["subCategory"], "Heal");
    }
}
