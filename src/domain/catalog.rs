//! Opening catalog - named families of scripted variations.
//!
//! The on-disk format is a JSON object mapping a family name to its list of
//! variations:
//!
//! ```json
//! { "Ruy Lopez": [ { "name": "Berlin Defence", "side": "White", "moves": ["e4", "e5"] } ] }
//! ```
//!
//! Family names are folded with [`normalize_family_key`] so lookups are
//! insensitive to case, spacing, punctuation and diacritics.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::chess::Side;
use crate::domain::error::CatalogError;

/// One scripted opening line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Variation {
    pub name: String,
    /// The side the trainee plays; the other side is auto-played
    pub side: Side,
    /// SAN moves from the starting position, alternating sides
    pub moves: Vec<String>,
}

/// Raw document shape as stored in `openings.json`
pub type CatalogDocument = BTreeMap<String, Vec<Variation>>;

/// A group of related variations
#[derive(Clone, Debug)]
pub struct Family {
    pub key: String,
    /// Name as written in the catalog source
    pub display: String,
    pub variations: Vec<Variation>,
}

/// Read-only mapping from normalized family key to its variations
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    families: BTreeMap<String, Family>,
}

/// Where the catalog is in its one-shot load
#[derive(Clone, Debug, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready(Catalog),
    Failed(String),
}

/// Undo the common UTF-8-read-as-Latin-1 corruption, e.g. "GrÃ¼nfeld" -> "Grünfeld".
fn repair_mojibake(name: &str) -> String {
    let mut repaired = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        let lead = c as u32;
        if lead == 0xC2 || lead == 0xC3 {
            if let Some(&next) = chars.peek() {
                let trail = next as u32;
                if (0x80..=0xBF).contains(&trail) {
                    let decoded = ((lead & 0x1F) << 6) | (trail & 0x3F);
                    if let Some(decoded) = char::from_u32(decoded) {
                        repaired.push(decoded);
                        chars.next();
                        continue;
                    }
                }
            }
        }
        repaired.push(c);
    }
    repaired
}

/// Fold a display family name into its lookup key.
///
/// Decomposes to NFKD, drops combining marks, lowercases and keeps only
/// alphanumerics: "Grünfeld Defence" and "grunfeld-defence" both become
/// "grunfelddefence".
pub fn normalize_family_key(name: &str) -> String {
    repair_mojibake(name)
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

impl Catalog {
    /// Build a catalog, validating every family and variation.
    pub fn from_families<I>(families: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, Vec<Variation>)>,
    {
        let mut map: BTreeMap<String, Family> = BTreeMap::new();

        for (display, variations) in families {
            let key = normalize_family_key(&display);
            if key.is_empty() {
                return Err(CatalogError::InvalidCatalog {
                    family: display,
                    reason: "family name has no letters or digits".to_string(),
                });
            }
            if variations.is_empty() {
                return Err(CatalogError::InvalidCatalog {
                    family: display,
                    reason: "family has no variations".to_string(),
                });
            }
            if let Some(empty) = variations.iter().find(|v| v.moves.is_empty()) {
                return Err(CatalogError::InvalidCatalog {
                    reason: format!("variation '{}' has no moves", empty.name),
                    family: display,
                });
            }

            match map.entry(key) {
                Entry::Occupied(existing) => {
                    return Err(CatalogError::KeyCollision {
                        key: existing.key().clone(),
                        first: existing.get().display.clone(),
                        second: display,
                    });
                }
                Entry::Vacant(slot) => {
                    let key = slot.key().clone();
                    slot.insert(Family {
                        key,
                        display,
                        variations,
                    });
                }
            }
        }

        Ok(Self { families: map })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_families(document)
    }

    /// Blocking read; callers run it off the UI thread.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// JSON Schema describing the catalog document
    pub fn json_schema() -> serde_json::Result<serde_json::Value> {
        let schema = schemars::schema_for!(CatalogDocument);
        serde_json::to_value(&schema)
    }

    /// Look up a family by an already-normalized key
    pub fn get(&self, key: &str) -> Option<&Family> {
        self.families.get(key)
    }

    /// Families ordered by key
    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.values()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Pick one of a family's variations uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, key: &str, rng: &mut R) -> Option<&Variation> {
        self.families.get(key)?.variations.choose(rng)
    }
}
