pub mod record;
pub mod source;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub use record::{VerbCatalog, VerbRecord};
pub use source::CatalogSource;

/// Identifier of a practice mode ("te", "ta", ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(String);

impl ModeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The three accepted answers of one verb for one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceptedForms<'a> {
    pub kanji: &'a str,
    pub kana: &'a str,
    pub romaji: &'a str,
}

/// Maps a mode to the record fields that hold its accepted answers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSpec {
    pub id: ModeId,
    pub label: String,
    pub kanji_field: String,
    pub kana_field: String,
    pub romaji_field: String,
}

impl ModeSpec {
    pub fn new(id: &str, label: &str, kanji_field: &str, kana_field: &str, romaji_field: &str) -> Self {
        Self {
            id: ModeId::new(id),
            label: label.to_string(),
            kanji_field: kanji_field.to_string(),
            kana_field: kana_field.to_string(),
            romaji_field: romaji_field.to_string(),
        }
    }

    pub fn fields(&self) -> [&str; 3] {
        [&self.kanji_field, &self.kana_field, &self.romaji_field]
    }

    pub fn accepted_forms<'v>(&self, verb: &'v VerbRecord) -> Option<AcceptedForms<'v>> {
        Some(AcceptedForms {
            kanji: verb.field(&self.kanji_field)?,
            kana: verb.field(&self.kana_field)?,
            romaji: verb.field(&self.romaji_field)?,
        })
    }
}

/// Ordered, non-empty set of practice modes. Adding a mode is a table entry,
/// never a new code path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeTable {
    modes: Vec<ModeSpec>,
}

impl ModeTable {
    pub fn new(specs: Vec<ModeSpec>) -> Result<Self, CatalogError> {
        let mut modes: Vec<ModeSpec> = Vec::with_capacity(specs.len());
        for spec in specs {
            if modes.iter().any(|m| m.id == spec.id) {
                log::warn!("duplicate mode '{}' ignored", spec.id);
                continue;
            }
            modes.push(spec);
        }
        if modes.is_empty() {
            return Err(CatalogError::NoModes);
        }
        Ok(Self { modes })
    }

    pub fn get(&self, id: &ModeId) -> Option<&ModeSpec> {
        self.modes.iter().find(|m| &m.id == id)
    }

    pub fn contains(&self, id: &ModeId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &ModeId) -> Option<usize> {
        self.modes.iter().position(|m| &m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModeSpec> {
        self.modes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModeId> {
        self.modes.iter().map(|m| &m.id)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn default_mode(&self) -> &ModeId {
        &self.modes[0].id
    }

    pub fn nth(&self, index: usize) -> Option<&ModeSpec> {
        self.modes.get(index)
    }

    /// Next mode in table order, wrapping around. Unknown ids map to the first mode.
    pub fn next_after(&self, id: &ModeId) -> &ModeId {
        match self.position(id) {
            Some(i) => &self.modes[(i + 1) % self.modes.len()].id,
            None => self.default_mode(),
        }
    }

    pub fn prev_before(&self, id: &ModeId) -> &ModeId {
        match self.position(id) {
            Some(0) => &self.modes[self.modes.len() - 1].id,
            Some(i) => &self.modes[i - 1].id,
            None => self.default_mode(),
        }
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self {
            modes: default_mode_specs(),
        }
    }
}

pub fn default_mode_specs() -> Vec<ModeSpec> {
    vec![
        ModeSpec::new("te", "て-form", "teForm", "teHiragana", "teRomaji"),
        ModeSpec::new("ta", "た-form", "taForm", "taHiragana", "taRomaji"),
    ]
}
