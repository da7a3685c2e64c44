use std::collections::BTreeMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::ModeTable;
use crate::error::CatalogError;

/// One verb as stored in the dataset: its dictionary form plus every
/// conjugated-form field, keyed by the dataset's field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerbRecord {
    #[serde(rename = "dictionary", alias = "dictionaryForm")]
    pub dictionary_form: String,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl VerbRecord {
    pub fn new<K, V>(dictionary_form: &str, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            dictionary_form: dictionary_form.to_string(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }

    /// String value of a dataset field. Non-string values count as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Immutable, ordered verb list. Always holds at least one verb, and every verb
/// carries the answer fields of every mode it was validated against.
#[derive(Clone, Debug)]
pub struct VerbCatalog {
    verbs: Vec<VerbRecord>,
}

impl VerbCatalog {
    pub fn from_records(verbs: Vec<VerbRecord>, modes: &ModeTable) -> Result<Self, CatalogError> {
        if verbs.is_empty() {
            return Err(CatalogError::Empty);
        }
        if modes.is_empty() {
            return Err(CatalogError::NoModes);
        }

        for (index, verb) in verbs.iter().enumerate() {
            for spec in modes.iter() {
                for field in spec.fields() {
                    if verb.field(field).is_none() {
                        return Err(CatalogError::MissingField {
                            index,
                            dictionary_form: verb.dictionary_form.clone(),
                            field: field.to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self { verbs })
    }

    pub fn from_json(json: &str, modes: &ModeTable) -> Result<Self, CatalogError> {
        let verbs: Vec<VerbRecord> = serde_json::from_str(json)?;
        Self::from_records(verbs, modes)
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VerbRecord> {
        self.verbs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerbRecord> {
        self.verbs.iter()
    }
}

impl Index<usize> for VerbCatalog {
    type Output = VerbRecord;

    fn index(&self, index: usize) -> &VerbRecord {
        &self.verbs[index]
    }
}
