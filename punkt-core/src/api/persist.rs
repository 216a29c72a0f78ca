//! JSON persistence of trained parameters
//!
//! The on-disk layout is the one used by the published NLTK-derived
//! parameter files:
//!
//! ```json
//! {
//!   "abbrev_types": ["e.g", "dr"],
//!   "collocations": ["##number##|june"],
//!   "sentence_starters": ["however"],
//!   "ortho_context": {"the": 46}
//! }
//! ```
//!
//! Every field is optional on input. Collocations are written as
//! `"first|second"` strings; two-element arrays are accepted as well.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::domain::ortho::OrthoContext;
use crate::domain::parameters::ParameterSet;
use crate::error::{Error, Result};

/// A persisted collocation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum CollocationEntry {
    Joined(String),
    Pair(Vec<String>),
}

impl CollocationEntry {
    fn into_pair(self) -> Result<(String, String)> {
        match self {
            CollocationEntry::Joined(joined) => {
                let mut parts = joined.split('|');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(first), Some(second), None) => {
                        Ok((first.to_string(), second.to_string()))
                    }
                    _ => Err(Error::Parameters(format!(
                        "collocation '{joined}' must contain exactly one '|'"
                    ))),
                }
            }
            CollocationEntry::Pair(pair) => match <[String; 2]>::try_from(pair) {
                Ok([first, second]) => Ok((first, second)),
                Err(pair) => Err(Error::Parameters(format!(
                    "collocation must have two types, got {}",
                    pair.len()
                ))),
            },
        }
    }
}

/// Serialized form of a [`ParameterSet`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct ParameterData {
    abbrev_types: Vec<String>,
    collocations: Vec<CollocationEntry>,
    sentence_starters: Vec<String>,
    ortho_context: BTreeMap<String, u32>,
}

impl From<&ParameterSet> for ParameterData {
    fn from(params: &ParameterSet) -> Self {
        fn sorted<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
            let mut items: Vec<String> = items.map(str::to_string).collect();
            items.sort_unstable();
            items
        }

        let mut collocations: Vec<String> = params
            .collocations()
            .map(|(first, second)| format!("{first}|{second}"))
            .collect();
        collocations.sort_unstable();

        Self {
            abbrev_types: sorted(params.abbrev_types()),
            collocations: collocations
                .into_iter()
                .map(CollocationEntry::Joined)
                .collect(),
            sentence_starters: sorted(params.sentence_starters()),
            ortho_context: params
                .ortho_contexts()
                .map(|(typ, context)| (typ.to_string(), u32::from(context.bits())))
                .collect(),
        }
    }
}

impl ParameterData {
    fn into_parameters(self) -> Result<ParameterSet> {
        let mut params = ParameterSet::new();

        for typ in self.abbrev_types {
            params.insert_abbrev_type(typ);
        }

        for entry in self.collocations {
            let (first, second) = entry.into_pair()?;
            params.insert_collocation(first, second);
        }

        for typ in self.sentence_starters {
            params.insert_sentence_starter(typ);
        }

        for (typ, bits) in self.ortho_context {
            let context = OrthoContext::from_bits(bits).ok_or_else(|| {
                Error::Parameters(format!(
                    "orthographic context {bits} for '{typ}' has unknown bits"
                ))
            })?;
            params.set_ortho_context(typ, context);
        }

        Ok(params)
    }
}

impl ParameterSet {
    /// Load parameters from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: ParameterData = serde_json::from_str(json)?;
        data.into_parameters()
    }

    /// Load parameters from a JSON reader
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let data: ParameterData = serde_json::from_reader(reader)?;
        data.into_parameters()
    }

    /// Serialize to a JSON string with sorted entries
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&ParameterData::from(self))?)
    }

    /// Serialize as pretty-printed JSON into `writer`
    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &ParameterData::from(self))?;
        Ok(())
    }
}
