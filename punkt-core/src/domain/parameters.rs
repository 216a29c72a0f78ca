//! Learned Punkt parameters
//!
//! The parameter set is mutated while training and shared read-only by all
//! annotation calls afterwards. Lookups of unknown keys are never errors.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::domain::ortho::OrthoContext;

/// The trained model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    /// Abbreviation types, without their final period
    abbrev_types: HashSet<String>,
    /// Ordered type pairs that form a unit across a period
    collocations: HashSet<(String, String)>,
    /// Types over-represented after sentence breaks
    sentence_starters: HashSet<String>,
    /// Per-type orthographic context
    ortho_context: HashMap<String, OrthoContext>,
}

impl ParameterSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_abbrev_type(&self, typ: &str) -> bool {
        self.abbrev_types.contains(typ)
    }

    pub fn insert_abbrev_type(&mut self, typ: impl Into<String>) -> bool {
        self.abbrev_types.insert(typ.into())
    }

    pub fn remove_abbrev_type(&mut self, typ: &str) -> bool {
        self.abbrev_types.remove(typ)
    }

    pub fn clear_abbrev_types(&mut self) {
        self.abbrev_types.clear();
    }

    pub fn abbrev_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.abbrev_types.iter().map(String::as_str)
    }

    pub fn has_collocation(&self, first: &str, second: &str) -> bool {
        // Cheap rejection before building the owned key
        if self.collocations.is_empty() {
            return false;
        }
        self.collocations
            .contains(&(first.to_string(), second.to_string()))
    }

    pub fn insert_collocation(
        &mut self,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> bool {
        self.collocations.insert((first.into(), second.into()))
    }

    pub fn clear_collocations(&mut self) {
        self.collocations.clear();
    }

    pub fn collocations(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.collocations
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn has_sentence_starter(&self, typ: &str) -> bool {
        self.sentence_starters.contains(typ)
    }

    pub fn insert_sentence_starter(&mut self, typ: impl Into<String>) -> bool {
        self.sentence_starters.insert(typ.into())
    }

    pub fn clear_sentence_starters(&mut self) {
        self.sentence_starters.clear();
    }

    pub fn sentence_starters(&self) -> impl Iterator<Item = &str> + '_ {
        self.sentence_starters.iter().map(String::as_str)
    }

    /// Orthographic context of `typ`; empty when never observed
    pub fn ortho_context(&self, typ: &str) -> OrthoContext {
        self.ortho_context.get(typ).copied().unwrap_or_default()
    }

    /// OR `flag` into the context of `typ`
    pub fn add_ortho_context(&mut self, typ: impl Into<String>, flag: OrthoContext) {
        *self.ortho_context.entry(typ.into()).or_default() |= flag;
    }

    /// Replace the context of `typ`
    pub fn set_ortho_context(&mut self, typ: impl Into<String>, context: OrthoContext) {
        self.ortho_context.insert(typ.into(), context);
    }

    /// Clear `flag` from the context of `typ`
    pub fn remove_ortho_context(&mut self, typ: &str, flag: OrthoContext) {
        if let Some(context) = self.ortho_context.get_mut(typ) {
            context.remove(flag);
        }
    }

    pub fn clear_ortho_context(&mut self) {
        self.ortho_context.clear();
    }

    pub fn ortho_contexts(&self) -> impl Iterator<Item = (&str, OrthoContext)> + '_ {
        self.ortho_context.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// True when nothing has been learned or loaded
    pub fn is_empty(&self) -> bool {
        self.abbrev_types.is_empty()
            && self.collocations.is_empty()
            && self.sentence_starters.is_empty()
            && self.ortho_context.is_empty()
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn sorted<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
            let mut items: Vec<&str> = items.collect();
            items.sort_unstable();
            items
        }

        let mut collocations: Vec<String> = self
            .collocations()
            .map(|(a, b)| format!("{a}|{b}"))
            .collect();
        collocations.sort_unstable();

        writeln!(f, "Abbreviations: {:?}", sorted(self.abbrev_types()))?;
        writeln!(f, "Collocations: {collocations:?}")?;
        writeln!(f, "Sentence starters: {:?}", sorted(self.sentence_starters()))?;
        write!(f, "Orthographic contexts: {}", self.ortho_context.len())
    }
}
