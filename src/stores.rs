//! Stores
//!
//! Store labels are free text typed by whoever reported a price. Grouping uses a
//! normalised [`StoreKey`] so that `"Supermercado XYZ"` and `" supermercado  xyz"`
//! count as the same store, while the label shown to users is kept as typed.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A trimmed, non-empty store label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreLabel(String);

impl StoreLabel {
    /// Builds a label from user input, returning `None` when the input is blank.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// The label as entered, without surrounding whitespace.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The grouping key for this label.
    pub fn key(&self) -> StoreKey {
        StoreKey::from_label(&self.0)
    }
}

impl fmt::Display for StoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoreLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalised store identity used when grouping observations.
///
/// Observations without a store share the [`StoreKey::Unlabelled`] group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Lower-cased label with runs of whitespace collapsed to one space.
    Labelled(String),

    /// No store was given.
    Unlabelled,
}

impl StoreKey {
    fn from_label(label: &str) -> Self {
        let collapsed = label.split_whitespace().collect::<Vec<_>>().join(" ");

        Self::Labelled(collapsed.to_lowercase())
    }

    /// Key for an optional label.
    pub fn of(label: Option<&StoreLabel>) -> Self {
        label.map_or(Self::Unlabelled, StoreLabel::key)
    }
}

/// Distinct store labels in first-seen order.
///
/// Labels that normalise to the same [`StoreKey`] are reported once, using the
/// first spelling encountered.
pub fn distinct_stores<'a, I>(labels: I) -> Vec<StoreLabel>
where
    I: IntoIterator<Item = Option<&'a StoreLabel>>,
{
    let mut seen = FxHashSet::default();

    labels
        .into_iter()
        .flatten()
        .filter(|label| seen.insert(label.key()))
        .cloned()
        .collect()
}

/// Autocomplete suggestions for the text currently typed into a store field.
///
/// Matching is a case-insensitive substring test; blank input suggests every store.
pub fn suggest<'a>(stores: &'a [StoreLabel], input: &str) -> Vec<&'a StoreLabel> {
    let needle = input.trim().to_lowercase();

    stores
        .iter()
        .filter(|store| needle.is_empty() || store.as_str().to_lowercase().contains(&needle))
        .collect()
}
