//! Item Tags
//!
//! Free-form labels attached to menu items (`popular`, `refreshing`, ...).

use std::string::ToString;

use serde::Deserialize;
use smallvec::SmallVec;

/// A sorted, de-duplicated set of tags backed by `SmallVec<[String; 5]>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct Tags {
    tags: SmallVec<[String; 5]>,
}

impl Tags {
    /// Create a new tag set, sorting and removing duplicates.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut collection = Self { tags };

        collection.tags.sort();
        collection.tags.dedup();

        collection
    }

    /// Create a new tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        Self::new(
            tags.iter()
                .map(ToString::to_string)
                .collect::<SmallVec<[String; 5]>>(),
        )
    }

    /// Check if the set contains a tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|probe| probe.as_str().cmp(tag))
            .is_ok()
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags in the set.
    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Self::new(SmallVec::from_vec(tags))
    }
}
