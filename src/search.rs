//! Search

/// Something that can be matched by a [`SearchQuery`].
pub trait Named {
    /// The text searched against.
    fn name(&self) -> &str;
}

/// Case-insensitive substring filter. An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Builds a query from the text typed in the search box.
    pub fn new(input: &str) -> Self {
        Self {
            needle: input.to_lowercase(),
        }
    }

    /// Whether the query is empty and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Tests a single name.
    pub fn matches(&self, name: &str) -> bool {
        self.is_empty() || name.to_lowercase().contains(&self.needle)
    }

    /// Keeps the items whose name matches, in their original order.
    pub fn filter<'a, T: Named>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item.name())).collect()
    }
}

impl From<&str> for SearchQuery {
    fn from(input: &str) -> Self {
        Self::new(input)
    }
}
