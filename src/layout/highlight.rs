/// Emphasis of a node that matches, or when no search is active
pub const FULL_EMPHASIS: f32 = 1.0;
/// Emphasis of a non-matching node while a search is active
pub const DIMMED_EMPHASIS: f32 = 0.2;

/// Case-insensitive substring search over node names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHighlight {
    query: Option<String>,
}

impl SearchHighlight {
    pub fn new(query: &str) -> Self {
        Self {
            query: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }

    /// True when a non-empty query is set
    pub fn is_active(&self) -> bool {
        self.query.is_some()
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.query {
            Some(query) => name.to_lowercase().contains(query.as_str()),
            None => true,
        }
    }

    pub fn emphasis(&self, name: &str) -> f32 {
        if self.matches(name) {
            FULL_EMPHASIS
        } else {
            DIMMED_EMPHASIS
        }
    }
}
