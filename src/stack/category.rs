use serde::{Deserialize, Serialize};
use std::fmt;

/// Taxonomy bucket a detected technology is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Languages,
    Frontend,
    Backend,
    Tools,
    AiMl,
}

impl Category {
    pub fn all_variants() -> &'static [Category] {
        &[
            Category::Languages,
            Category::Frontend,
            Category::Backend,
            Category::Tools,
            Category::AiMl,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Languages => "Languages",
            Category::Frontend => "Frontend",
            Category::Backend => "Backend",
            Category::Tools => "Tools",
            Category::AiMl => "AI / ML",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Labels produced by one independent unit of classification work
///
/// Each marker check or manifest read yields its own `Contribution`; they are
/// folded into a [`super::StackDescriptor`] only after every read has settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contribution {
    entries: Vec<(Category, String)>,
}

impl Contribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: Category, label: impl Into<String>) {
        self.entries.push((category, label.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        self.entries.iter().map(|(c, l)| (*c, l.as_str()))
    }
}

impl IntoIterator for Contribution {
    type Item = (Category, String);
    type IntoIter = std::vec::IntoIter<(Category, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
