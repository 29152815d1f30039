use super::{Category, Contribution};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Normalized technology stack inferred for a repository
///
/// Each category holds unique labels. Order follows first contribution, which is
/// stable for a given rule table but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackDescriptor {
    pub languages: Vec<String>,
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub tools: Vec<String>,
    pub ai_ml: Vec<String>,
}

impl StackDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds contributions in the given order and runs the dedup pass
    pub fn from_contributions(contributions: impl IntoIterator<Item = Contribution>) -> Self {
        let mut descriptor = Self::new();
        for contribution in contributions {
            descriptor.merge(contribution);
        }
        descriptor.dedup();
        descriptor
    }

    pub fn merge(&mut self, contribution: Contribution) {
        for (category, label) in contribution {
            self.labels_mut(category).push(label);
        }
    }

    /// Removes repeated labels per category, keeping the first occurrence
    pub fn dedup(&mut self) {
        for category in Category::all_variants() {
            let mut seen = HashSet::new();
            self.labels_mut(*category)
                .retain(|label| seen.insert(label.clone()));
        }
    }

    pub fn labels(&self, category: Category) -> &[String] {
        match category {
            Category::Languages => &self.languages,
            Category::Frontend => &self.frontend,
            Category::Backend => &self.backend,
            Category::Tools => &self.tools,
            Category::AiMl => &self.ai_ml,
        }
    }

    fn labels_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Languages => &mut self.languages,
            Category::Frontend => &mut self.frontend,
            Category::Backend => &mut self.backend,
            Category::Tools => &mut self.tools,
            Category::AiMl => &mut self.ai_ml,
        }
    }

    pub fn contains(&self, category: Category, label: &str) -> bool {
        self.labels(category).iter().any(|l| l == label)
    }

    pub fn is_empty(&self) -> bool {
        Category::all_variants()
            .iter()
            .all(|c| self.labels(*c).is_empty())
    }

    /// Category-wise set equality, ignoring label order
    pub fn same_labels(&self, other: &StackDescriptor) -> bool {
        Category::all_variants().iter().all(|c| {
            let mine: HashSet<&String> = self.labels(*c).iter().collect();
            let theirs: HashSet<&String> = other.labels(*c).iter().collect();
            mine == theirs
        })
    }
}
