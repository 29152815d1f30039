use super::rules::{default_manifest_rules, default_presence_rules, ManifestRule, PresenceRule};
use super::{Contribution, StackDescriptor};
use crate::tree::TreeNode;
use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, info, warn};

/// On-demand access to file contents by repository path
///
/// `Ok(None)` means the content is unavailable (binary, too large, deleted).
/// Errors are absorbed by the classifier and treated the same way.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn read_file(&self, path: &str) -> anyhow::Result<Option<String>>;
}

/// Rule-table driven technology stack classifier
pub struct StackClassifier {
    presence_rules: Vec<PresenceRule>,
    manifest_rules: Vec<ManifestRule>,
}

impl StackClassifier {
    pub fn new(presence_rules: Vec<PresenceRule>, manifest_rules: Vec<ManifestRule>) -> Self {
        Self {
            presence_rules,
            manifest_rules,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_presence_rules(), default_manifest_rules())
    }

    pub fn presence_rules(&self) -> &[PresenceRule] {
        &self.presence_rules
    }

    pub fn manifest_rules(&self) -> &[ManifestRule] {
        &self.manifest_rules
    }

    /// Labels derived purely from which markers exist at the root
    pub fn detect_presence(&self, root: &TreeNode) -> Contribution {
        let mut contribution = Contribution::new();
        for rule in &self.presence_rules {
            if rule.when.evaluate(root) {
                contribution.push(rule.category, rule.label);
            }
        }
        contribution
    }

    /// Classifies the repository rooted at `root`.
    ///
    /// All manifest reads are dispatched concurrently and awaited together; each
    /// yields its own contribution, folded in rule-table order once every read
    /// has settled. Failed or empty reads only skip that manifest's content rules.
    pub async fn classify(&self, root: &TreeNode, fetcher: &dyn ContentFetcher) -> StackDescriptor {
        let presence = self.detect_presence(root);
        debug!(labels = presence.len(), "Presence detection complete");

        let reads = self
            .manifest_rules
            .iter()
            .filter_map(|manifest| manifest.locate(root).map(|node| (manifest, node)))
            .map(|(manifest, node)| async move {
                match read_content(fetcher, &node.path).await {
                    Some(content) => manifest.evaluate(&node.path, &content),
                    None => Contribution::new(),
                }
            });
        let content_contributions = join_all(reads).await;

        let mut contributions = Vec::with_capacity(content_contributions.len() + 1);
        contributions.push(presence);
        contributions.extend(content_contributions);

        let descriptor = StackDescriptor::from_contributions(contributions);
        info!(
            languages = descriptor.languages.len(),
            frontend = descriptor.frontend.len(),
            backend = descriptor.backend.len(),
            tools = descriptor.tools.len(),
            ai_ml = descriptor.ai_ml.len(),
            "Stack classification complete"
        );
        descriptor
    }
}

impl Default for StackClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

async fn read_content(fetcher: &dyn ContentFetcher, path: &str) -> Option<String> {
    match fetcher.read_file(path).await {
        Ok(Some(content)) => Some(content),
        Ok(None) => {
            debug!(path = %path, "Manifest content unavailable");
            None
        }
        Err(e) => {
            warn!(path = %path, error = %e, "Failed to read manifest");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::Category;
    use crate::tree::{build_tree, EntryKind, FlatEntry};
    use anyhow::anyhow;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapFetcher {
        files: HashMap<String, String>,
        failing: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MapFetcher {
        fn with(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, c)| (p.to_string(), c.to_string()))
                    .collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ContentFetcher for MapFetcher {
        async fn read_file(&self, path: &str) -> anyhow::Result<Option<String>> {
            self.calls.lock().unwrap().push(path.to_string());
            if self.failing.iter().any(|p| p == path) {
                return Err(anyhow!("connection reset"));
            }
            Ok(self.files.get(path).cloned())
        }
    }

    fn root_with_files(names: &[&str]) -> TreeNode {
        build_tree(
            "repo",
            names
                .iter()
                .map(|n| FlatEntry::new(*n, EntryKind::Blob, None))
                .collect::<Vec<_>>(),
        )
    }

    #[tokio::test]
    async fn test_package_json_scenario() {
        let root = root_with_files(&["package.json"]);
        let fetcher = MapFetcher::with(&[(
            "package.json",
            r#"{"dependencies":{"react":"^18","express":"^4"}}"#,
        )]);

        let stack = StackClassifier::with_defaults().classify(&root, &fetcher).await;

        assert!(stack.contains(Category::Languages, "JavaScript"));
        assert!(stack.contains(Category::Frontend, "React"));
        assert!(stack.contains(Category::Backend, "Express.js"));
        assert_eq!(stack.tools, vec!["Node.js", "NPM"]);
    }

    #[tokio::test]
    async fn test_zero_markers_yield_empty_descriptor() {
        let root = root_with_files(&["README.md", "LICENSE"]);
        let fetcher = MapFetcher::default();

        let stack = StackClassifier::with_defaults().classify(&root, &fetcher).await;

        assert!(stack.is_empty());
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_read_keeps_presence_labels() {
        let root = root_with_files(&["Cargo.toml", "go.mod"]);
        let fetcher = MapFetcher {
            files: [("go.mod".to_string(), "require github.com/gin-gonic/gin v1".to_string())]
                .into_iter()
                .collect(),
            failing: vec!["Cargo.toml".to_string()],
            ..Default::default()
        };

        let stack = StackClassifier::with_defaults().classify(&root, &fetcher).await;

        assert_eq!(stack.languages, vec!["Go", "Rust"]);
        assert_eq!(stack.backend, vec!["Gin"]);
    }

    #[tokio::test]
    async fn test_absent_content_skips_content_rules() {
        let root = root_with_files(&["requirements.txt"]);
        let fetcher = MapFetcher::default();

        let stack = StackClassifier::with_defaults().classify(&root, &fetcher).await;

        assert_eq!(stack.languages, vec!["Python"]);
        assert!(stack.backend.is_empty());
        assert!(stack.ai_ml.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_package_json_keeps_presence_labels() {
        let root = root_with_files(&["package.json"]);
        let fetcher = MapFetcher::with(&[("package.json", "{\"dependencies\": {react")]);

        let stack = StackClassifier::with_defaults().classify(&root, &fetcher).await;

        assert_eq!(stack.languages, vec!["JavaScript"]);
        assert_eq!(stack.tools, vec!["Node.js", "NPM"]);
        assert!(stack.frontend.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_labels_are_collapsed() {
        let root = root_with_files(&["package.json", "requirements.txt"]);
        let fetcher = MapFetcher::with(&[
            (
                "package.json",
                r#"{"dependencies":{"mongodb":"^6","mongoose":"^8","pg":"^8"}}"#,
            ),
            ("requirements.txt", "pymongo\npsycopg2-binary\n"),
        ]);

        let stack = StackClassifier::with_defaults().classify(&root, &fetcher).await;

        assert_eq!(stack.backend, vec!["MongoDB", "PostgreSQL"]);
    }

    #[tokio::test]
    async fn test_classification_is_idempotent() {
        let root = root_with_files(&["package.json", "Dockerfile", "pom.xml", "gradlew"]);
        let fetcher = MapFetcher::with(&[
            (
                "package.json",
                r#"{"dependencies":{"react":"^18","next":"^14"},"devDependencies":{"typescript":"^5"}}"#,
            ),
            ("pom.xml", "<artifactId>spring-boot-starter</artifactId>"),
        ]);
        let classifier = StackClassifier::with_defaults();

        let first = classifier.classify(&root, &fetcher).await;
        let second = classifier.classify(&root, &fetcher).await;

        assert!(first.same_labels(&second));
        assert_eq!(first.frontend, vec!["React", "Next.js"]);
        assert!(first.contains(Category::Languages, "TypeScript"));
        assert!(first.contains(Category::Backend, "Spring Boot"));
        assert!(first.contains(Category::Tools, "Gradle"));
        assert!(first.contains(Category::Tools, "Docker"));
    }

    #[tokio::test]
    async fn test_manifest_path_is_the_listed_name() {
        let root = root_with_files(&["PACKAGE.JSON"]);
        let fetcher = MapFetcher::with(&[("PACKAGE.JSON", r#"{"dependencies":{"vue":"3"}}"#)]);

        let stack = StackClassifier::with_defaults().classify(&root, &fetcher).await;

        assert!(stack.contains(Category::Frontend, "Vue.js"));
        assert_eq!(*fetcher.calls.lock().unwrap(), vec!["PACKAGE.JSON".to_string()]);
    }

    #[test]
    fn test_detect_presence_is_synchronous() {
        let root = root_with_files(&["pubspec.yaml"]);
        let contribution = StackClassifier::with_defaults().detect_presence(&root);
        let labels: Vec<_> = contribution.iter().collect();
        assert_eq!(
            labels,
            vec![(Category::Languages, "Dart"), (Category::Frontend, "Flutter")]
        );
    }
}
