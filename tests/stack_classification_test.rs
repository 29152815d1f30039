//! Stack classification against in-memory repositories

mod support;

use async_trait::async_trait;
use codeviz::analysis::RepoContentFetcher;
use codeviz::github::RepoRef;
use codeviz::tree::{build_tree, EntryKind, FlatEntry};
use codeviz::{Category, ContentFetcher, RepositorySource, StackClassifier, StackDescriptor};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use support::MockRepository;

async fn classify(repo: &MockRepository) -> StackDescriptor {
    let repo_ref = RepoRef::new("acme", "fixture");
    let entries = repo.fetch_tree(&repo_ref, "main").await.unwrap();
    let root = build_tree("fixture", entries);
    let fetcher = RepoContentFetcher::new(repo, &repo_ref);
    StackClassifier::with_defaults().classify(&root, &fetcher).await
}

fn labels(stack: &StackDescriptor, category: Category) -> Vec<&str> {
    stack.labels(category).iter().map(String::as_str).collect()
}

#[tokio::test]
async fn test_react_express_project() {
    let repo = MockRepository::new().with_file(
        "package.json",
        r#"{"dependencies":{"react":"^18","express":"^4"}}"#,
    );

    let stack = classify(&repo).await;

    assert!(stack.contains(Category::Languages, "JavaScript"));
    assert!(stack.contains(Category::Frontend, "React"));
    assert!(stack.contains(Category::Backend, "Express.js"));
    assert_eq!(labels(&stack, Category::Tools), vec!["Node.js", "NPM"]);
}

#[tokio::test]
async fn test_no_duplicate_labels() {
    let repo = MockRepository::new().with_file(
        "package.json",
        r#"{"dependencies":{"react":"^18","next":"14"},"devDependencies":{"react":"^18"}}"#,
    );

    let stack = classify(&repo).await;
    assert_eq!(labels(&stack, Category::Frontend), vec!["React", "Next.js"]);
}

#[tokio::test]
async fn test_classify_is_idempotent() {
    let repo = MockRepository::new()
        .with_file("package.json", r#"{"dependencies":{"mongoose":"8","vue":"3"}}"#)
        .with_file("requirements.txt", "django==5.0\npymongo\nnumpy\n")
        .with_file("Dockerfile", "FROM node:20");

    let first = classify(&repo).await;
    let second = classify(&repo).await;

    assert!(first.same_labels(&second));
    assert_eq!(labels(&first, Category::Backend), vec!["MongoDB", "Django"]);
    assert!(first.contains(Category::Tools, "Docker"));
    assert!(first.contains(Category::AiMl, "NumPy"));
}

#[tokio::test]
async fn test_unreadable_manifest_keeps_presence_labels() {
    let repo = MockRepository::new()
        .with_unreadable_file("package.json")
        .with_file("go.mod", "module example.com/api\nrequire github.com/gin-gonic/gin v1.9.1\n");

    let stack = classify(&repo).await;

    assert_eq!(labels(&stack, Category::Languages), vec!["JavaScript", "Go"]);
    assert_eq!(labels(&stack, Category::Backend), vec!["Gin"]);
    assert!(repo.reads().contains(&"package.json".to_string()));
}

#[tokio::test]
async fn test_malformed_package_json() {
    let repo = MockRepository::new().with_file("package.json", "{ not json");

    let stack = classify(&repo).await;

    assert!(stack.contains(Category::Languages, "JavaScript"));
    assert!(stack.labels(Category::Frontend).is_empty());
    assert!(stack.labels(Category::Backend).is_empty());
}

#[tokio::test]
async fn test_manifest_below_root_is_ignored() {
    let repo = MockRepository::new()
        .with_dir("web")
        .with_file("web/package.json", r#"{"dependencies":{"react":"18"}}"#);

    let stack = classify(&repo).await;

    assert!(stack.is_empty());
    assert!(repo.reads().is_empty());
}

#[tokio::test]
async fn test_gradle_wrapper_wins_over_maven_wrapper() {
    let repo = MockRepository::new()
        .with_file("build.gradle", "implementation 'org.springframework.boot:spring-boot-starter-web'")
        .with_file("gradlew", "#!/bin/sh")
        .with_file("mvnw", "#!/bin/sh");

    let stack = classify(&repo).await;

    assert_eq!(labels(&stack, Category::Languages), vec!["Java"]);
    assert_eq!(labels(&stack, Category::Tools), vec!["Gradle"]);
    assert_eq!(labels(&stack, Category::Backend), vec!["Spring Boot"]);
}

#[tokio::test]
async fn test_empty_repository() {
    let stack = classify(&MockRepository::new()).await;
    assert_eq!(stack, StackDescriptor::default());
}

/// Serves each manifest after its own delay and records completion order
struct DelayedFetcher {
    files: HashMap<&'static str, (&'static str, Duration)>,
    completed: Mutex<Vec<String>>,
}

#[async_trait]
impl ContentFetcher for DelayedFetcher {
    async fn read_file(&self, path: &str) -> anyhow::Result<Option<String>> {
        let Some((content, delay)) = self.files.get(path) else {
            return Ok(None);
        };
        tokio::time::sleep(*delay).await;
        self.completed.lock().unwrap().push(path.to_string());
        Ok(Some(content.to_string()))
    }
}

#[tokio::test]
async fn test_read_completion_order_does_not_change_result() {
    let manifests = [
        ("package.json", r#"{"dependencies":{"react":"^18","express":"^4"}}"#, 80),
        ("requirements.txt", "fastapi\ntorch\n", 40),
        ("go.mod", "require github.com/gin-gonic/gin v1.9.1\n", 0),
    ];

    let mut repo = MockRepository::new();
    for (path, content, _) in manifests {
        repo = repo.with_file(path, content);
    }
    let expected = classify(&repo).await;

    let root = build_tree(
        "fixture",
        manifests
            .iter()
            .map(|(path, _, _)| FlatEntry::new(*path, EntryKind::Blob, None))
            .collect::<Vec<_>>(),
    );
    let fetcher = DelayedFetcher {
        files: manifests
            .iter()
            .map(|(path, content, ms)| (*path, (*content, Duration::from_millis(*ms))))
            .collect(),
        completed: Mutex::new(Vec::new()),
    };

    let stack = StackClassifier::with_defaults().classify(&root, &fetcher).await;

    let completed = fetcher.completed.lock().unwrap().clone();
    assert_eq!(completed, vec!["go.mod", "requirements.txt", "package.json"]);
    assert_eq!(stack, expected);
    assert!(stack.contains(Category::Frontend, "React"));
    assert!(stack.contains(Category::Backend, "Gin"));
    assert!(stack.contains(Category::Backend, "FastAPI"));
}
