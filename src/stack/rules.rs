//! Declarative classification rules
//!
//! Presence rules look only at the names of the root's direct children. Manifest
//! rules read one file and match its dependency keys (`package.json`) or its
//! lowercased text. Every rule is evaluated independently; a rule firing never
//! suppresses another.

use super::{Category, Contribution};
use crate::tree::TreeNode;
use std::collections::HashSet;
use tracing::warn;

/// Condition over the root directory's direct children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// A direct child (file or directory) with this name, case-insensitive
    Marker(&'static str),
    /// A direct child file whose name ends with this suffix
    ChildWithSuffix(&'static str),
    AnyOf(Vec<Presence>),
    AllOf(Vec<Presence>),
    Not(Box<Presence>),
}

impl Presence {
    pub fn any_marker(names: &[&'static str]) -> Self {
        Presence::AnyOf(names.iter().copied().map(Presence::Marker).collect())
    }

    pub fn evaluate(&self, root: &TreeNode) -> bool {
        match self {
            Presence::Marker(name) => root.child_named(name).is_some(),
            Presence::ChildWithSuffix(suffix) => root
                .children()
                .iter()
                .any(|child| child.is_file() && child.name.ends_with(suffix)),
            Presence::AnyOf(conditions) => conditions.iter().any(|c| c.evaluate(root)),
            Presence::AllOf(conditions) => conditions.iter().all(|c| c.evaluate(root)),
            Presence::Not(condition) => !condition.evaluate(root),
        }
    }
}

/// Label contributed whenever its presence condition holds
#[derive(Debug, Clone)]
pub struct PresenceRule {
    pub when: Presence,
    pub category: Category,
    pub label: &'static str,
}

impl PresenceRule {
    pub fn new(when: Presence, category: Category, label: &'static str) -> Self {
        Self {
            when,
            category,
            label,
        }
    }
}

/// How a manifest's content is turned into matchable evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// JSON; keys of `dependencies` and `devDependencies` matched exactly
    PackageJson,
    /// Plain text; needles matched as substrings of the lowercased content
    Text,
}

/// Evidence extracted from a manifest's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEvidence {
    Dependencies(HashSet<String>),
    Text(String),
}

impl ManifestFormat {
    /// Returns `None` when the content cannot be parsed in this format
    pub fn extract(&self, content: &str) -> Option<ManifestEvidence> {
        let lowered = content.to_lowercase();
        match self {
            ManifestFormat::Text => Some(ManifestEvidence::Text(lowered)),
            ManifestFormat::PackageJson => {
                let value: serde_json::Value = serde_json::from_str(&lowered).ok()?;
                let mut keys = HashSet::new();
                for section in ["dependencies", "devdependencies"] {
                    if let Some(deps) = value.get(section).and_then(|d| d.as_object()) {
                        keys.extend(deps.keys().cloned());
                    }
                }
                Some(ManifestEvidence::Dependencies(keys))
            }
        }
    }
}

/// Label contributed when any of its needles matches a manifest's evidence
#[derive(Debug, Clone)]
pub struct ContentRule {
    pub needles: &'static [&'static str],
    pub category: Category,
    pub label: &'static str,
}

impl ContentRule {
    pub fn matches(&self, evidence: &ManifestEvidence) -> bool {
        match evidence {
            ManifestEvidence::Dependencies(keys) => self.needles.iter().any(|n| keys.contains(*n)),
            ManifestEvidence::Text(text) => self.needles.iter().any(|n| text.contains(n)),
        }
    }
}

/// A manifest file whose content is read and matched against content rules
#[derive(Debug, Clone)]
pub struct ManifestRule {
    /// Candidate filenames at the root; the first one present is read
    pub candidates: &'static [&'static str],
    pub format: ManifestFormat,
    pub rules: Vec<ContentRule>,
}

impl ManifestRule {
    pub fn locate<'a>(&self, root: &'a TreeNode) -> Option<&'a TreeNode> {
        self.candidates
            .iter()
            .find_map(|name| root.child_named(name))
            .filter(|node| node.is_file())
    }

    /// Applies the content rules to one manifest's content
    ///
    /// Unparseable content contributes nothing.
    pub fn evaluate(&self, path: &str, content: &str) -> Contribution {
        let mut contribution = Contribution::new();
        let Some(evidence) = self.format.extract(content) else {
            warn!(path = %path, "Failed to parse manifest, skipping content rules");
            return contribution;
        };

        for rule in &self.rules {
            if rule.matches(&evidence) {
                contribution.push(rule.category, rule.label);
            }
        }
        contribution
    }
}

fn content(category: Category, label: &'static str, needles: &'static [&'static str]) -> ContentRule {
    ContentRule {
        needles,
        category,
        label,
    }
}

const PYTHON_MARKERS: &[&str] = &["requirements.txt", "Pipfile", "pyproject.toml", "poetry.lock"];
const JVM_MARKERS: &[&str] = &["pom.xml", "build.gradle", "build.gradle.kts"];

pub fn default_presence_rules() -> Vec<PresenceRule> {
    use Category::*;
    use Presence::*;

    let jvm = || Presence::any_marker(JVM_MARKERS);

    vec![
        PresenceRule::new(Marker("package.json"), Languages, "JavaScript"),
        PresenceRule::new(Marker("package.json"), Tools, "Node.js"),
        PresenceRule::new(Marker("package.json"), Tools, "NPM"),
        PresenceRule::new(Presence::any_marker(PYTHON_MARKERS), Languages, "Python"),
        PresenceRule::new(jvm(), Languages, "Java"),
        PresenceRule::new(AllOf(vec![jvm(), Marker("gradlew")]), Tools, "Gradle"),
        PresenceRule::new(
            AllOf(vec![jvm(), Not(Box::new(Marker("gradlew"))), Marker("mvnw")]),
            Tools,
            "Maven",
        ),
        PresenceRule::new(
            AllOf(vec![
                jvm(),
                AnyOf(vec![Marker("build.gradle.kts"), ChildWithSuffix(".kt")]),
            ]),
            Languages,
            "Kotlin",
        ),
        PresenceRule::new(Marker("go.mod"), Languages, "Go"),
        PresenceRule::new(Marker("Cargo.toml"), Languages, "Rust"),
        PresenceRule::new(Marker("composer.json"), Languages, "PHP"),
        PresenceRule::new(Marker("Gemfile"), Languages, "Ruby"),
        PresenceRule::new(Marker("pubspec.yaml"), Languages, "Dart"),
        PresenceRule::new(Marker("pubspec.yaml"), Frontend, "Flutter"),
        PresenceRule::new(
            AllOf(vec![Marker("Podfile"), ChildWithSuffix(".swift")]),
            Languages,
            "Swift",
        ),
        PresenceRule::new(
            AllOf(vec![Marker("Podfile"), ChildWithSuffix(".swift")]),
            Frontend,
            "iOS (Swift)",
        ),
        PresenceRule::new(
            Presence::any_marker(&["Dockerfile", "docker-compose.yml"]),
            Tools,
            "Docker",
        ),
        PresenceRule::new(
            Presence::any_marker(&["kubernetes", "k8s", "helm"]),
            Tools,
            "Kubernetes",
        ),
    ]
}

pub fn default_manifest_rules() -> Vec<ManifestRule> {
    vec![
        package_json_rules(),
        requirements_rules(),
        ManifestRule {
            candidates: &["pom.xml", "build.gradle"],
            format: ManifestFormat::Text,
            rules: vec![
                content(Category::Backend, "Spring Boot", &["spring-boot"]),
                content(Category::Backend, "Hibernate", &["hibernate"]),
            ],
        },
        ManifestRule {
            candidates: &["go.mod"],
            format: ManifestFormat::Text,
            rules: vec![
                content(Category::Backend, "Gin", &["gin-gonic"]),
                content(Category::Backend, "Fiber", &["gofiber"]),
                content(Category::Backend, "Gorilla Mux", &["gorilla/mux"]),
                content(Category::Backend, "GORM", &["gorm"]),
            ],
        },
        ManifestRule {
            candidates: &["Cargo.toml"],
            format: ManifestFormat::Text,
            rules: vec![
                content(Category::Backend, "Actix Web", &["actix-web"]),
                content(Category::Backend, "Rocket", &["rocket"]),
                content(Category::Backend, "Tokio", &["tokio"]),
                content(Category::Backend, "Diesel", &["diesel"]),
                content(Category::Backend, "SQLx", &["sqlx"]),
            ],
        },
        ManifestRule {
            candidates: &["composer.json"],
            format: ManifestFormat::Text,
            rules: vec![
                content(Category::Backend, "Laravel", &["laravel"]),
                content(Category::Backend, "Symfony", &["symfony"]),
            ],
        },
        ManifestRule {
            candidates: &["Gemfile"],
            format: ManifestFormat::Text,
            rules: vec![
                content(Category::Backend, "Ruby on Rails", &["rails"]),
                content(Category::Backend, "Sinatra", &["sinatra"]),
            ],
        },
    ]
}

fn package_json_rules() -> ManifestRule {
    use Category::*;

    ManifestRule {
        candidates: &["package.json"],
        format: ManifestFormat::PackageJson,
        rules: vec![
            content(Frontend, "React", &["react"]),
            content(Frontend, "Next.js", &["next"]),
            content(Frontend, "Vue.js", &["vue"]),
            content(Frontend, "Nuxt.js", &["nuxt"]),
            content(Frontend, "Svelte", &["svelte"]),
            content(Frontend, "SvelteKit", &["@sveltejs/kit"]),
            content(Frontend, "Angular", &["angular", "@angular/core"]),
            content(Frontend, "Gatsby", &["gatsby"]),
            content(Frontend, "Astro", &["astro"]),
            content(Frontend, "Remix", &["remix"]),
            // state management
            content(Frontend, "Redux", &["redux", "@reduxjs/toolkit"]),
            content(Frontend, "Zustand", &["zustand"]),
            content(Frontend, "Recoil", &["recoil"]),
            content(Frontend, "TanStack Query", &["@tanstack/react-query"]),
            // css and ui kits
            content(Frontend, "Tailwind CSS", &["tailwindcss"]),
            content(Frontend, "Bootstrap", &["bootstrap"]),
            content(Frontend, "Sass", &["sass", "node-sass"]),
            content(Frontend, "Styled Components", &["styled-components"]),
            content(Frontend, "Emotion", &["@emotion/react"]),
            content(Frontend, "MUI", &["@mui/material"]),
            content(Frontend, "Framer Motion", &["framer-motion"]),
            content(Frontend, "Three.js", &["three"]),
            content(Backend, "Express.js", &["express"]),
            content(Backend, "NestJS", &["nest", "@nestjs/core"]),
            content(Backend, "Fastify", &["fastify"]),
            content(Backend, "Socket.io", &["socket.io"]),
            content(Backend, "GraphQL", &["graphql"]),
            content(Backend, "Apollo", &["apollo-server", "@apollo/server"]),
            content(Backend, "tRPC", &["trpc"]),
            // databases and orms
            content(Backend, "MongoDB", &["mongoose", "mongodb"]),
            content(Backend, "PostgreSQL", &["pg"]),
            content(Backend, "MySQL", &["mysql2"]),
            content(Backend, "Prisma", &["prisma"]),
            content(Backend, "Drizzle", &["drizzle-orm"]),
            content(Backend, "TypeORM", &["typeorm"]),
            content(Backend, "Sequelize", &["sequelize"]),
            content(Backend, "Firebase", &["firebase", "firebase-admin"]),
            content(Backend, "Supabase", &["supabase", "@supabase/supabase-js"]),
            content(Backend, "Redis", &["redis", "ioredis"]),
            content(AiMl, "TensorFlow.js", &["@tensorflow/tfjs"]),
            content(AiMl, "Brain.js", &["brain.js"]),
            content(AiMl, "OpenAI API", &["openai"]),
            content(AiMl, "LangChain", &["langchain"]),
            content(Languages, "TypeScript", &["typescript"]),
            content(Tools, "Vite", &["vite"]),
            content(Tools, "Webpack", &["webpack"]),
            content(Tools, "Jest", &["jest"]),
            content(Tools, "Vitest", &["vitest"]),
            content(Tools, "Cypress", &["cypress"]),
            content(Tools, "Playwright", &["playwright"]),
            content(Tools, "Storybook", &["storybook"]),
        ],
    }
}

fn requirements_rules() -> ManifestRule {
    use Category::*;

    ManifestRule {
        candidates: &["requirements.txt"],
        format: ManifestFormat::Text,
        rules: vec![
            content(Backend, "Django", &["django"]),
            content(Backend, "Flask", &["flask"]),
            content(Backend, "FastAPI", &["fastapi"]),
            content(Frontend, "Streamlit", &["streamlit"]),
            content(AiMl, "PyTorch", &["torch", "pytorch"]),
            content(AiMl, "TensorFlow/Keras", &["tensorflow", "keras"]),
            content(AiMl, "Scikit-learn", &["scikit-learn", "sklearn"]),
            content(AiMl, "Pandas", &["pandas"]),
            content(AiMl, "NumPy", &["numpy"]),
            content(AiMl, "Matplotlib", &["matplotlib"]),
            content(AiMl, "Seaborn", &["seaborn"]),
            content(AiMl, "OpenCV", &["opencv", "cv2"]),
            content(AiMl, "NLTK", &["nltk"]),
            content(AiMl, "Spacy", &["spacy"]),
            content(AiMl, "Transformers (HuggingFace)", &["transformers", "huggingface"]),
            content(AiMl, "SciPy", &["scipy"]),
            content(Tools, "Jupyter Notebooks", &["jupyter"]),
            content(Backend, "SQLAlchemy", &["sqlalchemy"]),
            content(Backend, "PostgreSQL", &["psycopg2"]),
            content(Backend, "MongoDB", &["pymongo"]),
        ],
    }
}
