use crate::context::{Framework, ProjectContext, ProjectKind};
use anyhow::Result;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use toml::Value as TomlValue;
use tracing::debug;
use walkdir::WalkDir;

/// Produces the context record the merge core consumes. The core never
/// performs detection itself.
#[async_trait::async_trait]
pub trait ContextDetector {
    async fn detect(&self, dir: &Path) -> Result<ProjectContext>;
}

/// Detection by manifest sniffing: `package.json`, `Cargo.toml`,
/// `pyproject.toml`, `requirements.txt`, `composer.json`.
pub struct ManifestDetector;

/// When a manifest names several frameworks, the most specific one wins.
const FRAMEWORK_PRECEDENCE: &[Framework] = &[
    Framework::NextJs,
    Framework::NestJs,
    Framework::Vue,
    Framework::Svelte,
    Framework::React,
    Framework::Express,
    Framework::Django,
    Framework::Laravel,
];

impl ManifestDetector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ContextDetector for ManifestDetector {
    async fn detect(&self, dir: &Path) -> Result<ProjectContext> {
        let (base_path, is_nested) = locate_project_root(dir);
        let mut context = ProjectContext::unknown(base_path);
        context.is_nested = is_nested;

        if let Some((kind, framework)) = sniff_manifests(&context.base_path) {
            context.kind = kind;
            context.framework = framework;
        }
        context.architecture = sniff_architecture(&context.base_path);

        debug!(
            kind = context.kind.as_str(),
            framework = ?context.framework.map(|f| f.as_str()),
            nested = context.is_nested,
            "detected project context"
        );
        Ok(context)
    }
}

fn has_manifest(dir: &Path) -> bool {
    [
        "package.json",
        "Cargo.toml",
        "pyproject.toml",
        "requirements.txt",
        "composer.json",
        "go.mod",
    ]
    .iter()
    .any(|name| dir.join(name).is_file())
}

/// A directory without a manifest of its own but with exactly one immediate
/// subdirectory that has one is treated as the parent of a nested project;
/// the merge rebases onto the subdirectory.
fn locate_project_root(dir: &Path) -> (PathBuf, bool) {
    if has_manifest(dir) {
        return (dir.to_path_buf(), false);
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if crate::rules::is_sensitive_folder(&name) {
            continue;
        }
        if has_manifest(entry.path()) {
            candidates.push(entry.path().to_path_buf());
        }
    }

    match candidates.as_slice() {
        [only] => (only.clone(), true),
        _ => (dir.to_path_buf(), false),
    }
}

fn sniff_manifests(dir: &Path) -> Option<(ProjectKind, Option<Framework>)> {
    if let Some(framework) = sniff_package_json(dir) {
        return Some((ProjectKind::Node, framework));
    }
    if dir.join("package.json").is_file() {
        return Some((ProjectKind::Node, None));
    }
    if dir.join("composer.json").is_file() {
        return Some((ProjectKind::Php, sniff_composer_json(dir)));
    }
    if dir.join("Cargo.toml").is_file() {
        return Some((ProjectKind::Rust, None));
    }
    if dir.join("pyproject.toml").is_file() || dir.join("requirements.txt").is_file() {
        return Some((ProjectKind::Python, sniff_python_deps(dir)));
    }
    None
}

fn sniff_package_json(dir: &Path) -> Option<Option<Framework>> {
    let content = std::fs::read_to_string(dir.join("package.json")).ok()?;
    let package: JsonValue = serde_json::from_str(&content).ok()?;

    let mut found = Vec::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(deps) = package.get(section).and_then(|d| d.as_object()) {
            for name in deps.keys() {
                if let Some(framework) = Framework::from_dependency(name) {
                    found.push(framework);
                }
            }
        }
    }

    Some(
        FRAMEWORK_PRECEDENCE
            .iter()
            .copied()
            .find(|f| found.contains(f)),
    )
}

fn sniff_composer_json(dir: &Path) -> Option<Framework> {
    let content = std::fs::read_to_string(dir.join("composer.json")).ok()?;
    let composer: JsonValue = serde_json::from_str(&content).ok()?;

    composer
        .get("require")
        .and_then(|r| r.as_object())
        .and_then(|deps| deps.keys().find_map(|name| Framework::from_dependency(name)))
}

fn sniff_python_deps(dir: &Path) -> Option<Framework> {
    if let Ok(content) = std::fs::read_to_string(dir.join("requirements.txt")) {
        if content.lines().any(|line| {
            line.split(|c: char| "=><~ ".contains(c))
                .next()
                .map_or(false, |name| name.eq_ignore_ascii_case("django"))
        }) {
            return Some(Framework::Django);
        }
    }

    if let Ok(content) = std::fs::read_to_string(dir.join("pyproject.toml")) {
        if let Ok(pyproject) = toml::from_str::<TomlValue>(&content) {
            let deps = pyproject
                .get("project")
                .and_then(|p| p.get("dependencies"))
                .and_then(|d| d.as_array());
            if let Some(deps) = deps {
                if deps.iter().any(|d| {
                    d.as_str()
                        .map_or(false, |s| s.to_lowercase().starts_with("django"))
                }) {
                    return Some(Framework::Django);
                }
            }
        }
    }

    None
}

/// Coarse layout tag read off the existing `src/` children.
fn sniff_architecture(dir: &Path) -> Option<String> {
    let src = dir.join("src");
    if src.join("controllers").is_dir() || src.join("routes").is_dir() {
        return Some("mvc".to_string());
    }
    if src.join("components").is_dir() {
        return Some("component".to_string());
    }
    None
}
