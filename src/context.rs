use serde::Serialize;
use std::path::PathBuf;

/// Externally detected facts about the target directory. Immutable for the
/// duration of a merge run; the merge core only reads it.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectContext {
    pub kind: ProjectKind,
    pub base_path: PathBuf,
    pub framework: Option<Framework>,
    pub is_nested: bool,
    pub architecture: Option<String>,
}

impl ProjectContext {
    pub fn unknown(base_path: PathBuf) -> Self {
        Self {
            kind: ProjectKind::Unknown,
            base_path,
            framework: None,
            is_nested: false,
            architecture: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectKind {
    Node,
    Rust,
    Python,
    Php,
    Unknown,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Node => "node",
            ProjectKind::Rust => "rust",
            ProjectKind::Python => "python",
            ProjectKind::Php => "php",
            ProjectKind::Unknown => "unknown",
        }
    }
}

/// Closed set of framework tags the adjuster knows conventions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Framework {
    React,
    NextJs,
    Vue,
    Svelte,
    Express,
    NestJs,
    Django,
    Laravel,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::NextJs => "next",
            Framework::Vue => "vue",
            Framework::Svelte => "svelte",
            Framework::Express => "express",
            Framework::NestJs => "nest",
            Framework::Django => "django",
            Framework::Laravel => "laravel",
        }
    }

    /// Maps a manifest dependency name to a framework tag. More specific
    /// frameworks must be checked before the libraries they build on, so
    /// the order of the returned matches matters to callers.
    pub fn from_dependency(name: &str) -> Option<Self> {
        match name {
            "next" => Some(Framework::NextJs),
            "react" | "react-dom" => Some(Framework::React),
            "vue" => Some(Framework::Vue),
            "svelte" => Some(Framework::Svelte),
            "express" => Some(Framework::Express),
            "@nestjs/core" => Some(Framework::NestJs),
            "django" | "Django" => Some(Framework::Django),
            "laravel/framework" => Some(Framework::Laravel),
            _ => None,
        }
    }

    pub fn all() -> &'static [Framework] {
        &[
            Framework::React,
            Framework::NextJs,
            Framework::Vue,
            Framework::Svelte,
            Framework::Express,
            Framework::NestJs,
            Framework::Django,
            Framework::Laravel,
        ]
    }
}
