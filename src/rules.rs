use crate::context::{Framework, ProjectContext, ProjectKind};

/// Files that must never be overwritten regardless of their content.
/// Matched case-insensitively on the file name alone.
const UNIVERSAL_CRITICAL: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "cargo.toml",
    "cargo.lock",
    "composer.json",
    "composer.lock",
    "requirements.txt",
    "pipfile",
    "pipfile.lock",
    "poetry.lock",
    "pyproject.toml",
    "go.mod",
    "go.sum",
    ".gitignore",
    ".gitattributes",
    ".npmrc",
    "license",
    "license.md",
    "license.txt",
    "readme",
    "readme.md",
    "tsconfig.json",
    "jsconfig.json",
];

/// Folders that are never auto-created and never recursed into.
const SENSITIVE_FOLDERS: &[&str] = &[
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    ".idea",
    ".vscode",
    ".vs",
    "dist",
    "build",
    "out",
    "coverage",
    "target",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".cache",
    ".turbo",
    "vendor",
    "venv",
    ".venv",
];

/// Basenames the parser classifies as folders even without a trailing slash.
const KNOWN_FOLDERS: &[&str] = &[
    "src",
    "public",
    "dist",
    "build",
    "components",
    "pages",
    "views",
    "hooks",
    "utils",
    "helpers",
    "assets",
    "styles",
    "tests",
    "test",
    "__tests__",
    "spec",
    "docs",
    "doc",
    "config",
    "scripts",
    "lib",
    "api",
    "services",
    "store",
    "context",
    "layouts",
    "routes",
    "middleware",
    "models",
    "controllers",
    "migrations",
    "images",
    "fonts",
    "icons",
    "data",
    "types",
];

/// Extensionless names that are files, not folders. Checked before the
/// no-dot folder rule so `Dockerfile` does not become a directory.
const KNOWN_EXTENSIONLESS_FILES: &[&str] = &[
    "dockerfile",
    "makefile",
    "rakefile",
    "gemfile",
    "procfile",
    "jenkinsfile",
    "vagrantfile",
    "license",
    "readme",
    "changelog",
    "authors",
    "contributing",
    "notice",
    "artisan",
    "cname",
];

pub fn is_critical_file(file_name: &str, context: &ProjectContext) -> bool {
    let name = file_name.to_lowercase();

    if UNIVERSAL_CRITICAL.contains(&name.as_str()) {
        return true;
    }

    // .env, .env.local, .env.production, ...
    if let Ok(pattern) = glob::Pattern::new(".env*") {
        if pattern.matches(&name) {
            return true;
        }
    }

    if let Some(framework) = context.framework {
        if framework_critical(framework).contains(&name.as_str()) {
            return true;
        }
    }

    kind_critical(context.kind).contains(&name.as_str())
}

/// Framework entry points and build-tool configs, additionally critical
/// for the detected framework only.
fn framework_critical(framework: Framework) -> &'static [&'static str] {
    match framework {
        Framework::React => &[
            "vite.config.js",
            "vite.config.ts",
            "main.jsx",
            "main.tsx",
            "app.jsx",
            "app.tsx",
            "index.html",
        ],
        Framework::NextJs => &["next.config.js", "next.config.mjs", "next.config.ts"],
        Framework::Vue => &[
            "vue.config.js",
            "vite.config.js",
            "vite.config.ts",
            "main.js",
            "main.ts",
            "app.vue",
        ],
        Framework::Svelte => &["svelte.config.js", "vite.config.js", "vite.config.ts"],
        Framework::Express => &["server.js", "server.ts", "app.js", "app.ts", "index.js", "index.ts"],
        Framework::NestJs => &["main.ts", "nest-cli.json"],
        Framework::Django => &["manage.py", "settings.py", "wsgi.py", "asgi.py"],
        Framework::Laravel => &["artisan", "server.php"],
    }
}

fn kind_critical(kind: ProjectKind) -> &'static [&'static str] {
    match kind {
        ProjectKind::Node => &["index.js", "server.js"],
        ProjectKind::Rust => &["main.rs", "lib.rs", "build.rs"],
        ProjectKind::Python => &["setup.py", "manage.py", "main.py"],
        ProjectKind::Php => &["index.php"],
        ProjectKind::Unknown => &[],
    }
}

pub fn is_sensitive_folder(name: &str) -> bool {
    let name = name.to_lowercase();
    SENSITIVE_FOLDERS.contains(&name.as_str())
}

pub fn is_known_folder(name: &str) -> bool {
    let name = name.to_lowercase();
    KNOWN_FOLDERS.contains(&name.as_str())
}

pub fn is_known_extensionless_file(name: &str) -> bool {
    let name = name.to_lowercase();
    KNOWN_EXTENSIONLESS_FILES.contains(&name.as_str())
}

/// A file is meaningful iff anything remains after stripping comments,
/// other than one of the empty-idiom shapes below. Shared by the adjuster
/// and the executor; there is deliberately only one implementation.
pub fn is_meaningful(content: &str) -> bool {
    let text = strip_comments(content);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }

    let squashed = squash(trimmed);
    !EMPTY_IDIOMS.iter().any(|(_, check)| check(&squashed))
}

type IdiomCheck = fn(&str) -> bool;

/// Ordered, individually testable empty-idiom checks. Each receives the
/// content with comments stripped, whitespace removed, and any trailing
/// semicolon dropped.
const EMPTY_IDIOMS: &[(&str, IdiomCheck)] = &[
    ("empty object literal", |s| s == "{}"),
    ("empty array literal", |s| s == "[]"),
    ("empty default export", |s| {
        s == "exportdefault{}" || s == "exportdefault[]"
    }),
    ("empty module export", |s| {
        s == "module.exports={}" || s == "module.exports=[]"
    }),
];

fn squash(s: &str) -> String {
    let mut out: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    while out.ends_with(';') {
        out.pop();
    }
    out
}

fn strip_comments(content: &str) -> String {
    let text = strip_block(content, "/*", "*/");
    let text = strip_block(&text, "<!--", "-->");
    strip_line_comments(&text)
}

fn strip_block(s: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find(open) {
        out.push_str(&rest[..start]);
        match rest[start + open.len()..].find(close) {
            Some(end) => rest = &rest[start + open.len() + end + close.len()..],
            None => {
                // unterminated block comment swallows the remainder
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

fn strip_line_comments(s: &str) -> String {
    s.lines()
        .map(|line| {
            let mut cut = line.len();
            if let Some(i) = line.find("//") {
                cut = cut.min(i);
            }
            if let Some(i) = line.find('#') {
                cut = cut.min(i);
            }
            &line[..cut]
        })
        .collect::<Vec<_>>()
        .join("\n")
}
