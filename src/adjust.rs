use crate::context::{Framework, ProjectContext};
use crate::merge::collapses_onto_root;
use crate::rules;
use crate::tree::{Node, NodeKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Remaps node targets to the detected framework's conventions and drops
/// incoming files that would collide with real existing work. Folders are
/// never dropped: an existing folder is merged into, not blocked.
pub struct StructureAdjuster {
    context: ProjectContext,
}

/// One framework convention: top-level folders in `folders` (lowercase)
/// belong under `parent` when that directory already exists.
pub struct Convention {
    pub parent: &'static str,
    pub folders: &'static [&'static str],
}

static SRC_COMPONENT: Convention = Convention {
    parent: "src",
    folders: &[
        "components",
        "hooks",
        "utils",
        "helpers",
        "pages",
        "views",
        "styles",
        "assets",
        "context",
        "services",
        "store",
        "layouts",
        "lib",
        "types",
    ],
};

static SRC_LAYERED: Convention = Convention {
    parent: "src",
    folders: &[
        "routes",
        "controllers",
        "models",
        "middleware",
        "services",
        "config",
        "utils",
        "validators",
    ],
};

static LARAVEL_APP: Convention = Convention {
    parent: "app",
    folders: &["http", "models", "providers", "console", "policies", "services"],
};

fn convention_for(framework: Framework) -> Option<&'static Convention> {
    match framework {
        Framework::React | Framework::NextJs | Framework::Vue | Framework::Svelte => {
            Some(&SRC_COMPONENT)
        }
        Framework::Express | Framework::NestJs => Some(&SRC_LAYERED),
        Framework::Laravel => Some(&LARAVEL_APP),
        Framework::Django => None,
    }
}

/// The convention table is data; this guards it against drifting out of
/// shape as tags are added.
pub fn conventions_are_wellformed() -> bool {
    Framework::all().iter().all(|framework| {
        convention_for(*framework).map_or(true, |convention| {
            !convention.parent.is_empty()
                && !convention.folders.is_empty()
                && convention
                    .folders
                    .iter()
                    .all(|name| *name == name.to_lowercase())
        })
    })
}

impl StructureAdjuster {
    pub fn new(context: ProjectContext) -> Self {
        debug_assert!(conventions_are_wellformed());
        Self { context }
    }

    pub fn adjust(&self, roots: Vec<Node>) -> Vec<Node> {
        let base = self.context.base_path.clone();
        let mut adjusted: Vec<Node> = roots
            .into_iter()
            .filter_map(|node| self.filter_conflicts(node, &base, true))
            .collect();

        self.remap_conventions(&mut adjusted);
        adjusted
    }

    /// Drops a file when its on-disk counterpart already carries real work
    /// (critical name, or meaningful content). Empty and placeholder files
    /// stay in the tree so the executor repopulates them.
    fn filter_conflicts(&self, mut node: Node, parent_dir: &Path, at_root: bool) -> Option<Node> {
        let collapsed = at_root && collapses_onto_root(&self.context.base_path, &node);
        let path = if collapsed {
            self.context.base_path.clone()
        } else {
            parent_dir.join(&node.name)
        };

        match node.kind {
            NodeKind::Folder => {
                let children = std::mem::take(&mut node.children);
                node.children = children
                    .into_iter()
                    .filter_map(|child| self.filter_conflicts(child, &path, false))
                    .collect();
                Some(node)
            }
            NodeKind::File => {
                if !path.is_file() {
                    return Some(node);
                }
                if rules::is_critical_file(&node.name, &self.context) {
                    debug!(path = %path.display(), "dropping incoming critical file");
                    return None;
                }
                match std::fs::read_to_string(&path) {
                    Ok(existing) if rules::is_meaningful(&existing) => {
                        debug!(path = %path.display(), "dropping incoming file, target has content");
                        None
                    }
                    Ok(_) => Some(node),
                    // unreadable counts as has-content
                    Err(_) => {
                        debug!(path = %path.display(), "dropping incoming file, target unreadable");
                        None
                    }
                }
            }
        }
    }

    /// Table-lookup only. Rewrites `target_path` on matching top-level
    /// folders when the canonical parent already exists on disk; never
    /// invents a convention the project does not show.
    fn remap_conventions(&self, roots: &mut [Node]) {
        let Some(convention) = self.convention() else {
            return;
        };
        let parent_dir = self.context.base_path.join(convention.parent);
        if !parent_dir.is_dir() {
            return;
        }

        for node in roots.iter_mut() {
            if collapses_onto_root(&self.context.base_path, node) {
                // children of a collapsed root are effectively top-level
                for child in node.children.iter_mut() {
                    self.remap_node(child, convention);
                }
            } else {
                self.remap_node(node, convention);
            }
        }
    }

    fn remap_node(&self, node: &mut Node, convention: &Convention) {
        if !node.is_folder() || node.target_path.is_some() {
            return;
        }
        let name = node.name.to_lowercase();
        if name == convention.parent || !convention.folders.contains(&name.as_str()) {
            return;
        }

        let target = PathBuf::from(convention.parent).join(&node.name);
        debug!(name = %node.name, target = %target.display(), "remapped to convention path");
        node.target_path = Some(target);
    }

    fn convention(&self) -> Option<&'static Convention> {
        if let Some(framework) = self.context.framework {
            if let Some(convention) = convention_for(framework) {
                return Some(convention);
            }
        }
        match self.context.architecture.as_deref() {
            Some("mvc") => Some(&SRC_LAYERED),
            _ => None,
        }
    }
}
