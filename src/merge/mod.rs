mod paths;
pub mod report;

pub use self::paths::{collapses_onto_root, ensure_safe_root, resolve_node_path};

use crate::content::ContentProvider;
use crate::context::ProjectContext;
use crate::rules;
use crate::tree::{Node, NodeKind};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub folders: usize,
    pub files: usize,
}

/// Counters for one merge run. Threaded explicitly through the walk and
/// read-only once the walk finishes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeStats {
    pub created: Counts,
    pub preserved: Counts,
    pub skipped: Counts,
    pub errors: Vec<NodeError>,
}

/// A filesystem failure on a single node. Recorded, never fatal.
#[derive(Debug, Clone, Serialize)]
pub struct NodeError {
    pub path: PathBuf,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Per-node decision. UPDATE rewrites an empty or placeholder file and is
/// tallied under `created.files`: the node goes from exists-empty to
/// has-content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Preserved,
    Skipped,
    Updated,
}

#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Never create files, only directories.
    pub directories_only: bool,
    /// Preserve existing critical files without inspecting their content.
    pub skip_critical: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            directories_only: false,
            skip_critical: true,
        }
    }
}

/// The only fatal failure: an unusable or protected merge root. Everything
/// past this check recovers locally.
#[derive(Debug)]
pub enum MergeError {
    UnsafeRoot(PathBuf),
    RootUnavailable(PathBuf),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsafeRoot(path) => {
                write!(f, "refusing to merge into protected path {}", path.display())
            }
            Self::RootUnavailable(path) => write!(
                f,
                "target is not an existing directory: {}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for MergeError {}

struct WorkItem<'a> {
    node: &'a Node,
    parent_dir: PathBuf,
    at_root: bool,
}

/// Walks the adjusted tree against the live filesystem, pre-order, parent
/// before children, and applies the create/preserve/skip/update tables.
pub struct MergeExecutor {
    context: ProjectContext,
    options: MergeOptions,
    provider: Box<dyn ContentProvider>,
    cancel: Option<Arc<AtomicBool>>,
}

impl MergeExecutor {
    pub fn new(context: ProjectContext, provider: Box<dyn ContentProvider>) -> Self {
        Self {
            context,
            options: MergeOptions::default(),
            provider,
            cancel: None,
        }
    }

    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    /// Cooperative cancellation, checked between node visits. A set flag
    /// stops the walk cleanly; completed steps stay applied.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub async fn merge(&self, roots: &[Node]) -> Result<MergeStats, MergeError> {
        let root = ensure_safe_root(&self.context.base_path)?;
        let mut stats = MergeStats::default();

        let mut work: Vec<WorkItem> = roots
            .iter()
            .rev()
            .map(|node| WorkItem {
                node,
                parent_dir: root.clone(),
                at_root: true,
            })
            .collect();

        while let Some(item) = work.pop() {
            if self.is_cancelled() {
                warn!("merge cancelled, remaining entries left unvisited");
                break;
            }

            let path = resolve_node_path(&root, &item.parent_dir, item.node, item.at_root);

            match item.node.kind {
                NodeKind::Folder => {
                    let (outcome, recurse) = self.visit_folder(item.node, &path, &mut stats).await;
                    if let Some(outcome) = outcome {
                        tally(&mut stats, NodeKind::Folder, outcome);
                    }
                    if recurse {
                        for child in item.node.children.iter().rev() {
                            work.push(WorkItem {
                                node: child,
                                parent_dir: path.clone(),
                                at_root: false,
                            });
                        }
                    }
                }
                NodeKind::File => {
                    if let Some(outcome) = self.visit_file(item.node, &path, &mut stats).await {
                        tally(&mut stats, NodeKind::File, outcome);
                    }
                }
            }
        }

        Ok(stats)
    }

    /// Folder table: sensitive folders are never created and never entered;
    /// everything else is created when missing and merged into when present.
    async fn visit_folder(
        &self,
        node: &Node,
        path: &Path,
        stats: &mut MergeStats,
    ) -> (Option<MergeOutcome>, bool) {
        if rules::is_sensitive_folder(&node.name) {
            return if path.exists() {
                debug!(path = %path.display(), "sensitive folder left alone");
                (Some(MergeOutcome::Preserved), false)
            } else {
                debug!(path = %path.display(), "sensitive folder not created");
                (Some(MergeOutcome::Skipped), false)
            };
        }

        if path.exists() {
            if path.is_dir() {
                return (Some(MergeOutcome::Preserved), true);
            }
            self.record(stats, path, "exists but is not a directory".to_string());
            return (None, false);
        }

        match tokio::fs::create_dir_all(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "created folder");
                (Some(MergeOutcome::Created), true)
            }
            Err(e) => {
                self.record(stats, path, e.to_string());
                (None, false)
            }
        }
    }

    /// File table, first match wins: directories-only mode, critical
    /// preserve, meaningful preserve, placeholder repopulate, create.
    async fn visit_file(
        &self,
        node: &Node,
        path: &Path,
        stats: &mut MergeStats,
    ) -> Option<MergeOutcome> {
        if self.options.directories_only {
            debug!(path = %path.display(), "directories-only mode, file skipped");
            return Some(MergeOutcome::Skipped);
        }

        let exists = path.exists();

        if exists
            && self.options.skip_critical
            && rules::is_critical_file(&node.name, &self.context)
        {
            debug!(path = %path.display(), "critical file preserved");
            return Some(MergeOutcome::Preserved);
        }

        if exists {
            match tokio::fs::read_to_string(path).await {
                Ok(existing) => {
                    if rules::is_meaningful(&existing) {
                        return Some(MergeOutcome::Preserved);
                    }
                }
                Err(e) => {
                    // cannot classify: fail toward preservation
                    self.record(stats, path, format!("could not inspect content: {}", e));
                    return Some(MergeOutcome::Preserved);
                }
            }

            let content = self.provider.default_content(&node.name);
            if !rules::is_meaningful(&content) {
                // a placeholder over a placeholder is not an update
                return Some(MergeOutcome::Preserved);
            }
            return match tokio::fs::write(path, content).await {
                Ok(()) => {
                    debug!(path = %path.display(), "repopulated empty file");
                    Some(MergeOutcome::Updated)
                }
                Err(e) => {
                    self.record(stats, path, e.to_string());
                    None
                }
            };
        }

        let content = self.provider.default_content(&node.name);
        match tokio::fs::write(path, content).await {
            Ok(()) => {
                debug!(path = %path.display(), "created file");
                Some(MergeOutcome::Created)
            }
            Err(e) => {
                self.record(stats, path, e.to_string());
                None
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    fn record(&self, stats: &mut MergeStats, path: &Path, message: String) {
        warn!(path = %path.display(), message = %message, "node error");
        stats.errors.push(NodeError {
            path: path.to_path_buf(),
            message,
            timestamp: chrono::Utc::now(),
        });
    }
}

/// Every terminal outcome increments exactly one counter.
fn tally(stats: &mut MergeStats, kind: NodeKind, outcome: MergeOutcome) {
    let counts = match outcome {
        MergeOutcome::Created | MergeOutcome::Updated => &mut stats.created,
        MergeOutcome::Preserved => &mut stats.preserved,
        MergeOutcome::Skipped => &mut stats.skipped,
    };
    match kind {
        NodeKind::Folder => counts.folders += 1,
        NodeKind::File => counts.files += 1,
    }
}
