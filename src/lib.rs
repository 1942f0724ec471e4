pub mod adjust;
pub mod config;
pub mod content;
pub mod context;
pub mod detect;
pub mod merge;
pub mod rules;
pub mod tree;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use adjust::StructureAdjuster;
pub use config::Config;
pub use content::{ContentProvider, DefaultContentProvider};
pub use context::{Framework, ProjectContext, ProjectKind};
pub use merge::{MergeExecutor, MergeOptions, MergeStats};
pub use tree::{Node, NodeKind, TreeParser};
