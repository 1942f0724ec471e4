use super::MergeStats;
use colored::*;

/// Human-readable rendering of one merge run, for the CLI boundary.
pub fn render_summary(stats: &MergeStats) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Merge complete".green().bold()));
    out.push_str(&format!(
        "  {} {} folders, {} files\n",
        "created:  ".green(),
        stats.created.folders,
        stats.created.files
    ));
    out.push_str(&format!(
        "  {} {} folders, {} files\n",
        "preserved:".blue(),
        stats.preserved.folders,
        stats.preserved.files
    ));
    out.push_str(&format!(
        "  {} {} folders, {} files\n",
        "skipped:  ".yellow(),
        stats.skipped.folders,
        stats.skipped.files
    ));

    if !stats.errors.is_empty() {
        out.push_str(&format!(
            "{}\n",
            format!("Errors ({})", stats.errors.len()).red().bold()
        ));
        for error in &stats.errors {
            out.push_str(&format!(
                "  {} {}\n",
                error.path.display().to_string().red(),
                error.message
            ));
        }
    }

    out
}
