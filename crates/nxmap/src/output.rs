//! Output formatting for CLI

use nexus_mapping_core::ProjectionReport;

/// Print a human-readable projection summary to stderr
pub fn print_summary(name: &str, report: &ProjectionReport, verbose: bool) {
    eprintln!();
    eprintln!("Projection results for {name}");
    eprintln!("  Schema paths: {}", report.stats.schema_paths);
    eprintln!("  Matched: {}", report.stats.matched);
    eprintln!("  Written: {}", report.stats.written);
    eprintln!("  Skipped (no source data): {}", report.stats.skipped);
    eprintln!("  Coverage: {:.1}%", report.stats.coverage() * 100.0);

    if !report.diagnostics.is_empty() {
        eprintln!("  Diagnostics: {}", report.diagnostics.len());
        if verbose {
            for diagnostic in &report.diagnostics {
                eprintln!(
                    "    {} [{}]: {}",
                    diagnostic.path, diagnostic.kind, diagnostic.message
                );
            }
        }
    }
}
