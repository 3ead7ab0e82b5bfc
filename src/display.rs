use crate::cleanup::CleanupReport;

/// Prints which assignments a cleanup pass removed and the final counts
pub fn print_cleanup_report(report: &CleanupReport) {
    println!("\n=== Cleanup for week {} ===", report.week);

    if report.removed.is_empty() {
        println!("No duplicate manual assignments found.");
    } else {
        println!("Removed duplicates ({}):", report.deleted);
        for discarded in &report.removed {
            println!("  - {} ({})", discarded.id, discarded.key);
        }
    }

    println!("\n{}", report.message);
}
