use crate::core::etl::EtlOutcome;
use crate::domain::model::{DownloadTarget, TargetOutcome};
use crate::utils::error::{EtlError, Result};

/// Console summary after a run.
pub fn print_outcome(outcome: &EtlOutcome) {
    let summary = &outcome.summary;
    println!("✅ ETL process completed!");
    println!(
        "📥 {} publications: {} downloaded, {} already up to date, {} failed",
        summary.total(),
        summary.downloaded(),
        summary.skipped(),
        summary.failed()
    );

    for report in summary.failures() {
        if let TargetOutcome::Failed { reason } = &report.outcome {
            println!(
                "   ❌ {}-S{}: {}",
                report.target.year, report.target.semester, reason
            );
        }
    }

    match &outcome.consolidation {
        Some(report) => println!(
            "📁 Output saved to: {} ({} rows from {} files)",
            report.output_path, report.rows, report.input_files
        ),
        None => println!("📁 No consolidated output written"),
    }
}

pub fn print_json(outcome: &EtlOutcome) -> Result<()> {
    let json = serde_json::json!({
        "summary": outcome.summary,
        "consolidation": outcome.consolidation,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

pub fn print_plan(targets: &[DownloadTarget]) {
    println!("🔍 Dry run: {} publications", targets.len());
    for target in targets {
        println!("  {}-S{}  {}", target.year, target.semester, target.url);
    }
}

/// Logs a fatal error and terminates with its exit code.
pub fn exit_with(e: &EtlError) -> ! {
    tracing::error!(
        "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1))
}
