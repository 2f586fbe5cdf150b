use std::io::Write;

use grouper_core::models::ParseDiagnostic;
use grouper_data::pipeline::RunReport;

/// Write the success report for a finished run.
pub fn write_summary<W: Write>(out: &mut W, report: &RunReport) -> std::io::Result<()> {
    let summary = &report.summary;

    writeln!(
        out,
        "✓ Grouped history written to {}",
        report.output_path.display()
    )?;
    writeln!(out, "  Projects found: {}", summary.project_count)?;
    writeln!(out, "  Total sessions: {}", summary.total_sessions)?;
    writeln!(out, "  Total entries: {}", summary.total_entries)?;

    writeln!(out, "\nSummary:")?;
    for stat in &summary.projects {
        writeln!(
            out,
            "  {}: {} entries in {} session(s)",
            stat.project, stat.entry_count, stat.session_count
        )?;
    }
    Ok(())
}

/// Write one block per skipped line: a preview, then the decoder message.
pub fn write_diagnostics<W: Write>(
    out: &mut W,
    diagnostics: &[ParseDiagnostic],
) -> std::io::Result<()> {
    for d in diagnostics {
        writeln!(out, "Error parsing line: {}...", d.preview)?;
        writeln!(out, "{}", d.message)?;
    }
    Ok(())
}
