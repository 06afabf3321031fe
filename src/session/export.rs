//! CSV export of a recorded session
//!
//! One-shot flush: the ordered rows are written with a fixed 7-column
//! schema. An empty session performs no write at all and reports "no data".

use crate::error::Result;
use crate::session::recorder::RecordedRow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fixed column header, in persisted order
pub const CSV_HEADER: &str = "Timestamp,Time (s),Luma Value,Avg R,Avg G,Avg B,Rate of Change";

/// Flush a session's rows to a CSV file.
///
/// Returns `Some(row_count)` on a successful write, or `None` when there
/// was nothing to persist (no file is created in that case).
pub fn flush_session(path: &Path, rows: &[RecordedRow]) -> Result<Option<usize>> {
    if rows.is_empty() {
        tracing::info!("No data recorded, nothing to persist");
        return Ok(None);
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", CSV_HEADER)?;
    for row in rows {
        writeln!(
            writer,
            "{},{:.3},{:.6},{:.6},{:.6},{:.6},{:.6}",
            row.timestamp,
            row.elapsed_secs,
            row.luma,
            row.avg_r,
            row.avg_g,
            row.avg_b,
            row.rate_of_change
        )?;
    }
    writer.flush()?;

    tracing::info!("Saved {} rows to {}", rows.len(), path.display());
    Ok(Some(rows.len()))
}
