//! Delimited-table export of force series.
//!
//! Column order is fixed: `time, nominal, perturbed`, matching the
//! recorder's labels. Rows come out in append order.

use crate::ResultsResult;
use fp_perturb::{FORCE_LABELS, ForceSample};
use std::io::Write;

/// Write a tab-delimited table with a header row.
pub fn write_delimited<W: Write>(mut w: W, samples: &[ForceSample]) -> ResultsResult<()> {
    writeln!(w, "{}", FORCE_LABELS.join("\t"))?;
    for s in samples {
        writeln!(w, "{}\t{}\t{}", s.time, s.nominal, s.perturbed)?;
    }
    Ok(())
}
