use crate::error::{Error, Result};
use crate::rank;
use crate::types::{DocumentScores, RankedEntry};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

pub const DEFAULT_RUN_TAG: &str = "run-1";
pub const DEFAULT_DELIMITER: &str = " ";

/// Rank the scored documents of one query and keep the best `k`
pub fn rank_entries(scores: &DocumentScores, query_id: &str, k: usize) -> Vec<RankedEntry> {
    let score_vec: Vec<(f64, &str)> = scores
        .iter()
        .map(|(doc_no, score)| (*score, doc_no.as_str()))
        .collect();

    rank::top_k(&score_vec, k)
        .into_iter()
        .enumerate()
        .map(|(i, (score, doc_no))| RankedEntry {
            query_id: query_id.to_string(),
            doc_no: doc_no.to_string(),
            rank: i + 1,
            score,
        })
        .collect()
}

/// Writes ranked results in trec_eval format:
/// `<query_id> Q0 <doc_no> <rank> <score> <run_tag>`
#[derive(Debug, Clone)]
pub struct RankedWriter {
    run_tag: String,
    delimiter: String,
}

impl Default for RankedWriter {
    fn default() -> Self {
        RankedWriter::new(DEFAULT_RUN_TAG, DEFAULT_DELIMITER)
    }
}

impl RankedWriter {
    pub fn new(run_tag: impl Into<String>, delimiter: impl Into<String>) -> Self {
        RankedWriter {
            run_tag: run_tag.into(),
            delimiter: delimiter.into(),
        }
    }

    pub fn run_tag(&self) -> &str {
        &self.run_tag
    }

    /// Format one entry as a run file line, including the trailing newline
    pub fn format_entry(&self, entry: &RankedEntry) -> String {
        let d = &self.delimiter;
        format!(
            "{}{d}Q0{d}{}{d}{}{d}{}{d}{}\n",
            entry.query_id, entry.doc_no, entry.rank, entry.score, self.run_tag
        )
    }

    /// Append the `k` best documents of a query to `path`.
    ///
    /// The parent directory and the file are created when missing. Failing to
    /// open the file is an error; a line that fails to write is logged with its
    /// document number and skipped.
    pub fn write_top_k(
        &self,
        scores: &DocumentScores,
        query_id: &str,
        path: &Path,
        k: usize,
    ) -> Result<WriteReport> {
        let entries = rank_entries(scores, query_id, k);
        let mut file = open_append(path)?;
        Ok(self.write_entries(&mut file, &entries, path))
    }

    /// Write already ranked entries to any sink, flushing after every line
    /// so a failure is tied to the entry that caused it
    pub fn write_entries<W: Write>(
        &self,
        out: &mut W,
        entries: &[RankedEntry],
        path: &Path,
    ) -> WriteReport {
        let mut report = WriteReport::default();
        for entry in entries {
            let line = self.format_entry(entry);
            match out.write_all(line.as_bytes()).and_then(|()| out.flush()) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    tracing::warn!(
                        target: "trec::writer",
                        query_id = %entry.query_id,
                        doc_no = %entry.doc_no,
                        error = %e,
                        "Unable to write run line"
                    );
                    report.failed += 1;
                }
            }
        }
        tracing::debug!(
            target: "trec::writer",
            path = %path.display(),
            written = report.written,
            failed = report.failed,
            "Run lines appended"
        );
        report
    }
}

/// Lines written and lines skipped by one `write_top_k` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: usize,
    pub failed: usize,
}

fn open_append(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))
}
