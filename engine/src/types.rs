use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Document scores for one query: document number -> total score
pub type DocumentScores = HashMap<String, f64>;

/// Indexed document: (document number, text)
pub type RawDocument = (String, String);

/// Posting list entry for one term in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// External document number (the `DOCNO` field)
    pub doc_no: String,
    /// Occurrences of the term in the document
    pub term_freq: u32,
    /// Encoded length normalization, decoded by a `NormDecoder`
    pub norm: u64,
}

/// One ranked line of a run file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub query_id: String,
    pub doc_no: String,
    /// 1-based, restarts at 1 for every query
    pub rank: usize,
    pub score: f64,
}

/// A benchmark topic as read from the topic file, before cleanup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Which topic field a query was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    /// Title field ("short" query)
    Short,
    /// Description field ("long" query)
    Long,
}

impl QueryKind {
    /// Suffix used when naming the run file for this query kind
    pub fn file_suffix(self) -> &'static str {
        match self {
            QueryKind::Short => "ShortQuery",
            QueryKind::Long => "LongQuery",
        }
    }
}

/// Totals for one batch run over a topic set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub queries: usize,
    pub lines_written: usize,
    pub lines_failed: usize,
}
