use std::time::Instant;

pub mod build;
pub mod config;
pub mod error;
pub mod parse;
pub mod rank;
pub mod score;
pub mod topics;
pub mod types;
pub mod writer;

pub use build::{ClassicNorm, MemoryIndex, NormDecoder, PostingSource};
pub use config::RunConfig;
pub use error::{Error, Result};
pub use score::{QueryScore, TermScores};
pub use types::{DocumentScores, Posting, QueryKind, RankedEntry, RunSummary, Topic};
pub use writer::RankedWriter;

use crate::parse::{clean_description, clean_title, parse_query};

/// Scores queries against a posting source with TF-IDF
pub struct SearchEngine<I, D> {
    index: I,
    decoder: D,
}

impl<I: PostingSource, D: NormDecoder> SearchEngine<I, D> {
    pub fn new(index: I, decoder: D) -> Self {
        SearchEngine { index, decoder }
    }

    /// Score every document any query term touches, one term table per term
    pub fn score_query(&self, query_id: &str, query: &str) -> QueryScore {
        let start = Instant::now();

        let terms = parse_query(query);
        let num_docs = self.index.num_docs() as f64;
        let mut query_score = QueryScore::new(query_id);
        let mut total_postings = 0usize;

        for term in &terms {
            let doc_freq = self.index.doc_freq(term) as f64;
            let postings = self.index.postings(term);
            total_postings += postings.len();

            let mut term_scores = TermScores::new(term.as_str());
            for posting in postings {
                let norm = self.decoder.decode_norm(posting.norm) as f64;
                let doc_len = 1.0 / (norm * norm);

                let score = rank::tfidf_term(posting.term_freq as f64, doc_len, doc_freq, num_docs);
                term_scores.add_document_score(posting.doc_no.as_str(), score);
                query_score.add_relevant_document(posting.doc_no.as_str());
            }
            query_score.add_term_scores(term_scores);
        }

        tracing::debug!(
            target: "trec::search",
            query_id,
            terms = terms.len(),
            postings = total_postings,
            docs = query_score.relevant_documents().len(),
            score_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Scored query"
        );
        query_score
    }

    /// Rank the `k` best documents for a query without writing them
    pub fn search(&self, query_id: &str, query: &str, k: usize) -> Vec<RankedEntry> {
        let scores = self.score_query(query_id, query).document_scores();

        let start = Instant::now();
        let ranked = writer::rank_entries(&scores, query_id, k);
        tracing::debug!(
            target: "trec::search",
            query_id,
            results = ranked.len(),
            rank_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Ranked query"
        );
        ranked
    }
}

/// One cleaned query of a topic run
struct QueryJob {
    query_id: String,
    kind: QueryKind,
    text: String,
}

fn query_jobs(topics: &[Topic]) -> Vec<QueryJob> {
    topics
        .iter()
        .flat_map(|topic| {
            [
                QueryJob {
                    query_id: topic.id.clone(),
                    kind: QueryKind::Short,
                    text: clean_title(&topic.title),
                },
                QueryJob {
                    query_id: topic.id.clone(),
                    kind: QueryKind::Long,
                    text: clean_description(&topic.description),
                },
            ]
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_jobs<I, D>(engine: &SearchEngine<I, D>, jobs: &[QueryJob]) -> Vec<DocumentScores>
where
    I: PostingSource,
    D: NormDecoder,
{
    jobs.iter()
        .map(|job| engine.score_query(&job.query_id, &job.text).document_scores())
        .collect()
}

#[cfg(feature = "parallel")]
fn score_jobs<I, D>(engine: &SearchEngine<I, D>, jobs: &[QueryJob]) -> Vec<DocumentScores>
where
    I: PostingSource + Sync,
    D: NormDecoder + Sync,
{
    use rayon::prelude::*;

    // Each task owns its QueryScore; results come back in job order
    jobs.par_iter()
        .map(|job| engine.score_query(&job.query_id, &job.text).document_scores())
        .collect()
}

/// Score the title and description query of every topic and append the
/// rankings to the per-kind run files named by `config`.
///
/// Writes happen on the calling thread in topic order.
#[cfg(not(feature = "parallel"))]
pub fn run_topics<I, D>(
    engine: &SearchEngine<I, D>,
    topics: &[Topic],
    config: &RunConfig,
) -> Result<RunSummary>
where
    I: PostingSource,
    D: NormDecoder,
{
    run_jobs(engine, query_jobs(topics), config, score_jobs)
}

/// Score the title and description query of every topic and append the
/// rankings to the per-kind run files named by `config`.
///
/// Scoring runs on the rayon pool; writes happen on the calling thread in
/// topic order.
#[cfg(feature = "parallel")]
pub fn run_topics<I, D>(
    engine: &SearchEngine<I, D>,
    topics: &[Topic],
    config: &RunConfig,
) -> Result<RunSummary>
where
    I: PostingSource + Sync,
    D: NormDecoder + Sync,
{
    run_jobs(engine, query_jobs(topics), config, score_jobs)
}

fn run_jobs<I, D>(
    engine: &SearchEngine<I, D>,
    jobs: Vec<QueryJob>,
    config: &RunConfig,
    score: fn(&SearchEngine<I, D>, &[QueryJob]) -> Vec<DocumentScores>,
) -> Result<RunSummary>
where
    I: PostingSource,
    D: NormDecoder,
{
    let start = Instant::now();
    let writer = RankedWriter::new(config.run_tag.as_str(), config.delimiter.as_str());

    let (jobs, skipped): (Vec<QueryJob>, Vec<QueryJob>) =
        jobs.into_iter().partition(|job| !parse_query(&job.text).is_empty());
    for job in &skipped {
        tracing::warn!(
            target: "trec::run",
            query_id = %job.query_id,
            kind = ?job.kind,
            "Query has no searchable terms, skipping"
        );
    }

    let scored = score(engine, &jobs);

    let mut summary = RunSummary::default();
    for (job, scores) in jobs.iter().zip(scored) {
        let path = config.output_path(job.kind);
        let report = writer.write_top_k(&scores, &job.query_id, &path, config.top_k)?;
        summary.queries += 1;
        summary.lines_written += report.written;
        summary.lines_failed += report.failed;
    }

    tracing::info!(
        target: "trec::run",
        algorithm = %config.algorithm,
        queries = summary.queries,
        skipped = skipped.len(),
        lines = summary.lines_written,
        failed = summary.lines_failed,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "All topic queries executed"
    );
    Ok(summary)
}
