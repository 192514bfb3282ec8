use crate::types::DocumentScores;
use std::collections::{HashMap, HashSet};

/// Scores contributed by one query term, keyed by document number
#[derive(Debug, Clone, Default)]
pub struct TermScores {
    term: String,
    doc_scores: HashMap<String, f64>,
}

impl TermScores {
    pub fn new(term: impl Into<String>) -> Self {
        TermScores {
            term: term.into(),
            doc_scores: HashMap::new(),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Set the score of a document for this term, replacing any earlier value
    pub fn add_document_score(&mut self, doc_no: impl Into<String>, score: f64) {
        self.doc_scores.insert(doc_no.into(), score);
    }

    /// Score of a document for this term, or exactly 0 if the term never scored it
    pub fn document_score(&self, doc_no: &str) -> f64 {
        self.doc_scores.get(doc_no).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.doc_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_scores.is_empty()
    }
}

/// All term tables of one query plus every document any term touched
#[derive(Debug, Clone, Default)]
pub struct QueryScore {
    query_id: String,
    term_scores: Vec<TermScores>,
    relevant_docs: HashSet<String>,
}

impl QueryScore {
    pub fn new(query_id: impl Into<String>) -> Self {
        QueryScore {
            query_id: query_id.into(),
            term_scores: Vec::new(),
            relevant_docs: HashSet::new(),
        }
    }

    pub fn query_id(&self) -> &str {
        &self.query_id
    }

    /// Append a finished term table. Does not touch the relevant-document set.
    pub fn add_term_scores(&mut self, table: TermScores) {
        self.term_scores.push(table);
    }

    pub fn add_relevant_document(&mut self, doc_no: impl Into<String>) {
        self.relevant_docs.insert(doc_no.into());
    }

    pub fn term_scores(&self) -> &[TermScores] {
        &self.term_scores
    }

    pub fn relevant_documents(&self) -> &HashSet<String> {
        &self.relevant_docs
    }

    /// Total score of a document: the sum over every term table, in table order
    pub fn document_score(&self, doc_no: &str) -> f64 {
        // fold from +0.0: an empty f64 sum is -0.0
        self.term_scores
            .iter()
            .fold(0.0, |total, table| total + table.document_score(doc_no))
    }

    /// Total score of every relevant document
    pub fn document_scores(&self) -> DocumentScores {
        self.relevant_docs
            .iter()
            .map(|doc_no| (doc_no.clone(), self.document_score(doc_no)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::tfidf_term;
    use proptest::prelude::*;

    #[test]
    fn test_term_scores_missing_doc_is_zero() {
        let table = TermScores::new("police");
        assert_eq!(table.document_score("FT911-1"), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_term_scores_overwrite() {
        let mut table = TermScores::new("police");
        table.add_document_score("DOC1", 1.5);
        table.add_document_score("DOC1", 0.25);
        assert_eq!(table.document_score("DOC1"), 0.25);
        assert_eq!(table.len(), 1);
        assert_eq!(table.term(), "police");
    }

    #[test]
    fn test_query_score_sums_across_terms() {
        let mut police = TermScores::new("police");
        police.add_document_score("DOC1", 0.5);
        police.add_document_score("DOC2", 0.25);
        let mut deaths = TermScores::new("deaths");
        deaths.add_document_score("DOC1", 1.0);

        let mut query = QueryScore::new("51");
        query.add_term_scores(police);
        query.add_term_scores(deaths);
        for doc in ["DOC1", "DOC2"] {
            query.add_relevant_document(doc);
        }

        assert_eq!(query.document_score("DOC1"), 1.5);
        assert_eq!(query.document_score("DOC2"), 0.25);
        assert_eq!(query.document_score("DOC3"), 0.0);

        let scores = query.document_scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["DOC1"], 1.5);
    }

    #[test]
    fn test_add_term_scores_does_not_mark_relevant() {
        let mut table = TermScores::new("police");
        table.add_document_score("DOC1", 0.5);
        let mut query = QueryScore::new("1");
        query.add_term_scores(table);
        assert!(query.relevant_documents().is_empty());
        assert!(query.document_scores().is_empty());
    }

    #[test]
    fn test_relevant_document_is_idempotent() {
        let mut query = QueryScore::new("1");
        query.add_relevant_document("DOC1");
        query.add_relevant_document("DOC1");
        assert_eq!(query.relevant_documents().len(), 1);
    }

    #[test]
    fn test_relevant_document_without_tables_scores_positive_zero() {
        let mut query = QueryScore::new("1");
        query.add_relevant_document("DOC1");
        let score = query.document_scores()["DOC1"];
        assert_eq!(score, 0.0);
        assert!(score.is_sign_positive());

        query.add_term_scores(TermScores::new("police"));
        assert!(query.document_score("DOC1").is_sign_positive());
    }

    #[test]
    fn test_single_term_example() {
        let mut table = TermScores::new("police");
        table.add_document_score("DOC1", tfidf_term(2.0, 50.0, 100.0, 1000.0));
        let mut query = QueryScore::new("Q1");
        query.add_term_scores(table);
        query.add_relevant_document("DOC1");

        let scores = query.document_scores();
        assert_eq!(scores.len(), 1);
        assert!((scores["DOC1"] - 0.09592).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_tables(
            tables in proptest::collection::vec(
                proptest::collection::hash_map("d[0-9]", 0.0f64..10.0, 0..6),
                1..5,
            ),
        ) {
            let mut query = QueryScore::new("q");
            for (i, entries) in tables.iter().enumerate() {
                let mut table = TermScores::new(format!("t{}", i));
                for (doc, score) in entries {
                    table.add_document_score(doc.clone(), *score);
                    query.add_relevant_document(doc.clone());
                }
                query.add_term_scores(table);
            }

            for doc in (0..10).map(|d| format!("d{}", d)) {
                let expected: f64 = query
                    .term_scores()
                    .iter()
                    .map(|t| t.document_score(&doc))
                    .sum();
                prop_assert_eq!(query.document_score(&doc), expected);
            }

            prop_assert_eq!(query.document_scores(), query.document_scores());
        }
    }
}
