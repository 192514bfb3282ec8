use std::cmp::Ordering;

/// Default number of documents kept per query
pub const TOP_K: usize = 1000;

/// Calculate the TF-IDF contribution of a single term to a document
///
/// Arguments:
/// - term_freq: occurrences of the term in the document
/// - doc_len: effective (length-normalized) document length
/// - doc_freq: number of documents containing this term
/// - num_docs: total number of documents
///
/// No input is guarded: `doc_freq == 0` yields an infinite score.
pub fn tfidf_term(term_freq: f64, doc_len: f64, doc_freq: f64, num_docs: f64) -> f64 {
    let tf = term_freq / doc_len;

    // Smoothed IDF: ln(1 + N / df), ln(2) for a term present in every document
    let idf = (1.0 + num_docs / doc_freq).ln();

    tf * idf
}

/// Ranking order for scored documents: score descending, then document id ascending.
///
/// NaN sorts after every number so a broken score never takes a top rank.
pub fn compare_scored(a: &(f64, &str), b: &(f64, &str)) -> Ordering {
    let by_score = match (a.0.is_nan(), b.0.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.0.total_cmp(&a.0),
    };
    by_score.then_with(|| a.1.cmp(b.1))
}

/// Get the `n` best entries of an unranked list in ranking order
pub fn top_k<'a>(rank_list: &[(f64, &'a str)], n: usize) -> Vec<(f64, &'a str)> {
    let mut top_list = rank_list.to_vec();
    // Total order, so an unstable sort is still reproducible
    top_list.sort_unstable_by(compare_scored);
    top_list.truncate(n);
    top_list
}
