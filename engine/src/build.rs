use crate::error::{Error, Result};
use crate::parse::tokenize;
use crate::types::{Posting, RawDocument};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only view of an inverted index at query time
pub trait PostingSource {
    /// Number of documents in the corpus
    fn num_docs(&self) -> u64;

    /// Number of documents containing `term`
    fn doc_freq(&self, term: &str) -> u64;

    /// Posting list of `term`, empty if the term is not indexed
    fn postings(&self, term: &str) -> &[Posting];
}

/// Decodes the length normalization stored with each posting
pub trait NormDecoder {
    fn decode_norm(&self, norm: u64) -> f32;
}

/// Classic vector-space length norm: `1 / sqrt(num_terms)`, stored as f32 bits
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicNorm;

impl ClassicNorm {
    pub fn encode_norm(&self, num_terms: usize) -> u64 {
        // Empty documents are normalized as if they held one term
        let len = num_terms.max(1) as f32;
        u64::from((1.0 / len.sqrt()).to_bits())
    }
}

impl NormDecoder for ClassicNorm {
    fn decode_norm(&self, norm: u64) -> f32 {
        f32::from_bits(norm as u32)
    }
}

/// In-memory inverted index: term -> postings
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    postings: HashMap<String, Vec<Posting>>,
    num_docs: u64,
}

impl PostingSource for MemoryIndex {
    fn num_docs(&self) -> u64 {
        self.num_docs
    }

    fn doc_freq(&self, term: &str) -> u64 {
        self.postings.get(term).map_or(0, |list| list.len() as u64)
    }

    fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl MemoryIndex {
    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }
}

/// Build an inverted index from documents
/// Maps each term to its (doc_no, term_frequency, norm) postings
pub fn build_index(docs: &[RawDocument], norms: &ClassicNorm) -> MemoryIndex {
    let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();

    for (doc_no, text) in docs {
        let terms = tokenize(text);
        let norm = norms.encode_norm(terms.len());

        // Count term frequencies
        let mut term_freqs: HashMap<String, u32> = HashMap::new();
        for term in terms {
            *term_freqs.entry(term).or_insert(0) += 1;
        }

        // Add to inverted index
        for (term, term_freq) in term_freqs {
            postings.entry(term).or_default().push(Posting {
                doc_no: doc_no.clone(),
                term_freq,
                norm,
            });
        }
    }

    MemoryIndex {
        postings,
        num_docs: docs.len() as u64,
    }
}

/// Read TREC `<DOC>` documents from a corpus file
pub fn read_corpus(path: &Path) -> Result<Vec<RawDocument>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let docs = parse_corpus(&text);
    tracing::debug!(
        target: "trec::build",
        path = %path.display(),
        docs = docs.len(),
        "Read corpus file"
    );
    Ok(docs)
}

/// Extract (DOCNO, TEXT) pairs; multiple `<TEXT>` sections are joined.
/// Documents without a `<DOCNO>` are skipped.
pub fn parse_corpus(text: &str) -> Vec<RawDocument> {
    text.split("<DOC>")
        .skip(1)
        .filter_map(|chunk| {
            let doc = chunk.split("</DOC>").next().unwrap_or(chunk);
            let doc_no = tagged(doc, "DOCNO").next()?.trim().to_string();
            if doc_no.is_empty() {
                return None;
            }
            let body: Vec<&str> = tagged(doc, "TEXT").map(str::trim).collect();
            Some((doc_no, body.join("\n")))
        })
        .collect()
}

/// Every `<tag>...</tag>` section of a document, in order
fn tagged<'a>(doc: &'a str, tag: &str) -> impl Iterator<Item = &'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let mut rest = doc;
    std::iter::from_fn(move || {
        let start = rest.find(&open)? + open.len();
        let len = rest[start..].find(&close)?;
        let section = &rest[start..start + len];
        rest = &rest[start + len + close.len()..];
        Some(section)
    })
}

/// Read and index every corpus file
pub fn index_corpus(paths: &[impl AsRef<Path>], norms: &ClassicNorm) -> Result<MemoryIndex> {
    let mut docs = Vec::new();
    for path in paths {
        docs.extend(read_corpus(path.as_ref())?);
    }
    let index = build_index(&docs, norms);
    tracing::info!(
        target: "trec::build",
        docs = index.num_docs(),
        terms = index.num_terms(),
        "Built in-memory index"
    );
    Ok(index)
}
