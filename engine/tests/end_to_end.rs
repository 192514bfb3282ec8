use std::fs;
use trec_engine::build::index_corpus;
use trec_engine::topics::read_topics;
use trec_engine::{
    run_topics, ClassicNorm, NormDecoder, Posting, PostingSource, QueryKind, RankedWriter,
    RunConfig, SearchEngine,
};

/// Index stub with a single term and a fixed corpus size
struct OneTermIndex {
    term: String,
    postings: Vec<Posting>,
    doc_freq: u64,
    num_docs: u64,
}

impl PostingSource for OneTermIndex {
    fn num_docs(&self) -> u64 {
        self.num_docs
    }

    fn doc_freq(&self, term: &str) -> u64 {
        if term == self.term {
            self.doc_freq
        } else {
            0
        }
    }

    fn postings(&self, term: &str) -> &[Posting] {
        if term == self.term {
            &self.postings
        } else {
            &[]
        }
    }
}

/// Stores the raw document length in the norm
struct LengthNorm;

impl NormDecoder for LengthNorm {
    fn decode_norm(&self, norm: u64) -> f32 {
        1.0 / (norm as f32).sqrt()
    }
}

#[test]
fn test_single_term_run_line() {
    let index = OneTermIndex {
        term: "police".to_string(),
        postings: vec![Posting {
            doc_no: "DOC1".to_string(),
            term_freq: 2,
            norm: 50,
        }],
        doc_freq: 100,
        num_docs: 1000,
    };
    let engine = SearchEngine::new(index, LengthNorm);

    let scores = engine.score_query("Q1", "police").document_scores();
    assert_eq!(scores.len(), 1);
    assert!((scores["DOC1"] - 0.04 * 11f64.ln()).abs() < 1e-6);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.txt");
    let report = RankedWriter::default()
        .write_top_k(&scores, "Q1", &path, 1000)
        .unwrap();
    assert_eq!(report.written, 1);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("Q1 Q0 DOC1 1 0.0959"));
    assert!(content.ends_with(" run-1\n"));
}

#[test]
fn test_batch_run_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus.sgml");
    fs::write(
        &corpus,
        "\
<DOC>
<DOCNO> FT911-1 </DOCNO>
<TEXT>
Airbus subsidies from European governments.
</TEXT>
</DOC>
<DOC>
<DOCNO> FT911-2 </DOCNO>
<TEXT>
Sanctions against South Africa were tightened. Sanctions hurt exports.
</TEXT>
</DOC>
<DOC>
<DOCNO> FT911-3 </DOCNO>
<TEXT>
Airbus delivered new aircraft.
</TEXT>
</DOC>
",
    )
    .unwrap();

    let topics_path = dir.path().join("topics");
    fs::write(
        &topics_path,
        "\
<top>
<num> Number: 051
<title> Topic: Airbus Subsidies
<desc> Description:
Document will discuss government assistance to Airbus.
<smry> Summary:
Sanctions are not relevant.
<narr> Narrative:
Nothing.
</top>
<top>
<num> Number: 052
<title> Topic: South African Sanctions
<desc> Description:
Document will discuss sanctions against South Africa.
</top>
",
    )
    .unwrap();

    let output_dir = dir.path().join("out");
    let config_json = serde_json::json!({
        "corpus_paths": [corpus],
        "topics_path": topics_path,
        "output_dir": output_dir,
        "algorithm": "TFIDF",
    });
    let config = RunConfig::from_json(&config_json.to_string()).unwrap();

    let index = index_corpus(&config.corpus_paths, &ClassicNorm).unwrap();
    let topics = read_topics(&config.topics_path).unwrap();
    assert_eq!(topics.len(), 2);

    let engine = SearchEngine::new(index, ClassicNorm);
    let summary = run_topics(&engine, &topics, &config).unwrap();
    assert_eq!(summary.queries, 4);
    assert_eq!(summary.lines_failed, 0);

    let short = fs::read_to_string(output_dir.join("TFIDFShortQuery.txt")).unwrap();
    let short_lines: Vec<Vec<&str>> = short.lines().map(|l| l.split(' ').collect()).collect();
    // FT911-1 matches both title terms, FT911-3 only "airbus"
    assert_eq!(short_lines[0][..4], ["051", "Q0", "FT911-1", "1"]);
    assert_eq!(short_lines[1][..4], ["051", "Q0", "FT911-3", "2"]);
    assert_eq!(short_lines[2][..4], ["052", "Q0", "FT911-2", "1"]);
    assert_eq!(short_lines.len(), 3);
    assert!(short_lines.iter().all(|l| l.len() == 6 && l[5] == "run-1"));

    // the summary section mentions "sanctions"; it must not reach the long query
    let long = fs::read_to_string(config.output_path(QueryKind::Long)).unwrap();
    let long_051: Vec<&str> = long.lines().filter(|l| l.starts_with("051 ")).collect();
    assert!(long_051.iter().all(|l| !l.contains("FT911-2")));
    assert!(long.lines().any(|l| l.starts_with("052 Q0 FT911-2 1 ")));

    // a second run appends rather than truncating
    run_topics(&engine, &topics, &config).unwrap();
    let rerun = fs::read_to_string(output_dir.join("TFIDFShortQuery.txt")).unwrap();
    assert_eq!(rerun, format!("{short}{short}"));
}
