use crate::error::{Error, Result};
use crate::types::Topic;
use std::fs;
use std::path::Path;

/// Read every topic of a topic file, in file order
pub fn read_topics(path: &Path) -> Result<Vec<Topic>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let topics = parse_topics(&text)?;
    tracing::info!(
        target: "trec::topics",
        path = %path.display(),
        count = topics.len(),
        "Loaded topics"
    );
    Ok(topics)
}

pub fn parse_topics(text: &str) -> Result<Vec<Topic>> {
    let mut topics = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("<top>") {
        let block_start = start + "<top>".len();
        let block_len = rest[block_start..]
            .find("</top>")
            .ok_or_else(|| Error::Topics(format!("unterminated <top> block #{}", topics.len() + 1)))?;
        let block = &rest[block_start..block_start + block_len];
        topics.push(parse_block(block, topics.len() + 1)?);
        rest = &rest[block_start + block_len + "</top>".len()..];
    }

    Ok(topics)
}

fn parse_block(block: &str, position: usize) -> Result<Topic> {
    let num = field(block, "<num>", &["\n"])
        .ok_or_else(|| Error::Topics(format!("topic #{} has no <num>", position)))?;
    let id = strip_label(num, "Number:").trim().to_string();
    if id.is_empty() {
        return Err(Error::Topics(format!("topic #{} has an empty <num>", position)));
    }

    let title = field(block, "<title>", &["\n<", "\n\n"]).unwrap_or_default();
    let description = field(block, "<desc>", &["<narr>"]).unwrap_or_default();

    Ok(Topic {
        id,
        title: title.trim().to_string(),
        description: strip_label(description, "Description:").trim().to_string(),
    })
}

/// Text after `tag` up to the first of `ends` (or the end of the block)
fn field<'a>(block: &'a str, tag: &str, ends: &[&str]) -> Option<&'a str> {
    let start = block.find(tag)? + tag.len();
    let body = &block[start..];
    let end = ends
        .iter()
        .filter_map(|end| body.find(end))
        .min()
        .unwrap_or(body.len());
    Some(&body[..end])
}

fn strip_label<'a>(text: &'a str, label: &str) -> &'a str {
    let trimmed = text.trim_start();
    trimmed.strip_prefix(label).unwrap_or(trimmed)
}
