//! Parsing and writing the label rankings the engines produce.
//!
//! Both engines end up expressing the same thing: for each node, a list of
//! labels ranked best-first. Junto writes per-node score columns that need
//! ranking here; SRW writes the ranked list directly.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ResultsError;

/// Ranked labels per node name, best label first.
///
/// A `BTreeMap` so iteration (and therefore [`write_rankings`]) follows
/// sorted node order.
pub type LabelRankings = BTreeMap<String, Vec<String>>;

/// Parse a Junto output file into per-node label rankings.
///
/// Each row is tab-separated with the node name in column 0 and the
/// estimated scores in column 3 as alternating `label score` tokens. Rows
/// that are too short, have an incomplete trailing pair, or carry an
/// unparsable score are skipped with a warning.
pub fn parse_junto_results(path: impl AsRef<Path>) -> Result<LabelRankings, ResultsError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "parsing junto results");
    let contents = std::fs::read_to_string(path).map_err(|source| ResultsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_junto_results_str(&contents))
}

fn parse_junto_results_str(contents: &str) -> LabelRankings {
    let mut rankings = LabelRankings::new();
    for line in contents.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            tracing::warn!(line, "skipping short junto results row");
            continue;
        }
        match rank_scored_labels(fields[3]) {
            Some(labels) => {
                rankings.insert(fields[0].to_string(), labels);
            }
            None => {
                tracing::warn!(node = fields[0], "skipping junto row with malformed scores");
            }
        }
    }
    rankings
}

/// Rank a Junto estimated-score column.
///
/// The column holds whitespace-separated `label score` pairs; the result
/// lists labels by descending score, ties broken by descending label text.
/// `None` when a pair is incomplete or a score does not parse.
pub fn rank_scored_labels(column: &str) -> Option<Vec<String>> {
    let tokens: Vec<&str> = column.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        return None;
    }
    let mut pairs = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks(2) {
        let score: f64 = pair[1].parse().ok()?;
        pairs.push((score, pair[0]));
    }
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| b.1.cmp(a.1)));
    Some(pairs.into_iter().map(|(_, label)| label.to_string()).collect())
}

/// Parse an SRW output file into per-node label rankings.
///
/// Rows are `node \t label [\t label]*`, already ranked. Rows without a tab
/// are routine trailing output and skipped without comment.
pub fn parse_srw_results(path: impl AsRef<Path>) -> Result<LabelRankings, ResultsError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "parsing srw results");
    let contents = std::fs::read_to_string(path).map_err(|source| ResultsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_srw_results_str(&contents))
}

fn parse_srw_results_str(contents: &str) -> LabelRankings {
    let mut rankings = LabelRankings::new();
    for line in contents.lines() {
        if let Some((node, labels)) = line.trim().split_once('\t') {
            rankings.insert(
                node.to_string(),
                labels.split('\t').map(str::to_string).collect(),
            );
        }
    }
    rankings
}

/// Write one `node \t label \t label ...` line per node, sorted by node.
pub fn write_rankings(rankings: &LabelRankings, out: &mut impl Write) -> std::io::Result<()> {
    for (node, labels) in rankings {
        writeln!(out, "{node}\t{}", labels.join("\t"))?;
    }
    Ok(())
}

/// Write the rankings file at `path`, creating or truncating it.
pub fn write_rankings_file(
    rankings: &LabelRankings,
    path: impl AsRef<Path>,
) -> Result<(), ResultsError> {
    let path = path.as_ref();
    let io_error = |source| ResultsError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(io_error)?);
    write_rankings(rankings, &mut out).map_err(io_error)?;
    out.flush().map_err(io_error)?;
    tracing::info!(path = %path.display(), nodes = rankings.len(), "wrote rankings");
    Ok(())
}
