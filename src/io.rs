//! Reading graphs and labels, reading and writing score files.
//!
//! Every function takes an explicit path; nothing depends on the process
//! working directory.
//!
//! | Format | Layout |
//! |--------|--------|
//! | edge list | one `u v` pair per line, extra columns ignored, `#` comments |
//! | node list | ids separated by commas and/or whitespace, `#` comments |
//! | scores | JSON object `{ "node": score }`, keys sorted |

use crate::error::{Error, Result};
use crate::{Graph, NodeId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Parse a whitespace-separated edge list.
///
/// # Errors
///
/// `Error::Parse` for a non-comment line with fewer than two columns.
pub fn parse_edgelist(text: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    for (i, line) in text.lines().enumerate() {
        let line = strip_comment(line);
        if line.is_empty() {
            continue;
        }
        let mut cols = line.split_whitespace();
        match (cols.next(), cols.next()) {
            (Some(u), Some(v)) => {
                graph.add_edge(u, v);
            }
            _ => {
                return Err(Error::Parse {
                    line: i + 1,
                    message: format!("expected two node ids, got '{line}'"),
                })
            }
        }
    }
    Ok(graph)
}

/// Read an edge list file.
///
/// # Errors
///
/// `Error::Io` if the file cannot be read, `Error::Parse` as for [`parse_edgelist`].
pub fn read_edgelist(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let graph = parse_edgelist(&fs::read_to_string(path)?)?;
    debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "edge list loaded"
    );
    Ok(graph)
}

/// Write `graph` as an edge list, one edge per line.
///
/// # Errors
///
/// `Error::Io` on write failure.
pub fn write_edgelist(graph: &Graph, path: impl AsRef<Path>) -> Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    for (u, v) in graph.edges() {
        writeln!(out, "{u} {v}")?;
    }
    out.flush()?;
    Ok(())
}

/// Parse node ids separated by commas or whitespace.
pub fn parse_node_list(text: &str) -> Vec<NodeId> {
    text.lines()
        .map(strip_comment)
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a node list file.
///
/// # Errors
///
/// `Error::Io` if the file cannot be read.
pub fn read_node_list(path: impl AsRef<Path>) -> Result<Vec<NodeId>> {
    Ok(parse_node_list(&fs::read_to_string(path)?))
}

/// Save a score map as a JSON object with sorted keys.
///
/// # Errors
///
/// `Error::Io` or `Error::Json` on failure.
pub fn save_scores(scores: &HashMap<NodeId, f64>, path: impl AsRef<Path>) -> Result<()> {
    let sorted: BTreeMap<&NodeId, f64> = scores.iter().map(|(k, &v)| (k, v)).collect();
    save_json(&sorted, path)
}

/// Load a score map saved by [`save_scores`].
///
/// # Errors
///
/// `Error::Io` or `Error::Json` on failure.
pub fn load_scores(path: impl AsRef<Path>) -> Result<HashMap<NodeId, f64>> {
    load_json(path)
}

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// `Error::Io` or `Error::Json` on failure.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.flush()?;
    debug!(path = %path.display(), "json written");
    Ok(())
}

/// Deserialize a JSON file.
///
/// # Errors
///
/// `Error::Io` or `Error::Json` on failure.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or("").trim()
}
