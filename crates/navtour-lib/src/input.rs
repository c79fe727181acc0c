//! Loaders for comma-separated node and connection files.
//!
//! Three line formats are understood, one record per line with surrounding
//! whitespace trimmed and blank lines skipped:
//!
//! - coordinates: `name, x, y`
//! - connections: `name_a, name_b`
//! - houses: `x, y` (nodes are named `1..=N` in file order)

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::node::{Node, Position};
use crate::registry::NodeRegistry;

/// Load a registry from a coordinates file and a connections file.
///
/// Connections naming unknown nodes are dropped without an error, matching
/// [`NodeRegistry::connect`].
pub fn load_graph(coordinates: &Path, connections: &Path) -> Result<NodeRegistry> {
    let mut registry = NodeRegistry::from_nodes(read_coordinates(coordinates)?)?;

    let pairs = read_connections(connections)?;
    let mut added = 0usize;
    for (a, b) in &pairs {
        if registry.connect(a, b) {
            added += 1;
        }
    }

    debug!(
        nodes = registry.len(),
        connections = pairs.len(),
        added,
        "loaded graph"
    );
    Ok(registry)
}

/// Load a house list as a registry without connections.
pub fn load_houses(path: &Path) -> Result<NodeRegistry> {
    let registry = NodeRegistry::from_nodes(read_houses(path)?)?;
    debug!(nodes = registry.len(), path = %path.display(), "loaded houses");
    Ok(registry)
}

/// Parse `name, x, y` rows.
pub fn read_coordinates(path: &Path) -> Result<Vec<Node>> {
    parse_coordinates(open(path)?, path)
}

/// Parse `name_a, name_b` rows.
pub fn read_connections(path: &Path) -> Result<Vec<(String, String)>> {
    parse_connections(open(path)?, path)
}

/// Parse `x, y` rows into nodes named by their 1-based line position.
pub fn read_houses(path: &Path) -> Result<Vec<Node>> {
    parse_houses(open(path)?, path)
}

fn open(path: &Path) -> Result<File> {
    Ok(File::open(path)?)
}

pub(crate) fn parse_coordinates<R: Read>(reader: R, path: &Path) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    for_each_record(reader, path, |line, record| {
        let [name, x, y] = fields::<3>(record, path, line, "name, x, y")?;
        if name.is_empty() {
            return Err(format_error(path, line, "empty node name"));
        }
        let position = Position::new(
            parse_number(x, path, line)?,
            parse_number(y, path, line)?,
        );
        nodes.push(Node::new(name, position));
        Ok(())
    })?;
    Ok(nodes)
}

pub(crate) fn parse_connections<R: Read>(reader: R, path: &Path) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for_each_record(reader, path, |line, record| {
        let [a, b] = fields::<2>(record, path, line, "name_a, name_b")?;
        pairs.push((a.to_string(), b.to_string()));
        Ok(())
    })?;
    Ok(pairs)
}

pub(crate) fn parse_houses<R: Read>(reader: R, path: &Path) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    for_each_record(reader, path, |line, record| {
        let [x, y] = fields::<2>(record, path, line, "x, y")?;
        let position = Position::new(
            parse_number(x, path, line)?,
            parse_number(y, path, line)?,
        );
        let name = (nodes.len() + 1).to_string();
        nodes.push(Node::new(name, position));
        Ok(())
    })?;
    Ok(nodes)
}

fn for_each_record<R, F>(reader: R, path: &Path, mut visit: F) -> Result<()>
where
    R: Read,
    F: FnMut(u64, &StringRecord) -> Result<()>,
{
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    for record in csv.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        visit(line, &record).map_err(|err| match err {
            Error::InputFormat { .. } => err,
            other => format_error(path, line, other.to_string()),
        })?;
    }
    Ok(())
}

fn fields<'r, const N: usize>(
    record: &'r StringRecord,
    path: &Path,
    line: u64,
    expected: &str,
) -> Result<[&'r str; N]> {
    if record.len() != N {
        return Err(format_error(
            path,
            line,
            format!("expected `{expected}`, found {} field(s)", record.len()),
        ));
    }
    let mut out = [""; N];
    for (slot, field) in out.iter_mut().zip(record.iter()) {
        *slot = field;
    }
    Ok(out)
}

fn parse_number(raw: &str, path: &Path, line: u64) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| format_error(path, line, format!("invalid number `{raw}`")))
}

fn format_error(path: &Path, line: u64, message: impl Into<String>) -> Error {
    Error::InputFormat {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("inline.txt")
    }

    #[test]
    fn coordinates_are_trimmed_and_blank_lines_skipped() {
        let data = "Ankara, 10, 20\n\n  Izmir ,3.5,  -4\n";
        let nodes = parse_coordinates(data.as_bytes(), path()).expect("parse");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].name, "Izmir");
        assert_eq!(nodes[1].position, Position::new(3.5, -4.0));
    }

    #[test]
    fn houses_are_numbered_from_one() {
        let nodes = parse_houses("0.1,0.2\n0.3,0.4\n".as_bytes(), path()).expect("parse");
        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["1", "2"]);
    }

    #[test]
    fn malformed_rows_report_their_line() {
        let err = parse_coordinates("A,1,2\nB,oops,3\n".as_bytes(), path()).unwrap_err();
        match err {
            Error::InputFormat { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("oops"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_connections("A\n".as_bytes(), path()).unwrap_err();
        assert!(err.to_string().contains("expected `name_a, name_b`"));
    }
}
