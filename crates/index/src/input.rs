//! Readers for the three text input formats.
//!
//! All formats are whitespace-separated decimal integers, one record per
//! line, preceded by a header line carrying the record count:
//!
//! - graph: `n m` followed by `m` edge lines `u v`
//! - queries: `q` followed by `q` pair lines `s t`
//! - updates: `k` followed by `k` lines `u v t` with `t` one of `i`/`d`

use std::io::Read;

use linereader::LineReader;

use crate::{Error, UndirectedGraph};

/// A single entry of an update stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeUpdate {
    Insert(u32, u32),
    Delete(u32, u32),
}

/// Reads a graph from `n m` header plus edge lines, enforcing the loader
/// invariants: at least two vertices, endpoints in range, no self loops,
/// duplicates collapsed, adjacency sorted ascending.
pub fn read_graph<R: Read>(input: R) -> Result<UndirectedGraph, Error> {
    let mut header = None;
    let mut edges = Vec::new();

    for_each_record(input, |fields| {
        match header {
            None => {
                let (n, m) = (parse_field(fields, 0)?, parse_field(fields, 1)?);
                header = Some((n, m));
                edges.reserve(m as usize);
            }
            Some(_) => edges.push((parse_field(fields, 0)?, parse_field(fields, 1)?)),
        }
        Ok(())
    })?;

    let (n, m) = header.ok_or_else(|| Error::InvalidInput {
        message: "graph file is empty".to_string(),
    })?;
    if edges.len() != m as usize {
        return Err(Error::InvalidInput {
            message: format!("expected {m} edges, found {}", edges.len()),
        });
    }

    UndirectedGraph::from_edges(n, edges)
}

/// Reads a query batch: `q` header plus `s t` pairs.
pub fn read_queries<R: Read>(input: R) -> Result<Vec<(u32, u32)>, Error> {
    let mut expected = None;
    let mut queries = Vec::new();

    for_each_record(input, |fields| {
        match expected {
            None => {
                expected = Some(parse_field(fields, 0)?);
                queries.reserve(expected.unwrap_or(0) as usize);
            }
            Some(_) => queries.push((parse_field(fields, 0)?, parse_field(fields, 1)?)),
        }
        Ok(())
    })?;

    check_count(expected, queries.len(), "queries")?;
    Ok(queries)
}

/// Reads an update stream: `k` header plus `u v t` lines.
pub fn read_updates<R: Read>(input: R) -> Result<Vec<EdgeUpdate>, Error> {
    let mut expected = None;
    let mut updates = Vec::new();

    for_each_record(input, |fields| {
        match expected {
            None => {
                expected = Some(parse_field(fields, 0)?);
                updates.reserve(expected.unwrap_or(0) as usize);
            }
            Some(_) => {
                let u = parse_field(fields, 0)?;
                let v = parse_field(fields, 1)?;
                let update = match fields.get(2).copied() {
                    Some(field) if field == b"i" => EdgeUpdate::Insert(u, v),
                    Some(field) if field == b"d" => EdgeUpdate::Delete(u, v),
                    other => {
                        return Err(Error::InvalidInput {
                            message: format!(
                                "update type must be 'i' or 'd', got {:?}",
                                other.map(String::from_utf8_lossy)
                            ),
                        })
                    }
                };
                updates.push(update);
            }
        }
        Ok(())
    })?;

    check_count(expected, updates.len(), "updates")?;
    Ok(updates)
}

fn check_count(expected: Option<u32>, actual: usize, what: &str) -> Result<(), Error> {
    let expected = expected.ok_or_else(|| Error::InvalidInput {
        message: format!("{what} file is empty"),
    })?;
    if actual != expected as usize {
        return Err(Error::InvalidInput {
            message: format!("expected {expected} {what}, found {actual}"),
        });
    }
    Ok(())
}

/// Feeds the whitespace-split fields of every non-blank line to `record`.
fn for_each_record<R, F>(input: R, mut record: F) -> Result<(), Error>
where
    R: Read,
    F: FnMut(&[&[u8]]) -> Result<(), Error>,
{
    let mut lines = LineReader::new(input);

    while let Some(line) = lines.next_line() {
        let line = line?;
        let fields = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>();
        if fields.is_empty() {
            continue;
        }
        record(&fields)?;
    }

    Ok(())
}

fn parse_field(fields: &[&[u8]], index: usize) -> Result<u32, Error> {
    fields
        .get(index)
        .and_then(|field| atoi::atoi::<u32>(field))
        .ok_or_else(|| Error::InvalidInput {
            message: format!("missing or malformed integer field {index}"),
        })
}
