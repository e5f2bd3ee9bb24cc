//! SNAP edge lists.
//!
//! ```text
//! # Directed graph: web-Google.txt
//! # Nodes: 875713 Edges: 5105039
//! # FromNodeId	ToNodeId
//! 0	11342
//! 0	824020
//! ```
//!
//! Sources must be grouped in non-decreasing order. `#` lines may appear
//! anywhere and are skipped.

use std::io::BufRead;

use tracing::{debug, info};

use super::lines::{Line, LineReader};
use crate::error::{Endpoint, LoadError, RangeViolation};
use crate::graph::builder::{CsrBuilder, PushError};
use crate::graph::csr::Graph;

/// Sizes declared by the `# Nodes: N Edges: M` comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub nodes: i64,
    pub edges: i64,
}

/// Split a leading optionally signed decimal integer off `s`.
fn leading_int(s: &str) -> Option<(i64, &str)> {
    let sign = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let (num, rest) = s.split_at(sign + digits);
    Some((num.parse().ok()?, rest))
}

/// `# Nodes: N Edges: M`. Whitespace around the labels is optional and
/// anything after `M` is ignored.
fn parse_size_comment(text: &str) -> Option<Header> {
    let rest = text.strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix("Nodes:")?.trim_start();
    let (nodes, rest) = leading_int(rest)?;
    let rest = rest.trim_start().strip_prefix("Edges:")?.trim_start();
    let (edges, _) = leading_int(rest)?;
    Some(Header { nodes, edges })
}

/// Consume the leading comment block and return the declared sizes. The
/// first data line is pushed back onto `reader` untouched.
pub fn read_header<R: BufRead>(reader: &mut LineReader<R>) -> Result<Header, LoadError> {
    let mut header = None;

    while let Some(line) = reader.next_line()? {
        if !line.is_comment() {
            reader.push_back(line);
            break;
        }
        if header.is_none() {
            header = parse_size_comment(&line.text);
        }
    }

    header.ok_or(LoadError::HeaderMissing)
}

fn check_range(
    line: &Line,
    endpoint: Endpoint,
    value: i64,
    node_count: usize,
) -> Result<usize, LoadError> {
    let reason = if value < 0 {
        RangeViolation::Negative
    } else {
        match usize::try_from(value) {
            Ok(v) if v < node_count => return Ok(v),
            _ => RangeViolation::TooLarge,
        }
    };
    Err(LoadError::NodeOutOfRange {
        line_number: line.number,
        line: line.text.clone(),
        endpoint,
        value,
        node_count,
        reason,
    })
}

/// Split a data line into `(source, destination)` and range-check both.
pub fn parse_edge_line(line: &Line, node_count: usize) -> Result<(usize, usize), LoadError> {
    let malformed = || LoadError::MalformedLine {
        line_number: line.number,
        line: line.text.clone(),
    };

    let mut fields = line.text.split(['\t', ',']).map(str::trim);
    let (src, dst) = match (fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(b), None) => (a, b),
        _ => return Err(malformed()),
    };
    let src: i64 = src.parse().map_err(|_| malformed())?;
    let dst: i64 = dst.parse().map_err(|_| malformed())?;

    let src = check_range(line, Endpoint::Source, src, node_count)?;
    let dst = check_range(line, Endpoint::Destination, dst, node_count)?;
    Ok((src, dst))
}

/// Feed every remaining data line into `builder`.
pub fn parse_edges<R: BufRead>(
    reader: &mut LineReader<R>,
    mut builder: CsrBuilder,
) -> Result<Graph, LoadError> {
    let node_count = builder.node_count();

    while let Some(line) = reader.next_line()? {
        if line.is_comment() {
            continue;
        }
        let (src, dst) = parse_edge_line(&line, node_count)?;
        builder.push_edge(src, dst).map_err(|e| match e {
            PushError::NonMonotonic { current_row } => LoadError::NonMonotonicSource {
                line_number: line.number,
                line: line.text.clone(),
                source_node: src,
                current_row,
            },
            PushError::RowOverflow { row } => LoadError::RowOverflow {
                line_number: line.number,
                line: line.text.clone(),
                row,
                node_count,
            },
            PushError::EdgeOverflow { declared } => LoadError::EdgeOverflow {
                line_number: line.number,
                line: line.text.clone(),
                declared,
            },
        })?;
    }

    debug!(
        lines = reader.lines_read(),
        edges = builder.edges_filled(),
        "edge stream exhausted"
    );
    builder.finish()
}

/// Header, allocation and edge stream in one pass over `reader`.
pub fn parse<R: BufRead>(mut reader: LineReader<R>) -> Result<Graph, LoadError> {
    let header = read_header(&mut reader)?;
    info!(nodes = header.nodes, edges = header.edges, "read SNAP header");

    let builder = CsrBuilder::allocate(header.nodes, header.edges)?;
    let graph = parse_edges(&mut reader, builder)?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "finished building graph"
    );
    Ok(graph)
}
