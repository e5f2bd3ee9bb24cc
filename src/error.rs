use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::format::FormatTag;

/// Which side of an edge failed the range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Why a node id was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeViolation {
    Negative,
    TooLarge,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeViolation::Negative => f.write_str("negative node id"),
            RangeViolation::TooLarge => f.write_str("node id not below node count"),
        }
    }
}

/// A format name that is not one of the recognized tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown graph format {name:?} (expected \"SNAP\" or \"WDC\")")]
pub struct UnknownFormatError {
    pub name: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormatError),

    #[error("graph format {0} is recognized but not supported")]
    UnsupportedFormat(FormatTag),

    #[error("invalid load options: {0}")]
    InvalidOptions(&'static str),

    #[error("no \"# Nodes: <int> Edges: <int>\" header before the first data line")]
    HeaderMissing,

    #[error("cannot allocate graph with {nodes} nodes and {edges} edges: {reason}")]
    Allocation {
        nodes: i64,
        edges: i64,
        reason: &'static str,
    },

    #[error("line {line_number} exceeds {limit} bytes")]
    LineTooLong { line_number: usize, limit: usize },

    #[error("line {line_number}: expected two integers separated by tab or comma: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error(
        "line {line_number}: {endpoint} {value} out of range for {node_count} nodes ({reason}): {line:?}"
    )]
    NodeOutOfRange {
        line_number: usize,
        line: String,
        endpoint: Endpoint,
        value: i64,
        node_count: usize,
        reason: RangeViolation,
    },

    #[error(
        "line {line_number}: source {source_node} precedes current row {current_row}: {line:?}"
    )]
    NonMonotonicSource {
        line_number: usize,
        line: String,
        source_node: usize,
        current_row: usize,
    },

    #[error("line {line_number}: row {row} runs past node count {node_count}: {line:?}")]
    RowOverflow {
        line_number: usize,
        line: String,
        row: usize,
        node_count: usize,
    },

    #[error("line {line_number}: more than the declared {declared} edges: {line:?}")]
    EdgeOverflow {
        line_number: usize,
        line: String,
        declared: usize,
    },

    #[error("header declared {expected} edges but the stream held {actual}")]
    EdgeCountMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Structural CSR invariant failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsrViolation {
    #[error("row offsets are empty; expected node_count + 1 entries")]
    EmptyOffsets,

    #[error("offsets[0] = {0}, expected 0")]
    NonZeroStart(usize),

    #[error("offsets not non-decreasing at row {row}")]
    Decreasing { row: usize },

    #[error("offsets[n] = {last}, but there are {edges} column indices")]
    EndMismatch { last: usize, edges: usize },

    #[error("edge values length {values} != edges {edges}")]
    ValueLength { values: usize, edges: usize },

    #[error("column index {column} at edge {edge} not below node count {node_count}")]
    ColumnOutOfRange {
        edge: usize,
        column: usize,
        node_count: usize,
    },
}

#[derive(Debug, Error)]
pub enum BinIoError {
    #[error("{op} {path:?}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file {path:?} length {len} not divisible by {width}")]
    Length {
        path: PathBuf,
        len: usize,
        width: usize,
    },

    #[error("value {value} in {path:?} does not fit in usize")]
    Overflow { path: PathBuf, value: u64 },

    #[error("invalid CSR in {dir:?}: {source}")]
    Invalid {
        dir: PathBuf,
        #[source]
        source: CsrViolation,
    },
}
