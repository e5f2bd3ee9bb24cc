//! Load SNAP directed edge lists into a Compressed-Sparse-Row graph.
//!
//! ```no_run
//! use snap_csr::{load_graph, parse_format_tag};
//!
//! let format = parse_format_tag("SNAP")?;
//! let g = load_graph("web-Google.txt", format)?;
//! println!("{} nodes, {} edges", g.node_count(), g.edge_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod graph;

pub use config::LoadOptions;
pub use error::{CsrViolation, LoadError, UnknownFormatError};
pub use format::{
    load_graph, load_graph_from_reader, load_graph_with_options, parse_format_tag, FormatTag,
};
pub use graph::csr::Graph;
