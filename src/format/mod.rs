pub mod lines;
pub mod snap;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info_span};

use crate::config::LoadOptions;
use crate::error::{LoadError, UnknownFormatError};
use crate::graph::csr::Graph;
use lines::LineReader;

/// Input formats the loader recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    Snap,
    /// Recognized but not implemented; loading fails with `UnsupportedFormat`.
    Wdc,
}

impl FormatTag {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Snap => "SNAP",
            FormatTag::Wdc => "WDC",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_format_tag(s)
    }
}

/// Exact, case-sensitive match on `"SNAP"` or `"WDC"`.
pub fn parse_format_tag(name: &str) -> Result<FormatTag, UnknownFormatError> {
    match name {
        "SNAP" => Ok(FormatTag::Snap),
        "WDC" => Ok(FormatTag::Wdc),
        _ => Err(UnknownFormatError {
            name: name.to_string(),
        }),
    }
}

/// Load the graph at `path` with default options.
pub fn load_graph(path: impl AsRef<Path>, format: FormatTag) -> Result<Graph, LoadError> {
    load_graph_with_options(path, format, &LoadOptions::default())
}

pub fn load_graph_with_options(
    path: impl AsRef<Path>,
    format: FormatTag,
    options: &LoadOptions,
) -> Result<Graph, LoadError> {
    let path = path.as_ref();
    let _span = info_span!("load_graph", path = %path.display(), %format).entered();

    options.validate()?;
    ensure_supported(format)?;

    debug!("opening input");
    let file = File::open(path)?;
    dispatch(BufReader::new(file), options)
}

/// Same as `load_graph_with_options` over an already open stream.
pub fn load_graph_from_reader<R: BufRead>(
    reader: R,
    format: FormatTag,
    options: &LoadOptions,
) -> Result<Graph, LoadError> {
    options.validate()?;
    ensure_supported(format)?;
    dispatch(reader, options)
}

/// Options and format must already be checked.
fn dispatch<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Graph, LoadError> {
    snap::parse(LineReader::new(reader, options.max_line_bytes))
}

/// SNAP is the only format with a parser.
fn ensure_supported(format: FormatTag) -> Result<(), LoadError> {
    match format {
        FormatTag::Snap => Ok(()),
        FormatTag::Wdc => Err(LoadError::UnsupportedFormat(format)),
    }
}
