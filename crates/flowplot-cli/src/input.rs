//! Network input files.
//!
//! A network file is TOML naming the source, the sink and the capacity
//! matrix:
//!
//! ```toml
//! source = 0
//! sink = 2
//! capacities = [[0, 5, 0], [0, 0, 3], [0, 0, 0]]
//! ```
//!
//! Capacities may be integers, reals, or strings such as `"1/2"` where
//! `"0"` means no edge.

use std::{fs, io, ops::Range, path::Path};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use flowplot::{FlowPlotBuilder, FlowPlotError, diagram::FlowDiagram, matrix::AdjacencyMatrix};

/// Errors raised while reading a network file.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read network file {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("Invalid network file: {message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },
}

/// Capacity matrix in one of the supported encodings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CapacityMatrix {
    Integer(Vec<Vec<i64>>),
    Real(Vec<Vec<f64>>),
    Text(Vec<Vec<String>>),
}

impl CapacityMatrix {
    fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
        }
    }
}

/// Contents of a network file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkFile {
    source: usize,
    sink: usize,
    capacities: CapacityMatrix,
}

impl NetworkFile {
    /// Parses a network from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Parse`] carrying the offending span when the
    /// text is not a valid network description.
    pub fn from_toml(src: &str) -> Result<Self, InputError> {
        toml::from_str(src).map_err(|err| InputError::Parse {
            message: err.message().to_string(),
            span: err.span(),
            src: src.to_string(),
        })
    }

    /// Validates the matrix and lays the network out with `builder`.
    ///
    /// # Errors
    ///
    /// Returns the matrix and layout errors of the library.
    pub fn into_diagram(self, builder: &FlowPlotBuilder) -> Result<FlowDiagram, FlowPlotError> {
        debug!(kind = self.capacities.kind(); "Capacity encoding");
        match self.capacities {
            CapacityMatrix::Integer(rows) => {
                builder.layout(&AdjacencyMatrix::new(rows)?, self.source, self.sink)
            }
            CapacityMatrix::Real(rows) => {
                builder.layout(&AdjacencyMatrix::new(rows)?, self.source, self.sink)
            }
            CapacityMatrix::Text(rows) => {
                builder.layout(&AdjacencyMatrix::new(rows)?, self.source, self.sink)
            }
        }
    }
}

/// Reads and parses the network file at `path`.
///
/// # Errors
///
/// Returns [`InputError::Io`] if the file cannot be read and
/// [`InputError::Parse`] if it is not a valid network description.
pub fn load_network(path: impl AsRef<Path>) -> Result<NetworkFile, InputError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Reading network file");

    let src = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    NetworkFile::from_toml(&src)
}
