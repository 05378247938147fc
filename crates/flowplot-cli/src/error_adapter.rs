//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the standard error types of the
//! CLI and the library, and miette's rich diagnostic formatting.
//!
//! Network files that fail to parse are reported with a snippet of the file
//! and a label on the offending value; every other error is reported with a
//! stable code and, where one exists, a hint.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use flowplot::{FlowPlotError, layout::LayoutError, matrix::MatrixError};

use crate::{CliError, config::ConfigError, input::InputError};

/// Adapter for a network file parse failure with source location.
pub struct InputDiagnostic<'a> {
    message: &'a str,
    span: Option<&'a Range<usize>>,
    src: &'a str,
}

impl<'a> InputDiagnostic<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(message: &'a str, span: Option<&'a Range<usize>>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for InputDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputDiagnostic")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for InputDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid network file: {}", self.message)
    }
}

impl std::error::Error for InputDiagnostic<'_> {}

impl MietteDiagnostic for InputDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("flowplot::input"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "expected `source`, `sink` and a square `capacities` matrix of integers, reals or strings",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(self.message.to_string()), span),
        )))
    }
}

/// Adapter for errors without source location.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Config(_) => "flowplot::config",
            CliError::Input(InputError::Io { .. }) => "flowplot::io",
            CliError::Input(InputError::Parse { .. }) => "flowplot::input",
            CliError::FlowPlot(FlowPlotError::Io(_)) => "flowplot::io",
            CliError::FlowPlot(FlowPlotError::Matrix(_)) => "flowplot::matrix",
            CliError::FlowPlot(FlowPlotError::Layout(_)) => "flowplot::layout",
            CliError::FlowPlot(FlowPlotError::Export(_)) => "flowplot::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Config(ConfigError::MissingFile(_)) => {
                "check the --config path or omit it to use the defaults".to_string()
            }
            CliError::FlowPlot(FlowPlotError::Matrix(MatrixError::NonSquare { expected, .. })) => {
                format!("every row needs {expected} cells, one per node")
            }
            CliError::FlowPlot(FlowPlotError::Layout(LayoutError::InvalidIndex {
                size, ..
            })) => format!("node indices range from 0 to {}", size.saturating_sub(1)),
            CliError::FlowPlot(FlowPlotError::Layout(LayoutError::UnreachableNode { .. })) => {
                "set `orphans = \"omit\"` in the [layout] section to leave such edges out"
                    .to_string()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse failure with source location information.
    Diagnostic(InputDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a reportable error.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Input(InputError::Parse { message, span, src }) => {
            Reportable::Diagnostic(InputDiagnostic::new(message, span.as_ref(), src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn code(reportable: &Reportable<'_>) -> Option<String> {
        reportable.code().map(|c| c.to_string())
    }

    #[test]
    fn test_parse_error_becomes_diagnostic() {
        let err = CliError::Input(InputError::Parse {
            message: "missing field `sink`".to_string(),
            span: Some(0..10),
            src: "source = 0\ncapacities = [[0]]\n".to_string(),
        });

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "Invalid network file: missing field `sink`");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
        assert_eq!(code(&reportable).as_deref(), Some("flowplot::input"));

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 0);
        assert_eq!(labels[0].len(), 10);
    }

    #[test]
    fn test_parse_error_without_span_has_no_labels() {
        let err = CliError::Input(InputError::Parse {
            message: "bad".to_string(),
            span: None,
            src: String::new(),
        });

        assert!(to_reportable(&err).labels().is_none());
    }

    #[test]
    fn test_layout_error() {
        let err = CliError::FlowPlot(FlowPlotError::Layout(LayoutError::InvalidIndex {
            endpoint: flowplot::layout::Endpoint::Sink,
            index: 5,
            size: 3,
        }));

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "Layout error: sink index 5 is out of bounds for a matrix of 3 nodes"
                );
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
        assert_eq!(code(&reportable).as_deref(), Some("flowplot::layout"));
        assert_eq!(
            reportable.help().map(|h| h.to_string()).as_deref(),
            Some("node indices range from 0 to 2")
        );
    }

    #[test]
    fn test_matrix_error() {
        let err = CliError::FlowPlot(FlowPlotError::Matrix(MatrixError::NonSquare {
            row: 1,
            expected: 2,
            actual: 1,
        }));

        let reportable = to_reportable(&err);
        assert_eq!(code(&reportable).as_deref(), Some("flowplot::matrix"));
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_config_error() {
        let err = CliError::Config(ConfigError::MissingFile(PathBuf::from("nope.toml")));

        let reportable = to_reportable(&err);
        assert_eq!(reportable.to_string(), "Missing configuration file: nope.toml");
        assert_eq!(code(&reportable).as_deref(), Some("flowplot::config"));
    }

    #[test]
    fn test_io_error_code() {
        let err = CliError::Input(InputError::Io {
            path: "net.toml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        });

        let reportable = to_reportable(&err);
        assert_eq!(code(&reportable).as_deref(), Some("flowplot::io"));
        assert!(reportable.help().is_none());
    }
}
