//! Error types for flowplot operations.
//!
//! This module provides the main error type [`FlowPlotError`] which wraps
//! the error conditions of every stage: matrix validation, layout, and
//! rendering.

use std::io;

use thiserror::Error;

use flowplot_core::matrix::MatrixError;

use crate::layout::LayoutError;

/// The main error type for flowplot operations.
#[derive(Debug, Error)]
pub enum FlowPlotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid matrix: {0}")]
    Matrix(#[from] MatrixError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for FlowPlotError {
    fn from(error: crate::export::Error) -> Self {
        match error {
            crate::export::Error::Io(err) => Self::Io(err),
            other => Self::Export(Box::new(other)),
        }
    }
}
