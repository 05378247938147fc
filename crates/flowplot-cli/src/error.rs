//! Error type of the CLI.

use thiserror::Error;

use flowplot::FlowPlotError;

use crate::{config::ConfigError, input::InputError};

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    FlowPlot(#[from] FlowPlotError),
}
