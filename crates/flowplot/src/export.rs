pub mod svg;

use std::{fs, io, path::Path};

use log::{error, info};
use thiserror::Error;

use crate::diagram::FlowDiagram;

/// A backend turning a [`FlowDiagram`] into a document.
pub trait Exporter {
    /// Renders the diagram into the document text.
    fn render(&self, diagram: &FlowDiagram) -> Result<String, Error>;

    /// Renders the diagram and writes the document to `path`.
    fn export_to_file(&self, diagram: &FlowDiagram, path: &Path) -> Result<(), Error> {
        let document = self.render(diagram)?;

        info!(path:? = path; "Writing diagram");
        fs::write(path, document).map_err(|err| {
            error!(path:? = path, err:err; "Failed to write diagram");
            Error::Io(err)
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
