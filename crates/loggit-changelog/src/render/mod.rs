//! Renderers for the log document

mod digest;
mod raw;
mod template;

pub use digest::render_digest;
pub use raw::{escape_xml, render_raw};
pub use template::Template;

use std::path::Path;

use loggit_core::config::RenderMode;
use loggit_core::error::RenderError;
use tracing::{debug, instrument};

use crate::document::LogDocument;

/// Renderer resolved once from a [`RenderMode`]
#[derive(Debug, Clone)]
pub enum Renderer {
    /// Intermediate XML document
    Raw,
    /// Markdown digest
    Digest,
    /// Loaded user template
    Custom(Template),
}

impl Renderer {
    /// Resolve a render mode, loading the template for the custom mode.
    ///
    /// A relative template path is taken relative to `base_dir`.
    pub fn from_mode(mode: &RenderMode, base_dir: &Path) -> Result<Self, RenderError> {
        match mode {
            RenderMode::Raw => Ok(Self::Raw),
            RenderMode::Digest => Ok(Self::Digest),
            RenderMode::Custom(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                Ok(Self::Custom(Template::load(&path)?))
            }
        }
    }

    /// Short name of the renderer
    pub fn name(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Digest => "digest",
            Self::Custom(_) => "custom",
        }
    }

    /// Render the document to text
    #[instrument(skip(self, doc), fields(renderer = self.name(), commits = doc.len()))]
    pub fn render(&self, doc: &LogDocument) -> String {
        let output = match self {
            Self::Raw => render_raw(doc),
            Self::Digest => render_digest(doc),
            Self::Custom(template) => {
                debug!(template = %template.path().display(), "rendering template");
                template.render(doc)
            }
        };
        debug!(output_len = output.len(), "document rendered");
        output
    }
}
