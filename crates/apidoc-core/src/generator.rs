//! End-to-end generation: render entry points, assemble documents, write files

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::assemble::{FileManager, FileResult};
use crate::config::GeneratorOptions;
use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::registry::ApiContext;
use crate::render::{MarkdownRenderer, ReferenceContext, Render};

/// Drives rendering and assembly for one [`ApiContext`]
pub struct Generator<'a, R = MarkdownRenderer> {
    ctx: &'a ApiContext,
    options: GeneratorOptions,
    renderer: R,
}

impl<'a> Generator<'a> {
    /// Create a generator using the Markdown renderer
    pub fn new(ctx: &'a ApiContext, options: GeneratorOptions) -> Self {
        let renderer = MarkdownRenderer::from_options(&options);
        Self::with_renderer(ctx, options, renderer)
    }
}

impl<'a, R: Render> Generator<'a, R> {
    /// Create a generator with a custom renderer
    pub fn with_renderer(ctx: &'a ApiContext, options: GeneratorOptions, renderer: R) -> Self {
        Self {
            ctx,
            options,
            renderer,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Render every entry point in registry order and assemble the documents.
    ///
    /// # Errors
    ///
    /// Fails when an entry point has no usable document path. Unresolvable
    /// references are reported to `sink` instead.
    pub fn generate(&self, sink: &mut dyn DiagnosticSink) -> Result<Vec<FileResult>> {
        let mut manager = FileManager::new(self.ctx, self.options.output_extension.clone());

        for id in self.ctx.registry().entry_points() {
            let entity = self
                .ctx
                .entity(id.as_str())
                .ok_or_else(|| Error::UnknownEntryPoint(id.clone()))?;
            debug!(entry = %id, kind = entity.kind().display_name(), "rendering entry point");

            let result = self
                .renderer
                .render(self.ctx, entity, &ReferenceContext::of(entity));
            manager.add_entry_document(result)?;
        }

        let files = manager.to_files_output(self.options.skip_table_of_contents, sink);
        info!(documents = files.len(), "documentation assembled");
        Ok(files)
    }
}

/// Write generated documents below `dir`, creating directories as needed.
///
/// # Errors
///
/// Returns [`Error::Write`] naming the first path that could not be written.
pub fn write_files(dir: impl AsRef<Path>, files: &[FileResult]) -> Result<()> {
    let dir = dir.as_ref();

    for file in files {
        let path = dir.join(&file.file_location);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, file.to_text()).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote document");
    }

    Ok(())
}
