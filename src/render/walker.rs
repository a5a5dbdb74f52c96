use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{HbbError, Result};
use crate::prompt::Metadata;
use crate::render::context::build_context;
use crate::render::file::{is_opaque, render_file_content};

#[derive(Debug)]
pub struct GeneratedProject {
    pub output_dir: PathBuf,
    pub files_created: Vec<PathBuf>,
    pub files_copied: Vec<PathBuf>,
}

/// A file that would be created during generation.
#[derive(Debug)]
pub struct PlannedFile {
    /// Path relative to the output directory.
    pub relative_path: PathBuf,
    /// The file content (rendered template or copied binary).
    pub content: Vec<u8>,
    /// Whether this file was copied verbatim (true) or rendered from a template (false).
    pub is_copy: bool,
}

/// The result of planning a generation without writing to disk.
#[derive(Debug)]
pub struct GenerationPlan {
    pub files: Vec<PlannedFile>,
}

fn render_error<E>(file: &Path, source: E) -> HbbError
where
    E: std::error::Error + Send + Sync + 'static,
{
    HbbError::RenderError {
        file: file.to_path_buf(),
        source: Box::new(source),
    }
}

/// Walk the staged template and render every file into memory without writing.
///
/// Fails on the first file that cannot be read or rendered. Symbolic links are skipped.
pub fn plan_render(
    source: &Path,
    metadata: &Metadata,
    opaque_extensions: &[String],
) -> Result<GenerationPlan> {
    let context = build_context(metadata);
    let mut files = Vec::new();

    for entry in WalkDir::new(source)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| source.to_path_buf());
            render_error(&path, e)
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        let src_path = entry.path();
        if file_type.is_symlink() {
            tracing::debug!(path = %src_path.display(), "skipping symlink in template");
            continue;
        }

        let rel_path = src_path
            .strip_prefix(source)
            .map_err(|e| render_error(src_path, e))?
            .to_path_buf();
        let content = std::fs::read(src_path).map_err(|e| render_error(&rel_path, e))?;

        if is_opaque(src_path, &content, opaque_extensions) {
            tracing::trace!(file = %rel_path.display(), "copy");
            files.push(PlannedFile {
                relative_path: rel_path,
                content,
                is_copy: true,
            });
            continue;
        }

        let text = String::from_utf8(content).map_err(|e| render_error(&rel_path, e))?;
        let template_name = rel_path.to_string_lossy().into_owned();
        let rendered = render_file_content(&template_name, &text, &context)
            .map_err(|e| render_error(&rel_path, e))?;

        tracing::trace!(file = %rel_path.display(), "render");
        files.push(PlannedFile {
            relative_path: rel_path,
            content: rendered.into_bytes(),
            is_copy: false,
        });
    }

    Ok(GenerationPlan { files })
}

/// Write the files from a generation plan to disk.
///
/// A failure part way through leaves the files already written in place.
pub fn execute_plan(plan: &GenerationPlan, output_dir: &Path) -> Result<GeneratedProject> {
    let mut files_created = Vec::new();
    let mut files_copied = Vec::new();

    for file in &plan.files {
        let dest_path = output_dir.join(&file.relative_path);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| render_error(&file.relative_path, e))?;
        }
        std::fs::write(&dest_path, &file.content)
            .map_err(|e| render_error(&file.relative_path, e))?;
        if file.is_copy {
            files_copied.push(file.relative_path.clone());
        } else {
            files_created.push(file.relative_path.clone());
        }
    }

    Ok(GeneratedProject {
        output_dir: output_dir.to_path_buf(),
        files_created,
        files_copied,
    })
}

/// Render the staged template at `source` into `destination`.
pub fn render(
    source: &Path,
    destination: &Path,
    metadata: &Metadata,
    opaque_extensions: &[String],
) -> Result<GeneratedProject> {
    let plan = plan_render(source, metadata, opaque_extensions)?;
    execute_plan(&plan, destination)
}
