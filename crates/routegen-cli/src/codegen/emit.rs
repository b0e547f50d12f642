//! Output file assembly

use super::builder::FileRoutes;
use super::render::Renderer;
use routegen_core::{RouteGenError, RouteGenResult};
use routegen_transport::{CompilerVersion, GeneratedFile};
use std::path::{Path, PathBuf};
use tracing::info;

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Code generated by protoc-gen-route. DO NOT EDIT.";

/// Output name for `source`: the `.proto` extension replaced by `suffix`
pub fn output_file_name(source: &str, suffix: &str) -> String {
    let stem = source.strip_suffix(".proto").unwrap_or(source);
    format!("{stem}{suffix}")
}

/// Header block naming the generator, protoc version and source file
pub fn file_header(source: &str, compiler_version: Option<&CompilerVersion>) -> String {
    let protoc = compiler_version
        .map(ToString::to_string)
        .unwrap_or_else(|| "(unknown)".to_string());
    format!(
        "{GENERATED_HEADER}\n\
         // versions:\n\
         // - protoc-gen-route v{}\n\
         // - protoc {protoc}\n\
         // source: {source}\n",
        env!("CARGO_PKG_VERSION"),
    )
}

/// Turns per-file route groups into generated files
pub struct Emitter<'a> {
    renderer: &'a Renderer,
    suffix: String,
    compiler_version: Option<CompilerVersion>,
}

impl<'a> Emitter<'a> {
    pub fn new(renderer: &'a Renderer, suffix: impl Into<String>) -> Self {
        Self {
            renderer,
            suffix: suffix.into(),
            compiler_version: None,
        }
    }

    pub fn with_compiler_version(mut self, version: Option<CompilerVersion>) -> Self {
        self.compiler_version = version;
        self
    }

    /// Render every group of one file under a single header
    ///
    /// Returns `None` for a file without route groups.
    pub fn emit(&self, routes: &FileRoutes) -> RouteGenResult<Option<GeneratedFile>> {
        if routes.services.is_empty() {
            return Ok(None);
        }

        let mut content = file_header(&routes.file_name, self.compiler_version.as_ref());
        for service in &routes.services {
            content.push('\n');
            content.push_str(&self.renderer.render(service)?);
        }

        let name = output_file_name(&routes.file_name, &self.suffix);
        info!(file = %name, services = routes.services.len(), "generated");
        Ok(Some(GeneratedFile::new(name, content)))
    }

    /// Emit every file, all or nothing
    pub fn emit_all(&self, routes: &[FileRoutes]) -> RouteGenResult<Vec<GeneratedFile>> {
        let mut files = Vec::new();
        for file in routes {
            files.extend(self.emit(file)?);
        }
        Ok(files)
    }
}

/// Write generated files below `out_dir`, creating directories as needed
///
/// Every file is first written to a temporary sibling. Targets are only
/// replaced once all of them were written, so a failed write leaves no
/// generated file behind. Directories created on the way are kept.
pub fn write_files(out_dir: &Path, files: &[GeneratedFile]) -> RouteGenResult<()> {
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
    let written = files
        .iter()
        .try_for_each(|file| stage_file(out_dir, file, &mut staged));
    if let Err(err) = written {
        for (tmp, _) in &staged {
            let _ = std::fs::remove_file(tmp);
        }
        return Err(err);
    }

    for (tmp, path) in &staged {
        std::fs::rename(tmp, path)
            .map_err(|e| RouteGenError::IoError(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "wrote");
    }
    Ok(())
}

fn stage_file(
    out_dir: &Path,
    file: &GeneratedFile,
    staged: &mut Vec<(PathBuf, PathBuf)>,
) -> RouteGenResult<()> {
    let path = out_dir.join(&file.name);
    let io_error = |e: std::io::Error| RouteGenError::IoError(format!("{}: {e}", path.display()));
    let dir = path.parent().unwrap_or(out_dir);
    std::fs::create_dir_all(dir).map_err(io_error)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = dir.join(format!(".{file_name}.routegen-tmp"));
    staged.push((tmp.clone(), path.clone()));
    std::fs::write(&tmp, &file.content).map_err(io_error)
}
