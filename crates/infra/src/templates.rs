//! Built-in product templates and the filesystem renderer.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// One file of a template, relative to the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: &'static str,
    pub contents: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub files: &'static [TemplateFile],
}

/// Flask service with health/messages/nodes endpoints, tests, Dockerfile and README.
pub const MESH_MESSENGER: Template = Template {
    id: "mesh-messenger",
    files: &[
        TemplateFile {
            path: "app.py",
            contents: include_str!("../templates/mesh-messenger/app.py"),
        },
        TemplateFile {
            path: "requirements.txt",
            contents: include_str!("../templates/mesh-messenger/requirements.txt"),
        },
        TemplateFile {
            path: "test_app.py",
            contents: include_str!("../templates/mesh-messenger/test_app.py"),
        },
        TemplateFile {
            path: "Dockerfile",
            contents: include_str!("../templates/mesh-messenger/Dockerfile"),
        },
        TemplateFile {
            path: "README.md",
            contents: include_str!("../templates/mesh-messenger/README.md"),
        },
    ],
};

const BUILTIN: &[Template] = &[MESH_MESSENGER];

/// Look up a built-in template by id.
pub fn builtin(id: &str) -> Option<&'static Template> {
    BUILTIN.iter().find(|t| t.id == id)
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{0}' not found")]
    UnknownTemplate(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders a template into a directory.
pub trait Renderer: Send + Sync {
    /// Returns the paths written, in template order.
    fn render(&self, template_id: &str, output_dir: &Path) -> Result<Vec<PathBuf>, TemplateError>;
}

/// Writes built-in templates to the local filesystem, overwriting existing files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsRenderer;

impl Renderer for FsRenderer {
    fn render(&self, template_id: &str, output_dir: &Path) -> Result<Vec<PathBuf>, TemplateError> {
        let template = builtin(template_id)
            .ok_or_else(|| TemplateError::UnknownTemplate(template_id.to_string()))?;

        std::fs::create_dir_all(output_dir).map_err(io_err(output_dir))?;

        let mut written = Vec::with_capacity(template.files.len());
        for file in template.files {
            let path = output_dir.join(file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(io_err(parent))?;
            }
            std::fs::write(&path, file.contents).map_err(io_err(&path))?;
            tracing::info!(template = template.id, file = file.path, "✓ generated");
            written.push(path);
        }

        Ok(written)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> TemplateError {
    let path = path.to_path_buf();
    move |source| TemplateError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_messenger_has_the_five_product_files() {
        let t = builtin("mesh-messenger").unwrap();
        let names: Vec<&str> = t.files.iter().map(|f| f.path).collect();
        assert_eq!(
            names,
            vec!["app.py", "requirements.txt", "test_app.py", "Dockerfile", "README.md"]
        );
        assert!(t.files.iter().all(|f| !f.contents.is_empty()));
        assert!(builtin("nope").is_none());
    }

    #[test]
    fn render_writes_files_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("mesh-messenger");

        let written = FsRenderer.render("mesh-messenger", &out).unwrap();
        assert_eq!(written.len(), 5);

        let readme = std::fs::read_to_string(out.join("README.md")).unwrap();
        assert!(readme.starts_with("# Zero-Human Mesh Messenger"));
        let dockerfile = std::fs::read_to_string(out.join("Dockerfile")).unwrap();
        assert!(dockerfile.contains("EXPOSE 5000"));
    }

    #[test]
    fn render_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.py"), "stale").unwrap();

        FsRenderer.render("mesh-messenger", dir.path()).unwrap();
        let app = std::fs::read_to_string(dir.path().join("app.py")).unwrap();
        assert_ne!(app, "stale");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsRenderer.render("crm-suite", dir.path()).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownTemplate(id) if id == "crm-suite"));
    }

    #[test]
    fn unwritable_output_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = FsRenderer.render("mesh-messenger", &blocker.join("out")).unwrap_err();
        assert!(matches!(err, TemplateError::Io { .. }));
    }
}
