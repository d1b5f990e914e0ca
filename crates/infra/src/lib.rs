//! Infrastructure layer: template rendering, hosted repositories, git.
//!
//! Each collaborator sits behind a small trait so the orchestrator can be
//! exercised with in-memory fakes.

pub mod git;
pub mod github;
pub mod templates;

pub use git::{GitError, GitIdentity, GitPusher, GitStep, Pusher};
pub use github::{CreatedRepository, GitHubClient, GitHubError, RepositoryHost};
pub use templates::{FsRenderer, Renderer, Template, TemplateError, TemplateFile};
