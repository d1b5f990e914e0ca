//! Local git driver: init, commit and push a generated product.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

pub const DEFAULT_COMMIT_MESSAGE: &str = "feat: Initial product deployment";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_REMOTE: &str = "origin";

/// Committer identity configured on freshly initialized repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

impl Default for GitIdentity {
    fn default() -> Self {
        Self {
            name: "Zero-Human Grid".to_string(),
            email: "zero-human@grid.ai".to_string(),
        }
    }
}

/// One git invocation (arguments after the program name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStep {
    pub args: Vec<String>,
}

impl GitStep {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl core::fmt::Display for GitStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "git {}", self.args.join(" "))
    }
}

#[derive(Debug, Error)]
pub enum GitError {
    #[error("repository directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("failed to run `{step}`: {source}")]
    Spawn {
        step: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{step}` exited with {status:?}: {stderr}")]
    Failed {
        step: String,
        status: Option<i32>,
        stderr: String,
    },
}

/// Pushes a local directory to a remote.
#[async_trait]
pub trait Pusher: Send + Sync {
    async fn push(&self, repo_dir: &Path, remote_url: &str) -> Result<(), GitError>;
}

/// Runs the fixed git sequence in `repo_dir`, stopping at the first failure.
///
/// Nothing is rolled back; a failed push leaves the local commit in place.
#[derive(Debug, Clone)]
pub struct GitPusher {
    program: OsString,
    identity: GitIdentity,
    commit_message: String,
    branch: String,
}

impl Default for GitPusher {
    fn default() -> Self {
        Self {
            program: OsString::from("git"),
            identity: GitIdentity::default(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl GitPusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different git executable (absolute path or name on `PATH`).
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_identity(mut self, identity: GitIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Steps `push` would run for `repo_dir` in its current state.
    pub fn plan(&self, repo_dir: &Path, remote_url: &str) -> Vec<GitStep> {
        let mut steps = Vec::with_capacity(8);
        if !repo_dir.join(".git").exists() {
            steps.push(GitStep::new(["init"]));
            steps.push(GitStep::new(["config", "user.email", self.identity.email.as_str()]));
            steps.push(GitStep::new(["config", "user.name", self.identity.name.as_str()]));
        }
        steps.push(GitStep::new(["add", "."]));
        steps.push(GitStep::new(["commit", "-m", self.commit_message.as_str()]));
        steps.push(GitStep::new(["remote", "add", DEFAULT_REMOTE, remote_url]));
        steps.push(GitStep::new(["branch", "-M", self.branch.as_str()]));
        steps.push(GitStep::new(["push", "-u", DEFAULT_REMOTE, self.branch.as_str()]));
        steps
    }

    async fn run(&self, repo_dir: &Path, step: &GitStep) -> Result<(), GitError> {
        tracing::debug!(dir = %repo_dir.display(), step = %step, "running git");

        let output = Command::new(&self.program)
            .args(&step.args)
            .current_dir(repo_dir)
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                step: step.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                step: step.to_string(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Pusher for GitPusher {
    async fn push(&self, repo_dir: &Path, remote_url: &str) -> Result<(), GitError> {
        if !repo_dir.is_dir() {
            return Err(GitError::MissingDirectory(repo_dir.to_path_buf()));
        }

        for step in self.plan(repo_dir, remote_url) {
            if let Err(e) = self.run(repo_dir, &step).await {
                tracing::warn!(error = %e, "✗ git error");
                return Err(e);
            }
        }

        tracing::info!(remote = remote_url, "✓ code pushed successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REMOTE: &str = "https://github.com/acme/mesh-messenger.git";

    fn rendered(steps: &[GitStep]) -> Vec<String> {
        steps.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn plan_initializes_fresh_directories() {
        let dir = tempfile::tempdir().unwrap();
        let steps = GitPusher::new().plan(dir.path(), REMOTE);

        assert_eq!(
            rendered(&steps),
            vec![
                "git init",
                "git config user.email zero-human@grid.ai",
                "git config user.name Zero-Human Grid",
                "git add .",
                "git commit -m feat: Initial product deployment",
                "git remote add origin https://github.com/acme/mesh-messenger.git",
                "git branch -M main",
                "git push -u origin main",
            ]
        );
    }

    #[test]
    fn plan_skips_init_for_existing_repositories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();

        let steps = GitPusher::new().plan(dir.path(), REMOTE);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].args, vec!["add", "."]);
    }

    #[test]
    fn custom_identity_is_used_for_config() {
        let dir = tempfile::tempdir().unwrap();
        let pusher = GitPusher::new().with_identity(GitIdentity {
            name: "Bot".to_string(),
            email: "bot@example.com".to_string(),
        });
        let steps = pusher.plan(dir.path(), REMOTE);
        assert_eq!(steps[1].args, vec!["config", "user.email", "bot@example.com"]);
        assert_eq!(steps[2].args, vec!["config", "user.name", "Bot"]);
    }

    fn bare_remote(root: &Path) -> PathBuf {
        let remote = root.join("remote.git");
        let status = std::process::Command::new("git")
            .args(["init", "--bare", "--quiet"])
            .arg(&remote)
            .status()
            .unwrap();
        assert!(status.success());
        remote
    }

    fn remote_has_main(remote: &Path) -> bool {
        std::process::Command::new("git")
            .arg("--git-dir")
            .arg(remote)
            .args(["rev-parse", "--verify", "--quiet", "refs/heads/main"])
            .output()
            .unwrap()
            .status
            .success()
    }

    fn rendered_product(root: &Path) -> PathBuf {
        let dir = root.join("product");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("app.py"), "print('hello')\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn push_publishes_main_to_remote() {
        let root = tempfile::tempdir().unwrap();
        let remote = bare_remote(root.path());
        let dir = rendered_product(root.path());

        GitPusher::new()
            .push(&dir, remote.to_str().unwrap())
            .await
            .unwrap();

        assert!(dir.join(".git").is_dir());
        assert!(remote_has_main(&remote));
    }

    #[tokio::test]
    async fn failing_step_stops_the_sequence() {
        let root = tempfile::tempdir().unwrap();
        let remote = bare_remote(root.path());
        let dir = rendered_product(root.path());
        let pusher = GitPusher::new();
        pusher.push(&dir, remote.to_str().unwrap()).await.unwrap();

        // Nothing new to commit, so the second run fails before touching the remote.
        let err = pusher.push(&dir, remote.to_str().unwrap()).await.unwrap_err();
        match err {
            GitError::Failed { step, .. } => {
                assert_eq!(step, "git commit -m feat: Initial product deployment")
            }
            other => panic!("expected failed step, got {other:?}"),
        }

        let remotes = std::process::Command::new("git")
            .args(["remote"])
            .current_dir(&dir)
            .output()
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&remotes.stdout).trim(), "origin");
    }

    #[tokio::test]
    async fn missing_directory_is_reported_before_running_git() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("never-rendered");

        let err = GitPusher::new().push(&gone, REMOTE).await.unwrap_err();
        assert!(matches!(err, GitError::MissingDirectory(p) if p == gone));
    }

    #[tokio::test]
    async fn missing_git_binary_aborts_at_first_step() {
        let dir = tempfile::tempdir().unwrap();
        let pusher = GitPusher::new().with_program("bizforge-no-such-git-binary");

        let err = pusher.push(dir.path(), REMOTE).await.unwrap_err();
        match err {
            GitError::Spawn { step, .. } => assert_eq!(step, "git init"),
            other => panic!("expected spawn error, got {other:?}"),
        }
    }
}
