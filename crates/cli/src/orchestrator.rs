//! Launch pipeline: render → create repository → push → register revenue.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use bizforge_infra::{Pusher, Renderer, RepositoryHost};
use bizforge_revenue::{Ledger, PortfolioSummary};

use crate::catalog::{Catalog, ProductLine};

/// A product line that made it through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchedProduct {
    pub config: ProductLine,
    pub repo_url: String,
    pub created_at: DateTime<Utc>,
}

/// Ledger portfolio plus the keys of every line launched in this session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorySummary {
    pub portfolio: PortfolioSummary,
    pub products_created: Vec<String>,
}

/// Drives the collaborators in a fixed order for one product line at a time.
///
/// Render and repository failures abort the launch. A failed push only warns,
/// since the repository already exists and can be pushed by hand.
pub struct Orchestrator<R, H, P> {
    renderer: R,
    host: H,
    pusher: P,
    catalog: Catalog,
    workdir: PathBuf,
    public: bool,
    ledger: Ledger,
    launched: BTreeMap<String, LaunchedProduct>,
}

impl<R, H, P> Orchestrator<R, H, P>
where
    R: Renderer,
    H: RepositoryHost,
    P: Pusher,
{
    pub fn new(
        renderer: R,
        host: H,
        pusher: P,
        catalog: Catalog,
        workdir: impl Into<PathBuf>,
        ledger: Ledger,
    ) -> Self {
        Self {
            renderer,
            host,
            pusher,
            catalog,
            workdir: workdir.into(),
            public: true,
            ledger,
            launched: BTreeMap::new(),
        }
    }

    pub fn with_public_repositories(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn launched(&self) -> &BTreeMap<String, LaunchedProduct> {
        &self.launched
    }

    /// Run the full pipeline for `key`. Returns the line's config on success.
    pub async fn create_product_line(&mut self, key: &str) -> Option<ProductLine> {
        let Some(config) = self.catalog.get(key).cloned() else {
            tracing::error!(product = key, "✗ product type not recognized");
            return None;
        };

        tracing::info!(product = key, "creating new product line");

        let output_dir = self.workdir.join(&config.key);
        tracing::info!(template = %config.template, dir = %output_dir.display(), "[1/5] generating product from template");
        if let Err(e) = self.renderer.render(&config.template, &output_dir) {
            tracing::error!(error = %e, "✗ error generating product");
            return None;
        }

        tracing::info!(repo = %config.github_repo, "[2/5] creating GitHub repository");
        let repo = match self
            .host
            .create_repository(&config.github_repo, &config.description, self.public)
            .await
        {
            Ok(repo) => repo,
            Err(e) => {
                tracing::error!(error = %e, "✗ failed to create GitHub repository");
                return None;
            }
        };

        tracing::info!(remote = %repo.clone_url, "[3/5] pushing code to repository");
        if let Err(e) = self.pusher.push(&output_dir, &repo.clone_url).await {
            tracing::warn!(
                error = %e,
                manual = "git push -u origin main",
                "⚠ could not push code automatically"
            );
        }

        tracing::info!("[4/5] registering with revenue engine");
        if let Err(e) = self.ledger.register_product(
            config.key.as_str(),
            config.name.as_str(),
            config.pricing_min,
            config.pricing_max,
            config.target_mrr,
        ) {
            tracing::error!(error = %e, "✗ revenue registration rejected");
            return None;
        }

        tracing::info!(product = key, url = %repo.html_url, "[5/5] product deployment complete");
        self.launched.insert(
            config.key.clone(),
            LaunchedProduct {
                config: config.clone(),
                repo_url: repo.html_url,
                created_at: Utc::now(),
            },
        );
        Some(config)
    }

    pub fn portfolio_summary(&self) -> FactorySummary {
        FactorySummary {
            portfolio: self.ledger.get_portfolio_summary(),
            products_created: self.launched.keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use bizforge_infra::{CreatedRepository, GitError, GitHubError, TemplateError};

    #[derive(Default)]
    struct Calls {
        rendered: Vec<(String, PathBuf)>,
        repos: Vec<(String, bool)>,
        pushes: Vec<(PathBuf, String)>,
    }

    type Log = Arc<Mutex<Calls>>;

    struct FakeRenderer {
        log: Log,
        fail: bool,
    }

    impl Renderer for FakeRenderer {
        fn render(&self, template_id: &str, output_dir: &Path) -> Result<Vec<PathBuf>, TemplateError> {
            self.log
                .lock()
                .unwrap()
                .rendered
                .push((template_id.to_string(), output_dir.to_path_buf()));
            if self.fail {
                return Err(TemplateError::UnknownTemplate(template_id.to_string()));
            }
            Ok(vec![output_dir.join("app.py")])
        }
    }

    struct FakeHost {
        log: Log,
        fail: bool,
    }

    #[async_trait]
    impl RepositoryHost for FakeHost {
        async fn create_repository(
            &self,
            name: &str,
            _description: &str,
            public: bool,
        ) -> Result<CreatedRepository, GitHubError> {
            self.log.lock().unwrap().repos.push((name.to_string(), public));
            if self.fail {
                return Err(GitHubError::Status {
                    status: 401,
                    body: "Bad credentials".to_string(),
                });
            }
            Ok(CreatedRepository {
                html_url: format!("https://github.com/acme/{name}"),
                clone_url: format!("https://github.com/acme/{name}.git"),
                ssh_url: format!("git@github.com:acme/{name}.git"),
            })
        }
    }

    struct FakePusher {
        log: Log,
        fail: bool,
    }

    #[async_trait]
    impl Pusher for FakePusher {
        async fn push(&self, repo_dir: &Path, remote_url: &str) -> Result<(), GitError> {
            self.log
                .lock()
                .unwrap()
                .pushes
                .push((repo_dir.to_path_buf(), remote_url.to_string()));
            if self.fail {
                return Err(GitError::MissingDirectory(repo_dir.to_path_buf()));
            }
            Ok(())
        }
    }

    fn orchestrator(
        render_fails: bool,
        host_fails: bool,
        push_fails: bool,
    ) -> (Orchestrator<FakeRenderer, FakeHost, FakePusher>, Log) {
        let log: Log = Arc::default();
        let orch = Orchestrator::new(
            FakeRenderer { log: log.clone(), fail: render_fails },
            FakeHost { log: log.clone(), fail: host_fails },
            FakePusher { log: log.clone(), fail: push_fails },
            Catalog::builtin(),
            "/work",
            Ledger::new(),
        );
        (orch, log)
    }

    #[tokio::test]
    async fn successful_launch_registers_revenue() {
        let (mut orch, log) = orchestrator(false, false, false);

        let config = orch.create_product_line("mesh-messenger").await.unwrap();
        assert_eq!(config.target_mrr, 14_500.0);

        let calls = log.lock().unwrap();
        assert_eq!(
            calls.rendered,
            vec![("mesh-messenger".to_string(), PathBuf::from("/work/mesh-messenger"))]
        );
        assert_eq!(calls.repos, vec![("mesh-messenger".to_string(), true)]);
        assert_eq!(
            calls.pushes,
            vec![(
                PathBuf::from("/work/mesh-messenger"),
                "https://github.com/acme/mesh-messenger.git".to_string()
            )]
        );
        drop(calls);

        let summary = orch.ledger().get_product_summary("mesh-messenger").unwrap();
        assert_eq!(summary.annual_run_rate, 174_000.0);
        assert_eq!(
            orch.launched()["mesh-messenger"].repo_url,
            "https://github.com/acme/mesh-messenger"
        );

        let factory = orch.portfolio_summary();
        assert_eq!(factory.products_created, vec!["mesh-messenger".to_string()]);
        assert_eq!(factory.portfolio.total_mrr, 14_500.0);
    }

    #[tokio::test]
    async fn unknown_product_stops_before_rendering() {
        let (mut orch, log) = orchestrator(false, false, false);
        assert!(orch.create_product_line("crm-suite").await.is_none());
        assert!(log.lock().unwrap().rendered.is_empty());
        assert!(orch.ledger().is_empty());
    }

    #[tokio::test]
    async fn render_failure_aborts() {
        let (mut orch, log) = orchestrator(true, false, false);
        assert!(orch.create_product_line("mesh-messenger").await.is_none());
        assert!(log.lock().unwrap().repos.is_empty());
        assert!(orch.ledger().is_empty());
    }

    #[tokio::test]
    async fn repository_failure_aborts_before_push() {
        let (mut orch, log) = orchestrator(false, true, false);
        assert!(orch.create_product_line("mesh-messenger").await.is_none());
        assert!(log.lock().unwrap().pushes.is_empty());
        assert!(orch.ledger().is_empty());
        assert!(orch.launched().is_empty());
    }

    #[tokio::test]
    async fn push_failure_only_warns() {
        let (mut orch, _log) = orchestrator(false, false, true);
        assert!(orch.create_product_line("mesh-messenger").await.is_some());
        assert!(orch.ledger().product("mesh-messenger").is_some());
        assert_eq!(orch.launched().len(), 1);
    }

    #[tokio::test]
    async fn private_repositories_are_requested_when_configured() {
        let (orch, log) = orchestrator(false, false, false);
        let mut orch = orch.with_public_repositories(false);
        orch.create_product_line("mesh-messenger").await.unwrap();
        assert_eq!(log.lock().unwrap().repos, vec![("mesh-messenger".to_string(), false)]);
    }
}
