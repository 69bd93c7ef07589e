//! Dependency enricher: documentation entries for chart dependencies.
//!
//! Each dependency's repository index is fetched on its own task. Tasks
//! only report an outcome; the coordinating call owns the parameter list
//! and applies insertions once every task has resolved, in manifest order.
//! When any lookup fails nothing is inserted.

use crate::error::{DependencyFailure, Error, FetchError, Result};
use crate::model::Parameter;
use crate::parser;
use async_trait::async_trait;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

// -- Manifest -----------------------------------------------------------------

/// The parts of `Chart.yaml` this tool reads.
#[derive(Debug, Default, Deserialize)]
pub struct ChartManifest {
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dependency {
    pub name: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl ChartManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = parser::read_source(path)?;
        Self::from_yaml(&content).map_err(|source| Error::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> serde_yaml::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        // A document of only comments deserializes to null
        let manifest: Option<Self> = serde_yaml::from_str(content)?;
        Ok(manifest.unwrap_or_default())
    }
}

impl Dependency {
    /// Name under which the subchart's values appear: the alias if set.
    pub fn values_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// `<repository>/index.yaml`, or `None` for repositories that are not
    /// served over HTTP (`oci://`, `file://`, `@alias`).
    pub fn index_url(&self) -> Option<String> {
        let base = self.repository.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            Some(format!("{base}/index.yaml"))
        } else {
            None
        }
    }
}

// -- Fetching -----------------------------------------------------------------

/// Source of repository index documents.
#[async_trait]
pub trait IndexFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

pub struct HttpIndexFetcher {
    client: reqwest::Client,
}

impl HttpIndexFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IndexFetcher for HttpIndexFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[derive(Deserialize)]
struct RepositoryIndex {
    #[serde(default)]
    entries: HashMap<String, Vec<ChartVersion>>,
}

#[derive(Deserialize)]
struct ChartVersion {
    home: Option<String>,
}

/// `entries[chart][0].home` from an index document.
fn home_url(index: &str, chart: &str) -> std::result::Result<String, FetchError> {
    let index: RepositoryIndex = serde_yaml::from_str(index)?;
    let first = index
        .entries
        .get(chart)
        .and_then(|versions| versions.first())
        .ok_or_else(|| FetchError::MissingEntry(chart.to_string()))?;
    first
        .home
        .clone()
        .ok_or_else(|| FetchError::MissingHome(chart.to_string()))
}

// -- Enrichment ---------------------------------------------------------------

/// Names handled by an [`Enricher::enrich`] run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Documentation entries added to the list
    pub inserted: Vec<String>,
    /// Resolved, but no parameter lives under the dependency's name
    pub unmatched: Vec<String>,
    /// Repositories without an HTTP index
    pub skipped: Vec<String>,
}

pub struct Enricher {
    fetcher: Arc<dyn IndexFetcher>,
}

impl Enricher {
    pub fn new(fetcher: Arc<dyn IndexFetcher>) -> Self {
        Self { fetcher }
    }

    /// Look up every dependency concurrently and splice a documentation
    /// entry in front of the first parameter under its name.
    pub async fn enrich(
        &self,
        manifest: &ChartManifest,
        params: &mut Vec<Parameter>,
    ) -> Result<EnrichReport> {
        let mut report = EnrichReport::default();
        let mut tasks = JoinSet::new();

        info!(count = manifest.dependencies.len(), "receiving home pages");
        for (position, dependency) in manifest.dependencies.iter().enumerate() {
            let Some(url) = dependency.index_url() else {
                warn!(
                    dependency = %dependency.name,
                    repository = %dependency.repository,
                    "repository has no HTTP index, skipping"
                );
                report.skipped.push(dependency.values_name().to_string());
                continue;
            };
            let fetcher = Arc::clone(&self.fetcher);
            let dependency = dependency.clone();
            tasks.spawn(async move {
                let outcome = resolve(fetcher.as_ref(), &dependency, &url).await;
                (position, dependency, url, outcome)
            });
        }

        let mut resolved = Vec::new();
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (position, dependency, url, outcome) = match joined {
                Ok(done) => done,
                Err(err) => std::panic::resume_unwind(err.into_panic()),
            };
            match outcome {
                Ok(record) => resolved.push((position, record)),
                Err(reason) => failures.push((
                    position,
                    DependencyFailure {
                        dependency: dependency.name,
                        url,
                        reason,
                    },
                )),
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|(position, _)| *position);
            return Err(Error::Dependencies(
                failures.into_iter().map(|(_, failure)| failure).collect(),
            ));
        }

        resolved.sort_by_key(|(position, _)| *position);
        for (_, record) in resolved {
            let name = record.name.clone();
            if splice(params, record) {
                report.inserted.push(name);
            } else {
                debug!(dependency = %name, "no parameter under dependency name, dropping");
                report.unmatched.push(name);
            }
        }

        info!(inserted = report.inserted.len(), "successfully received home pages");
        Ok(report)
    }
}

async fn resolve(
    fetcher: &dyn IndexFetcher,
    dependency: &Dependency,
    url: &str,
) -> std::result::Result<Parameter, FetchError> {
    let index = fetcher.fetch(url).await?;
    let home = home_url(&index, &dependency.name)?;
    Ok(documentation_record(dependency.values_name(), &home))
}

fn documentation_record(name: &str, home: &str) -> Parameter {
    let mut param = Parameter::new(name);
    param.description =
        format!("For additional variables configurations please refer [here]({home})");
    param.value = Some(Value::String(String::new()));
    param.validate = false;
    param
}

/// Insert `record` before the first parameter whose top-level name equals
/// the record's name, taking over its section. Returns false if none exists.
fn splice(params: &mut Vec<Parameter>, mut record: Parameter) -> bool {
    let Some(index) = params
        .iter()
        .position(|p| p.top_level_name() == Some(record.name.as_str()))
    else {
        return false;
    };
    record.section = params[index].section.clone();
    params.insert(index, record);
    true
}

/// Load `Chart.yaml` and enrich `params` over HTTP.
pub async fn append_dependencies(
    chart_path: &Path,
    params: &mut Vec<Parameter>,
    timeout: Duration,
) -> Result<EnrichReport> {
    let manifest = ChartManifest::load(chart_path)?;
    let enricher = Enricher::new(Arc::new(HttpIndexFetcher::new(timeout)?));
    enricher.enrich(&manifest, params).await
}
