//! One archive run: connect, fetch, classify, import, update locally.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument};

use super::classifier::is_archive_eligible;
use crate::api::{KumaApi, Session, Transport};
use crate::db::{self, DEFAULT_DB_PATH};
use crate::error::Result;
use crate::models::{Asset, AssetFilter};

/// Knobs for a run.
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// Minimum whole days since the last update.
    pub threshold_days: u32,
    /// Push the archived flag back to the server per tenant.
    pub import: bool,
    /// Classify and report only.
    pub dry_run: bool,
    pub db_path: PathBuf,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            threshold_days: 30,
            import: false,
            dry_run: false,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Steps whose failures are reported without aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStep {
    Classify,
    Import,
    LocalUpdate,
}

impl RunStep {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::Import => "import",
            Self::LocalUpdate => "local_update",
        }
    }
}

impl std::fmt::Display for RunStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failure recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepError {
    pub step: RunStep,
    /// Asset or tenant the failure concerns, if any.
    pub subject: Option<String>,
    pub detail: String,
}

/// Counts and errors of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub fetched: usize,
    pub eligible: usize,
    pub imported: usize,
    pub updated: usize,
    pub statements: usize,
    pub errors: Vec<StepError>,
}

impl RunSummary {
    fn record(&mut self, step: RunStep, subject: Option<&str>, detail: impl ToString) {
        self.errors.push(StepError {
            step,
            subject: subject.map(str::to_string),
            detail: detail.to_string(),
        });
    }

    /// Whether any error was recorded for `step`.
    pub fn failed(&self, step: RunStep) -> bool {
        self.errors.iter().any(|e| e.step == step)
    }

    /// Emit the summary at INFO, and each error at WARN.
    pub fn log(&self) {
        info!(
            fetched = self.fetched,
            eligible = self.eligible,
            imported = self.imported,
            updated = self.updated,
            errors = self.errors.len(),
            "run summary"
        );
        for e in &self.errors {
            warn!(
                step = %e.step,
                subject = e.subject.as_deref().unwrap_or("-"),
                "{}",
                e.detail
            );
        }
    }
}

/// Drives a run against a transport and the local database.
pub struct ArchiveCoordinator<'a, T: ?Sized> {
    api: KumaApi<'a, T>,
    options: ArchiveOptions,
}

impl<'a, T: Transport + ?Sized> ArchiveCoordinator<'a, T> {
    /// The page size comes from `session`, which has already rejected zero.
    pub fn new(transport: &'a T, session: &Session, options: ArchiveOptions) -> Self {
        Self {
            api: KumaApi::new(transport, session.page_limit()),
            options,
        }
    }

    /// Run every step with `now` as the single cutoff reference.
    ///
    /// A failed connectivity check or inventory fetch aborts the run, since
    /// nothing downstream is meaningful without the inventory. Classification,
    /// import and local-update failures are collected into the summary.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunSummary> {
        let span = info_span!("archive_run", threshold_days = self.options.threshold_days);
        self.run_steps(now).instrument(span).await
    }

    async fn run_steps(&self, now: DateTime<Utc>) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        if let Err(e) = self.api.connect().await {
            error!(error = %e, "connection failed");
            return Err(e);
        }
        info!("connected");

        let fetched = self.api.fetch_assets(&AssetFilter::default()).await;
        let mut assets = match fetched.into_result() {
            Ok(assets) => assets,
            Err(e) => {
                error!(error = %e, "asset fetch failed");
                return Err(e);
            }
        };
        summary.fetched = assets.len();
        info!(fetched = summary.fetched, "asset(s) fetched");

        let batch = self.classify(&mut assets, now, &mut summary);
        summary.eligible = batch.len();
        info!(eligible = summary.eligible, "asset(s) to archive");

        if self.options.dry_run {
            info!("dry run, skipping import and local update");
            return Ok(summary);
        }

        if self.options.import && !batch.is_empty() {
            let selected: HashSet<&str> = batch.iter().map(String::as_str).collect();
            let archived: Vec<&Asset> = assets
                .iter()
                .filter(|a| selected.contains(a.id.as_str()))
                .collect();
            self.import(&archived, &mut summary).await;
        }

        self.update_local(&batch, &mut summary);
        Ok(summary)
    }

    /// Mark eligible assets archived in memory and return their ids.
    fn classify(
        &self,
        assets: &mut [Asset],
        now: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> Vec<String> {
        let mut batch = Vec::new();

        for asset in assets.iter_mut() {
            match is_archive_eligible(asset, now, self.options.threshold_days) {
                Ok(true) => {
                    asset.archived = true;
                    batch.push(asset.id.clone());
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(asset_id = %asset.id, error = %e, "cannot classify asset");
                    summary.record(RunStep::Classify, Some(asset.id.as_str()), e);
                }
            }
        }

        batch
    }

    /// One import call per tenant. Failures are recorded, never fatal.
    async fn import(&self, archived: &[&Asset], summary: &mut RunSummary) {
        let mut by_tenant: BTreeMap<&str, Vec<&Asset>> = BTreeMap::new();
        for &asset in archived {
            match asset.tenant_id.as_deref() {
                Some(tenant_id) => by_tenant.entry(tenant_id).or_default().push(asset),
                None => {
                    let detail = "asset has no tenantID";
                    summary.record(RunStep::Import, Some(asset.id.as_str()), detail);
                }
            }
        }
        if by_tenant.is_empty() {
            return;
        }

        let names = self.tenant_names().await;
        for (tenant_id, group) in by_tenant {
            let tenant = names.get(tenant_id).map_or(tenant_id, String::as_str);
            match self.api.import_assets(tenant_id, &group).await {
                Ok(_) => {
                    summary.imported += group.len();
                    info!(tenant, count = group.len(), "import accepted");
                }
                Err(e) => {
                    warn!(tenant, error = %e, "import failed");
                    summary.record(RunStep::Import, Some(tenant_id), e);
                }
            }
        }
    }

    async fn tenant_names(&self) -> HashMap<String, String> {
        let fetched = self.api.fetch_tenants().await;
        let result = fetched.result();
        if !result.is_ok() {
            warn!(
                status = %result.status(),
                details = result.details().unwrap_or_default(),
                "tenant listing incomplete, logging ids only"
            );
        }
        fetched
            .records
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect()
    }

    fn update_local(&self, ids: &[String], summary: &mut RunSummary) {
        match db::mark_archived(&self.options.db_path, ids) {
            Ok(report) => {
                summary.updated = report.updated;
                summary.statements = report.statements;
                info!(
                    updated = report.updated,
                    statements = report.statements,
                    "asset(s) updated"
                );
            }
            Err(e) => {
                error!(error = %e, "local update failed");
                summary.record(RunStep::LocalUpdate, None, e);
            }
        }
    }
}
