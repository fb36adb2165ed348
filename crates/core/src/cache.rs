//! Period report caching using Moka.
//!
//! Reports are keyed by tenant and period. Change notifications from the
//! operational side drop the affected entries; the next read recomputes.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use freightbook_shared::config::CacheConfig;
use freightbook_shared::types::TenantId;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregator::{AggregationError, PeriodAggregator};
use crate::period::ReportPeriod;
use crate::pnl::{
    DataQualityReport, PnLInput, PnLOutput, UnitMetrics, calculate_pnl, calculate_unit_metrics,
};

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

type CacheKey = (TenantId, ReportPeriod);

/// A computed period report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnLReport {
    /// Tenant the report belongs to.
    pub tenant_id: TenantId,
    /// Reporting window.
    pub period: ReportPeriod,
    /// P&L statement.
    pub pnl: PnLOutput,
    /// Unit economics.
    pub metrics: UnitMetrics,
    /// Malformed row counts seen while computing.
    pub data_quality: DataQualityReport,
    /// True when served from the cache.
    pub cached: bool,
}

impl PnLReport {
    /// Runs the engine over `input`.
    #[must_use]
    pub fn compute(tenant_id: TenantId, input: &PnLInput) -> Self {
        let pnl = calculate_pnl(input);
        let metrics = calculate_unit_metrics(input, &pnl);
        Self {
            tenant_id,
            period: input.period(),
            pnl,
            metrics,
            data_quality: DataQualityReport::assess(input),
            cached: false,
        }
    }
}

/// Cache for period reports.
///
/// Thread-safe and cheap to clone; clones share the same storage.
#[derive(Clone)]
pub struct PnLCache {
    cache: Cache<CacheKey, Arc<PnLReport>>,
    /// Bumped by every invalidation; a load that straddles a bump is not kept.
    epoch: Arc<AtomicU64>,
}

impl PnLCache {
    /// Creates a cache with default settings.
    ///
    /// Default: 1000 entries max, 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Self {
            cache,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the cached report, if any, with `cached: true`.
    #[must_use]
    pub fn get(&self, tenant_id: TenantId, period: ReportPeriod) -> Option<PnLReport> {
        self.cache.get(&(tenant_id, period)).map(|hit| {
            let mut report = (*hit).clone();
            report.cached = true;
            report
        })
    }

    /// Returns the cached report or loads the period input and computes it.
    ///
    /// Concurrent misses for the same key may both compute; the results are
    /// identical, so the last insert wins harmlessly. If any invalidation runs
    /// while the loader is in flight, the report is returned but not kept, since
    /// the rows it was built from may predate the change.
    ///
    /// # Errors
    ///
    /// Returns the loader's error; nothing is cached in that case.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        tenant_id: TenantId,
        period: ReportPeriod,
        load: F,
    ) -> Result<PnLReport, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PnLInput, E>>,
    {
        if let Some(report) = self.get(tenant_id, period) {
            debug!(tenant_id = %tenant_id, period = %period, "P&L cache hit");
            return Ok(report);
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let input = load().await?;
        let report = PnLReport::compute(tenant_id, &input);

        let key = (tenant_id, period);
        self.cache.insert(key, Arc::new(report.clone()));
        // Checked after the insert so an invalidation racing the insert is
        // still honored.
        if self.epoch.load(Ordering::SeqCst) == epoch {
            debug!(tenant_id = %tenant_id, period = %period, "P&L computed and cached");
        } else {
            self.cache.invalidate(&key);
            debug!(tenant_id = %tenant_id, period = %period, "P&L computed during invalidation, not cached");
        }

        Ok(report)
    }

    /// Cached report for the period, aggregating it on a miss.
    ///
    /// # Errors
    ///
    /// Returns the aggregation error if the period data cannot be gathered.
    pub async fn get_or_fetch(
        &self,
        aggregator: &PeriodAggregator,
        tenant_id: TenantId,
        period: ReportPeriod,
    ) -> Result<PnLReport, AggregationError> {
        self.get_or_compute(tenant_id, period, move || {
            aggregator.fetch_period_data(tenant_id, period)
        })
        .await
    }

    /// Drops one tenant's report for one period.
    pub fn invalidate_period(&self, tenant_id: TenantId, period: ReportPeriod) {
        self.bump_epoch();
        self.cache.invalidate(&(tenant_id, period));
    }

    /// Drops every cached report of a tenant.
    pub fn invalidate_tenant(&self, tenant_id: TenantId) {
        self.invalidate_where(tenant_id, |_| true);
    }

    /// Drops a tenant's reports whose period overlaps `[from, to]`.
    ///
    /// `to = None` means open-ended, e.g. a newly added recurring expense.
    pub fn invalidate_range(&self, tenant_id: TenantId, from: NaiveDate, to: Option<NaiveDate>) {
        self.invalidate_where(tenant_id, move |period| period.overlap(from, to).is_some());
    }

    fn invalidate_where<P>(&self, tenant_id: TenantId, matches: P)
    where
        P: Fn(&ReportPeriod) -> bool + Send + Sync + 'static,
    {
        self.bump_epoch();
        if let Err(e) = self
            .cache
            .invalidate_entries_if(move |(cached_tenant, period), _| {
                *cached_tenant == tenant_id && matches(period)
            })
        {
            warn!(tenant_id = %tenant_id, error = %e, "Predicate invalidation failed, clearing cache");
            self.cache.invalidate_all();
        }
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.bump_epoch();
        self.cache.invalidate_all();
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending maintenance (expirations, invalidations) now.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for PnLCache {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CacheConfig> for PnLCache {
    fn from(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }
}
