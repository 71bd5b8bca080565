//! The provider boundary callers program against.
//!
//! [`DataProvider`] names every list, get and mutation operation across the
//! domains. [`JsonProvider`] serves them from cached JSON collections;
//! [`ApiProvider`] stands in for a remote backend and fails every call with
//! [`StoreError::NotConfigured`]. [`provider_from_config`] picks one.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use finq_seeker::Page;
use serde_json::Value as Json;
use tracing::{info, warn};

use crate::config::{ProviderKind, StoreConfig};
use crate::domains::audit::{AuditEntry, AuditFilter, NewAuditEntry};
use crate::domains::close::{CloseTask, CloseTaskFilter};
use crate::domains::collections::{CollectionAccount, CollectionAccountFilter};
use crate::domains::igrs::{IgrsCase, IgrsCaseFilter};
use crate::domains::payments::{Payment, PaymentFilter};
use crate::domains::reconciliation::{Reconciliation, ReconciliationFilter};
use crate::domains::revenue::{RevenueCase, RevenueCaseFilter};
use crate::error::{Result, StoreError};
use crate::repository::Repository;
use crate::source::{DataSource, FileSource};

/// Every query and mutation the application performs.
///
/// Lookups return `Ok(None)` for unknown ids and deletes return `Ok(false)`.
pub trait DataProvider: Send + Sync {
    fn list_igrs_cases(&self, filter: &IgrsCaseFilter) -> Result<Page<IgrsCase>>;
    fn get_igrs_case(&self, id: &str) -> Result<Option<IgrsCase>>;
    fn create_igrs_case(&self, fields: &Json) -> Result<IgrsCase>;
    fn update_igrs_case(&self, id: &str, fields: &Json) -> Result<Option<IgrsCase>>;
    fn delete_igrs_case(&self, id: &str) -> Result<bool>;

    fn list_revenue_cases(&self, filter: &RevenueCaseFilter) -> Result<Page<RevenueCase>>;
    fn get_revenue_case(&self, id: &str) -> Result<Option<RevenueCase>>;
    fn create_revenue_case(&self, fields: &Json) -> Result<RevenueCase>;
    fn update_revenue_case(&self, id: &str, fields: &Json) -> Result<Option<RevenueCase>>;
    fn delete_revenue_case(&self, id: &str) -> Result<bool>;

    fn list_payments(&self, filter: &PaymentFilter) -> Result<Page<Payment>>;
    fn get_payment(&self, id: &str) -> Result<Option<Payment>>;
    fn update_payment(&self, id: &str, fields: &Json) -> Result<Option<Payment>>;

    fn list_close_tasks(&self, filter: &CloseTaskFilter) -> Result<Page<CloseTask>>;
    fn get_close_task(&self, id: &str) -> Result<Option<CloseTask>>;
    fn create_close_task(&self, fields: &Json) -> Result<CloseTask>;
    fn update_close_task(&self, id: &str, fields: &Json) -> Result<Option<CloseTask>>;
    fn delete_close_task(&self, id: &str) -> Result<bool>;

    fn list_reconciliations(&self, filter: &ReconciliationFilter) -> Result<Page<Reconciliation>>;
    fn get_reconciliation(&self, id: &str) -> Result<Option<Reconciliation>>;
    fn update_reconciliation(&self, id: &str, fields: &Json) -> Result<Option<Reconciliation>>;

    fn list_audit_entries(&self, filter: &AuditFilter) -> Result<Page<AuditEntry>>;
    fn get_audit_entry(&self, id: &str) -> Result<Option<AuditEntry>>;
    fn append_audit_entry(&self, entry: NewAuditEntry) -> Result<AuditEntry>;

    fn list_collection_accounts(
        &self,
        filter: &CollectionAccountFilter,
    ) -> Result<Page<CollectionAccount>>;
    fn get_collection_account(&self, id: &str) -> Result<Option<CollectionAccount>>;
    fn update_collection_account(
        &self,
        id: &str,
        fields: &Json,
    ) -> Result<Option<CollectionAccount>>;
}

/// Serves every domain from JSON documents held in memory.
#[derive(Debug)]
pub struct JsonProvider {
    igrs_cases: Repository<IgrsCase>,
    revenue_cases: Repository<RevenueCase>,
    payments: Repository<Payment>,
    close_tasks: Repository<CloseTask>,
    reconciliations: Repository<Reconciliation>,
    audit_entries: Repository<AuditEntry>,
    collection_accounts: Repository<CollectionAccount>,
}

impl JsonProvider {
    /// One repository per domain, all reading from `source`. Nothing is
    /// loaded until first use.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            igrs_cases: Repository::new(Arc::clone(&source)),
            revenue_cases: Repository::new(Arc::clone(&source)),
            payments: Repository::new(Arc::clone(&source)),
            close_tasks: Repository::new(Arc::clone(&source)),
            reconciliations: Repository::new(Arc::clone(&source)),
            audit_entries: Repository::new(Arc::clone(&source)),
            collection_accounts: Repository::new(source),
        }
    }

    /// Reads the data files under `root`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileSource::new(root)))
    }

    pub fn igrs_cases(&self) -> &Repository<IgrsCase> {
        &self.igrs_cases
    }

    pub fn revenue_cases(&self) -> &Repository<RevenueCase> {
        &self.revenue_cases
    }

    pub fn payments(&self) -> &Repository<Payment> {
        &self.payments
    }

    pub fn close_tasks(&self) -> &Repository<CloseTask> {
        &self.close_tasks
    }

    pub fn reconciliations(&self) -> &Repository<Reconciliation> {
        &self.reconciliations
    }

    pub fn audit_entries(&self) -> &Repository<AuditEntry> {
        &self.audit_entries
    }

    pub fn collection_accounts(&self) -> &Repository<CollectionAccount> {
        &self.collection_accounts
    }

    /// Drops every cached collection, discarding in-memory changes.
    pub fn reset(&self) {
        self.igrs_cases.reset();
        self.revenue_cases.reset();
        self.payments.reset();
        self.close_tasks.reset();
        self.reconciliations.reset();
        self.audit_entries.reset();
        self.collection_accounts.reset();
        info!("all collections reset");
    }
}

impl DataProvider for JsonProvider {
    fn list_igrs_cases(&self, filter: &IgrsCaseFilter) -> Result<Page<IgrsCase>> {
        self.igrs_cases.query(filter)
    }

    fn get_igrs_case(&self, id: &str) -> Result<Option<IgrsCase>> {
        self.igrs_cases.get(id)
    }

    fn create_igrs_case(&self, fields: &Json) -> Result<IgrsCase> {
        self.igrs_cases.create(fields)
    }

    fn update_igrs_case(&self, id: &str, fields: &Json) -> Result<Option<IgrsCase>> {
        self.igrs_cases.update(id, fields)
    }

    fn delete_igrs_case(&self, id: &str) -> Result<bool> {
        self.igrs_cases.delete(id)
    }

    fn list_revenue_cases(&self, filter: &RevenueCaseFilter) -> Result<Page<RevenueCase>> {
        self.revenue_cases.query(filter)
    }

    fn get_revenue_case(&self, id: &str) -> Result<Option<RevenueCase>> {
        self.revenue_cases.get(id)
    }

    fn create_revenue_case(&self, fields: &Json) -> Result<RevenueCase> {
        self.revenue_cases.create(fields)
    }

    fn update_revenue_case(&self, id: &str, fields: &Json) -> Result<Option<RevenueCase>> {
        self.revenue_cases.update(id, fields)
    }

    fn delete_revenue_case(&self, id: &str) -> Result<bool> {
        self.revenue_cases.delete(id)
    }

    fn list_payments(&self, filter: &PaymentFilter) -> Result<Page<Payment>> {
        self.payments.query(filter)
    }

    fn get_payment(&self, id: &str) -> Result<Option<Payment>> {
        self.payments.get(id)
    }

    fn update_payment(&self, id: &str, fields: &Json) -> Result<Option<Payment>> {
        self.payments.update(id, fields)
    }

    fn list_close_tasks(&self, filter: &CloseTaskFilter) -> Result<Page<CloseTask>> {
        self.close_tasks.query(filter)
    }

    fn get_close_task(&self, id: &str) -> Result<Option<CloseTask>> {
        self.close_tasks.get(id)
    }

    fn create_close_task(&self, fields: &Json) -> Result<CloseTask> {
        self.close_tasks.create(fields)
    }

    fn update_close_task(&self, id: &str, fields: &Json) -> Result<Option<CloseTask>> {
        self.close_tasks.update(id, fields)
    }

    fn delete_close_task(&self, id: &str) -> Result<bool> {
        self.close_tasks.delete(id)
    }

    fn list_reconciliations(&self, filter: &ReconciliationFilter) -> Result<Page<Reconciliation>> {
        self.reconciliations.query(filter)
    }

    fn get_reconciliation(&self, id: &str) -> Result<Option<Reconciliation>> {
        self.reconciliations.get(id)
    }

    fn update_reconciliation(&self, id: &str, fields: &Json) -> Result<Option<Reconciliation>> {
        self.reconciliations.update(id, fields)
    }

    fn list_audit_entries(&self, filter: &AuditFilter) -> Result<Page<AuditEntry>> {
        self.audit_entries.query(filter)
    }

    fn get_audit_entry(&self, id: &str) -> Result<Option<AuditEntry>> {
        self.audit_entries.get(id)
    }

    fn append_audit_entry(&self, entry: NewAuditEntry) -> Result<AuditEntry> {
        self.audit_entries.append(entry.into_entry(Utc::now()))
    }

    fn list_collection_accounts(
        &self,
        filter: &CollectionAccountFilter,
    ) -> Result<Page<CollectionAccount>> {
        self.collection_accounts.query(filter)
    }

    fn get_collection_account(&self, id: &str) -> Result<Option<CollectionAccount>> {
        self.collection_accounts.get(id)
    }

    fn update_collection_account(
        &self,
        id: &str,
        fields: &Json,
    ) -> Result<Option<CollectionAccount>> {
        self.collection_accounts.update(id, fields)
    }
}

/// Placeholder for a remote backend. Every operation fails with
/// [`StoreError::NotConfigured`].
#[derive(Debug, Clone, Default)]
pub struct ApiProvider {
    base_url: Option<String>,
}

impl ApiProvider {
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn unavailable<T>(&self) -> Result<T> {
        Err(StoreError::NotConfigured)
    }
}

impl DataProvider for ApiProvider {
    fn list_igrs_cases(&self, _filter: &IgrsCaseFilter) -> Result<Page<IgrsCase>> {
        self.unavailable()
    }

    fn get_igrs_case(&self, _id: &str) -> Result<Option<IgrsCase>> {
        self.unavailable()
    }

    fn create_igrs_case(&self, _fields: &Json) -> Result<IgrsCase> {
        self.unavailable()
    }

    fn update_igrs_case(&self, _id: &str, _fields: &Json) -> Result<Option<IgrsCase>> {
        self.unavailable()
    }

    fn delete_igrs_case(&self, _id: &str) -> Result<bool> {
        self.unavailable()
    }

    fn list_revenue_cases(&self, _filter: &RevenueCaseFilter) -> Result<Page<RevenueCase>> {
        self.unavailable()
    }

    fn get_revenue_case(&self, _id: &str) -> Result<Option<RevenueCase>> {
        self.unavailable()
    }

    fn create_revenue_case(&self, _fields: &Json) -> Result<RevenueCase> {
        self.unavailable()
    }

    fn update_revenue_case(&self, _id: &str, _fields: &Json) -> Result<Option<RevenueCase>> {
        self.unavailable()
    }

    fn delete_revenue_case(&self, _id: &str) -> Result<bool> {
        self.unavailable()
    }

    fn list_payments(&self, _filter: &PaymentFilter) -> Result<Page<Payment>> {
        self.unavailable()
    }

    fn get_payment(&self, _id: &str) -> Result<Option<Payment>> {
        self.unavailable()
    }

    fn update_payment(&self, _id: &str, _fields: &Json) -> Result<Option<Payment>> {
        self.unavailable()
    }

    fn list_close_tasks(&self, _filter: &CloseTaskFilter) -> Result<Page<CloseTask>> {
        self.unavailable()
    }

    fn get_close_task(&self, _id: &str) -> Result<Option<CloseTask>> {
        self.unavailable()
    }

    fn create_close_task(&self, _fields: &Json) -> Result<CloseTask> {
        self.unavailable()
    }

    fn update_close_task(&self, _id: &str, _fields: &Json) -> Result<Option<CloseTask>> {
        self.unavailable()
    }

    fn delete_close_task(&self, _id: &str) -> Result<bool> {
        self.unavailable()
    }

    fn list_reconciliations(&self, _filter: &ReconciliationFilter) -> Result<Page<Reconciliation>> {
        self.unavailable()
    }

    fn get_reconciliation(&self, _id: &str) -> Result<Option<Reconciliation>> {
        self.unavailable()
    }

    fn update_reconciliation(&self, _id: &str, _fields: &Json) -> Result<Option<Reconciliation>> {
        self.unavailable()
    }

    fn list_audit_entries(&self, _filter: &AuditFilter) -> Result<Page<AuditEntry>> {
        self.unavailable()
    }

    fn get_audit_entry(&self, _id: &str) -> Result<Option<AuditEntry>> {
        self.unavailable()
    }

    fn append_audit_entry(&self, _entry: NewAuditEntry) -> Result<AuditEntry> {
        self.unavailable()
    }

    fn list_collection_accounts(
        &self,
        _filter: &CollectionAccountFilter,
    ) -> Result<Page<CollectionAccount>> {
        self.unavailable()
    }

    fn get_collection_account(&self, _id: &str) -> Result<Option<CollectionAccount>> {
        self.unavailable()
    }

    fn update_collection_account(
        &self,
        _id: &str,
        _fields: &Json,
    ) -> Result<Option<CollectionAccount>> {
        self.unavailable()
    }
}

/// Builds the provider `config` selects.
pub fn provider_from_config(config: &StoreConfig) -> Box<dyn DataProvider> {
    match config.provider {
        ProviderKind::Json => {
            info!(root = %config.data_root.display(), "using JSON data provider");
            Box::new(JsonProvider::from_root(config.data_root.clone()))
        }
        ProviderKind::Api => {
            warn!(
                url = config.api_url.as_deref().unwrap_or("<unset>"),
                "API data provider selected; every call will fail until a backend exists"
            );
            Box::new(ApiProvider::new(config.api_url.clone()))
        }
    }
}
