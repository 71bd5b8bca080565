//! # finq-store - record collections for finance-ops workspaces
//!
//! This crate holds the data layer behind the finq domains: IGRS cases,
//! revenue-assurance cases, cash-application payments, close tasks,
//! reconciliations, the audit log and collections accounts.
//!
//! Each domain's records live in a [`Collection`]: loaded lazily from a
//! [`DataSource`] on first access, cached in memory, mutated in place and
//! never written back. A [`Repository`] adds queries (through
//! [`finq_seeker`]) and create/update/delete on top, and a
//! [`DataProvider`] gathers every domain's operations behind one trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use finq_store::domains::payments::PaymentFilter;
//! use finq_store::{DataProvider, JsonProvider, StaticSource};
//!
//! let source = StaticSource::new().with(
//!     "/data/cash-application/payments.json",
//!     r#"[{
//!         "id": "PAY-1", "reference": "WIRE-881", "customerName": "Acme Corp",
//!         "amount": 1250, "method": "Wire", "status": "Exception",
//!         "receivedAt": "2024-06-03T10:00:00Z", "updatedAt": "2024-06-03T10:00:00Z"
//!     }]"#,
//! );
//! let provider = JsonProvider::new(Arc::new(source));
//!
//! let filter = PaymentFilter {
//!     status: vec!["Exception".into()],
//!     ..PaymentFilter::default()
//! };
//! let page = provider.list_payments(&filter).unwrap();
//! assert_eq!(page.total, 1);
//! assert_eq!(page.data[0].customer_name, "Acme Corp");
//! ```
//!
//! ## Configuration
//!
//! [`StoreConfig::from_env`] reads `FINQ_DATA_PROVIDER`, `FINQ_DATA_ROOT` and
//! `FINQ_API_URL`; [`provider_from_config`] turns the result into a boxed
//! provider.

mod collection;
mod config;
mod env;
mod error;
mod provider;
mod record;
mod repository;
mod source;

pub mod domains;
pub mod logging;

pub use collection::Collection;
pub use config::{ProviderKind, StoreConfig, API_URL_VAR, DATA_ROOT_VAR, PROVIDER_VAR};
pub use env::{EnvReader, MockEnv, RealEnv};
pub use error::{Result, StoreError};
pub use provider::{provider_from_config, ApiProvider, DataProvider, JsonProvider};
pub use record::{merge, new_id, ListOptions, Record, RecordFilter};
pub use repository::Repository;
pub use source::{DataSource, FileSource, StaticSource};

pub use finq_seeker::{Dir, OrderBy, Page};
