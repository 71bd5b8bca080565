//! Command execution against a [`DataProvider`].

use anyhow::{bail, Context, Result};
use finq_store::domains::audit::AuditFilter;
use finq_store::domains::close::CloseTaskFilter;
use finq_store::domains::collections::CollectionAccountFilter;
use finq_store::domains::igrs::IgrsCaseFilter;
use finq_store::domains::payments::PaymentFilter;
use finq_store::domains::reconciliation::ReconciliationFilter;
use finq_store::domains::revenue::RevenueCaseFilter;
use finq_store::{provider_from_config, DataProvider, StoreConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value as Json};
use tracing::debug;

use crate::cli::{Cli, Command, Domain};

/// What a command produced.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// JSON for stdout.
    Output(Json),
    /// Message for stderr; the process exits unsuccessfully.
    NotFound(String),
}

/// Options of `finq list` other than the domain.
#[derive(Debug, Default)]
pub struct ListArgs<'a> {
    pub search: Option<&'a str>,
    pub filters: Option<&'a str>,
    pub sort: Option<&'a str>,
    pub desc: bool,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

pub fn run(cli: &Cli) -> Result<Outcome> {
    let config = resolve_config(cli)?;
    debug!(provider = %config.provider, root = %config.data_root.display(), "resolved configuration");
    let provider = provider_from_config(&config);
    execute(provider.as_ref(), &cli.command)
}

fn resolve_config(cli: &Cli) -> Result<StoreConfig> {
    let mut config = StoreConfig::from_env().context("failed to read configuration")?;
    if let Some(root) = &cli.data_root {
        config = config.with_data_root(root.clone());
    }
    if let Some(provider) = cli.provider {
        config = config.with_provider(provider.into());
    }
    Ok(config)
}

pub fn execute(provider: &dyn DataProvider, command: &Command) -> Result<Outcome> {
    match command {
        Command::List {
            domain,
            search,
            filters,
            sort,
            desc,
            page,
            page_size,
        } => {
            let args = ListArgs {
                search: search.as_deref(),
                filters: filters.as_deref(),
                sort: sort.as_deref(),
                desc: *desc,
                page: *page,
                page_size: *page_size,
            };
            let query = list_query(&args)?;
            list(provider, *domain, query)
                .with_context(|| format!("failed to list {domain}"))
                .map(Outcome::Output)
        }
        Command::Get { domain, id } => {
            let record = get(provider, *domain, id)
                .with_context(|| format!("failed to read {domain} record '{id}'"))?;
            Ok(found_or(record, *domain, id))
        }
        Command::Update { domain, id, patch } => {
            let patch: Json = serde_json::from_str(patch).context("patch is not valid JSON")?;
            let record = update(provider, *domain, id, &patch)
                .with_context(|| format!("failed to update {domain} record '{id}'"))?;
            Ok(found_or(record, *domain, id))
        }
        Command::Delete { domain, id } => {
            let deleted = delete(provider, *domain, id)
                .with_context(|| format!("failed to delete {domain} record '{id}'"))?;
            Ok(if deleted {
                Outcome::Output(json!({ "deleted": id }))
            } else {
                not_found(*domain, id)
            })
        }
    }
}

/// Merges the `--filters` object with the dedicated flags; flags win.
pub fn list_query(args: &ListArgs<'_>) -> Result<Json> {
    let mut fields = match args.filters {
        Some(raw) => match serde_json::from_str(raw).context("--filters is not valid JSON")? {
            Json::Object(fields) => fields,
            _ => bail!("--filters must be a JSON object"),
        },
        None => Map::new(),
    };

    if let Some(search) = args.search {
        fields.insert("search".into(), json!(search));
    }
    if let Some(sort) = args.sort {
        fields.insert("sortBy".into(), json!(sort));
    }
    if args.desc {
        fields.insert("sortDir".into(), json!("desc"));
    }
    if let Some(page) = args.page {
        fields.insert("page".into(), json!(page));
    }
    if let Some(size) = args.page_size {
        fields.insert("pageSize".into(), json!(size));
    }
    Ok(Json::Object(fields))
}

fn list(provider: &dyn DataProvider, domain: Domain, query: Json) -> Result<Json> {
    match domain {
        Domain::Igrs => to_json(provider.list_igrs_cases(&filter::<IgrsCaseFilter>(query)?)?),
        Domain::Revenue => to_json(provider.list_revenue_cases(&filter::<RevenueCaseFilter>(query)?)?),
        Domain::Payments => to_json(provider.list_payments(&filter::<PaymentFilter>(query)?)?),
        Domain::Close => to_json(provider.list_close_tasks(&filter::<CloseTaskFilter>(query)?)?),
        Domain::Reconciliations => {
            to_json(provider.list_reconciliations(&filter::<ReconciliationFilter>(query)?)?)
        }
        Domain::Audit => to_json(provider.list_audit_entries(&filter::<AuditFilter>(query)?)?),
        Domain::Collections => to_json(
            provider.list_collection_accounts(&filter::<CollectionAccountFilter>(query)?)?,
        ),
    }
}

fn get(provider: &dyn DataProvider, domain: Domain, id: &str) -> Result<Option<Json>> {
    match domain {
        Domain::Igrs => opt_json(provider.get_igrs_case(id)?),
        Domain::Revenue => opt_json(provider.get_revenue_case(id)?),
        Domain::Payments => opt_json(provider.get_payment(id)?),
        Domain::Close => opt_json(provider.get_close_task(id)?),
        Domain::Reconciliations => opt_json(provider.get_reconciliation(id)?),
        Domain::Audit => opt_json(provider.get_audit_entry(id)?),
        Domain::Collections => opt_json(provider.get_collection_account(id)?),
    }
}

fn update(provider: &dyn DataProvider, domain: Domain, id: &str, patch: &Json) -> Result<Option<Json>> {
    match domain {
        Domain::Igrs => opt_json(provider.update_igrs_case(id, patch)?),
        Domain::Revenue => opt_json(provider.update_revenue_case(id, patch)?),
        Domain::Payments => opt_json(provider.update_payment(id, patch)?),
        Domain::Close => opt_json(provider.update_close_task(id, patch)?),
        Domain::Reconciliations => opt_json(provider.update_reconciliation(id, patch)?),
        Domain::Collections => opt_json(provider.update_collection_account(id, patch)?),
        Domain::Audit => bail!("audit entries are append-only"),
    }
}

fn delete(provider: &dyn DataProvider, domain: Domain, id: &str) -> Result<bool> {
    let deleted = match domain {
        Domain::Igrs => provider.delete_igrs_case(id)?,
        Domain::Revenue => provider.delete_revenue_case(id)?,
        Domain::Close => provider.delete_close_task(id)?,
        Domain::Payments | Domain::Reconciliations | Domain::Audit | Domain::Collections => {
            bail!("{domain} records cannot be deleted")
        }
    };
    Ok(deleted)
}

/// Decodes a domain filter, rejecting keys the filter does not define.
fn filter<F: DeserializeOwned + Serialize + Default>(query: Json) -> Result<F> {
    // A default filter serializes every key it accepts.
    if let (Json::Object(known), Json::Object(given)) = (to_json(F::default())?, &query) {
        let unknown: Vec<&str> = given
            .keys()
            .filter(|key| !known.contains_key(key.as_str()))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            bail!("unknown filter field(s): {}", unknown.join(", "));
        }
    }
    serde_json::from_value(query).context("invalid filters")
}

fn to_json<T: Serialize>(value: T) -> Result<Json> {
    serde_json::to_value(value).context("failed to serialize output")
}

fn opt_json<T: Serialize>(value: Option<T>) -> Result<Option<Json>> {
    value.map(to_json).transpose()
}

fn found_or(record: Option<Json>, domain: Domain, id: &str) -> Outcome {
    match record {
        Some(json) => Outcome::Output(json),
        None => not_found(domain, id),
    }
}

fn not_found(domain: Domain, id: &str) -> Outcome {
    Outcome::NotFound(format!("{domain} record '{id}' not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use finq_store::{ApiProvider, JsonProvider, StaticSource};

    fn provider() -> JsonProvider {
        let source = StaticSource::new().with(
            "/data/close/tasks.json",
            json!([
                {
                    "id": "TASK-1", "title": "Accrue payroll", "category": "Payroll",
                    "status": "Not Started", "priority": "High", "assignee": "Lee",
                    "dueDate": "2024-02-02T00:00:00Z",
                    "createdAt": "2024-01-20T00:00:00Z", "updatedAt": "2024-01-20T00:00:00Z"
                },
                {
                    "id": "TASK-2", "title": "Bank reconciliation", "category": "Cash",
                    "status": "Completed", "priority": "Medium", "assignee": "Ana",
                    "dueDate": "2024-02-01T00:00:00Z",
                    "createdAt": "2024-01-20T00:00:00Z", "updatedAt": "2024-01-20T00:00:00Z"
                }
            ])
            .to_string(),
        );
        JsonProvider::new(Arc::new(source))
    }

    fn list_cmd(filters: Option<&str>) -> Command {
        Command::List {
            domain: Domain::Close,
            search: None,
            filters: filters.map(str::to_string),
            sort: None,
            desc: false,
            page: None,
            page_size: None,
        }
    }

    #[test]
    fn flags_override_filter_json() {
        let query = list_query(&ListArgs {
            filters: Some(r#"{"status":["Open"],"search":"old"}"#),
            search: Some("new"),
            sort: Some("dueDate"),
            desc: true,
            page_size: Some(5),
            ..ListArgs::default()
        })
        .unwrap();
        assert_eq!(
            query,
            json!({
                "status": ["Open"],
                "search": "new",
                "sortBy": "dueDate",
                "sortDir": "desc",
                "pageSize": 5
            })
        );
    }

    #[test]
    fn filters_must_be_an_object() {
        let err = list_query(&ListArgs {
            filters: Some("[1]"),
            ..ListArgs::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn list_applies_domain_filters() {
        let outcome = execute(&provider(), &list_cmd(Some(r#"{"assignee":["Lee"]}"#))).unwrap();
        let Outcome::Output(page) = outcome else {
            panic!("expected output");
        };
        assert_eq!(page["total"], 1);
        assert_eq!(page["data"][0]["id"], "TASK-1");
    }

    #[test]
    fn misspelled_filter_keys_are_rejected() {
        let err = execute(&provider(), &list_cmd(Some(r#"{"stauts":["Open"],"assignee":["Lee"]}"#)))
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to list close"));
        assert!(message.contains("unknown filter field(s): stauts"));
    }

    #[test]
    fn paging_keys_are_accepted_in_filter_json() {
        let outcome = execute(
            &provider(),
            &list_cmd(Some(r#"{"sortBy":"title","sortDir":"desc","pageSize":1,"overdue":false}"#)),
        )
        .unwrap();
        let Outcome::Output(page) = outcome else {
            panic!("expected output");
        };
        assert_eq!(page["data"][0]["id"], "TASK-2");
        assert_eq!(page["totalPages"], 2);
    }

    #[test]
    fn get_missing_record_is_not_found() {
        let outcome = execute(
            &provider(),
            &Command::Get {
                domain: Domain::Close,
                id: "TASK-9".into(),
            },
        )
        .unwrap();
        assert_eq!(
            outcome,
            Outcome::NotFound("close record 'TASK-9' not found".into())
        );
    }

    #[test]
    fn delete_then_get() {
        let provider = provider();
        let deleted = execute(
            &provider,
            &Command::Delete {
                domain: Domain::Close,
                id: "TASK-2".into(),
            },
        )
        .unwrap();
        assert_eq!(deleted, Outcome::Output(json!({ "deleted": "TASK-2" })));
        assert!(provider.get_close_task("TASK-2").unwrap().is_none());
    }

    #[test]
    fn unsupported_mutations_are_errors() {
        let err = execute(
            &provider(),
            &Command::Delete {
                domain: Domain::Payments,
                id: "PAY-1".into(),
            },
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("payments records cannot be deleted"));
    }

    #[test]
    fn api_provider_errors_carry_context() {
        let err = execute(&ApiProvider::default(), &list_cmd(None)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to list close"));
        assert!(message.contains("API provider not configured"));
    }
}
