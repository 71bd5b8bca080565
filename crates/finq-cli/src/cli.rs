//! Command-line surface.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use finq_store::ProviderKind;

#[derive(Debug, Parser)]
#[command(name = "finq", version, about = "Query and edit finance-ops record collections")]
pub struct Cli {
    /// Directory containing the data/ tree [env: FINQ_DATA_ROOT]
    #[arg(long, global = true, value_name = "DIR")]
    pub data_root: Option<PathBuf>,

    /// Backend to read from [env: FINQ_DATA_PROVIDER]
    #[arg(long, global = true, value_enum)]
    pub provider: Option<ProviderArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter, sort and page through a domain's records
    List {
        #[arg(value_enum)]
        domain: Domain,

        /// Case-insensitive text search
        #[arg(long, short)]
        search: Option<String>,

        /// Domain filter as a JSON object, e.g. '{"status":["Open"]}'
        #[arg(long, short, value_name = "JSON")]
        filters: Option<String>,

        /// Field to sort by (camelCase, as in the JSON output)
        #[arg(long, value_name = "FIELD")]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// 1-based page number
        #[arg(long)]
        page: Option<usize>,

        /// Records per page
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show one record
    Get {
        #[arg(value_enum)]
        domain: Domain,
        id: String,
    },

    /// Merge a JSON object into a record (in memory only)
    Update {
        #[arg(value_enum)]
        domain: Domain,
        id: String,
        /// Fields to change, as a JSON object
        patch: String,
    },

    /// Remove a record (in memory only)
    Delete {
        #[arg(value_enum)]
        domain: Domain,
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Domain {
    /// IGRS cases
    Igrs,
    /// Revenue-assurance cases
    Revenue,
    /// Cash-application payments
    Payments,
    /// Close checklist tasks
    Close,
    /// Account reconciliations
    Reconciliations,
    /// Audit log entries
    Audit,
    /// Collections accounts
    Collections,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Igrs => "igrs",
            Domain::Revenue => "revenue",
            Domain::Payments => "payments",
            Domain::Close => "close",
            Domain::Reconciliations => "reconciliations",
            Domain::Audit => "audit",
            Domain::Collections => "collections",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Json,
    Api,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Json => ProviderKind::Json,
            ProviderArg::Api => ProviderKind::Api,
        }
    }
}
