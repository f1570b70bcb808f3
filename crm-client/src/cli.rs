use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shared_types::de::parse_due_date;
use shared_types::{Currency, DateFormat, DealStage, Locale, TaskPriority, TaskStatus};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal front-end for the CRM API", long_about = None)]
pub struct Args {
    /// Base URL of the CRM API
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub api_url: String,

    /// Display settings file (defaults to the local data directory)
    #[arg(long)]
    pub settings_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage contacts
    #[command(subcommand)]
    Contacts(ContactCommands),
    /// Manage the deal pipeline
    #[command(subcommand)]
    Deals(DealCommands),
    /// Manage tasks
    #[command(subcommand)]
    Tasks(TaskCommands),
    /// Show or change display settings
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change a contact. An empty `--email`/`--phone` clears it.
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DealCommands {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        value: f64,
        /// Lead, "Proposal Sent", Negotiation, "Closed Won" or "Closed Lost"
        #[arg(long, default_value = "Lead")]
        stage: DealStage,
        /// Contact ID
        #[arg(long)]
        contact: Option<i64>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        value: Option<f64>,
        #[arg(long)]
        stage: Option<DealStage>,
        #[arg(long, conflicts_with = "no_contact")]
        contact: Option<i64>,
        /// Unassign the contact
        #[arg(long)]
        no_contact: bool,
    },
    Delete {
        id: i64,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    List,
    Add {
        /// What needs doing
        #[arg(long)]
        task: String,
        /// YYYY-MM-DD
        #[arg(long, value_parser = parse_due_date)]
        due: NaiveDate,
        #[arg(long, default_value = "To Do")]
        status: TaskStatus,
        #[arg(long, default_value = "Medium")]
        priority: TaskPriority,
    },
    Edit {
        id: i64,
        #[arg(long)]
        task: Option<String>,
        #[arg(long, value_parser = parse_due_date)]
        due: Option<NaiveDate>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        priority: Option<TaskPriority>,
    },
    /// Move a task to another status
    Status { id: i64, status: TaskStatus },
    Delete {
        id: i64,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    Show,
    Set {
        /// EUR, USD or GBP
        #[arg(long)]
        currency: Option<Currency>,
        /// de-DE, en-US or en-GB
        #[arg(long)]
        locale: Option<Locale>,
        /// dd/MM/yyyy, MM/dd/yyyy or yyyy-MM-dd
        #[arg(long)]
        date_format: Option<DateFormat>,
    },
}
