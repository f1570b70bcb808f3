use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use shared_types::{
    CreateContactRequest, CreateDealRequest, CreateTaskRequest, UpdateContactRequest,
    UpdateDealRequest, UpdateTaskRequest,
};

use crm_client::settings_store::SettingsStore;
use crm_client::views::{ContactsView, DealsView, SettingsView, TasksView};
use crm_client::{ClientError, CrmApi, HttpCrmApi, Notifier, StderrNotifier};

mod cli;

use cli::{Args, Command, ContactCommands, DealCommands, SettingsCommands, TaskCommands};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Left-aligned columns padded to the widest cell
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let line = |cells: &Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    std::iter::once(&header)
        .chain(std::iter::once(&separator))
        .chain(rows)
        .map(line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn confirm_delete(what: &str) -> anyhow::Result<bool> {
    print!("Are you sure you want to delete this {}? [y/N] ", what);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn id_cell(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "…".to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn run_contacts(view: ContactsView, command: ContactCommands) -> anyhow::Result<()> {
    match command {
        ContactCommands::List => {
            view.refresh().await?;
        }
        ContactCommands::Add { name, email, phone } => {
            let contact = view
                .add_contact(CreateContactRequest {
                    name,
                    email: non_empty(email),
                    phone: non_empty(phone),
                })
                .await?;
            println!("Added contact {}", contact.id);
            return Ok(());
        }
        ContactCommands::Edit {
            id,
            name,
            email,
            phone,
        } => {
            view.refresh().await?;
            let request = UpdateContactRequest {
                name,
                email: email.map(|e| non_empty(Some(e))),
                phone: phone.map(|p| non_empty(Some(p))),
            };
            view.update_contact(id, request).await?;
        }
        ContactCommands::Delete { id, yes } => {
            if !yes && !confirm_delete("contact")? {
                return Ok(());
            }
            view.refresh().await?;
            view.delete_contact(id).await?;
        }
    }

    let rows: Vec<Vec<String>> = view
        .rows()
        .await
        .into_iter()
        .map(|r| vec![id_cell(r.id), r.name, r.email, r.phone])
        .collect();
    println!("{}", render_table(&["ID", "Name", "Email", "Phone"], &rows));
    Ok(())
}

async fn run_deals(view: DealsView, command: DealCommands) -> anyhow::Result<()> {
    match command {
        DealCommands::List => {
            view.refresh().await?;
        }
        DealCommands::Add {
            name,
            value,
            stage,
            contact,
        } => {
            let deal = view
                .add_deal(CreateDealRequest {
                    name,
                    value,
                    stage,
                    contact_id: contact,
                })
                .await?;
            println!("Added deal {}", deal.id);
            return Ok(());
        }
        DealCommands::Edit {
            id,
            name,
            value,
            stage,
            contact,
            no_contact,
        } => {
            view.refresh().await?;
            let contact_id = if no_contact { Some(None) } else { contact.map(Some) };
            let request = UpdateDealRequest {
                name,
                value,
                stage,
                contact_id,
            };
            view.update_deal(id, request).await?;
        }
        DealCommands::Delete { id, yes } => {
            if !yes && !confirm_delete("deal")? {
                return Ok(());
            }
            view.refresh().await?;
            view.delete_deal(id).await?;
        }
    }

    let rows: Vec<Vec<String>> = view
        .rows()
        .await
        .into_iter()
        .map(|r| vec![id_cell(r.id), r.name, r.value, r.stage.to_string(), r.contact])
        .collect();
    println!(
        "{}",
        render_table(&["ID", "Name", "Value", "Stage", "Contact"], &rows)
    );
    Ok(())
}

async fn run_tasks(view: TasksView, command: TaskCommands) -> anyhow::Result<()> {
    match command {
        TaskCommands::List => {
            view.refresh().await?;
        }
        TaskCommands::Add {
            task,
            due,
            status,
            priority,
        } => {
            let task = view
                .add_task(CreateTaskRequest {
                    description: task,
                    status,
                    priority,
                    due_date: due,
                })
                .await?;
            println!("Added task {}", task.id);
            return Ok(());
        }
        TaskCommands::Edit {
            id,
            task,
            due,
            status,
            priority,
        } => {
            view.refresh().await?;
            let request = UpdateTaskRequest {
                description: task,
                status,
                priority,
                due_date: due,
            };
            view.update_task(id, request).await?;
        }
        TaskCommands::Status { id, status } => {
            view.refresh().await?;
            view.change_status(id, status).await?;
        }
        TaskCommands::Delete { id, yes } => {
            if !yes && !confirm_delete("task")? {
                return Ok(());
            }
            view.refresh().await?;
            view.delete_task(id).await?;
        }
    }

    let rows: Vec<Vec<String>> = view
        .rows()
        .await
        .into_iter()
        .map(|r| {
            vec![
                id_cell(r.id),
                r.description,
                r.status.to_string(),
                r.priority.to_string(),
                r.due_date,
            ]
        })
        .collect();
    println!(
        "{}",
        render_table(&["ID", "Task", "Status", "Priority", "Due"], &rows)
    );
    Ok(())
}

async fn run_settings(view: SettingsView, command: SettingsCommands) -> anyhow::Result<()> {
    if let SettingsCommands::Set {
        currency,
        locale,
        date_format,
    } = command
    {
        if let Some(currency) = currency {
            view.set_currency(currency).await?;
        }
        if let Some(locale) = locale {
            view.set_locale(locale).await?;
        }
        if let Some(date_format) = date_format {
            view.set_date_format(date_format).await?;
        }
    }

    let settings = view.settings().await;
    println!("Currency:     {} ({})", settings.currency, settings.currency.name());
    println!("Locale:       {} ({})", settings.locale, settings.locale.name());
    println!("Date format:  {}", settings.date_format.name());
    let (amount, date) = view
        .preview(1234.5, chrono::Local::now().date_naive())
        .await;
    println!("Example:      {}, {}", amount, date);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing();

    let store = match args.settings_path {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::open_default()?,
    };
    let settings = SettingsView::open(store);

    let api: Arc<dyn CrmApi> = Arc::new(HttpCrmApi::new(args.api_url));
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);

    let result = match args.command {
        Command::Contacts(command) => {
            run_contacts(ContactsView::new(api, notifier), command).await
        }
        Command::Deals(command) => {
            let contacts = ContactsView::new(api.clone(), notifier.clone());
            let view = DealsView::new(api, notifier, contacts.list(), settings.shared());
            run_deals(view, command).await
        }
        Command::Tasks(command) => run_tasks(TasksView::new(api, notifier), command).await,
        Command::Settings(command) => run_settings(settings, command).await,
    };

    match result {
        // Already reported by the notifier
        Err(e) if e.downcast_ref::<ClientError>().is_some() => std::process::exit(1),
        other => other,
    }
}
