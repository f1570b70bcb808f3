#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use crm_client::api::{ApiResult, CrmApi};
use crm_client::{ClientError, Notifier};
use reqwest::StatusCode;
use shared_types::{
    Contact, CreateContactRequest, CreateDealRequest, CreateTaskRequest, Deal, DealStage, Task,
    TaskPriority, TaskStatus, UpdateContactRequest, UpdateDealRequest, UpdateTaskRequest,
};
use tokio::sync::{Notify, Semaphore};

/// In-process API. Mutations can be held open with [`FakeApi::hold_mutations`]
/// so tests can look at a view while its request is in flight.
pub struct FakeApi {
    pub contacts: Mutex<Vec<Contact>>,
    pub deals: Mutex<Vec<Deal>>,
    pub tasks: Mutex<Vec<Task>>,
    pub mutations: AtomicUsize,
    pub entered: Notify,
    next_id: AtomicI64,
    failure: Mutex<Option<(StatusCode, Option<String>)>>,
    held: AtomicBool,
    gate: Semaphore,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            contacts: Mutex::new(Vec::new()),
            deals: Mutex::new(Vec::new()),
            tasks: Mutex::new(Vec::new()),
            mutations: AtomicUsize::new(0),
            entered: Notify::new(),
            next_id: AtomicI64::new(100),
            failure: Mutex::new(None),
            held: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }

    pub fn with_contacts(self, contacts: Vec<Contact>) -> Self {
        *self.contacts.lock().unwrap() = contacts;
        self
    }

    pub fn with_deals(self, deals: Vec<Deal>) -> Self {
        *self.deals.lock().unwrap() = deals;
        self
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        *self.tasks.lock().unwrap() = tasks;
        self
    }

    /// Every following mutation answers with this status
    pub fn fail_with(&self, status: StatusCode, message: Option<&str>) {
        *self.failure.lock().unwrap() = Some((status, message.map(str::to_string)));
    }

    pub fn hold_mutations(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    async fn mutation(&self) -> ApiResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if self.held.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.gate.acquire().await.expect("gate closed").forget();
        }

        let failure = self.failure.lock().unwrap().clone();
        match failure {
            Some((status, message)) => Err(ClientError::Http { status, message }),
            None => Ok(()),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn missing(entity: &str, action: &str) -> ClientError {
        ClientError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some(format!("Error {} {}", action, entity)),
        }
    }

    fn embed_contact(&self, deal: &mut Deal) {
        let contacts = self.contacts.lock().unwrap();
        deal.contact = deal
            .contact_id
            .and_then(|id| contacts.iter().find(|c| c.id == id).cloned());
    }
}

#[async_trait]
impl CrmApi for FakeApi {
    async fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        Ok(self.contacts.lock().unwrap().clone())
    }

    async fn create_contact(&self, request: &CreateContactRequest) -> ApiResult<Contact> {
        self.mutation().await?;
        let contact = Contact {
            id: self.next_id(),
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            created_at: 1_800_000_000,
        };
        self.contacts.lock().unwrap().insert(0, contact.clone());
        Ok(contact)
    }

    async fn update_contact(&self, id: i64, request: &UpdateContactRequest) -> ApiResult<Contact> {
        self.mutation().await?;
        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::missing("contact", "updating"))?;
        request.apply_to(contact);
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: i64) -> ApiResult<()> {
        self.mutation().await?;
        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        if contacts.len() == before {
            return Err(Self::missing("contact", "deleting"));
        }
        Ok(())
    }

    async fn list_deals(&self) -> ApiResult<Vec<Deal>> {
        Ok(self.deals.lock().unwrap().clone())
    }

    async fn create_deal(&self, request: &CreateDealRequest) -> ApiResult<Deal> {
        self.mutation().await?;
        let mut deal = Deal {
            id: self.next_id(),
            name: request.name.clone(),
            value: request.value,
            stage: request.stage,
            contact_id: request.contact_id,
            contact: None,
            created_at: 1_800_000_000,
        };
        self.embed_contact(&mut deal);
        self.deals.lock().unwrap().insert(0, deal.clone());
        Ok(deal)
    }

    async fn update_deal(&self, id: i64, request: &UpdateDealRequest) -> ApiResult<Deal> {
        self.mutation().await?;
        let mut deal = {
            let mut deals = self.deals.lock().unwrap();
            let deal = deals
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| Self::missing("deal", "updating"))?;
            request.apply_to(deal);
            deal.clone()
        };
        self.embed_contact(&mut deal);
        Ok(deal)
    }

    async fn delete_deal(&self, id: i64) -> ApiResult<Deal> {
        self.mutation().await?;
        let mut deals = self.deals.lock().unwrap();
        let index = deals
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| Self::missing("deal", "deleting"))?;
        Ok(deals.remove(index))
    }

    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<Task> {
        self.mutation().await?;
        let task = Task {
            id: self.next_id(),
            description: request.description.clone(),
            status: request.status,
            priority: request.priority,
            due_date: request.due_date,
            created_at: 1_800_000_000,
        };
        self.tasks.lock().unwrap().insert(0, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: i64, request: &UpdateTaskRequest) -> ApiResult<Task> {
        self.mutation().await?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Self::missing("task", "updating"))?;
        request.apply_to(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> ApiResult<()> {
        self.mutation().await?;
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(Self::missing("task", "deleting"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub fn contact(id: i64, name: &str) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        phone: None,
        created_at: 1_700_000_000 + id,
    }
}

pub fn deal(id: i64, name: &str, value: f64, contact_id: Option<i64>) -> Deal {
    Deal {
        id,
        name: name.to_string(),
        value,
        stage: DealStage::Lead,
        contact_id,
        contact: None,
        created_at: 1_700_000_000 + id,
    }
}

pub fn task(id: i64, description: &str) -> Task {
    Task {
        id,
        description: description.to_string(),
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        due_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        created_at: 1_700_000_000 + id,
    }
}
