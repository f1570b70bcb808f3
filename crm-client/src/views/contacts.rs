use std::sync::Arc;

use shared_types::{Contact, CreateContactRequest, UpdateContactRequest};
use tracing::{info, warn};

use super::{now, shared_list, SharedList, ViewResult};
use crate::api::CrmApi;
use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq)]
pub struct ContactRow {
    /// `None` until the server has accepted the contact
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone)]
pub struct ContactsView {
    api: Arc<dyn CrmApi>,
    notifier: Arc<dyn Notifier>,
    contacts: SharedList<Contact>,
}

impl ContactsView {
    pub fn new(api: Arc<dyn CrmApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            contacts: shared_list(),
        }
    }

    /// The list backing this view, also read by the deals view
    pub fn list(&self) -> SharedList<Contact> {
        self.contacts.clone()
    }

    pub async fn refresh(&self) -> ViewResult<()> {
        match self.api.list_contacts().await {
            Ok(contacts) => {
                self.contacts.write().await.replace_all(contacts);
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .error(&e.user_message("Failed to fetch contacts"));
                Err(e)
            }
        }
    }

    pub async fn add_contact(&self, request: CreateContactRequest) -> ViewResult<Contact> {
        let provisional = Contact {
            id: 0,
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            created_at: now(),
        };
        let key = self.contacts.write().await.insert_provisional(provisional);

        match self.api.create_contact(&request).await {
            Ok(saved) => {
                info!("Added contact {}", saved.id);
                self.contacts.write().await.confirm(key, saved.clone());
                Ok(saved)
            }
            Err(e) => {
                warn!("Reverting new contact {}: {}", key, e);
                self.contacts.write().await.discard(key);
                self.notifier.error(&e.user_message("Failed to add contact"));
                Err(e)
            }
        }
    }

    pub async fn update_contact(
        &self,
        id: i64,
        request: UpdateContactRequest,
    ) -> ViewResult<Contact> {
        let snapshot = self
            .contacts
            .write()
            .await
            .patch(id, |contact| request.apply_to(contact));

        match self.api.update_contact(id, &request).await {
            Ok(saved) => {
                info!("Updated contact {}", id);
                self.contacts.write().await.replace(id, saved.clone());
                Ok(saved)
            }
            Err(e) => {
                warn!("Reverting contact {}: {}", id, e);
                if let Some(snapshot) = snapshot {
                    self.contacts.write().await.revert(snapshot);
                }
                self.notifier
                    .error(&e.user_message("Failed to update contact"));
                Err(e)
            }
        }
    }

    pub async fn delete_contact(&self, id: i64) -> ViewResult<()> {
        let removed = self.contacts.write().await.remove(id);

        match self.api.delete_contact(id).await {
            Ok(()) => {
                info!("Deleted contact {}", id);
                Ok(())
            }
            Err(e) => {
                warn!("Restoring contact {}: {}", id, e);
                if let Some(removed) = removed {
                    self.contacts.write().await.restore(removed);
                }
                self.notifier
                    .error(&e.user_message("Failed to delete contact"));
                Err(e)
            }
        }
    }

    pub async fn rows(&self) -> Vec<ContactRow> {
        let contacts = self.contacts.read().await;
        contacts
            .rows()
            .iter()
            .map(|row| ContactRow {
                id: (!row.is_provisional()).then_some(row.record.id),
                name: row.record.name.clone(),
                email: row.record.email.clone().unwrap_or_default(),
                phone: row.record.phone.clone().unwrap_or_default(),
            })
            .collect()
    }
}
