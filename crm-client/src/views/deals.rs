use std::sync::Arc;

use shared_types::{Contact, CreateDealRequest, Deal, DealStage, UpdateDealRequest};
use tracing::{debug, info, warn};

use super::{now, shared_list, SharedList, SharedSettings, ViewResult};
use crate::api::CrmApi;
use crate::error::ClientError;
use crate::format::format_currency;
use crate::notify::Notifier;

/// Contact cell for deals whose contact is not in the contact list
pub const NO_CONTACT: &str = "No contact assigned";

const REQUIRED_FIELDS: &str = "Please fill in all required fields.";

#[derive(Debug, Clone, PartialEq)]
pub struct DealRow {
    pub id: Option<i64>,
    pub name: String,
    pub value: String,
    pub stage: DealStage,
    pub contact: String,
}

#[derive(Clone)]
pub struct DealsView {
    api: Arc<dyn CrmApi>,
    notifier: Arc<dyn Notifier>,
    deals: SharedList<Deal>,
    contacts: SharedList<Contact>,
    settings: SharedSettings,
}

impl DealsView {
    /// `contacts` feeds the contact column and the contact picker; pass the
    /// contacts view's list to share it.
    pub fn new(
        api: Arc<dyn CrmApi>,
        notifier: Arc<dyn Notifier>,
        contacts: SharedList<Contact>,
        settings: SharedSettings,
    ) -> Self {
        Self {
            api,
            notifier,
            deals: shared_list(),
            contacts,
            settings,
        }
    }

    pub fn list(&self) -> SharedList<Deal> {
        self.deals.clone()
    }

    /// Reloads deals and the contact picker. A failed contact fetch is only
    /// logged; the deals still render.
    pub async fn refresh(&self) -> ViewResult<()> {
        let (contacts, deals) = tokio::join!(self.api.list_contacts(), self.api.list_deals());

        match contacts {
            Ok(contacts) => self.contacts.write().await.replace_all(contacts),
            Err(e) => warn!("Error fetching contacts: {}", e),
        }

        match deals {
            Ok(deals) => {
                self.deals.write().await.replace_all(deals);
                Ok(())
            }
            Err(e) => {
                self.notifier.error(&e.user_message("Failed to fetch deals"));
                Err(e)
            }
        }
    }

    pub async fn add_deal(&self, request: CreateDealRequest) -> ViewResult<Deal> {
        let provisional = Deal {
            id: 0,
            name: request.name.clone(),
            value: request.value,
            stage: request.stage,
            contact_id: request.contact_id,
            contact: None,
            created_at: now(),
        };
        let key = self.deals.write().await.insert_provisional(provisional);

        match self.api.create_deal(&request).await {
            Ok(saved) => {
                info!("Added deal {}", saved.id);
                self.deals.write().await.confirm(key, saved.clone());
                Ok(saved)
            }
            Err(e) => {
                warn!("Reverting new deal {}: {}", key, e);
                self.deals.write().await.discard(key);
                self.notifier.error(&e.user_message("Failed to add deal"));
                Err(e)
            }
        }
    }

    /// Sends nothing when a supplied name is blank or the value is not a
    /// number.
    pub async fn update_deal(&self, id: i64, request: UpdateDealRequest) -> ViewResult<Deal> {
        let blank_name = request
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty());
        let bad_value = request.value.is_some_and(|value| !value.is_finite());
        if blank_name || bad_value {
            debug!("Invalid deal data: {:?}", request);
            self.notifier.error(REQUIRED_FIELDS);
            return Err(ClientError::Invalid(REQUIRED_FIELDS.to_string()));
        }

        let snapshot = self
            .deals
            .write()
            .await
            .patch(id, |deal| request.apply_to(deal));

        match self.api.update_deal(id, &request).await {
            Ok(saved) => {
                info!("Updated deal {}", id);
                self.deals.write().await.replace(id, saved.clone());
                Ok(saved)
            }
            Err(e) => {
                warn!("Reverting deal {}: {}", id, e);
                if let Some(snapshot) = snapshot {
                    self.deals.write().await.revert(snapshot);
                }
                self.notifier.error(&e.user_message("Failed to update deal"));
                Err(e)
            }
        }
    }

    pub async fn delete_deal(&self, id: i64) -> ViewResult<Deal> {
        let removed = self.deals.write().await.remove(id);

        match self.api.delete_deal(id).await {
            Ok(deleted) => {
                info!("Deleted deal {}", id);
                Ok(deleted)
            }
            Err(e) => {
                warn!("Restoring deal {}: {}", id, e);
                if let Some(removed) = removed {
                    self.deals.write().await.restore(removed);
                }
                self.notifier.error(&e.user_message("Failed to delete deal"));
                Err(e)
            }
        }
    }

    /// Contacts available to the contact picker
    pub async fn contact_choices(&self) -> Vec<(i64, String)> {
        self.contacts
            .read()
            .await
            .records()
            .map(|c| (c.id, c.name.clone()))
            .collect()
    }

    pub async fn rows(&self) -> Vec<DealRow> {
        let settings = *self.settings.read().await;
        let contacts = self.contacts.read().await;
        let deals = self.deals.read().await;

        deals
            .rows()
            .iter()
            .map(|row| {
                let deal = &row.record;
                let contact = deal
                    .contact_id
                    .and_then(|id| contacts.get(id))
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| NO_CONTACT.to_string());
                DealRow {
                    id: (!row.is_provisional()).then_some(deal.id),
                    name: deal.name.clone(),
                    value: format_currency(deal.value, &settings),
                    stage: deal.stage,
                    contact,
                }
            })
            .collect()
    }
}
