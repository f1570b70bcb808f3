use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateContactRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Partial update. `email`/`phone` distinguish "not sent" from an explicit
/// `null`, which clears the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateContactRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::de::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(type = "string | null")]
    pub email: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::de::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(type = "string | null")]
    pub phone: Option<Option<String>>,
}

impl UpdateContactRequest {
    /// Applies the supplied fields to `contact`, leaving the rest untouched.
    pub fn apply_to(&self, contact: &mut Contact) {
        if let Some(name) = &self.name {
            contact.name = name.clone();
        }
        if let Some(email) = &self.email {
            contact.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            contact.phone = phone.clone();
        }
    }
}
