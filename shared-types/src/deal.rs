use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::contact::Contact;
use crate::settings::ParseSettingError;

/// Pipeline position of a deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DealStage {
    #[default]
    Lead,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl DealStage {
    pub const ALL: [DealStage; 5] = [
        DealStage::Lead,
        DealStage::ProposalSent,
        DealStage::Negotiation,
        DealStage::ClosedWon,
        DealStage::ClosedLost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Lead => "Lead",
            DealStage::ProposalSent => "Proposal Sent",
            DealStage::Negotiation => "Negotiation",
            DealStage::ClosedWon => "Closed Won",
            DealStage::ClosedLost => "Closed Lost",
        }
    }
}

impl fmt::Display for DealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DealStage {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DealStage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSettingError::new("deal stage", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: i64,
    pub name: String,
    pub value: f64,
    pub stage: DealStage,
    pub contact_id: Option<i64>,
    /// Embedded on reads; `null` when the deal has no contact
    #[serde(default)]
    pub contact: Option<Contact>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealRequest {
    pub name: String,
    #[serde(deserialize_with = "crate::de::money")]
    pub value: f64,
    #[serde(default)]
    pub stage: DealStage,
    #[serde(default, deserialize_with = "crate::de::contact_ref")]
    pub contact_id: Option<i64>,
}

/// Partial update. An explicit `"contactId": null` unassigns the contact,
/// an absent `contactId` keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::de::optional_money",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<DealStage>,
    #[serde(
        default,
        deserialize_with = "crate::de::contact_ref_update",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(type = "number | null")]
    pub contact_id: Option<Option<i64>>,
}

impl UpdateDealRequest {
    pub fn apply_to(&self, deal: &mut Deal) {
        if let Some(name) = &self.name {
            deal.name = name.clone();
        }
        if let Some(value) = self.value {
            deal.value = value;
        }
        if let Some(stage) = self.stage {
            deal.stage = stage;
        }
        if let Some(contact_id) = self.contact_id {
            if deal.contact_id != contact_id {
                deal.contact = None;
            }
            deal.contact_id = contact_id;
        }
    }
}
