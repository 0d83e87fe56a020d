use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::ServiceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceKind {
    Hackathon,
    Course,
    Workshop,
    Merchandise,
}

/// An admin-managed catalog entry students can spend tokens on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub kind: ServiceKind,
    pub token_cost: u32,
    pub wallet_address: String,
    pub description: String,
    pub active: bool,
    pub enrollments: u32,
}

/// Fields of a new service; the store assigns the id and zeroes the
/// enrollment counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDraft {
    pub name: String,
    pub kind: ServiceKind,
    pub token_cost: u32,
    pub wallet_address: String,
    pub description: String,
    pub active: bool,
}

impl ServiceDraft {
    pub fn into_service(self, id: ServiceId) -> Service {
        Service {
            id,
            name: self.name,
            kind: self.kind,
            token_cost: self.token_cost,
            wallet_address: self.wallet_address,
            description: self.description,
            active: self.active,
            enrollments: 0,
        }
    }
}

/// Partial update applied to an existing service. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub kind: Option<ServiceKind>,
    pub token_cost: Option<u32>,
    pub wallet_address: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl ServicePatch {
    pub fn apply(self, service: &mut Service) {
        if let Some(name) = self.name {
            service.name = name;
        }
        if let Some(kind) = self.kind {
            service.kind = kind;
        }
        if let Some(token_cost) = self.token_cost {
            service.token_cost = token_cost;
        }
        if let Some(wallet_address) = self.wallet_address {
            service.wallet_address = wallet_address;
        }
        if let Some(description) = self.description {
            service.description = description;
        }
        if let Some(active) = self.active {
            service.active = active;
        }
    }
}
