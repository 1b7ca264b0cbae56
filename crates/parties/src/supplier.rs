use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{ensure_not_blank, DomainError, DomainResult, Entity, SupplierId};

/// A supplier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> SupplierId {
        self.id
    }
}

/// Payload: register a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSupplier {
    pub name: String,
    #[serde(default)]
    pub contact_info: Option<String>,
}

impl CreateSupplier {
    pub fn validate(&self) -> DomainResult<()> {
        ensure_not_blank("name", &self.name)
    }
}

/// Payload: update a supplier. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSupplier {
    #[serde(default, with = "stockroom_core::nullable", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "stockroom_core::nullable", skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierChanges {
    pub name: Option<String>,
    pub contact_info: Option<Option<String>>,
}

impl SupplierChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.contact_info.is_none()
    }
}

impl UpdateSupplier {
    pub fn into_changes(self) -> DomainResult<SupplierChanges> {
        let name = match self.name {
            None => None,
            Some(None) => return Err(DomainError::required("name")),
            Some(Some(name)) => {
                ensure_not_blank("name", &name)?;
                Some(name)
            }
        };

        Ok(SupplierChanges {
            name,
            contact_info: self.contact_info,
        })
    }
}
