//! Document type enumeration for submitted identity documents.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the kind of identity document a user submitted for verification.
///
/// This enumeration corresponds to the `ID_DOCUMENT_TYPE` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::IdDocumentType"]
pub enum IdDocumentType {
    /// Student card issued by a school or university
    #[db_rename = "school_id"]
    #[serde(rename = "school_id")]
    SchoolId,

    /// Government-issued national identity card
    #[db_rename = "national_id"]
    #[serde(rename = "national_id")]
    NationalId,
}

impl IdDocumentType {
    /// Returns whether this document type is issued by a government body.
    #[inline]
    pub fn is_government_issued(self) -> bool {
        matches!(self, IdDocumentType::NationalId)
    }
}
