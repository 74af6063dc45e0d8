//! Database enumeration types for type-safe queries.
//!
//! This module provides strongly-typed enumerations that correspond to PostgreSQL ENUM types
//! defined in the database schema. Each enumeration provides serialization support for APIs
//! and database integration through Diesel.

// User-related enumerations
pub mod id_document_type;
pub mod verification_status;

// Story-related enumerations
pub mod story_tag;

pub use id_document_type::IdDocumentType;
pub use story_tag::StoryTag;
pub use verification_status::VerificationStatus;
