//! Guy profile model for PostgreSQL database operations.
//!
//! A guy is a community-maintained profile that stories attach to. Profiles
//! are created by verified users and hold only loosely-structured contact
//! details.
//!
//! ## Models
//!
//! - [`Guy`] - Main guy profile model
//! - [`NewGuy`] - Data structure for creating new profiles
//! - [`UpdateGuy`] - Data structure for updating existing profiles

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::guys;
use crate::types::HasCreatedAt;

/// Profile of a person that stories are posted about.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = guys)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Guy {
    /// Unique profile identifier.
    pub id: Uuid,
    /// Name the profile is listed under.
    pub display_name: String,
    /// Known phone number, if any.
    pub phone_number: Option<String>,
    /// Free-form social media handles.
    pub socials: Option<String>,
    /// Rough location, free-form.
    pub location: Option<String>,
    /// Approximate age, if known.
    pub age: Option<i32>,
    /// User who created the profile.
    pub created_by: Uuid,
    /// Timestamp when the profile was created.
    pub created_at: Timestamp,
}

/// Data for creating a new guy profile.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guys)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewGuy {
    /// Name the profile is listed under.
    pub display_name: String,
    /// Known phone number, if any.
    pub phone_number: Option<String>,
    /// Free-form social media handles.
    pub socials: Option<String>,
    /// Rough location, free-form.
    pub location: Option<String>,
    /// Approximate age, if known.
    pub age: Option<i32>,
    /// User who creates the profile.
    pub created_by: Uuid,
}

/// Data for updating a guy profile.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = guys)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateGuy {
    /// Name the profile is listed under.
    pub display_name: Option<String>,
    /// Phone number. `Some(None)` clears the column.
    pub phone_number: Option<Option<String>>,
    /// Social media handles. `Some(None)` clears the column.
    pub socials: Option<Option<String>>,
    /// Location. `Some(None)` clears the column.
    pub location: Option<Option<String>>,
    /// Approximate age. `Some(None)` clears the column.
    pub age: Option<Option<i32>>,
}

impl Guy {
    /// Returns whether the profile carries any contact detail.
    pub fn has_contact_info(&self) -> bool {
        self.phone_number
            .as_deref()
            .is_some_and(|phone_number| !phone_number.is_empty())
            || self
                .socials
                .as_deref()
                .is_some_and(|socials| !socials.is_empty())
    }

    /// Returns whether the profile has a known location.
    pub fn has_location(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|location| !location.is_empty())
    }

    /// Returns whether the given user created this profile.
    pub fn is_created_by(&self, user_id: Uuid) -> bool {
        self.created_by == user_id
    }
}

impl UpdateGuy {
    /// Returns whether the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.phone_number.is_none()
            && self.socials.is_none()
            && self.location.is_none()
            && self.age.is_none()
    }
}

impl HasCreatedAt for Guy {
    fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_guy() -> Guy {
        Guy {
            id: Uuid::new_v4(),
            display_name: "Kevin O.".to_owned(),
            phone_number: None,
            socials: None,
            location: None,
            age: None,
            created_by: Uuid::new_v4(),
            created_at: jiff::Timestamp::now().into(),
        }
    }

    #[test]
    fn contact_info_detection() {
        let mut guy = sample_guy();
        assert!(!guy.has_contact_info());

        guy.phone_number = Some("+254712345678".to_owned());
        assert!(guy.has_contact_info());

        guy.phone_number = Some(String::new());
        guy.socials = Some("@kevin_o".to_owned());
        assert!(guy.has_contact_info());
    }

    #[test]
    fn creator_check() {
        let guy = sample_guy();
        assert!(guy.is_created_by(guy.created_by));
        assert!(!guy.is_created_by(Uuid::new_v4()));
    }

    #[test]
    fn empty_patch() {
        assert!(UpdateGuy::default().is_empty());
        let patch = UpdateGuy {
            age: Some(None),
            ..UpdateGuy::default()
        };
        assert!(!patch.is_empty());
    }
}
