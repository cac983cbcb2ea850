//! Draft and submitted complaint tickets.
//!
//! A [`DraftTicket`] is filled one slot per turn, strictly in the order
//! category, location, description. Once complete it converts into the
//! [`ComplaintTicket`] wire shape the complaints API accepts.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// Partially-filled report collected during the dialogue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTicket {
    pub category: Option<Category>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl DraftTicket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category. Returns false if it was already filled.
    pub fn fill_category(&mut self, category: Category) -> bool {
        if self.category.is_some() {
            return false;
        }
        self.category = Some(category);
        true
    }

    /// Set the location. Refused unless the category is filled and the
    /// location is not.
    pub fn fill_location(&mut self, location: impl Into<String>) -> bool {
        if self.category.is_none() || self.location.is_some() {
            return false;
        }
        self.location = Some(location.into());
        true
    }

    /// Set the description. Refused unless category and location are
    /// filled and the description is not.
    pub fn fill_description(&mut self, description: impl Into<String>) -> bool {
        if self.location.is_none() || self.description.is_some() {
            return false;
        }
        self.description = Some(description.into());
        true
    }

    /// All three slots filled
    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.location.is_some() && self.description.is_some()
    }

    /// No slot filled
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Build the wire ticket, if every slot is filled
    pub fn to_ticket(&self) -> Option<ComplaintTicket> {
        Some(ComplaintTicket {
            category: self.category?,
            title: self.location.clone()?,
            description: self.description.clone()?,
        })
    }
}

/// Ticket as sent to the complaints API.
///
/// The API names the category `type` and stores the location as the
/// complaint `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintTicket {
    #[serde(rename = "type")]
    pub category: Category,
    pub title: String,
    pub description: String,
}

impl ComplaintTicket {
    pub fn new(
        category: Category,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: location.into(),
            description: description.into(),
        }
    }

    /// Location the user gave (carried in `title`)
    pub fn location(&self) -> &str {
        &self.title
    }
}

/// Acknowledgement from the submission service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Server-side id, when the service returns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
}

impl SubmissionReceipt {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            ticket_id: Some(id.into()),
        }
    }
}
