use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Applied,
    Interview,
    Offer,
    Rejected,
    #[serde(rename = "Follow-up")]
    FollowUp,
    #[serde(rename = "archived")]
    Archived,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Applied,
        Status::Interview,
        Status::Offer,
        Status::Rejected,
        Status::FollowUp,
        Status::Archived,
    ];

    /// Value stored in the status column.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::Interview => "Interview",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
            Status::FollowUp => "Follow-up",
            Status::Archived => "archived",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Archived => "Archived",
            other => other.as_str(),
        }
    }

    /// Chart colour.
    pub fn color(self) -> &'static str {
        match self {
            Status::Applied => "#3b82f6",
            Status::Interview => "#f59e0b",
            Status::Offer => "#10b981",
            Status::Rejected => "#ef4444",
            Status::FollowUp => "#8b5cf6",
            Status::Archived => "#6b7280",
        }
    }

    /// Archived records stay in the store but drop out of the default view.
    pub fn is_active(self) -> bool {
        match self {
            Status::Archived => false,
            Status::Applied
            | Status::Interview
            | Status::Offer
            | Status::Rejected
            | Status::FollowUp => true,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Ok(Status::Applied),
            "interview" => Ok(Status::Interview),
            "offer" => Ok(Status::Offer),
            "rejected" => Ok(Status::Rejected),
            "follow-up" | "followup" | "follow_up" => Ok(Status::FollowUp),
            "archived" => Ok(Status::Archived),
            other => Err(format!(
                "unknown status '{}' (expected applied, interview, offer, rejected, follow-up, archived)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub owner_id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub date_applied: NaiveDate,
    pub status: Status,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub job_url: Option<String>,
    pub posting_online: bool,
    pub hiring_manager: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form input for a new application. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    pub location: String,
    pub status: Status,
    pub date_applied: Option<NaiveDate>,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub job_url: Option<String>,
    pub posting_online: bool,
    pub hiring_manager: Option<String>,
}

impl Default for NewApplication {
    fn default() -> Self {
        Self {
            company: String::new(),
            position: String::new(),
            location: String::new(),
            status: Status::Applied,
            date_applied: None,
            salary: None,
            notes: None,
            job_url: None,
            posting_online: true,
            hiring_manager: None,
        }
    }
}

impl NewApplication {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("company", &self.company)?;
        require("position", &self.position)?;
        require("location", &self.location)?;
        Ok(())
    }

    /// Trims required fields and turns blank optional fields into `None`.
    pub fn normalized(&self) -> Self {
        Self {
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            location: self.location.trim().to_string(),
            status: self.status,
            date_applied: self.date_applied,
            salary: blank_to_none(self.salary.as_deref()),
            notes: blank_to_none(self.notes.as_deref()),
            job_url: blank_to_none(self.job_url.as_deref()),
            posting_online: self.posting_online,
            hiring_manager: blank_to_none(self.hiring_manager.as_deref()),
        }
    }
}

/// Partial edit. `None` leaves a field untouched; for optional text fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPatch {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub status: Option<Status>,
    pub date_applied: Option<NaiveDate>,
    pub salary: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub job_url: Option<Option<String>>,
    pub posting_online: Option<bool>,
    pub hiring_manager: Option<Option<String>>,
}

impl ApplicationPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(company) = &self.company {
            require("company", company)?;
        }
        if let Some(position) = &self.position {
            require("position", position)?;
        }
        if let Some(location) = &self.location {
            require("location", location)?;
        }
        Ok(())
    }

    /// Applies the patch to a copy of `app`. Timestamps are left alone.
    pub fn apply_to(&self, app: &Application) -> Application {
        let mut out = app.clone();
        if let Some(v) = &self.company {
            out.company = v.trim().to_string();
        }
        if let Some(v) = &self.position {
            out.position = v.trim().to_string();
        }
        if let Some(v) = &self.location {
            out.location = v.trim().to_string();
        }
        if let Some(v) = self.status {
            out.status = v;
        }
        if let Some(v) = self.date_applied {
            out.date_applied = v;
        }
        if let Some(v) = &self.salary {
            out.salary = blank_to_none(v.as_deref());
        }
        if let Some(v) = &self.notes {
            out.notes = blank_to_none(v.as_deref());
        }
        if let Some(v) = &self.job_url {
            out.job_url = blank_to_none(v.as_deref());
        }
        if let Some(v) = self.posting_online {
            out.posting_online = v;
        }
        if let Some(v) = &self.hiring_manager {
            out.hiring_manager = blank_to_none(v.as_deref());
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

// --- Grocery models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroceryCategory {
    Produce,
    Dairy,
    Meat,
    Bakery,
    Pantry,
    Frozen,
    Beverages,
    Snacks,
}

impl GroceryCategory {
    pub const ALL: [GroceryCategory; 8] = [
        GroceryCategory::Produce,
        GroceryCategory::Dairy,
        GroceryCategory::Meat,
        GroceryCategory::Bakery,
        GroceryCategory::Pantry,
        GroceryCategory::Frozen,
        GroceryCategory::Beverages,
        GroceryCategory::Snacks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GroceryCategory::Produce => "Produce",
            GroceryCategory::Dairy => "Dairy",
            GroceryCategory::Meat => "Meat",
            GroceryCategory::Bakery => "Bakery",
            GroceryCategory::Pantry => "Pantry",
            GroceryCategory::Frozen => "Frozen",
            GroceryCategory::Beverages => "Beverages",
            GroceryCategory::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for GroceryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroceryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GroceryCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown category '{}'", wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub category: GroceryCategory,
    pub quantity: u32,
    pub brand: String,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlyerStatus {
    Processing,
    Processed,
    Error,
}

impl FlyerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FlyerStatus::Processing => "processing",
            FlyerStatus::Processed => "processed",
            FlyerStatus::Error => "error",
        }
    }
}

impl FromStr for FlyerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(FlyerStatus::Processing),
            "processed" => Ok(FlyerStatus::Processed),
            "error" => Ok(FlyerStatus::Error),
            other => Err(format!("unknown flyer status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    pub id: String,
    pub owner_id: String,
    pub url: String,
    pub store: String,
    pub status: FlyerStatus,
    pub created_at: DateTime<Utc>,
}

/// One store's price for one grocery item, in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub id: String,
    pub owner_id: String,
    pub item: String,
    pub store: String,
    pub price_cents: i64,
    pub regular_cents: i64,
}

impl PriceEntry {
    pub fn savings_cents(&self) -> i64 {
        self.regular_cents - self.price_cents
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

pub fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_accepts_stored_and_cli_forms() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>(), Ok(status));
            assert_eq!(status.label().parse::<Status>(), Ok(status));
        }
        assert_eq!("followup".parse::<Status>(), Ok(Status::FollowUp));
        assert_eq!("INTERVIEW".parse::<Status>(), Ok(Status::Interview));
        assert!("hired".parse::<Status>().is_err());
    }

    #[test]
    fn test_only_archived_is_inactive() {
        let inactive: Vec<Status> = Status::ALL.into_iter().filter(|s| !s.is_active()).collect();
        assert_eq!(inactive, vec![Status::Archived]);
    }

    #[test]
    fn test_new_application_requires_company_position_location() {
        let mut app = NewApplication {
            company: "Stripe".into(),
            position: "Engineer".into(),
            location: "Remote".into(),
            ..Default::default()
        };
        assert!(app.validate().is_ok());

        app.location = "   ".into();
        assert_eq!(app.validate(), Err(ValidationError::MissingField("location")));

        app.company = String::new();
        assert_eq!(app.validate(), Err(ValidationError::MissingField("company")));
    }

    #[test]
    fn test_normalized_blanks_become_none() {
        let app = NewApplication {
            company: "  Figma ".into(),
            position: "Designer".into(),
            location: "NYC".into(),
            salary: Some("".into()),
            notes: Some("  ".into()),
            job_url: Some("https://figma.com/careers".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(app.company, "Figma");
        assert_eq!(app.salary, None);
        assert_eq!(app.notes, None);
        assert_eq!(app.job_url.as_deref(), Some("https://figma.com/careers"));
    }

    #[test]
    fn test_patch_rejects_blank_required_field() {
        let patch = ApplicationPatch {
            position: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::MissingField("position")));
        assert!(ApplicationPatch::default().is_empty());
    }

    #[test]
    fn test_grocery_category_parse() {
        assert_eq!("dairy".parse::<GroceryCategory>(), Ok(GroceryCategory::Dairy));
        assert!("toys".parse::<GroceryCategory>().is_err());
    }
}
