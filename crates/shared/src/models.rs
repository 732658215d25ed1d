//! Shared data models for the EventNow REST API.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// --- Identity ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Organizer,
    Student,
    #[default]
    General,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Organizer => "organizer",
            Role::Student => "student",
            Role::General => "general",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Organizer => "Organizer",
            Role::Student => "Student",
            Role::General => "General",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, alias = "profile_picture", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name shown in navigation chrome; falls back to the email address.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }
}

// --- Auth ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateProfileRequest {
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

// --- Events ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Academic,
    Culture,
    Sports,
    Seminar,
    Workshop,
    Competition,
    Other,
}

impl EventCategory {
    pub const ALL: [EventCategory; 7] = [
        EventCategory::Academic,
        EventCategory::Culture,
        EventCategory::Sports,
        EventCategory::Seminar,
        EventCategory::Workshop,
        EventCategory::Competition,
        EventCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Academic => "academic",
            EventCategory::Culture => "culture",
            EventCategory::Sports => "sports",
            EventCategory::Seminar => "seminar",
            EventCategory::Workshop => "workshop",
            EventCategory::Competition => "competition",
            EventCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventCategory::Academic => "Academic",
            EventCategory::Culture => "Culture",
            EventCategory::Sports => "Sports",
            EventCategory::Seminar => "Seminar",
            EventCategory::Workshop => "Workshop",
            EventCategory::Competition => "Competition",
            EventCategory::Other => "Other",
        }
    }

    /// Case-insensitive lookup, matching how the backend stores categories.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
    }
}

/// An event as listed by the backend. Consumed read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form on the wire; see [`EventCategory::parse`].
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    #[serde(default)]
    pub registration_deadline: Option<NaiveDateTime>,
    #[serde(default, alias = "capacity")]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub registration_link: Option<String>,
    #[serde(default)]
    pub organizer_id: Option<i64>,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Event {
    pub fn category(&self) -> Option<EventCategory> {
        EventCategory::parse(&self.category)
    }

    pub fn status(&self, now: NaiveDateTime) -> EventStatus {
        if self.is_cancelled {
            EventStatus::Cancelled
        } else if now < self.start_datetime {
            EventStatus::Upcoming
        } else if now <= self.end_datetime {
            EventStatus::Ongoing
        } else {
            EventStatus::Completed
        }
    }

    /// Registration stays open until the deadline, or until the event starts
    /// when no deadline is set.
    pub fn registration_open(&self, now: NaiveDateTime) -> bool {
        if self.is_cancelled {
            return false;
        }
        match self.registration_deadline {
            Some(deadline) => now <= deadline,
            None => now < self.start_datetime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}

/// Event detail view including aggregate counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub registrations_count: u32,
    #[serde(default)]
    pub is_registered: bool,
}

impl EventDetail {
    /// Remaining seats, when the event has a capacity.
    pub fn seats_left(&self) -> Option<u32> {
        self.event
            .max_participants
            .map(|cap| cap.saturating_sub(self.registrations_count))
    }
}

/// Payload for creating or updating an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// --- Comments ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CommentAuthor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub event_id: i64,
    #[serde(default)]
    pub author_id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub author: Option<CommentAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateCommentRequest {
    pub event_id: i64,
    pub content: String,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCommentRequest {
    pub content: String,
    pub rating: Option<u8>,
}

// --- Registrations ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Attended,
}

impl RegistrationStatus {
    pub fn label(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "Pending",
            RegistrationStatus::Confirmed => "Confirmed",
            RegistrationStatus::Cancelled => "Cancelled",
            RegistrationStatus::Attended => "Attended",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    #[serde(default)]
    pub status: RegistrationStatus,
    #[serde(default)]
    pub attended: bool,
    #[serde(default)]
    pub registration_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub event: Option<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateRegistrationRequest {
    pub event_id: i64,
}

// --- Admin ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategoryCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub upcoming_events: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_registrations: u64,
    #[serde(default)]
    pub events_by_category: Vec<CategoryCount>,
    #[serde(default)]
    pub registrations_by_status: Vec<StatusCount>,
}
