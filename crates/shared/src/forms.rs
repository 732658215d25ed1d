//! Form value types for every EventNow form and the validators that check them.
//!
//! Values are kept as raw strings (what the inputs hold); conversion into
//! typed request payloads happens once the form validates.

use chrono::NaiveDateTime;

use crate::form::{FieldErrors, FieldValue, FormValues};
use crate::models::{
    ChangePasswordRequest, CreateCommentRequest, Event, EventCategory, EventPayload,
    RegisterRequest, UpdateProfileRequest, UserProfile,
};
use crate::validation::{
    has_max_len, has_min_len, is_present, is_strong_password, is_valid_contact_phone,
    is_valid_email, parse_datetime,
};

/// Implements [`FormValues`] for a struct of `String` and `bool` fields.
macro_rules! form_values {
    ($ty:ty { text: [$($text:ident),* $(,)?], checked: [$($flag:ident),* $(,)?] }) => {
        impl FormValues for $ty {
            fn field_names(&self) -> Vec<&'static str> {
                vec![$(stringify!($text),)* $(stringify!($flag),)*]
            }

            fn field(&self, name: &str) -> Option<FieldValue> {
                match name {
                    $(stringify!($text) => Some(FieldValue::Text(self.$text.clone())),)*
                    $(stringify!($flag) => Some(FieldValue::Checked(self.$flag)),)*
                    _ => None,
                }
            }

            fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
                match (name, value) {
                    $((stringify!($text), FieldValue::Text(v)) => {
                        self.$text = v;
                        true
                    })*
                    $((stringify!($flag), FieldValue::Checked(v)) => {
                        self.$flag = v;
                        true
                    })*
                    _ => false,
                }
            }
        }
    };
}

pub const PASSWORD_RULE_MESSAGE: &str =
    "Password must be at least 8 characters and include uppercase, lowercase, number and special character";

fn check_email(errors: &mut FieldErrors, field: &str, email: &str) {
    if !is_present(email) {
        errors.add(field, "Email is required");
    } else if !is_valid_email(email.trim()) {
        errors.add(field, "Please enter a valid email address");
    }
}

fn check_new_password(errors: &mut FieldErrors, field: &str, confirm_field: &str, password: &str, confirm: &str) {
    if password.is_empty() {
        errors.add(field, "Password is required");
    } else if !is_strong_password(password) {
        errors.add(field, PASSWORD_RULE_MESSAGE);
    }
    if confirm.is_empty() {
        errors.add(confirm_field, "Please confirm your password");
    } else if confirm != password {
        errors.add(confirm_field, "Passwords do not match");
    }
}

// --- Login ---

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

form_values!(LoginForm { text: [email, password], checked: [remember_me] });

pub fn validate_login(values: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, "email", &values.email);
    if values.password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors
}

// --- Register ---

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

form_values!(RegisterForm { text: [full_name, email, password, confirm_password], checked: [] });

pub fn validate_register(values: &RegisterForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let name = values.full_name.trim();
    if name.is_empty() {
        errors.add("full_name", "Full name is required");
    } else if !has_min_len(name, 2) {
        errors.add("full_name", "Full name must be at least 2 characters");
    } else if !has_max_len(name, 100) {
        errors.add("full_name", "Full name must be at most 100 characters");
    }
    check_email(&mut errors, "email", &values.email);
    check_new_password(&mut errors, "password", "confirm_password", &values.password, &values.confirm_password);
    errors
}

impl RegisterForm {
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

// --- Password recovery ---

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmailForm {
    pub email: String,
}

form_values!(EmailForm { text: [email], checked: [] });

pub fn validate_email_form(values: &EmailForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, "email", &values.email);
    errors
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

form_values!(ResetPasswordForm { text: [password, confirm_password], checked: [] });

pub fn validate_reset_password(values: &ResetPasswordForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_new_password(&mut errors, "password", "confirm_password", &values.password, &values.confirm_password);
    errors
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

form_values!(ChangePasswordForm { text: [current_password, new_password, confirm_password], checked: [] });

pub fn validate_change_password(values: &ChangePasswordForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if values.current_password.is_empty() {
        errors.add("current_password", "Current password is required");
    }
    check_new_password(&mut errors, "new_password", "confirm_password", &values.new_password, &values.confirm_password);
    if !values.new_password.is_empty() && values.new_password == values.current_password {
        errors.add("new_password", "New password must differ from the current password");
    }
    errors
}

impl ChangePasswordForm {
    pub fn to_request(&self) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        }
    }
}

// --- Profile ---

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub bio: String,
}

form_values!(ProfileForm { text: [full_name, email, bio], checked: [] });

impl ProfileForm {
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone().unwrap_or_default(),
        }
    }

    pub fn to_request(&self) -> UpdateProfileRequest {
        let bio = self.bio.trim();
        UpdateProfileRequest {
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            bio: if bio.is_empty() { None } else { Some(bio.to_string()) },
            profile_picture: None,
        }
    }
}

pub fn validate_profile(values: &ProfileForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let name = values.full_name.trim();
    if name.is_empty() {
        errors.add("full_name", "Full name is required");
    } else if !has_min_len(name, 2) || !has_max_len(name, 100) {
        errors.add("full_name", "Full name must be between 2 and 100 characters");
    }
    check_email(&mut errors, "email", &values.email);
    if !has_max_len(&values.bio, 500) {
        errors.add("bio", "Bio must be at most 500 characters");
    }
    errors
}

// --- Events ---

/// Admin create/edit form. Date fields hold `datetime-local` input strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub start_datetime: String,
    pub end_datetime: String,
    pub registration_deadline: String,
    pub capacity: String,
    pub registration_link: String,
    pub image_url: String,
}

form_values!(EventForm {
    text: [
        title,
        description,
        category,
        location,
        start_datetime,
        end_datetime,
        registration_deadline,
        capacity,
        registration_link,
        image_url,
    ],
    checked: []
});

const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

impl EventForm {
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            category: event
                .category()
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| event.category.clone()),
            location: event.location.clone(),
            start_datetime: event.start_datetime.format(INPUT_DATETIME_FORMAT).to_string(),
            end_datetime: event.end_datetime.format(INPUT_DATETIME_FORMAT).to_string(),
            registration_deadline: event
                .registration_deadline
                .map(|d| d.format(INPUT_DATETIME_FORMAT).to_string())
                .unwrap_or_default(),
            capacity: event.max_participants.map(|c| c.to_string()).unwrap_or_default(),
            registration_link: event.registration_link.clone().unwrap_or_default(),
            image_url: event.image_url.clone().unwrap_or_default(),
        }
    }

    /// Convert into a request payload, re-running validation without the
    /// "not in the past" rule.
    pub fn to_payload(&self) -> Result<EventPayload, FieldErrors> {
        let errors = validate_event_form(self, None);
        if !errors.is_empty() {
            return Err(errors);
        }
        let start = parse_datetime(&self.start_datetime);
        let end = parse_datetime(&self.end_datetime);
        let (Some(start_datetime), Some(end_datetime)) = (start, end) else {
            return Err(FieldErrors::new().with("start_datetime", "Start date is required"));
        };
        Ok(EventPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_lowercase(),
            location: self.location.trim().to_string(),
            start_datetime,
            end_datetime,
            registration_deadline: parse_datetime(&self.registration_deadline),
            max_participants: non_empty(&self.capacity).and_then(|c| c.parse().ok()),
            registration_link: non_empty(&self.registration_link).map(str::to_string),
            image_url: non_empty(&self.image_url).map(str::to_string),
        })
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Validate the event form. When `now` is given, a start date in the past is
/// rejected (new events); edits pass `None`.
pub fn validate_event_form(values: &EventForm, now: Option<NaiveDateTime>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let title = values.title.trim();
    if title.is_empty() {
        errors.add("title", "Title is required");
    } else if !has_min_len(title, 5) {
        errors.add("title", "Title must be at least 5 characters");
    } else if !has_max_len(title, 200) {
        errors.add("title", "Title must be at most 200 characters");
    }

    let description = values.description.trim();
    if description.is_empty() {
        errors.add("description", "Description is required");
    } else if !has_min_len(description, 20) {
        errors.add("description", "Description must be at least 20 characters");
    }

    if !is_present(&values.category) {
        errors.add("category", "Category is required");
    } else if EventCategory::parse(&values.category).is_none() {
        errors.add("category", "Please choose a valid category");
    }

    if !is_present(&values.location) {
        errors.add("location", "Location is required");
    }

    let start = parse_datetime(&values.start_datetime);
    if !is_present(&values.start_datetime) {
        errors.add("start_datetime", "Start date is required");
    } else {
        match (start, now) {
            (None, _) => errors.add("start_datetime", "Start date is invalid"),
            (Some(start), Some(now)) if start < now => {
                errors.add("start_datetime", "Start date cannot be in the past")
            }
            _ => {}
        }
    }

    if !is_present(&values.end_datetime) {
        errors.add("end_datetime", "End date is required");
    } else {
        match (parse_datetime(&values.end_datetime), start) {
            (None, _) => errors.add("end_datetime", "End date is invalid"),
            (Some(end), Some(start)) if end < start => {
                errors.add("end_datetime", "End date must be after start date")
            }
            _ => {}
        }
    }

    if let Some(deadline) = non_empty(&values.registration_deadline) {
        match (parse_datetime(deadline), start) {
            (None, _) => errors.add("registration_deadline", "Registration deadline is invalid"),
            (Some(deadline), Some(start)) if deadline > start => errors.add(
                "registration_deadline",
                "Registration deadline must be before the event starts",
            ),
            _ => {}
        }
    }

    if let Some(capacity) = non_empty(&values.capacity) {
        match capacity.parse::<i64>() {
            Ok(n) if n >= 1 => {}
            Ok(_) => errors.add("capacity", "Capacity must be at least 1"),
            Err(_) => errors.add("capacity", "Capacity must be a whole number"),
        }
    }

    if let Some(link) = non_empty(&values.registration_link) {
        if !(link.starts_with("http://") || link.starts_with("https://")) {
            errors.add("registration_link", "Registration link must start with http:// or https://");
        }
    }

    errors
}

// --- Comments ---

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentForm {
    pub content: String,
    /// Empty for "no rating".
    pub rating: String,
}

form_values!(CommentForm { text: [content, rating], checked: [] });

pub fn validate_comment(values: &CommentForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let content = values.content.trim();
    if content.is_empty() {
        errors.add("content", "Comment cannot be empty");
    } else if !has_min_len(content, 10) {
        errors.add("content", "Comment must be at least 10 characters");
    }
    if let Some(rating) = non_empty(&values.rating) {
        if !matches!(rating.parse::<u8>(), Ok(1..=5)) {
            errors.add("rating", "Rating must be between 1 and 5");
        }
    }
    errors
}

impl CommentForm {
    pub fn to_request(&self, event_id: i64) -> CreateCommentRequest {
        CreateCommentRequest {
            event_id,
            content: self.content.trim().to_string(),
            rating: non_empty(&self.rating).and_then(|r| r.parse().ok()),
        }
    }
}

// --- Event sign-up contact details ---

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttendeeForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

form_values!(AttendeeForm { text: [full_name, email, phone], checked: [] });

pub fn validate_attendee(values: &AttendeeForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !is_present(&values.full_name) {
        errors.add("full_name", "Full name is required");
    }
    check_email(&mut errors, "email", &values.email);
    if let Some(phone) = non_empty(&values.phone) {
        if !is_valid_contact_phone(phone) {
            errors.add("phone", "Please enter a valid phone number");
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        parse_datetime("2025-01-01T00:00").unwrap()
    }

    fn valid_event() -> EventForm {
        EventForm {
            title: "Spring Hackathon".into(),
            description: "Forty-eight hours of building things with friends.".into(),
            category: "Competition".into(),
            location: "Main Hall".into(),
            start_datetime: "2025-04-01T09:00".into(),
            end_datetime: "2025-04-03T09:00".into(),
            registration_deadline: "2025-03-25T23:59".into(),
            capacity: "120".into(),
            ..EventForm::default()
        }
    }

    #[test]
    fn form_values_macro_routes_fields() {
        let mut form = LoginForm::default();
        assert_eq!(form.field_names(), vec!["email", "password", "remember_me"]);
        assert!(form.set_field("email", FieldValue::text("a@b.co")));
        assert!(form.set_field("remember_me", FieldValue::Checked(true)));
        assert!(!form.set_field("remember_me", FieldValue::text("yes")));
        assert!(!form.set_field("unknown", FieldValue::text("x")));
        assert_eq!(form.field("email"), Some(FieldValue::text("a@b.co")));
        assert!(form.remember_me);
    }

    #[test]
    fn login_requires_email_and_password() {
        let errors = validate_login(&LoginForm::default());
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let errors = validate_login(&LoginForm {
            email: "nope".into(),
            password: "x".into(),
            remember_me: false,
        });
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert!(!errors.contains("password"));
    }

    #[test]
    fn register_checks_password_rules_and_confirmation() {
        let form = RegisterForm {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "weak".into(),
            confirm_password: "weaker".into(),
        };
        let errors = validate_register(&form);
        assert_eq!(errors.get("password"), Some(PASSWORD_RULE_MESSAGE));
        assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));

        let form = RegisterForm {
            password: "Str0ng!pass".into(),
            confirm_password: "Str0ng!pass".into(),
            ..form
        };
        assert!(validate_register(&form).is_empty());
        assert_eq!(form.to_request().full_name, "Ada Lovelace");
    }

    #[test]
    fn change_password_rejects_reuse() {
        let form = ChangePasswordForm {
            current_password: "Str0ng!pass".into(),
            new_password: "Str0ng!pass".into(),
            confirm_password: "Str0ng!pass".into(),
        };
        let errors = validate_change_password(&form);
        assert_eq!(
            errors.get("new_password"),
            Some("New password must differ from the current password")
        );
    }

    #[test]
    fn event_form_happy_path_produces_payload() {
        let form = valid_event();
        assert!(validate_event_form(&form, Some(now())).is_empty());
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.category, "competition");
        assert_eq!(payload.max_participants, Some(120));
        assert!(payload.registration_link.is_none());
    }

    #[test]
    fn event_form_date_rules() {
        let mut form = valid_event();
        form.start_datetime = "2024-12-01T09:00".into();
        form.end_datetime = "2024-11-30T09:00".into();
        form.registration_deadline = "2024-12-02T00:00".into();
        let errors = validate_event_form(&form, Some(now()));
        assert_eq!(errors.get("start_datetime"), Some("Start date cannot be in the past"));
        assert_eq!(errors.get("end_datetime"), Some("End date must be after start date"));
        assert_eq!(
            errors.get("registration_deadline"),
            Some("Registration deadline must be before the event starts")
        );

        // Edits skip the past check only.
        let errors = validate_event_form(&form, None);
        assert!(!errors.contains("start_datetime"));
        assert!(errors.contains("end_datetime"));
    }

    #[test]
    fn event_form_field_rules() {
        let form = EventForm {
            title: "Hi".into(),
            description: "short".into(),
            category: "party".into(),
            capacity: "0".into(),
            registration_link: "ftp://x".into(),
            ..EventForm::default()
        };
        let errors = validate_event_form(&form, Some(now()));
        assert_eq!(errors.get("title"), Some("Title must be at least 5 characters"));
        assert_eq!(errors.get("description"), Some("Description must be at least 20 characters"));
        assert_eq!(errors.get("category"), Some("Please choose a valid category"));
        assert_eq!(errors.get("location"), Some("Location is required"));
        assert_eq!(errors.get("start_datetime"), Some("Start date is required"));
        assert_eq!(errors.get("capacity"), Some("Capacity must be at least 1"));
        assert!(errors.contains("registration_link"));
        assert!(form.to_payload().is_err());
    }

    #[test]
    fn event_form_round_trips_an_event() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Chess Open",
            "category": "Sports",
            "start_datetime": "2025-05-01T10:00:00",
            "end_datetime": "2025-05-01T18:00:00",
            "max_participants": 16
        }))
        .unwrap();
        let form = EventForm::from_event(&event);
        assert_eq!(form.category, "sports");
        assert_eq!(form.start_datetime, "2025-05-01T10:00");
        assert_eq!(form.capacity, "16");
    }

    #[test]
    fn comment_rating_bounds() {
        let mut form = CommentForm {
            content: "Great talk, thanks!".into(),
            rating: "6".into(),
        };
        assert_eq!(validate_comment(&form).get("rating"), Some("Rating must be between 1 and 5"));
        form.rating = "4".into();
        assert!(validate_comment(&form).is_empty());
        assert_eq!(form.to_request(9).rating, Some(4));
        form.rating.clear();
        assert_eq!(form.to_request(9).rating, None);
    }

    #[test]
    fn attendee_phone_is_optional() {
        let mut form = AttendeeForm {
            full_name: "Sam".into(),
            email: "sam@example.com".into(),
            phone: String::new(),
        };
        assert!(validate_attendee(&form).is_empty());
        form.phone = "12".into();
        assert_eq!(validate_attendee(&form).get("phone"), Some("Please enter a valid phone number"));
    }
}
