use eventnow_shared::{ApiError, Event, EventCategory, EventDetail, EventPayload, Registration};

use crate::api_client::ApiClient;
use crate::config::{endpoints, DEFAULT_PAGE_SIZE};

/// Filters for the public event list. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub category: Option<EventCategory>,
    pub upcoming_only: bool,
    pub page: u32,
    pub limit: u32,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            category: None,
            upcoming_only: true,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl EventQuery {
    pub fn with_category(mut self, category: Option<EventCategory>) -> Self {
        self.category = category;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn including_past(mut self) -> Self {
        self.upcoming_only = false;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Offset of the first row on the current page.
    pub fn skip(&self) -> u32 {
        self.page.max(1).saturating_sub(1).saturating_mul(self.limit)
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("skip", self.skip().to_string()),
            ("limit", self.limit.to_string()),
            (
                "category",
                self.category.map(|c| c.as_str().to_string()).unwrap_or_default(),
            ),
            ("upcoming_only", self.upcoming_only.to_string()),
        ]
    }
}

impl ApiClient {
    pub async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, ApiError> {
        self.get_json_with_query(endpoints::EVENTS, &query.to_pairs()).await
    }

    pub async fn get_event(&self, id: i64) -> Result<EventDetail, ApiError> {
        self.get_json(&endpoints::event(id)).await
    }

    pub async fn create_event(&self, payload: &EventPayload) -> Result<Event, ApiError> {
        self.post_json(endpoints::EVENTS, payload).await
    }

    pub async fn update_event(&self, id: i64, payload: &EventPayload) -> Result<Event, ApiError> {
        self.put_json(&endpoints::event(id), payload).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::event(id)).await
    }

    pub async fn event_registrations(&self, id: i64) -> Result<Vec<Registration>, ApiError> {
        self.get_json(&endpoints::event_registrations(id)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::AuthStorage;
    use crate::testing::MockTransport;

    #[test]
    fn pages_translate_to_offsets() {
        let query = EventQuery::default().with_page(3);
        assert_eq!(query.skip(), 20);
        assert_eq!(EventQuery::default().with_page(0).skip(), 0);
    }

    #[tokio::test]
    async fn list_sends_filters() {
        let mock = MockTransport::new();
        mock.push_json(200, json!([]));
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());

        let query = EventQuery::default()
            .with_category(Some(EventCategory::Workshop))
            .with_page(2);
        let events = api.list_events(&query).await.unwrap();

        assert!(events.is_empty());
        assert_eq!(
            mock.last_request().unwrap().url,
            "/events?skip=10&limit=10&category=workshop&upcoming_only=true"
        );
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let mock = MockTransport::new();
        mock.push(204, "");
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());
        api.delete_event(4).await.unwrap();
        assert_eq!(mock.last_request().unwrap().url, "/events/4");
    }
}
