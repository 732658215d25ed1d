use eventnow_shared::{ApiError, Event};

use crate::api_client::ApiClient;
use crate::config::endpoints;

pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 5;

impl ApiClient {
    pub async fn recommended_events(&self, limit: u32) -> Result<Vec<Event>, ApiError> {
        self.get_json_with_query(endpoints::RECOMMENDED_EVENTS, &[("limit", limit.to_string())])
            .await
    }

    pub async fn similar_events(&self, event_id: i64, limit: u32) -> Result<Vec<Event>, ApiError> {
        self.get_json_with_query(
            &endpoints::similar_events(event_id),
            &[("limit", limit.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::AuthStorage;
    use crate::testing::MockTransport;

    #[tokio::test]
    async fn recommended_sends_limit() {
        let mock = MockTransport::new();
        mock.push_json(200, json!([]));
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());

        let events = api
            .recommended_events(DEFAULT_RECOMMENDATION_LIMIT)
            .await
            .unwrap();

        assert!(events.is_empty());
        assert_eq!(
            mock.last_request().unwrap().url,
            "/recommendations/events?limit=5"
        );
    }

    #[tokio::test]
    async fn similar_is_keyed_by_event() {
        let mock = MockTransport::new();
        mock.push_json(200, json!([]));
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());

        api.similar_events(12, 3).await.unwrap();

        assert_eq!(
            mock.last_request().unwrap().url,
            "/recommendations/similar-events/12?limit=3"
        );
    }
}
