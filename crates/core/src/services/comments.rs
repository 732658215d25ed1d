use eventnow_shared::{ApiError, Comment, CreateCommentRequest, UpdateCommentRequest};

use crate::api_client::ApiClient;
use crate::config::endpoints;

impl ApiClient {
    pub async fn event_comments(&self, event_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.get_json(&endpoints::event_comments(event_id)).await
    }

    pub async fn add_comment(&self, request: &CreateCommentRequest) -> Result<Comment, ApiError> {
        self.post_json(endpoints::COMMENTS, request).await
    }

    pub async fn update_comment(
        &self,
        id: i64,
        request: &UpdateCommentRequest,
    ) -> Result<Comment, ApiError> {
        self.put_json(&endpoints::comment(id), request).await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::comment(id)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::HttpMethod;
    use crate::storage::AuthStorage;
    use crate::testing::MockTransport;

    #[tokio::test]
    async fn comments_are_listed_per_event() {
        let mock = MockTransport::new();
        mock.push_json(200, json!([{"id": 1, "event_id": 7, "content": "Great"}]));
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());

        let comments = api.event_comments(7).await.unwrap();

        assert_eq!(comments[0].content, "Great");
        let req = mock.last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "/comments/event/7");
    }

    #[tokio::test]
    async fn add_posts_event_and_rating() {
        let mock = MockTransport::new();
        mock.push_json(200, json!({"id": 3, "event_id": 7, "content": "Nice", "rating": 4}));
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());

        let request = CreateCommentRequest {
            event_id: 7,
            content: "Nice".to_string(),
            rating: Some(4),
        };
        let comment = api.add_comment(&request).await.unwrap();

        assert_eq!(comment.rating, Some(4));
        let req = mock.last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "/comments");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"event_id": 7, "content": "Nice", "rating": 4}));
    }

    #[tokio::test]
    async fn delete_targets_the_comment() {
        let mock = MockTransport::new();
        mock.push(204, "");
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());

        api.delete_comment(9).await.unwrap();

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "/comments/9");
    }
}
