use eventnow_shared::{ApiError, CreateRegistrationRequest, Registration, RegistrationStatus};

use crate::api_client::ApiClient;
use crate::config::endpoints;

impl ApiClient {
    pub async fn register_for_event(&self, event_id: i64) -> Result<Registration, ApiError> {
        self.post_json(endpoints::REGISTRATIONS, &CreateRegistrationRequest { event_id })
            .await
    }

    /// Registrations of the signed-in user, each with its event embedded.
    pub async fn my_registrations(&self) -> Result<Vec<Registration>, ApiError> {
        self.get_json(endpoints::MY_REGISTRATIONS).await
    }

    pub async fn cancel_registration(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::registration(id)).await
    }

    /// The user's live registration for one event, if any.
    pub async fn registration_for_event(
        &self,
        event_id: i64,
    ) -> Result<Option<Registration>, ApiError> {
        let registrations = self.my_registrations().await?;
        Ok(registrations
            .into_iter()
            .find(|r| r.event_id == event_id && r.status != RegistrationStatus::Cancelled))
    }

    /// Cancel the user's registration for `event_id`. `Ok(false)` when there
    /// was nothing to cancel.
    pub async fn cancel_registration_for_event(&self, event_id: i64) -> Result<bool, ApiError> {
        match self.registration_for_event(event_id).await? {
            Some(registration) => {
                self.cancel_registration(registration.id).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api_client::ApiClient;
    use crate::storage::{AuthStorage, Persistence};
    use crate::testing::MockTransport;

    #[tokio::test]
    async fn register_posts_event_id_with_token() {
        let mock = MockTransport::new();
        mock.push_json(
            201,
            json!({"id": 9, "user_id": 1, "event_id": 3, "status": "confirmed"}),
        );
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());
        api.storage().set_token("t", Persistence::Session);

        let registration = api.register_for_event(3).await.unwrap();
        assert_eq!(registration.id, 9);

        let req = mock.last_request().unwrap();
        assert_eq!(req.url, "/registrations");
        assert_eq!(req.body.as_deref(), Some(r#"{"event_id":3}"#));
        assert_eq!(req.header("Authorization"), Some("Bearer t"));
    }

    #[tokio::test]
    async fn cancel_for_event_skips_cancelled_rows() {
        let mock = MockTransport::new();
        mock.push_json(
            200,
            json!([
                {"id": 4, "user_id": 1, "event_id": 3, "status": "cancelled"},
                {"id": 5, "user_id": 1, "event_id": 3, "status": "confirmed"},
                {"id": 6, "user_id": 1, "event_id": 8, "status": "confirmed"}
            ]),
        );
        mock.push(204, "");
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());
        api.storage().set_token("t", Persistence::Durable);

        assert!(api.cancel_registration_for_event(3).await.unwrap());
        let req = mock.last_request().unwrap();
        assert_eq!(req.url, "/registrations/5");
        assert_eq!(req.method.as_str(), "DELETE");
    }

    #[tokio::test]
    async fn cancel_for_event_without_registration_sends_nothing() {
        let mock = MockTransport::new();
        mock.push_json(200, json!([]));
        let api = ApiClient::new(mock.clone(), AuthStorage::in_memory());
        api.storage().set_token("t", Persistence::Durable);

        assert!(!api.cancel_registration_for_event(3).await.unwrap());
        assert_eq!(mock.requests().len(), 1);
    }
}
