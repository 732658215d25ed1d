use eventnow_shared::{AdminStats, ApiError};

use crate::api_client::ApiClient;
use crate::config::endpoints;

impl ApiClient {
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get_json(endpoints::ADMIN_STATS).await
    }
}
