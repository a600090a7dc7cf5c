use crate::ProfileStore;
use crate::remote::RemoteState;
use crate::remote::client::ApiResponse;
use crate::remote::provider_error::provider_message;

use ma_core::{Profile, StoreError, StoreResult};

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

const PROFILES_PATH: &str = "/rest/v1/profiles";

/// Rows in the provider's `profiles` table, authorized by the session token.
pub struct RemoteProfileStore {
    state: Arc<RemoteState>,
}

impl RemoteProfileStore {
    pub(crate) fn new(state: Arc<RemoteState>) -> Self {
        Self { state }
    }

    fn failure(response: &ApiResponse) -> String {
        format!(
            "provider returned {}: {}",
            response.status,
            provider_message(&response.body)
        )
    }
}

#[async_trait]
impl ProfileStore for RemoteProfileStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Profile>> {
        let client = &self.state.client;
        let token = self.state.access_token().await;
        let filter = format!("eq.{id}");
        let url = client
            .url(PROFILES_PATH, &[("id", filter.as_str()), ("select", "*")])
            .map_err(|e| StoreError::read(e.to_string()))?;

        let response = client
            .execute(client.request(Method::GET, url, token.as_deref()))
            .await
            .map_err(|e| StoreError::read(e.to_string()))?;

        if !response.status.is_success() {
            return Err(StoreError::read(Self::failure(&response)));
        }

        let rows: Vec<Profile> = serde_json::from_value(response.body)
            .map_err(|e| StoreError::read(format!("unexpected profile rows: {e}")))?;

        Ok(rows.into_iter().find(|row| row.id == id))
    }

    async fn create(&self, profile: &Profile) -> StoreResult<()> {
        let client = &self.state.client;
        let token = self.state.access_token().await;
        let url = client
            .url(PROFILES_PATH, &[])
            .map_err(|e| StoreError::write(e.to_string()))?;

        let request = client
            .request(Method::POST, url, token.as_deref())
            .header("Prefer", "return=minimal")
            .json(profile);
        let response = client
            .execute(request)
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        if !response.status.is_success() {
            return Err(StoreError::write(Self::failure(&response)));
        }

        Ok(())
    }

    async fn set_onboarded(&self, id: &str) -> StoreResult<()> {
        let client = &self.state.client;
        let token = self.state.access_token().await;
        let filter = format!("eq.{id}");
        let url = client
            .url(PROFILES_PATH, &[("id", filter.as_str())])
            .map_err(|e| StoreError::write(e.to_string()))?;

        let request = client
            .request(Method::PATCH, url, token.as_deref())
            .header("Prefer", "return=minimal")
            .json(&json!({ "onboarded": true }));
        let response = client
            .execute(request)
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        if !response.status.is_success() {
            return Err(StoreError::write(Self::failure(&response)));
        }

        Ok(())
    }
}
