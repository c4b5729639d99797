//! FortiManager endpoints.

use crate::client::FpcClient;
use crate::models::{FortiManager, FortiManagerRequest, FortiManagerUpdate};
use crate::Result;
use fpc_core::ids::FortiManagerId;
use reqwest::StatusCode;
use tracing::info;

impl FpcClient {
    /// List registered FortiManagers.
    pub async fn list_fortimanagers(&self) -> Result<Vec<FortiManager>> {
        self.get_json("fortimanagers").await
    }

    /// Fetch a single FortiManager.
    pub async fn get_fortimanager(&self, fmid: FortiManagerId) -> Result<FortiManager> {
        self.get_json(&format!("fortimanagers/{fmid}")).await
    }

    /// Register a FortiManager and return the created resource.
    pub async fn create_fortimanager(&self, request: &FortiManagerRequest) -> Result<FortiManager> {
        info!(name = %request.forti_manager_name, "registering FortiManager");
        self.post_json("fortimanagers", request).await
    }

    /// Edit a FortiManager.
    ///
    /// The current resource is fetched and every field left unset on `update`
    /// is filled from it, so the API always receives all six fields.
    ///
    /// # Errors
    ///
    /// Fails with [`fpc_core::Error::ValidationError`] when `update` carries no
    /// password and the API does not return the stored one.
    pub async fn edit_fortimanager(
        &self,
        fmid: FortiManagerId,
        update: &FortiManagerUpdate,
    ) -> Result<StatusCode> {
        let current = self.get_fortimanager(fmid).await?;
        let body = update.apply_to(&current)?;

        info!(fortimanager_id = %fmid, "editing FortiManager");
        self.post_status(&format!("fortimanagers/{fmid}"), Some(&body))
            .await
    }

    /// Remove a FortiManager.
    pub async fn delete_fortimanager(&self, fmid: FortiManagerId) -> Result<StatusCode> {
        info!(fortimanager_id = %fmid, "deleting FortiManager");
        self.post_status::<()>(&format!("fortimanagers/delete/{fmid}"), None)
            .await
    }
}
