//! Customer site and Wi-Fi network endpoints.

use crate::client::FpcClient;
use crate::models::{
    Site, SiteRequest, SiteUpdate, WifiNetwork, WifiNetworkRequest, WifiNetworkUpdate,
};
use crate::Result;
use fpc_core::ids::{CustomerId, SiteId, WifiNetworkId};
use reqwest::StatusCode;
use tracing::info;

fn site_path(cid: CustomerId, sid: SiteId) -> String {
    format!("customers/{cid}/sites/{sid}")
}

impl FpcClient {
    /// List the sites of a customer.
    pub async fn list_customer_sites(&self, cid: CustomerId) -> Result<Vec<Site>> {
        self.get_json(&format!("customers/{cid}/sites")).await
    }

    /// Fetch a single site.
    pub async fn get_customer_site(&self, cid: CustomerId, sid: SiteId) -> Result<Site> {
        self.get_json(&site_path(cid, sid)).await
    }

    /// Create a site and return it.
    pub async fn create_customer_site(
        &self,
        cid: CustomerId,
        request: &SiteRequest,
    ) -> Result<Site> {
        info!(customer_id = %cid, network = %request.network_name, "creating site");
        self.post_json(&format!("customers/{cid}/sites"), request)
            .await
    }

    /// Edit a site: fetch it, overlay the fields set on `update`, post it back.
    pub async fn edit_customer_site(
        &self,
        cid: CustomerId,
        sid: SiteId,
        update: &SiteUpdate,
    ) -> Result<StatusCode> {
        let current = self.get_customer_site(cid, sid).await?;
        let body = update.apply_to(&current);

        info!(customer_id = %cid, site_id = %sid, "editing site");
        self.post_status(&site_path(cid, sid), Some(&body)).await
    }

    /// Delete a site.
    pub async fn delete_customer_site(&self, cid: CustomerId, sid: SiteId) -> Result<StatusCode> {
        info!(customer_id = %cid, site_id = %sid, "deleting site");
        self.post_status::<()>(&format!("customers/{cid}/sites/delete/{sid}"), None)
            .await
    }

    /// List the Wi-Fi networks of a site.
    pub async fn list_customer_wifi(
        &self,
        cid: CustomerId,
        sid: SiteId,
    ) -> Result<Vec<WifiNetwork>> {
        self.get_json(&format!("{}/wifinetworks", site_path(cid, sid)))
            .await
    }

    /// Fetch a single Wi-Fi network.
    pub async fn get_customer_wifi(
        &self,
        cid: CustomerId,
        sid: SiteId,
        wid: WifiNetworkId,
    ) -> Result<WifiNetwork> {
        self.get_json(&format!("{}/wifinetworks/{wid}", site_path(cid, sid)))
            .await
    }

    /// Create a Wi-Fi network and return it.
    pub async fn create_customer_wifi(
        &self,
        cid: CustomerId,
        sid: SiteId,
        request: &WifiNetworkRequest,
    ) -> Result<WifiNetwork> {
        info!(
            customer_id = %cid,
            site_id = %sid,
            network = %request.wifi_network_name,
            "creating wifi network"
        );
        self.post_json(&format!("{}/wifinetworks", site_path(cid, sid)), request)
            .await
    }

    /// Edit a Wi-Fi network: fetch it, overlay the fields set on `update`,
    /// post it back.
    pub async fn edit_customer_wifi(
        &self,
        cid: CustomerId,
        sid: SiteId,
        wid: WifiNetworkId,
        update: &WifiNetworkUpdate,
    ) -> Result<StatusCode> {
        let current = self.get_customer_wifi(cid, sid, wid).await?;
        let body = update.apply_to(&current);

        info!(customer_id = %cid, site_id = %sid, wifi_id = %wid, "editing wifi network");
        self.post_status(
            &format!("{}/wifinetworks/{wid}", site_path(cid, sid)),
            Some(&body),
        )
        .await
    }

    /// Delete a Wi-Fi network.
    pub async fn delete_customer_wifi(
        &self,
        cid: CustomerId,
        sid: SiteId,
        wid: WifiNetworkId,
    ) -> Result<StatusCode> {
        info!(customer_id = %cid, site_id = %sid, wifi_id = %wid, "deleting wifi network");
        self.post_status::<()>(
            &format!("{}/wifinetworks/delete/{wid}", site_path(cid, sid)),
            None,
        )
        .await
    }
}
