//! System provisioning endpoints.
//!
//! These are read-only listings whose payloads are returned as raw JSON.

use crate::client::FpcClient;
use crate::Result;
use fpc_core::ids::{CountryId, CustomerId, RoleId};
use serde_json::Value;

impl FpcClient {
    /// Controllers known to FPC.
    pub async fn get_controllers(&self) -> Result<Value> {
        self.get_json("controllers").await
    }

    /// Managed devices.
    pub async fn list_devices(&self) -> Result<Value> {
        self.get_json("devices").await
    }

    /// Administrative domains.
    pub async fn list_adoms(&self) -> Result<Value> {
        self.get_json("adoms").await
    }

    /// User roles.
    pub async fn list_roles(&self) -> Result<Value> {
        self.get_json("roles").await
    }

    /// A single user role.
    pub async fn get_role(&self, id: RoleId) -> Result<Value> {
        self.get_json(&format!("roles/{id}")).await
    }

    /// FortiAP inventory.
    pub async fn list_faps(&self) -> Result<Value> {
        self.get_json("faps").await
    }

    /// Audit log entries.
    pub async fn list_audit_logs(&self) -> Result<Value> {
        self.get_json("auditlogs").await
    }

    /// Active alerts.
    pub async fn list_alerts(&self) -> Result<Value> {
        self.get_json("alerts").await
    }

    /// Cloud storage usage across customers.
    pub async fn list_cloud_usage(&self) -> Result<Value> {
        self.get_json("cloudusage").await
    }

    /// Cloud storage usage of one customer.
    pub async fn get_customer_cloud_usage(&self, cid: CustomerId) -> Result<Value> {
        self.get_json(&format!("cloudusage/{cid}")).await
    }

    /// Supported countries.
    pub async fn list_countries(&self) -> Result<Value> {
        self.get_json("countries").await
    }

    /// A single country.
    pub async fn get_country(&self, id: CountryId) -> Result<Value> {
        self.get_json(&format!("countries/{id}")).await
    }

    /// System users.
    pub async fn list_users(&self) -> Result<Value> {
        self.get_json("users").await
    }
}
