//! Request and response models for FPC endpoints.
//!
//! Response types keep every field the API sends: the ones this crate reads
//! are typed, the rest land in `extra`. Typed response fields are optional,
//! so a null or missing value does not fail the whole response. Request types
//! serialize only the fields the API expects, omitting optional ones that
//! were not set.

use fpc_core::ids::{AdomAssignmentId, CustomerId};
use fpc_core::session::{deserialize_optional_secret, serialize_secret};
use fpc_core::{Error, Result};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Entry in the customer listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// Customer id.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    /// Customer display name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Remaining fields as returned by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full customer record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    /// Customer display name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Contact first name.
    #[serde(default)]
    pub contact_fname: Option<String>,
    /// Contact last name.
    #[serde(default)]
    pub contact_lname: Option<String>,
    /// Contact e-mail address.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Storage allotment.
    #[serde(default)]
    pub total_storage: Option<u64>,
    /// First address line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// Second address line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Fax number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    /// Share of the storage allotment reserved for collectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_storage_percentage: Option<u32>,
    /// Remaining fields as returned by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request payload for creating a customer.
///
/// Both address lines are always sent, empty when not provided.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    /// Customer display name.
    pub customer_name: String,
    /// Contact first name.
    pub contact_fname: String,
    /// Contact last name.
    pub contact_lname: String,
    /// Contact e-mail address.
    pub contact_email: String,
    /// Storage allotment.
    pub total_storage: u64,
    /// First address line.
    pub address1: String,
    /// Second address line.
    pub address2: String,
}

impl CreateCustomerRequest {
    /// Create a request with the required fields and empty address lines.
    #[must_use]
    pub fn new(
        customer_name: impl Into<String>,
        contact_fname: impl Into<String>,
        contact_lname: impl Into<String>,
        contact_email: impl Into<String>,
        total_storage: u64,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            contact_fname: contact_fname.into(),
            contact_lname: contact_lname.into(),
            contact_email: contact_email.into(),
            total_storage,
            address1: String::new(),
            address2: String::new(),
        }
    }

    /// Set both address lines.
    #[must_use]
    pub fn with_address(mut self, address1: impl Into<String>, address2: impl Into<String>) -> Self {
        self.address1 = address1.into();
        self.address2 = address2.into();
        self
    }
}

/// Fields to change on an existing customer. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerUpdate {
    /// Contact first name.
    pub contact_fname: Option<String>,
    /// Contact last name.
    pub contact_lname: Option<String>,
    /// Contact e-mail address.
    pub contact_email: Option<String>,
    /// Storage allotment.
    pub total_storage: Option<u64>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Fax number.
    pub fax: Option<String>,
    /// Share of the storage allotment reserved for collectors.
    pub collector_storage_percentage: Option<u32>,
}

impl CustomerUpdate {
    /// Build the full update body: required fields from `current`, overlaid
    /// with every field set on `self`. A required field that `current` lacks
    /// and `self` does not set is sent as null.
    #[must_use]
    pub fn apply_to(&self, current: &Customer) -> UpdateCustomerRequest {
        UpdateCustomerRequest {
            customer_name: current.customer_name.clone(),
            contact_fname: self
                .contact_fname
                .clone()
                .or_else(|| current.contact_fname.clone()),
            contact_lname: self
                .contact_lname
                .clone()
                .or_else(|| current.contact_lname.clone()),
            contact_email: self
                .contact_email
                .clone()
                .or_else(|| current.contact_email.clone()),
            total_storage: self.total_storage.or(current.total_storage),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
            phone: self.phone.clone(),
            fax: self.fax.clone(),
            collector_storage_percentage: self.collector_storage_percentage,
        }
    }
}

/// Body sent to `POST /customers/{id}`.
///
/// The five required fields are always present, null when unknown.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    /// Customer display name.
    pub customer_name: Option<String>,
    /// Contact first name.
    pub contact_fname: Option<String>,
    /// Contact last name.
    pub contact_lname: Option<String>,
    /// Contact e-mail address.
    pub contact_email: Option<String>,
    /// Storage allotment.
    pub total_storage: Option<u64>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Fax number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    /// Share of the storage allotment reserved for collectors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector_storage_percentage: Option<u32>,
}

/// ADOM assignment for a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAdoms {
    /// Assignment id.
    pub id: AdomAssignmentId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// ADOM entries, passed through as given.
    #[serde(default)]
    pub adoms: Vec<Value>,
}

/// Request payload for creating a customer user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerUserRequest {
    /// Login name.
    pub user_name: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// E-mail address.
    pub email: String,
    /// Initial password.
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

impl CreateCustomerUserRequest {
    /// Create a request from its fields.
    #[must_use]
    pub fn new(
        user_name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// FortiManager registered with FPC.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortiManager {
    /// Display name.
    #[serde(default)]
    pub forti_manager_name: Option<String>,
    /// Management address.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Admin account used by FPC.
    #[serde(default)]
    pub admin_user_name: Option<String>,
    /// Admin password, when the API returns it.
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub admin_password: Option<SecretString>,
    /// Polling frequency.
    #[serde(default)]
    pub frequency_value: Option<u32>,
    /// Management port.
    #[serde(default)]
    pub port_number: Option<u16>,
    /// Remaining fields as returned by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for creating a FortiManager. All fields are required.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FortiManagerRequest {
    /// Display name.
    pub forti_manager_name: String,
    /// Management address.
    pub ip_address: String,
    /// Admin account used by FPC.
    pub admin_user_name: String,
    /// Admin password.
    #[serde(serialize_with = "serialize_secret")]
    pub admin_password: SecretString,
    /// Polling frequency.
    pub frequency_value: u32,
    /// Management port.
    pub port_number: u16,
}

impl FortiManagerRequest {
    /// Create a request from its fields.
    #[must_use]
    pub fn new(
        forti_manager_name: impl Into<String>,
        ip_address: impl Into<String>,
        admin_user_name: impl Into<String>,
        admin_password: impl Into<String>,
        frequency_value: u32,
        port_number: u16,
    ) -> Self {
        Self {
            forti_manager_name: forti_manager_name.into(),
            ip_address: ip_address.into(),
            admin_user_name: admin_user_name.into(),
            admin_password: SecretString::from(admin_password.into()),
            frequency_value,
            port_number,
        }
    }
}

/// Fields to change on a FortiManager. Unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct FortiManagerUpdate {
    /// Display name.
    pub forti_manager_name: Option<String>,
    /// Management address.
    pub ip_address: Option<String>,
    /// Admin account used by FPC.
    pub admin_user_name: Option<String>,
    /// Admin password.
    pub admin_password: Option<SecretString>,
    /// Polling frequency.
    pub frequency_value: Option<u32>,
    /// Management port.
    pub port_number: Option<u16>,
}

impl FortiManagerUpdate {
    /// Fill every unset field from `current`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] when no password is set here and the
    /// API did not return one for `current`.
    pub fn apply_to(&self, current: &FortiManager) -> Result<UpdateFortiManagerRequest> {
        let admin_password = self
            .admin_password
            .clone()
            .or_else(|| current.admin_password.clone())
            .ok_or_else(|| {
                Error::ValidationError(format!(
                    "FortiManager `{}` has no stored admin password; set admin_password",
                    current.forti_manager_name.as_deref().unwrap_or_default()
                ))
            })?;

        Ok(UpdateFortiManagerRequest {
            forti_manager_name: self
                .forti_manager_name
                .clone()
                .or_else(|| current.forti_manager_name.clone()),
            ip_address: self
                .ip_address
                .clone()
                .or_else(|| current.ip_address.clone()),
            admin_user_name: self
                .admin_user_name
                .clone()
                .or_else(|| current.admin_user_name.clone()),
            admin_password,
            frequency_value: self.frequency_value.or(current.frequency_value),
            port_number: self.port_number.or(current.port_number),
        })
    }
}

/// Body sent to `POST /fortimanagers/{id}`.
///
/// All six fields are always present; values the API did not return are
/// sent as null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFortiManagerRequest {
    /// Display name.
    pub forti_manager_name: Option<String>,
    /// Management address.
    pub ip_address: Option<String>,
    /// Admin account used by FPC.
    pub admin_user_name: Option<String>,
    /// Admin password.
    #[serde(serialize_with = "serialize_secret")]
    pub admin_password: SecretString,
    /// Polling frequency.
    pub frequency_value: Option<u32>,
    /// Management port.
    pub port_number: Option<u16>,
}

/// Customer site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site network name.
    #[serde(default)]
    pub network_name: Option<String>,
    /// Site contact name.
    #[serde(default)]
    pub contact_name: Option<String>,
    /// Site contact e-mail address.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Provisioning status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Device models provisioned at the site.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fpc_device_models: Vec<Value>,
    /// Remaining fields as returned by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for creating a site.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteRequest {
    /// Site network name.
    pub network_name: String,
    /// Site contact name.
    pub contact_name: String,
    /// Site contact e-mail address.
    pub contact_email: String,
    /// Provisioning status, sent only when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Device models, sent only when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fpc_device_models: Vec<Value>,
}

impl SiteRequest {
    /// Create a request with the required fields.
    #[must_use]
    pub fn new(
        network_name: impl Into<String>,
        contact_name: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Self {
        Self {
            network_name: network_name.into(),
            contact_name: contact_name.into(),
            contact_email: contact_email.into(),
            status: None,
            fpc_device_models: Vec::new(),
        }
    }

    /// Set the provisioning status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the device models.
    #[must_use]
    pub fn with_device_models(mut self, models: Vec<Value>) -> Self {
        self.fpc_device_models = models;
        self
    }
}

/// Fields to change on a site. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteUpdate {
    /// Site network name.
    pub network_name: Option<String>,
    /// Site contact name.
    pub contact_name: Option<String>,
    /// Site contact e-mail address.
    pub contact_email: Option<String>,
    /// Provisioning status.
    pub status: Option<String>,
    /// Device models.
    pub fpc_device_models: Option<Vec<Value>>,
}

impl SiteUpdate {
    /// Overlay the set fields on `current`.
    #[must_use]
    pub fn apply_to(&self, current: &Site) -> UpdateSiteRequest {
        UpdateSiteRequest {
            network_name: self
                .network_name
                .clone()
                .or_else(|| current.network_name.clone()),
            contact_name: self
                .contact_name
                .clone()
                .or_else(|| current.contact_name.clone()),
            contact_email: self
                .contact_email
                .clone()
                .or_else(|| current.contact_email.clone()),
            status: self.status.clone().or_else(|| current.status.clone()),
            fpc_device_models: self
                .fpc_device_models
                .clone()
                .unwrap_or_else(|| current.fpc_device_models.clone()),
        }
    }
}

/// Body sent to `POST /customers/{cid}/sites/{sid}`.
///
/// Name and contact fields are always present, null when unknown.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteRequest {
    /// Site network name.
    pub network_name: Option<String>,
    /// Site contact name.
    pub contact_name: Option<String>,
    /// Site contact e-mail address.
    pub contact_email: Option<String>,
    /// Provisioning status, sent only when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Device models, sent only when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fpc_device_models: Vec<Value>,
}

/// Wi-Fi network at a customer site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WifiNetwork {
    /// Network name.
    #[serde(default)]
    pub wifi_network_name: Option<String>,
    /// Contact name.
    #[serde(default)]
    pub contact_name: Option<String>,
    /// Contact e-mail address.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Provisioning status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// FortiAP models serving the network.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fpcw_fap_models: Vec<Value>,
    /// Remaining fields as returned by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for creating a Wi-Fi network.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WifiNetworkRequest {
    /// Network name.
    pub wifi_network_name: String,
    /// Contact name.
    pub contact_name: String,
    /// Contact e-mail address.
    pub contact_email: String,
    /// Provisioning status, sent only when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// FortiAP models, sent only when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fpcw_fap_models: Vec<Value>,
}

impl WifiNetworkRequest {
    /// Create a request with the required fields.
    #[must_use]
    pub fn new(
        wifi_network_name: impl Into<String>,
        contact_name: impl Into<String>,
        contact_email: impl Into<String>,
    ) -> Self {
        Self {
            wifi_network_name: wifi_network_name.into(),
            contact_name: contact_name.into(),
            contact_email: contact_email.into(),
            status: None,
            fpcw_fap_models: Vec::new(),
        }
    }

    /// Set the provisioning status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the FortiAP models.
    #[must_use]
    pub fn with_fap_models(mut self, models: Vec<Value>) -> Self {
        self.fpcw_fap_models = models;
        self
    }
}

/// Fields to change on a Wi-Fi network. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WifiNetworkUpdate {
    /// Network name.
    pub wifi_network_name: Option<String>,
    /// Contact name.
    pub contact_name: Option<String>,
    /// Contact e-mail address.
    pub contact_email: Option<String>,
    /// Provisioning status.
    pub status: Option<String>,
    /// FortiAP models.
    pub fpcw_fap_models: Option<Vec<Value>>,
}

impl WifiNetworkUpdate {
    /// Overlay the set fields on `current`.
    #[must_use]
    pub fn apply_to(&self, current: &WifiNetwork) -> UpdateWifiNetworkRequest {
        UpdateWifiNetworkRequest {
            wifi_network_name: self
                .wifi_network_name
                .clone()
                .or_else(|| current.wifi_network_name.clone()),
            contact_name: self
                .contact_name
                .clone()
                .or_else(|| current.contact_name.clone()),
            contact_email: self
                .contact_email
                .clone()
                .or_else(|| current.contact_email.clone()),
            status: self.status.clone().or_else(|| current.status.clone()),
            fpcw_fap_models: self
                .fpcw_fap_models
                .clone()
                .unwrap_or_else(|| current.fpcw_fap_models.clone()),
        }
    }
}

/// Body sent to `POST /customers/{cid}/sites/{sid}/wifinetworks/{wid}`.
///
/// Name and contact fields are always present, null when unknown.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWifiNetworkRequest {
    /// Network name.
    pub wifi_network_name: Option<String>,
    /// Contact name.
    pub contact_name: Option<String>,
    /// Contact e-mail address.
    pub contact_email: Option<String>,
    /// Provisioning status, sent only when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// FortiAP models, sent only when non-empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fpcw_fap_models: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
