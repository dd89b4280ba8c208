//! VLANs controller

use crate::common::query::{encode, fetch_list, fetch_one, filter_path, send_for_message};
use crate::custom_fields::{self, CustomFieldSchema, CustomFields};
use crate::error::PhpIpamError;
use crate::scalar::{JsonInt, nullable_string};
use crate::transport::PhpIpamTransport;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

const CONTROLLER: &str = "vlans";

/// VLAN wire record, as exchanged with `/vlans/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanDto {
    /// The VLAN ID. This is the entry ID in the phpIPAM database, not the VLAN number.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub id: JsonInt,

    /// The L2 domain that the VLAN belongs to.
    #[serde(rename = "domainId", skip_serializing_if = "JsonInt::is_zero")]
    pub domain_id: JsonInt,

    /// The VLAN name.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The VLAN tag number.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub number: JsonInt,

    /// A detailed description of the VLAN.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// The date of the last edit to this resource.
    #[serde(rename = "editDate", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub edit_date: String,

    /// Custom fields, when nested custom fields are enabled server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<CustomFields>,
}

/// A phpIPAM VLAN
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vlan {
    /// The VLAN ID. This is the entry ID in the phpIPAM database, not the VLAN number.
    pub id: i64,
    /// The L2 domain that the VLAN belongs to.
    pub domain_id: i64,
    /// The VLAN name.
    pub name: String,
    /// The VLAN tag number.
    pub number: i64,
    /// A detailed description of the VLAN.
    pub description: String,
    /// The date of the last edit to this resource.
    pub edit_date: String,
    /// Custom fields, when nested custom fields are enabled server-side.
    pub custom_fields: Option<CustomFields>,
}

impl From<VlanDto> for Vlan {
    fn from(dto: VlanDto) -> Self {
        Self {
            id: dto.id.into(),
            domain_id: dto.domain_id.into(),
            name: dto.name,
            number: dto.number.into(),
            description: dto.description,
            edit_date: dto.edit_date,
            custom_fields: dto.custom_fields,
        }
    }
}

impl From<&Vlan> for VlanDto {
    fn from(vlan: &Vlan) -> Self {
        Self {
            id: vlan.id.into(),
            domain_id: vlan.domain_id.into(),
            name: vlan.name.clone(),
            number: vlan.number.into(),
            description: vlan.description.clone(),
            edit_date: vlan.edit_date.clone(),
            custom_fields: vlan.custom_fields.clone(),
        }
    }
}

/// Client for the VLANs controller
#[derive(Clone)]
pub struct VlansController {
    transport: Arc<dyn PhpIpamTransport>,
}

impl VlansController {
    /// Create a VLANs controller on top of `transport`
    pub fn new(transport: Arc<dyn PhpIpamTransport>) -> Self {
        Self { transport }
    }

    /// Create a VLAN by sending a POST request
    pub async fn create_vlan(&self, vlan: &Vlan) -> Result<String, PhpIpamError> {
        debug!("Creating VLAN {} ({})", vlan.number, vlan.name);
        let body = encode(&VlanDto::from(vlan))?;
        send_for_message(self.transport.as_ref(), Method::POST, "/vlans/", Some(&body)).await
    }

    /// Get a VLAN by database ID
    pub async fn get_vlan_by_id(&self, id: i64) -> Result<Vlan, PhpIpamError> {
        debug!("Fetching VLAN {}", id);
        let dto: VlanDto = fetch_one(self.transport.as_ref(), &format!("/vlans/{}/", id)).await?;
        Ok(dto.into())
    }

    /// Search for VLANs by tag number
    ///
    /// The same number can exist once per L2 domain, hence a list.
    pub async fn get_vlans_by_number(&self, number: i64) -> Result<Vec<Vlan>, PhpIpamError> {
        debug!("Searching VLANs for number {}", number);
        let dtos: Vec<VlanDto> =
            fetch_list(self.transport.as_ref(), &format!("/vlans/search/{}/", number)).await?;
        Ok(dtos.into_iter().map(Vlan::from).collect())
    }

    /// Search for VLANs by tag number within one L2 domain
    pub async fn get_vlans_by_number_and_domain_id(
        &self,
        number: i64,
        domain_id: i64,
    ) -> Result<Vec<Vlan>, PhpIpamError> {
        debug!("Searching VLANs for number {} in domain {}", number, domain_id);
        let path = filter_path(&format!("/vlans/search/{}/", number), "domainId", &domain_id.to_string());
        let dtos: Vec<VlanDto> = fetch_list(self.transport.as_ref(), &path).await?;
        Ok(dtos.into_iter().map(Vlan::from).collect())
    }

    /// Get the custom field schema of the VLANs controller
    pub async fn get_vlan_custom_fields_schema(&self) -> Result<CustomFieldSchema, PhpIpamError> {
        custom_fields::get_custom_fields_schema(self.transport.as_ref(), CONTROLLER).await
    }

    /// Get the custom field values of a VLAN
    pub async fn get_vlan_custom_fields(&self, id: i64) -> Result<CustomFields, PhpIpamError> {
        custom_fields::get_custom_fields(self.transport.as_ref(), id, CONTROLLER).await
    }

    /// Update a VLAN by sending a PATCH request
    pub async fn update_vlan(&self, vlan: &Vlan) -> Result<String, PhpIpamError> {
        debug!("Updating VLAN {}", vlan.id);
        let body = encode(&VlanDto::from(vlan))?;
        send_for_message(self.transport.as_ref(), Method::PATCH, "/vlans/", Some(&body)).await
    }

    /// Update the custom fields of a VLAN
    ///
    /// Every key of `fields` must exist in the VLAN custom field schema.
    /// phpIPAM requires the VLAN name on every PATCH, so it is sent along.
    ///
    /// # Returns
    /// * `Ok(String)` - Server confirmation message
    /// * `Err(PhpIpamError::UnknownCustomField)` - A key is not in the schema;
    ///   nothing was modified
    pub async fn update_vlan_custom_fields(
        &self,
        id: i64,
        name: &str,
        fields: &CustomFields,
    ) -> Result<String, PhpIpamError> {
        debug!("Updating custom fields of VLAN {}", id);
        let schema = self.get_vlan_custom_fields_schema().await?;
        if let Err(err) = custom_fields::validate_custom_fields(&schema, fields, CONTROLLER) {
            warn!("Refusing VLAN {} custom field update: {}", id, err);
            return Err(err);
        }

        let mut params = fields.clone();
        params.insert("id".to_string(), Value::from(id));
        params.insert("name".to_string(), Value::from(name));
        send_for_message(
            self.transport.as_ref(),
            Method::PATCH,
            "/vlans/",
            Some(&encode(&params)?),
        )
        .await
    }

    /// Delete a VLAN by database ID
    pub async fn delete_vlan(&self, id: i64) -> Result<String, PhpIpamError> {
        debug!("Deleting VLAN {}", id);
        send_for_message(
            self.transport.as_ref(),
            Method::DELETE,
            &format!("/vlans/{}/", id),
            None,
        )
        .await
    }
}
