//! Sections controller
//!
//! Sections are the top level of the phpIPAM hierarchy; every subnet lives in
//! exactly one section.

use crate::common::query::{encode, fetch_list, fetch_one, send_for_message, send_for_unit};
use crate::controllers::subnets::{Subnet, SubnetDto};
use crate::error::PhpIpamError;
use crate::scalar::{BoolInt, JsonInt, nullable_string};
use crate::transport::PhpIpamTransport;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Section wire record, as exchanged with `/sections/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionDto {
    /// The section ID.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub id: JsonInt,

    /// The section's name.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// The section's description.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// The ID of the section's parent, if nested.
    #[serde(rename = "masterSection", skip_serializing_if = "JsonInt::is_zero")]
    pub master_section: JsonInt,

    /// A JSON object, stringified, that represents the permissions for this section.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub permissions: String,

    /// Whether or not to check consistency for subnets and IP addresses.
    #[serde(rename = "strictMode", skip_serializing_if = "BoolInt::is_false")]
    pub strict_mode: BoolInt,

    /// How to order subnets in this section when viewing.
    #[serde(
        rename = "subnetOrdering",
        deserialize_with = "nullable_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub subnet_ordering: String,

    /// The order position of this section when displaying sections.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub order: JsonInt,

    /// The date of the last edit to this resource.
    #[serde(rename = "editDate", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub edit_date: String,

    /// Whether or not to show VLANs in the subnet listing of this section.
    #[serde(rename = "showVLAN", skip_serializing_if = "BoolInt::is_false")]
    pub show_vlan: BoolInt,

    /// Whether or not to show VRF information in the subnet listing of this section.
    #[serde(rename = "showVRF", skip_serializing_if = "BoolInt::is_false")]
    pub show_vrf: BoolInt,

    /// Whether or not to show only supernets in the subnet listing of this section.
    #[serde(rename = "showSupernetOnly", skip_serializing_if = "BoolInt::is_false")]
    pub show_supernet_only: BoolInt,

    /// The ID of the DNS resolver to be used for this section.
    #[serde(rename = "DNS", skip_serializing_if = "JsonInt::is_zero")]
    pub dns: JsonInt,
}

/// A phpIPAM section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    /// The section ID.
    pub id: i64,
    /// The section's name.
    pub name: String,
    /// The section's description.
    pub description: String,
    /// The ID of the section's parent, if nested.
    pub master_section: i64,
    /// A JSON object, stringified, that represents the permissions for this section.
    pub permissions: String,
    /// Whether or not to check consistency for subnets and IP addresses.
    pub strict_mode: BoolInt,
    /// How to order subnets in this section when viewing.
    pub subnet_ordering: String,
    /// The order position of this section when displaying sections.
    pub order: i64,
    /// The date of the last edit to this resource.
    pub edit_date: String,
    /// Whether or not to show VLANs in the subnet listing of this section.
    pub show_vlan: BoolInt,
    /// Whether or not to show VRF information in the subnet listing of this section.
    pub show_vrf: BoolInt,
    /// Whether or not to show only supernets in the subnet listing of this section.
    pub show_supernet_only: BoolInt,
    /// The ID of the DNS resolver to be used for this section.
    pub dns: i64,
}

impl From<SectionDto> for Section {
    fn from(dto: SectionDto) -> Self {
        Self {
            id: dto.id.into(),
            name: dto.name,
            description: dto.description,
            master_section: dto.master_section.into(),
            permissions: dto.permissions,
            strict_mode: dto.strict_mode,
            subnet_ordering: dto.subnet_ordering,
            order: dto.order.into(),
            edit_date: dto.edit_date,
            show_vlan: dto.show_vlan,
            show_vrf: dto.show_vrf,
            show_supernet_only: dto.show_supernet_only,
            dns: dto.dns.into(),
        }
    }
}

impl From<&Section> for SectionDto {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id.into(),
            name: section.name.clone(),
            description: section.description.clone(),
            master_section: section.master_section.into(),
            permissions: section.permissions.clone(),
            strict_mode: section.strict_mode,
            subnet_ordering: section.subnet_ordering.clone(),
            order: section.order.into(),
            edit_date: section.edit_date.clone(),
            show_vlan: section.show_vlan,
            show_vrf: section.show_vrf,
            show_supernet_only: section.show_supernet_only,
            dns: section.dns.into(),
        }
    }
}

/// Client for the sections controller
#[derive(Clone)]
pub struct SectionsController {
    transport: Arc<dyn PhpIpamTransport>,
}

impl SectionsController {
    /// Create a sections controller on top of `transport`
    pub fn new(transport: Arc<dyn PhpIpamTransport>) -> Self {
        Self { transport }
    }

    /// List all sections
    pub async fn list_sections(&self) -> Result<Vec<Section>, PhpIpamError> {
        debug!("Listing sections");
        let dtos: Vec<SectionDto> = fetch_list(self.transport.as_ref(), "/sections/").await?;
        Ok(dtos.into_iter().map(Section::from).collect())
    }

    /// Create a section by sending a POST request
    pub async fn create_section(&self, section: &Section) -> Result<String, PhpIpamError> {
        debug!("Creating section {}", section.name);
        let body = encode(&SectionDto::from(section))?;
        send_for_message(self.transport.as_ref(), Method::POST, "/sections/", Some(&body)).await
    }

    /// Get a section by ID
    pub async fn get_section_by_id(&self, id: i64) -> Result<Section, PhpIpamError> {
        debug!("Fetching section {}", id);
        let dto: SectionDto = fetch_one(self.transport.as_ref(), &format!("/sections/{}/", id)).await?;
        Ok(dto.into())
    }

    /// Get a section by name
    ///
    /// Unlike the other name lookups, this endpoint returns a single object.
    pub async fn get_section_by_name(&self, name: &str) -> Result<Section, PhpIpamError> {
        debug!("Fetching section by name {}", name);
        let path = format!("/sections/{}/", urlencoding::encode(name));
        let dto: SectionDto = fetch_one(self.transport.as_ref(), &path).await?;
        Ok(dto.into())
    }

    /// Get the subnets in a section
    pub async fn get_subnets_in_section(&self, id: i64) -> Result<Vec<Subnet>, PhpIpamError> {
        debug!("Fetching subnets in section {}", id);
        let dtos: Vec<SubnetDto> =
            fetch_list(self.transport.as_ref(), &format!("/sections/{}/subnets/", id)).await?;
        Ok(dtos.into_iter().map(Subnet::from).collect())
    }

    /// Update a section by sending a PATCH request
    pub async fn update_section(&self, section: &Section) -> Result<(), PhpIpamError> {
        debug!("Updating section {}", section.id);
        let body = encode(&SectionDto::from(section))?;
        send_for_unit(self.transport.as_ref(), Method::PATCH, "/sections/", Some(&body)).await
    }

    /// Delete a section
    ///
    /// phpIPAM deletes every subnet and address in the section as well; that
    /// cascade happens server-side and is a single call from here.
    pub async fn delete_section(&self, id: i64) -> Result<(), PhpIpamError> {
        debug!("Deleting section {}", id);
        send_for_unit(self.transport.as_ref(), Method::DELETE, &format!("/sections/{}/", id), None).await
    }
}
