//! Subnets controller

use crate::common::query::{encode, fetch_list, fetch_one, filter_path, send_for_message};
use crate::controllers::addresses::{Address, AddressDto};
use crate::custom_fields::{self, CustomFieldSchema, CustomFields};
use crate::error::PhpIpamError;
use crate::scalar::{BoolInt, JsonInt, nullable_string};
use crate::transport::PhpIpamTransport;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

const CONTROLLER: &str = "subnets";

/// Subnet wire record, as exchanged with `/subnets/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubnetDto {
    /// The subnet ID.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub id: JsonInt,

    /// The subnet address, in dotted quad format (i.e. A.B.C.D).
    #[serde(rename = "subnet", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub subnet_address: String,

    /// The subnet's mask in number of bits (i.e. 24).
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub mask: JsonInt,

    /// A detailed description of the subnet.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// The section ID to add the subnet to (required when adding).
    #[serde(rename = "sectionId", skip_serializing_if = "JsonInt::is_zero")]
    pub section_id: JsonInt,

    /// The ID of a linked IPv6 subnet.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub linked_subnet: JsonInt,

    /// The ID of the VLAN that this subnet belongs to.
    #[serde(rename = "vlanId", skip_serializing_if = "JsonInt::is_zero")]
    pub vlan_id: JsonInt,

    /// The ID of the VRF this subnet belongs to.
    #[serde(rename = "vrfId", skip_serializing_if = "JsonInt::is_zero")]
    pub vrf_id: JsonInt,

    /// The parent subnet ID if this is a nested subnet.
    #[serde(rename = "masterSubnetId", skip_serializing_if = "JsonInt::is_zero")]
    pub master_subnet_id: JsonInt,

    /// The ID of the nameserver to attach the subnet to.
    #[serde(rename = "nameserverId", skip_serializing_if = "JsonInt::is_zero")]
    pub nameserver_id: JsonInt,

    /// The ID and IPs of the nameservers for the subnet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<BTreeMap<String, Value>>,

    /// Show the name in listings instead of the subnet address.
    #[serde(rename = "showName", skip_serializing_if = "BoolInt::is_false")]
    pub show_name: BoolInt,

    /// A JSON object, stringified, that represents the permissions for this subnet.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub permissions: String,

    /// Controls if PTR records should be created for the subnet.
    #[serde(rename = "DNSrecursive", skip_serializing_if = "BoolInt::is_false")]
    pub dns_recursive: BoolInt,

    /// Controls if DNS hostname records are displayed.
    #[serde(rename = "DNSrecords", skip_serializing_if = "BoolInt::is_false")]
    pub dns_records: BoolInt,

    /// Controls if IP requests are allowed for the subnet.
    #[serde(rename = "allowRequests", skip_serializing_if = "BoolInt::is_false")]
    pub allow_requests: BoolInt,

    /// The ID of the scan agent to use for the subnet.
    #[serde(rename = "scanAgent", skip_serializing_if = "JsonInt::is_zero")]
    pub scan_agent: JsonInt,

    /// Controls if the subnet should be included in status checks.
    #[serde(rename = "pingSubnet", skip_serializing_if = "BoolInt::is_false")]
    pub ping_subnet: BoolInt,

    /// Controls if new hosts should be discovered for new host scans.
    #[serde(rename = "discoverSubnet", skip_serializing_if = "BoolInt::is_false")]
    pub discover_subnet: BoolInt,

    /// Marks this record as a folder rather than a subnet.
    #[serde(rename = "isFolder", skip_serializing_if = "BoolInt::is_false")]
    pub is_folder: BoolInt,

    /// Permits allocation of the network and broadcast addresses.
    #[serde(rename = "isPool", skip_serializing_if = "BoolInt::is_false")]
    pub is_pool: BoolInt,

    /// Marks the subnet as used.
    #[serde(rename = "isFull", skip_serializing_if = "BoolInt::is_false")]
    pub is_full: BoolInt,

    /// The usage threshold of the subnet, in percent.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub threshold: JsonInt,

    /// The location index of the subnet.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub location: JsonInt,

    /// The date of the last edit to this resource.
    #[serde(rename = "editDate", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub edit_date: String,

    /// Gateway IP and the ID of the gateway address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<BTreeMap<String, Value>>,

    /// ID of the gateway address.
    #[serde(rename = "gatewayId", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub gateway_id: String,

    /// Custom fields, when nested custom fields are enabled server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<CustomFields>,

    /// Controls the resolve DNS function.
    #[serde(rename = "resolveDNS", skip_serializing_if = "BoolInt::is_false")]
    pub resolve_dns: BoolInt,
}

/// A phpIPAM subnet (or folder)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subnet {
    /// The subnet ID.
    pub id: i64,
    /// The subnet address, in dotted quad format (i.e. A.B.C.D).
    pub subnet_address: String,
    /// The subnet's mask in number of bits (i.e. 24).
    pub mask: i64,
    /// A detailed description of the subnet.
    pub description: String,
    /// The section ID to add the subnet to (required when adding).
    pub section_id: i64,
    /// The ID of a linked IPv6 subnet.
    pub linked_subnet: i64,
    /// The ID of the VLAN that this subnet belongs to.
    pub vlan_id: i64,
    /// The ID of the VRF this subnet belongs to.
    pub vrf_id: i64,
    /// The parent subnet ID if this is a nested subnet.
    pub master_subnet_id: i64,
    /// The ID of the nameserver to attach the subnet to.
    pub nameserver_id: i64,
    /// The ID and IPs of the nameservers for the subnet.
    pub nameservers: Option<BTreeMap<String, Value>>,
    /// Show the name in listings instead of the subnet address.
    pub show_name: BoolInt,
    /// A JSON object, stringified, that represents the permissions for this subnet.
    pub permissions: String,
    /// Controls if PTR records should be created for the subnet.
    pub dns_recursive: BoolInt,
    /// Controls if DNS hostname records are displayed.
    pub dns_records: BoolInt,
    /// Controls if IP requests are allowed for the subnet.
    pub allow_requests: BoolInt,
    /// The ID of the scan agent to use for the subnet.
    pub scan_agent: i64,
    /// Controls if the subnet should be included in status checks.
    pub ping_subnet: BoolInt,
    /// Controls if new hosts should be discovered for new host scans.
    pub discover_subnet: BoolInt,
    /// Marks this record as a folder rather than a subnet.
    pub is_folder: BoolInt,
    /// Permits allocation of the network and broadcast addresses.
    pub is_pool: BoolInt,
    /// Marks the subnet as used.
    pub is_full: BoolInt,
    /// The usage threshold of the subnet, in percent.
    pub threshold: i64,
    /// The location index of the subnet.
    pub location: i64,
    /// The date of the last edit to this resource.
    pub edit_date: String,
    /// Gateway IP and the ID of the gateway address.
    pub gateway: Option<BTreeMap<String, Value>>,
    /// ID of the gateway address.
    pub gateway_id: String,
    /// Custom fields, when nested custom fields are enabled server-side.
    pub custom_fields: Option<CustomFields>,
    /// Controls the resolve DNS function.
    pub resolve_dns: BoolInt,
}

impl From<SubnetDto> for Subnet {
    fn from(dto: SubnetDto) -> Self {
        Self {
            id: dto.id.into(),
            subnet_address: dto.subnet_address,
            mask: dto.mask.into(),
            description: dto.description,
            section_id: dto.section_id.into(),
            linked_subnet: dto.linked_subnet.into(),
            vlan_id: dto.vlan_id.into(),
            vrf_id: dto.vrf_id.into(),
            master_subnet_id: dto.master_subnet_id.into(),
            nameserver_id: dto.nameserver_id.into(),
            nameservers: dto.nameservers,
            show_name: dto.show_name,
            permissions: dto.permissions,
            dns_recursive: dto.dns_recursive,
            dns_records: dto.dns_records,
            allow_requests: dto.allow_requests,
            scan_agent: dto.scan_agent.into(),
            ping_subnet: dto.ping_subnet,
            discover_subnet: dto.discover_subnet,
            is_folder: dto.is_folder,
            is_pool: dto.is_pool,
            is_full: dto.is_full,
            threshold: dto.threshold.into(),
            location: dto.location.into(),
            edit_date: dto.edit_date,
            gateway: dto.gateway,
            gateway_id: dto.gateway_id,
            custom_fields: dto.custom_fields,
            resolve_dns: dto.resolve_dns,
        }
    }
}

impl From<&Subnet> for SubnetDto {
    fn from(subnet: &Subnet) -> Self {
        Self {
            id: subnet.id.into(),
            subnet_address: subnet.subnet_address.clone(),
            mask: subnet.mask.into(),
            description: subnet.description.clone(),
            section_id: subnet.section_id.into(),
            linked_subnet: subnet.linked_subnet.into(),
            vlan_id: subnet.vlan_id.into(),
            vrf_id: subnet.vrf_id.into(),
            master_subnet_id: subnet.master_subnet_id.into(),
            nameserver_id: subnet.nameserver_id.into(),
            nameservers: subnet.nameservers.clone(),
            show_name: subnet.show_name,
            permissions: subnet.permissions.clone(),
            dns_recursive: subnet.dns_recursive,
            dns_records: subnet.dns_records,
            allow_requests: subnet.allow_requests,
            scan_agent: subnet.scan_agent.into(),
            ping_subnet: subnet.ping_subnet,
            discover_subnet: subnet.discover_subnet,
            is_folder: subnet.is_folder,
            is_pool: subnet.is_pool,
            is_full: subnet.is_full,
            threshold: subnet.threshold.into(),
            location: subnet.location.into(),
            edit_date: subnet.edit_date.clone(),
            gateway: subnet.gateway.clone(),
            gateway_id: subnet.gateway_id.clone(),
            custom_fields: subnet.custom_fields.clone(),
            resolve_dns: subnet.resolve_dns,
        }
    }
}

/// Client for the subnets controller
#[derive(Clone)]
pub struct SubnetsController {
    transport: Arc<dyn PhpIpamTransport>,
}

impl SubnetsController {
    /// Create a subnets controller on top of `transport`
    pub fn new(transport: Arc<dyn PhpIpamTransport>) -> Self {
        Self { transport }
    }

    /// Create a subnet by sending a POST request
    pub async fn create_subnet(&self, subnet: &Subnet) -> Result<String, PhpIpamError> {
        debug!("Creating subnet {}/{}", subnet.subnet_address, subnet.mask);
        let body = encode(&SubnetDto::from(subnet))?;
        send_for_message(self.transport.as_ref(), Method::POST, "/subnets/", Some(&body)).await
    }

    /// Create a child subnet in the first free `mask`-sized block of subnet `id`
    ///
    /// Returns the CIDR phpIPAM allocated.
    pub async fn create_first_free_subnet(&self, id: i64, mask: i64, subnet: &Subnet) -> Result<String, PhpIpamError> {
        debug!("Creating first free /{} in subnet {}", mask, id);
        let body = encode(&SubnetDto::from(subnet))?;
        send_for_message(
            self.transport.as_ref(),
            Method::POST,
            &format!("/subnets/{}/first_subnet/{}/", id, mask),
            Some(&body),
        )
        .await
    }

    /// Get a subnet by ID
    pub async fn get_subnet_by_id(&self, id: i64) -> Result<Subnet, PhpIpamError> {
        debug!("Fetching subnet {}", id);
        let dto: SubnetDto = fetch_one(self.transport.as_ref(), &format!("/subnets/{}/", id)).await?;
        Ok(dto.into())
    }

    /// Search for subnets by CIDR, e.g. `10.10.1.0/24`
    pub async fn get_subnets_by_cidr(&self, cidr: &str) -> Result<Vec<Subnet>, PhpIpamError> {
        debug!("Searching subnets for {}", cidr);
        // The slash in the CIDR is part of the route.
        let dtos: Vec<SubnetDto> = fetch_list(self.transport.as_ref(), &format!("/subnets/cidr/{}/", cidr)).await?;
        Ok(dtos.into_iter().map(Subnet::from).collect())
    }

    /// Search for subnets by CIDR within one section
    pub async fn get_subnets_by_cidr_and_section(
        &self,
        cidr: &str,
        section_id: i64,
    ) -> Result<Vec<Subnet>, PhpIpamError> {
        debug!("Searching subnets for {} in section {}", cidr, section_id);
        let path = filter_path(&format!("/subnets/cidr/{}/", cidr), "sectionId", &section_id.to_string());
        let dtos: Vec<SubnetDto> = fetch_list(self.transport.as_ref(), &path).await?;
        Ok(dtos.into_iter().map(Subnet::from).collect())
    }

    /// Get the first free `mask`-sized child block of subnet `id`
    pub async fn get_first_free_subnet(&self, id: i64, mask: i64) -> Result<String, PhpIpamError> {
        debug!("Fetching first free /{} in subnet {}", mask, id);
        send_for_message(
            self.transport.as_ref(),
            Method::GET,
            &format!("/subnets/{}/first_subnet/{}/", id, mask),
            None,
        )
        .await
    }

    /// Get the first free IP address of subnet `id`
    ///
    /// A full subnet yields an empty string rather than an error.
    pub async fn get_first_free_address(&self, id: i64) -> Result<String, PhpIpamError> {
        debug!("Fetching first free address in subnet {}", id);
        send_for_message(
            self.transport.as_ref(),
            Method::GET,
            &format!("/subnets/{}/first_free/", id),
            None,
        )
        .await
    }

    /// Get the addresses allocated in subnet `id`
    pub async fn get_addresses_in_subnet(&self, id: i64) -> Result<Vec<Address>, PhpIpamError> {
        debug!("Fetching addresses in subnet {}", id);
        let dtos: Vec<AddressDto> =
            fetch_list(self.transport.as_ref(), &format!("/subnets/{}/addresses/", id)).await?;
        Ok(dtos.into_iter().map(Address::from).collect())
    }

    /// Get the custom field schema of the subnets controller
    pub async fn get_subnet_custom_fields_schema(&self) -> Result<CustomFieldSchema, PhpIpamError> {
        custom_fields::get_custom_fields_schema(self.transport.as_ref(), CONTROLLER).await
    }

    /// Get the custom field values of a subnet
    pub async fn get_subnet_custom_fields(&self, id: i64) -> Result<CustomFields, PhpIpamError> {
        custom_fields::get_custom_fields(self.transport.as_ref(), id, CONTROLLER).await
    }

    /// Update a subnet by sending a PATCH request
    ///
    /// phpIPAM rejects changes to the subnet address or mask; resize through
    /// the dedicated endpoints instead.
    pub async fn update_subnet(&self, subnet: &Subnet) -> Result<String, PhpIpamError> {
        debug!("Updating subnet {}", subnet.id);
        let body = encode(&SubnetDto::from(subnet))?;
        send_for_message(self.transport.as_ref(), Method::PATCH, "/subnets/", Some(&body)).await
    }

    /// Update the custom fields of a subnet
    pub async fn update_subnet_custom_fields(&self, id: i64, fields: &CustomFields) -> Result<String, PhpIpamError> {
        debug!("Updating custom fields of subnet {}", id);
        custom_fields::update_custom_fields(self.transport.as_ref(), id, fields, CONTROLLER).await
    }

    /// Delete a subnet by ID
    pub async fn delete_subnet(&self, id: i64) -> Result<String, PhpIpamError> {
        debug!("Deleting subnet {}", id);
        send_for_message(
            self.transport.as_ref(),
            Method::DELETE,
            &format!("/subnets/{}/", id),
            None,
        )
        .await
    }
}
