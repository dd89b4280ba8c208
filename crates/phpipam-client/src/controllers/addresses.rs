//! Addresses controller

use crate::common::query::{encode, fetch_list, fetch_one, send_for_message};
use crate::custom_fields::{self, CustomFieldSchema, CustomFields};
use crate::error::PhpIpamError;
use crate::scalar::{BoolInt, JsonInt, nullable_string};
use crate::transport::PhpIpamTransport;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

const CONTROLLER: &str = "addresses";

/// IP address wire record, as exchanged with `/addresses/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressDto {
    /// The ID of the IP address entry within phpIPAM.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub id: JsonInt,

    /// The ID of the subnet that the address belongs to.
    #[serde(rename = "subnetId", skip_serializing_if = "JsonInt::is_zero")]
    pub subnet_id: JsonInt,

    /// The IP address, without a CIDR subnet mask.
    #[serde(rename = "ip", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub ip_address: String,

    /// Whether this IP address is a gateway address.
    #[serde(skip_serializing_if = "BoolInt::is_false")]
    pub is_gateway: BoolInt,

    /// A detailed description of the IP address entry.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// A hostname for the IP address.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub hostname: String,

    /// The MAC address for the IP.
    #[serde(rename = "mac", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub mac_address: String,

    /// The address owner (customer, hostname, application, etc).
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub owner: String,

    /// The tag ID for the IP address.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub tag: JsonInt,

    /// Whether PTR records should not be created for this IP address.
    #[serde(rename = "PTRIgnore", skip_serializing_if = "BoolInt::is_false")]
    pub ptr_ignore: BoolInt,

    /// The ID of a PowerDNS PTR record.
    #[serde(rename = "PTR", skip_serializing_if = "JsonInt::is_zero")]
    pub ptr_record_id: JsonInt,

    /// An ID of a device that this address belongs to.
    #[serde(rename = "deviceId", skip_serializing_if = "JsonInt::is_zero")]
    pub device_id: JsonInt,

    /// A switchport number/label that this IP address belongs to.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub port: String,

    /// A note for this IP address, for state not suitable for the description.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub note: String,

    /// When the address was last seen with ping.
    #[serde(rename = "lastSeen", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub last_seen: String,

    /// Whether to exclude this address from ping scans.
    #[serde(rename = "excludePing", skip_serializing_if = "BoolInt::is_false")]
    pub exclude_ping: BoolInt,

    /// The date of the last edit to this resource.
    #[serde(rename = "editDate", deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub edit_date: String,

    /// Custom fields. Only populated when the API application has
    /// "Nest custom fields" enabled; otherwise use the explicit custom field calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<CustomFields>,
}

/// An IP address entry within phpIPAM
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    /// The ID of the IP address entry within phpIPAM.
    pub id: i64,
    /// The ID of the subnet that the address belongs to.
    pub subnet_id: i64,
    /// The IP address, without a CIDR subnet mask.
    pub ip_address: String,
    /// Whether this IP address is a gateway address.
    pub is_gateway: BoolInt,
    /// A detailed description of the IP address entry.
    pub description: String,
    /// A hostname for the IP address.
    pub hostname: String,
    /// The MAC address for the IP.
    pub mac_address: String,
    /// The address owner (customer, hostname, application, etc).
    pub owner: String,
    /// The tag ID for the IP address.
    pub tag: i64,
    /// Whether PTR records should not be created for this IP address.
    pub ptr_ignore: BoolInt,
    /// The ID of a PowerDNS PTR record.
    pub ptr_record_id: i64,
    /// An ID of a device that this address belongs to.
    pub device_id: i64,
    /// A switchport number/label that this IP address belongs to.
    pub port: String,
    /// A note for this IP address.
    pub note: String,
    /// When the address was last seen with ping.
    pub last_seen: String,
    /// Whether to exclude this address from ping scans.
    pub exclude_ping: BoolInt,
    /// The date of the last edit to this resource.
    pub edit_date: String,
    /// Custom fields, when nested custom fields are enabled server-side.
    pub custom_fields: Option<CustomFields>,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Self {
            id: dto.id.into(),
            subnet_id: dto.subnet_id.into(),
            ip_address: dto.ip_address,
            is_gateway: dto.is_gateway,
            description: dto.description,
            hostname: dto.hostname,
            mac_address: dto.mac_address,
            owner: dto.owner,
            tag: dto.tag.into(),
            ptr_ignore: dto.ptr_ignore,
            ptr_record_id: dto.ptr_record_id.into(),
            device_id: dto.device_id.into(),
            port: dto.port,
            note: dto.note,
            last_seen: dto.last_seen,
            exclude_ping: dto.exclude_ping,
            edit_date: dto.edit_date,
            custom_fields: dto.custom_fields,
        }
    }
}

impl From<&Address> for AddressDto {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id.into(),
            subnet_id: address.subnet_id.into(),
            ip_address: address.ip_address.clone(),
            is_gateway: address.is_gateway,
            description: address.description.clone(),
            hostname: address.hostname.clone(),
            mac_address: address.mac_address.clone(),
            owner: address.owner.clone(),
            tag: address.tag.into(),
            ptr_ignore: address.ptr_ignore,
            ptr_record_id: address.ptr_record_id.into(),
            device_id: address.device_id.into(),
            port: address.port.clone(),
            note: address.note.clone(),
            last_seen: address.last_seen.clone(),
            exclude_ping: address.exclude_ping,
            edit_date: address.edit_date.clone(),
            custom_fields: address.custom_fields.clone(),
        }
    }
}

#[derive(Serialize)]
struct DeleteAddressParams {
    #[serde(skip_serializing_if = "BoolInt::is_false")]
    remove_dns: BoolInt,
}

/// Client for the addresses controller
#[derive(Clone)]
pub struct AddressesController {
    transport: Arc<dyn PhpIpamTransport>,
}

impl AddressesController {
    /// Create an addresses controller on top of `transport`
    pub fn new(transport: Arc<dyn PhpIpamTransport>) -> Self {
        Self { transport }
    }

    /// Create an address by sending a POST request
    pub async fn create_address(&self, address: &Address) -> Result<String, PhpIpamError> {
        debug!("Creating address {} in subnet {}", address.ip_address, address.subnet_id);
        let body = encode(&AddressDto::from(address))?;
        send_for_message(self.transport.as_ref(), Method::POST, "/addresses/", Some(&body)).await
    }

    /// Create an address on the first free IP of a subnet
    ///
    /// Returns the address phpIPAM picked.
    pub async fn create_first_free_address(&self, subnet_id: i64, address: &Address) -> Result<String, PhpIpamError> {
        debug!("Creating first free address in subnet {}", subnet_id);
        let body = encode(&AddressDto::from(address))?;
        send_for_message(
            self.transport.as_ref(),
            Method::POST,
            &format!("/addresses/first_free/{}/", subnet_id),
            Some(&body),
        )
        .await
    }

    /// Get an address by ID
    pub async fn get_address_by_id(&self, id: i64) -> Result<Address, PhpIpamError> {
        debug!("Fetching address {}", id);
        let dto: AddressDto = fetch_one(self.transport.as_ref(), &format!("/addresses/{}/", id)).await?;
        Ok(dto.into())
    }

    /// Search for addresses by IP
    ///
    /// The API returns a list here, although no known search yields more than one entry.
    pub async fn get_addresses_by_ip(&self, ip: &str) -> Result<Vec<Address>, PhpIpamError> {
        debug!("Searching addresses for {}", ip);
        let dtos: Vec<AddressDto> =
            fetch_list(self.transport.as_ref(), &format!("/addresses/search/{}/", ip)).await?;
        Ok(dtos.into_iter().map(Address::from).collect())
    }

    /// Get the address with the given IP in a specific subnet
    ///
    /// Useful when several subnets share an IP range (e.g. isolated networks).
    pub async fn get_address_by_ip_in_subnet(&self, ip: &str, subnet_id: i64) -> Result<Address, PhpIpamError> {
        debug!("Fetching address {} in subnet {}", ip, subnet_id);
        let dto: AddressDto =
            fetch_one(self.transport.as_ref(), &format!("/addresses/{}/{}", ip, subnet_id)).await?;
        Ok(dto.into())
    }

    /// Get the custom field schema of the addresses controller
    pub async fn get_address_custom_fields_schema(&self) -> Result<CustomFieldSchema, PhpIpamError> {
        custom_fields::get_custom_fields_schema(self.transport.as_ref(), CONTROLLER).await
    }

    /// Get the custom field values of an address
    pub async fn get_address_custom_fields(&self, id: i64) -> Result<CustomFields, PhpIpamError> {
        custom_fields::get_custom_fields(self.transport.as_ref(), id, CONTROLLER).await
    }

    /// Update an address by sending a PATCH request
    pub async fn update_address(&self, address: &Address) -> Result<String, PhpIpamError> {
        debug!("Updating address {}", address.id);
        let body = encode(&AddressDto::from(address))?;
        send_for_message(self.transport.as_ref(), Method::PATCH, "/addresses/", Some(&body)).await
    }

    /// Update the custom fields of an address
    pub async fn update_address_custom_fields(&self, id: i64, fields: &CustomFields) -> Result<String, PhpIpamError> {
        debug!("Updating custom fields of address {}", id);
        custom_fields::update_custom_fields(self.transport.as_ref(), id, fields, CONTROLLER).await
    }

    /// Delete an address by ID
    ///
    /// With `remove_dns` set, phpIPAM also deletes related DNS records.
    pub async fn delete_address(&self, id: i64, remove_dns: BoolInt) -> Result<String, PhpIpamError> {
        debug!("Deleting address {}", id);
        let body = encode(&DeleteAddressParams { remove_dns })?;
        send_for_message(
            self.transport.as_ref(),
            Method::DELETE,
            &format!("/addresses/{}/", id),
            Some(&body),
        )
        .await
    }
}
