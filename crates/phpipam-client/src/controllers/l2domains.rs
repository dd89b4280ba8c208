//! L2 domains controller
//!
//! An L2 domain groups VLANs; the same VLAN number may be reused once per domain.

use crate::common::query::{encode, fetch_list, fetch_one, filter_path, send_for_message, send_for_unit};
use crate::controllers::vlans::{Vlan, VlanDto};
use crate::error::PhpIpamError;
use crate::scalar::{JsonInt, nullable_string};
use crate::transport::PhpIpamTransport;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// L2 domain wire record, as exchanged with `/l2domains/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct L2DomainDto {
    /// The L2 domain ID.
    #[serde(skip_serializing_if = "JsonInt::is_zero")]
    pub id: JsonInt,

    /// The L2 domain name.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// A detailed description of the L2 domain.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Semicolon-separated IDs of the sections the domain is visible in.
    #[serde(deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub sections: String,
}

/// A phpIPAM L2 domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct L2Domain {
    /// The L2 domain ID.
    pub id: i64,
    /// The L2 domain name.
    pub name: String,
    /// A detailed description of the L2 domain.
    pub description: String,
    /// Semicolon-separated IDs of the sections the domain is visible in, e.g. `1;3`.
    pub sections: String,
}

impl From<L2DomainDto> for L2Domain {
    fn from(dto: L2DomainDto) -> Self {
        Self {
            id: dto.id.into(),
            name: dto.name,
            description: dto.description,
            sections: dto.sections,
        }
    }
}

impl From<&L2Domain> for L2DomainDto {
    fn from(domain: &L2Domain) -> Self {
        Self {
            id: domain.id.into(),
            name: domain.name.clone(),
            description: domain.description.clone(),
            sections: domain.sections.clone(),
        }
    }
}

/// Client for the L2 domains controller
#[derive(Clone)]
pub struct L2DomainsController {
    transport: Arc<dyn PhpIpamTransport>,
}

impl L2DomainsController {
    /// Create an L2 domains controller on top of `transport`
    pub fn new(transport: Arc<dyn PhpIpamTransport>) -> Self {
        Self { transport }
    }

    /// List all L2 domains
    pub async fn list_l2_domains(&self) -> Result<Vec<L2Domain>, PhpIpamError> {
        debug!("Listing L2 domains");
        let dtos: Vec<L2DomainDto> = fetch_list(self.transport.as_ref(), "/l2domains/").await?;
        Ok(dtos.into_iter().map(L2Domain::from).collect())
    }

    /// Create an L2 domain by sending a POST request
    pub async fn create_l2_domain(&self, domain: &L2Domain) -> Result<String, PhpIpamError> {
        debug!("Creating L2 domain {}", domain.name);
        let body = encode(&L2DomainDto::from(domain))?;
        send_for_message(self.transport.as_ref(), Method::POST, "/l2domains/", Some(&body)).await
    }

    /// Get an L2 domain by ID
    pub async fn get_l2_domain_by_id(&self, id: i64) -> Result<L2Domain, PhpIpamError> {
        debug!("Fetching L2 domain {}", id);
        let dto: L2DomainDto = fetch_one(self.transport.as_ref(), &format!("/l2domains/{}/", id)).await?;
        Ok(dto.into())
    }

    /// Get the L2 domains with the given name
    pub async fn get_l2_domains_by_name(&self, name: &str) -> Result<Vec<L2Domain>, PhpIpamError> {
        debug!("Searching L2 domains for name {}", name);
        let path = filter_path("/l2domains/", "name", name);
        let dtos: Vec<L2DomainDto> = fetch_list(self.transport.as_ref(), &path).await?;
        Ok(dtos.into_iter().map(L2Domain::from).collect())
    }

    /// Get the VLANs of an L2 domain
    pub async fn get_vlans_in_l2_domain(&self, id: i64) -> Result<Vec<Vlan>, PhpIpamError> {
        debug!("Fetching VLANs in L2 domain {}", id);
        let dtos: Vec<VlanDto> =
            fetch_list(self.transport.as_ref(), &format!("/l2domains/{}/vlans/", id)).await?;
        Ok(dtos.into_iter().map(Vlan::from).collect())
    }

    /// Update an L2 domain by sending a PATCH request
    pub async fn update_l2_domain(&self, domain: &L2Domain) -> Result<(), PhpIpamError> {
        debug!("Updating L2 domain {}", domain.id);
        let body = encode(&L2DomainDto::from(domain))?;
        send_for_unit(self.transport.as_ref(), Method::PATCH, "/l2domains/", Some(&body)).await
    }

    /// Delete an L2 domain by ID
    pub async fn delete_l2_domain(&self, id: i64) -> Result<(), PhpIpamError> {
        debug!("Deleting L2 domain {}", id);
        send_for_unit(self.transport.as_ref(), Method::DELETE, &format!("/l2domains/{}/", id), None).await
    }
}
