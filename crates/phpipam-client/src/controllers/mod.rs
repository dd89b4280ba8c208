//! phpIPAM resource controllers
//!
//! Handles: sections, subnets, addresses, VLANs, L2 domains

pub mod addresses;
#[cfg(test)]
mod addresses_test;
pub mod l2domains;
#[cfg(test)]
mod l2domains_test;
pub mod sections;
pub mod subnets;
pub mod vlans;

pub use addresses::{Address, AddressDto, AddressesController};
pub use l2domains::{L2Domain, L2DomainDto, L2DomainsController};
pub use sections::{Section, SectionDto, SectionsController};
pub use subnets::{Subnet, SubnetDto, SubnetsController};
pub use vlans::{Vlan, VlanDto, VlansController};
