//! Custom field subsystem
//!
//! phpIPAM lets administrators add columns to sections, subnets, addresses
//! and VLANs. These helpers work for any controller: read the column schema,
//! read the custom values of one record, and PATCH new values.

use crate::common::query::{decode, encode, fetch_one, send_for_message};
use crate::error::PhpIpamError;
use crate::scalar::nullable_string;
use crate::transport::PhpIpamTransport;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Free-form custom field values, keyed by field name
pub type CustomFields = BTreeMap<String, Value>;

/// Custom field schema of a controller, keyed by field name
pub type CustomFieldSchema = BTreeMap<String, CustomField>;

/// Schema descriptor of one custom field, as returned by `/{controller}/custom_fields/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Column name
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,

    /// SQL column type, e.g. `varchar(255)`
    #[serde(rename = "type", default, deserialize_with = "nullable_string")]
    pub field_type: String,

    /// Column comment (shown as the field description)
    #[serde(rename = "Comment", default, deserialize_with = "nullable_string")]
    pub comment: String,

    /// `YES` if the column is nullable
    #[serde(rename = "Null", default, deserialize_with = "nullable_string")]
    pub null: String,

    /// Column default, if any
    #[serde(rename = "Default", default)]
    pub default: Option<String>,
}

/// GET the custom field schema of `controller`
///
/// A controller without custom fields yields an empty schema.
pub async fn get_custom_fields_schema(
    transport: &dyn PhpIpamTransport,
    controller: &str,
) -> Result<CustomFieldSchema, PhpIpamError> {
    let path = format!("/{}/custom_fields/", controller);
    debug!("Fetching custom field schema for {}", controller);

    // phpIPAM answers without data (or with an empty array) when nothing is defined.
    let response = transport.send_request(Method::GET, &path, None).await?;
    match response.data {
        Some(Value::Object(fields)) => decode(Value::Object(fields)),
        _ => Ok(CustomFieldSchema::new()),
    }
}

/// GET the custom field values of record `id` in `controller`
///
/// Only keys present in the controller's schema are returned.
pub async fn get_custom_fields(
    transport: &dyn PhpIpamTransport,
    id: i64,
    controller: &str,
) -> Result<CustomFields, PhpIpamError> {
    let record: Map<String, Value> = fetch_one(transport, &format!("/{}/{}/", controller, id)).await?;
    let schema = get_custom_fields_schema(transport, controller).await?;

    Ok(record
        .into_iter()
        .filter(|(key, _)| schema.contains_key(key))
        .collect())
}

/// PATCH custom field values on record `id` in `controller`
///
/// The fields are sent as-is next to the record `id`; no schema check is made.
pub async fn update_custom_fields(
    transport: &dyn PhpIpamTransport,
    id: i64,
    fields: &CustomFields,
    controller: &str,
) -> Result<String, PhpIpamError> {
    let mut params = fields.clone();
    params.insert("id".to_string(), Value::from(id));
    send_for_message(
        transport,
        Method::PATCH,
        &format!("/{}/", controller),
        Some(&encode(&params)?),
    )
    .await
}

/// Check that every key of `fields` is defined in `schema`
///
/// Keys are checked in sorted order, so the reported field is deterministic.
pub fn validate_custom_fields(
    schema: &CustomFieldSchema,
    fields: &CustomFields,
    controller: &str,
) -> Result<(), PhpIpamError> {
    match fields.keys().find(|key| !schema.contains_key(*key)) {
        Some(unknown) => Err(PhpIpamError::UnknownCustomField {
            field: unknown.clone(),
            controller: controller.to_string(),
        }),
        None => Ok(()),
    }
}
