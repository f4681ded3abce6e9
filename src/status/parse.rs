//! Schemas for the output of the external tools
//!
//! `kubectl get services -o json` is one document and is parsed atomically.
//! `docker images --format json` prints one object per line; each line is
//! parsed on its own so a bad line only loses that record.

use super::types::{RegistryImage, ServiceSummary};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Placeholder for image fields missing from a record
pub const UNKNOWN: &str = "unknown";

// Derived structs also accept JSON arrays (fields filled by position), so
// every record goes through `from_object` first.
#[derive(Debug, Deserialize)]
struct ServiceList {
    #[serde(default, deserialize_with = "objects")]
    items: Vec<ServiceRecord>,
}

#[derive(Debug, Deserialize)]
struct ServiceRecord {
    #[serde(deserialize_with = "object")]
    metadata: ServiceMetadata,
    #[serde(deserialize_with = "object")]
    spec: ServiceSpec,
}

#[derive(Debug, Deserialize)]
struct ServiceMetadata {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ServiceSpec {
    #[serde(rename = "type")]
    service_type: String,
    #[serde(default = "no_ports")]
    ports: Value,
    // ExternalName services carry no cluster IP
    #[serde(rename = "clusterIP", default)]
    cluster_ip: String,
}

fn no_ports() -> Value {
    Value::Array(Vec::new())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ImageRecord {
    repository: Option<String>,
    tag: Option<String>,
    size: Option<String>,
    created_since: Option<String>,
}

/// Deserialize `T` from `value` only if it is a JSON object
fn from_object<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    match value {
        Value::Object(map) => serde_json::from_value(Value::Object(map)),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    from_object(value).map_err(D::Error::custom)
}

fn objects<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(|value| from_object(value).map_err(D::Error::custom))
        .collect()
}

/// Count services in `kubectl get services --no-headers` output
pub fn count_service_lines(stdout: &str) -> usize {
    stdout.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Parse a service list document, failing on the first schema violation
///
/// Blank output means the cluster has no services.
pub fn parse_service_list(stdout: &str) -> Result<Vec<ServiceSummary>, serde_json::Error> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let list: ServiceList = from_object(serde_json::from_str(stdout)?)?;
    Ok(list
        .items
        .into_iter()
        .map(|item| ServiceSummary {
            name: item.metadata.name,
            service_type: item.spec.service_type,
            ports: item.spec.ports,
            cluster_ip: item.spec.cluster_ip,
        })
        .collect())
}

/// Parse a single image line from `docker images --format json`
pub fn parse_image_line(line: &str) -> Result<RegistryImage, serde_json::Error> {
    let record: ImageRecord = from_object(serde_json::from_str(line)?)?;
    let or_unknown = |field: Option<String>| field.unwrap_or_else(|| UNKNOWN.to_string());

    Ok(RegistryImage {
        repository: or_unknown(record.repository),
        tag: or_unknown(record.tag),
        size: or_unknown(record.size),
        created: or_unknown(record.created_since),
    })
}

/// Parse every non-empty line, keeping the good records
///
/// Returns the images in input order and the number of lines skipped.
pub fn parse_image_records(stdout: &str) -> (Vec<RegistryImage>, usize) {
    let mut images = Vec::new();
    let mut skipped = 0;

    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_image_line(line) {
            Ok(image) => images.push(image),
            Err(e) => {
                debug!(error = %e, line = line, "Skipping malformed image record");
                skipped += 1;
            }
        }
    }

    (images, skipped)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
