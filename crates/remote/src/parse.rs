//! Strict validation of remote payloads into typed trees
//!
//! Units: `{ "unit": ["child", ...], ... }`
//! Topics: `{ "domain": { "subdomain": ["topic", ...], ... }, ... }`
//!
//! Anything else is rejected as a whole; a partially valid payload is never
//! handed to the reconciler.

use serde_json::{Map, Value};
use tx_core::{Domain, FetchError, RemoteTree, Subdomain, TaxonomyKind, TopicsTree, UnitBranch, UnitsTree};

/// Parse and validate a response body for `kind`
pub fn parse_tree(kind: TaxonomyKind, body: &[u8]) -> Result<RemoteTree, FetchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| FetchError::MalformedData(format!("{} payload is not valid JSON: {}", kind, e)))?;

    from_value(kind, &value)
}

/// Validate an already decoded JSON value for `kind`
pub fn from_value(kind: TaxonomyKind, value: &Value) -> Result<RemoteTree, FetchError> {
    let top = as_object(value, kind.service())?;

    match kind {
        TaxonomyKind::Units => {
            let mut units = Vec::with_capacity(top.len());
            for (name, children) in top {
                let name = check_name(name, "unit")?;
                let children = leaf_names(children, &name)?;
                units.push(UnitBranch { name, children });
            }
            Ok(RemoteTree::Units(UnitsTree { units }))
        }
        TaxonomyKind::Topics => {
            let mut domains = Vec::with_capacity(top.len());
            for (name, subdomains) in top {
                let name = check_name(name, "domain")?;
                let subs = as_object(subdomains, &name)?;

                let mut parsed = Vec::with_capacity(subs.len());
                for (sub, topics) in subs {
                    let sub = check_name(sub, "subdomain")?;
                    let path = format!("{}/{}", name, sub);
                    parsed.push(Subdomain {
                        topics: leaf_names(topics, &path)?,
                        name: sub,
                    });
                }

                domains.push(Domain {
                    name,
                    subdomains: parsed,
                });
            }
            Ok(RemoteTree::Topics(TopicsTree { domains }))
        }
    }
}

fn as_object<'v>(value: &'v Value, at: &str) -> Result<&'v Map<String, Value>, FetchError> {
    value.as_object().ok_or_else(|| {
        FetchError::MalformedData(format!("expected an object at '{}', found {}", at, type_name(value)))
    })
}

fn check_name(name: &str, what: &str) -> Result<String, FetchError> {
    if name.trim().is_empty() {
        return Err(FetchError::MalformedData(format!("empty {} name", what)));
    }
    Ok(name.to_string())
}

/// A list of non-empty strings; repeated names keep their first position
fn leaf_names(value: &Value, at: &str) -> Result<Vec<String>, FetchError> {
    let items = value.as_array().ok_or_else(|| {
        FetchError::MalformedData(format!("expected a list of names at '{}', found {}", at, type_name(value)))
    })?;

    let mut names: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let name = item.as_str().ok_or_else(|| {
            FetchError::MalformedData(format!("expected a name at '{}', found {}", at, type_name(item)))
        })?;
        if name.trim().is_empty() {
            return Err(FetchError::MalformedData(format!("empty name under '{}'", at)));
        }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
