use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::io::lock::LockError;
use crate::model::plant::{Plant, PlantFields, PlantId};

/// Result of fetching the whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Plant>,
}

impl ListResponse {
    pub fn ok(data: Vec<Plant>) -> Self {
        ListResponse {
            success: true,
            data,
        }
    }
}

/// Error type for plant store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no plant with id {0}")]
    NotFound(PlantId),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize plants: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The persistence collaborator: fetch everything, create, full-replace update.
///
/// Implementations assign ids on create and never change them afterwards.
pub trait PlantStore {
    fn list(&self) -> Result<ListResponse, StoreError>;

    fn create(&self, fields: PlantFields) -> Result<Plant, StoreError>;

    /// Replace every field of the plant with `fields`; the id is preserved
    fn update(&self, id: &PlantId, fields: PlantFields) -> Result<Plant, StoreError>;
}

/// Find a plant by full id or unique id prefix
pub fn resolve_id<'a>(plants: &'a [Plant], query: &str) -> Result<&'a Plant, ResolveError> {
    // A blank query is a prefix of every id
    if query.trim().is_empty() {
        return Err(ResolveError::NoMatch(query.to_string()));
    }
    if let Some(exact) = plants.iter().find(|p| p.id.as_str() == query) {
        return Ok(exact);
    }
    let matches: Vec<&Plant> = plants
        .iter()
        .filter(|p| p.id.as_str().starts_with(query))
        .collect();
    match matches.as_slice() {
        [one] => Ok(one),
        [] => Err(ResolveError::NoMatch(query.to_string())),
        many => Err(ResolveError::Ambiguous {
            query: query.to_string(),
            count: many.len(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no plant matches id \"{0}\"")]
    NoMatch(String),
    #[error("id \"{query}\" is ambiguous ({count} plants match)")]
    Ambiguous { query: String, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(id: &str) -> Plant {
        Plant::new(PlantId::new(id), PlantFields::default())
    }

    #[test]
    fn resolve_exact_and_prefix() {
        let plants = vec![plant("abc123"), plant("abd456"), plant("abc")];
        assert_eq!(resolve_id(&plants, "abc").unwrap().id.as_str(), "abc");
        assert_eq!(resolve_id(&plants, "abd").unwrap().id.as_str(), "abd456");
        assert_eq!(
            resolve_id(&plants, "ab").unwrap_err(),
            ResolveError::Ambiguous {
                query: "ab".into(),
                count: 3
            }
        );
        assert_eq!(
            resolve_id(&plants, "zzz").unwrap_err(),
            ResolveError::NoMatch("zzz".into())
        );
    }

    #[test]
    fn blank_query_matches_nothing() {
        let plants = vec![plant("abc")];
        assert_eq!(
            resolve_id(&plants, "").unwrap_err(),
            ResolveError::NoMatch(String::new())
        );
        assert!(resolve_id(&plants, "  ").is_err());
    }
}
