//! Song.link response contract.
//!
//! Only `linksByPlatform` and `entitiesByUniqueId` are required. Entities
//! keep the order they had in the response body, so the first entity is the
//! one the API listed first.

use std::collections::HashMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongLinkResponse {
    pub entity_unique_id: Option<String>,
    pub user_country: Option<String>,
    pub page_url: Option<String>,
    pub links_by_platform: HashMap<String, PlatformLink>,
    #[serde(deserialize_with = "ordered_entities")]
    pub entities_by_unique_id: Vec<(String, Entity)>,
}

impl SongLinkResponse {
    pub fn first_entity(&self) -> Option<&Entity> {
        self.entities_by_unique_id.first().map(|(_, entity)| entity)
    }

    pub fn link(&self, platform_key: &str) -> Option<&PlatformLink> {
        self.links_by_platform.get(platform_key)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLink {
    pub url: String,
    pub native_app_uri_mobile: Option<String>,
    pub native_app_uri_desktop: Option<String>,
    pub entity_unique_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub thumbnail_url: Option<String>,
    pub thumbnail_width: Option<u32>,
    pub thumbnail_height: Option<u32>,
    pub api_provider: String,
    pub platforms: Vec<String>,
}

// serde_json is built with `preserve_order`, so its Map iterates in body order.
fn ordered_entities<'de, D>(deserializer: D) -> Result<Vec<(String, Entity)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            serde_json::from_value(value)
                .map(|entity| (key.clone(), entity))
                .map_err(|e| D::Error::custom(format!("entity {}: {}", key, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entities_keep_body_order() {
        let response: SongLinkResponse = serde_json::from_value(json!({
            "entityUniqueId": "SPOTIFY_SONG::1",
            "linksByPlatform": {},
            "entitiesByUniqueId": {
                "SPOTIFY_SONG::1": {
                    "id": "1", "type": "song", "title": "Z first",
                    "apiProvider": "spotify", "platforms": ["spotify"]
                },
                "ITUNES_SONG::2": {
                    "id": "2", "type": "song", "title": "A second",
                    "apiProvider": "itunes", "platforms": ["appleMusic"]
                }
            }
        }))
        .unwrap();

        assert_eq!(response.entities_by_unique_id.len(), 2);
        assert_eq!(response.first_entity().unwrap().title.as_deref(), Some("Z first"));
        assert_eq!(response.entities_by_unique_id[1].0, "ITUNES_SONG::2");
    }

    #[test]
    fn test_missing_links_is_an_error() {
        let result = serde_json::from_value::<SongLinkResponse>(json!({
            "entitiesByUniqueId": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_entity_names_its_key() {
        let err = serde_json::from_value::<SongLinkResponse>(json!({
            "linksByPlatform": {},
            "entitiesByUniqueId": { "X::1": { "id": "1" } }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("X::1"));
    }
}
