//! Translation: reshape a resolution API response into per-service links.
//!
//! [`translate_response`] is the pure part: it maps the API's platform keys
//! back onto the registry. [`LinkTranslator`] composes it with a
//! [`LinkResolver`] to go from an input URL to a [`TranslatedLinks`].

use std::collections::HashSet;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{LinkEntry, LinkMetadata, TranslatedLinks};
use crate::services::ServiceRegistry;
use crate::songlink::dto::SongLinkResponse;
use crate::songlink::LinkResolver;

/// Build the local result from a resolution API response.
///
/// Metadata comes from the first entity only. Entries follow registry order,
/// one per service with a non-empty link. A service whose platform key was
/// already claimed by an earlier service gets no entry.
pub fn translate_response(
    registry: &ServiceRegistry,
    response: &SongLinkResponse,
    original_url: &str,
) -> TranslatedLinks {
    let metadata = response.first_entity().map(|entity| LinkMetadata {
        title: entity.title.clone(),
        artist: entity.artist_name.clone(),
        thumbnail: entity.thumbnail_url.clone(),
    });

    let mut claimed = HashSet::new();
    let mut entries = Vec::new();
    for service in registry.iter() {
        if !claimed.insert(service.platform_key()) {
            continue;
        }
        let Some(link) = response.link(service.platform_key()) else {
            continue;
        };
        if link.url.is_empty() {
            continue;
        }
        entries.push(LinkEntry {
            service: service.name().to_string(),
            key: service.result_key().to_string(),
            url: link.url.clone(),
        });
    }

    TranslatedLinks {
        original: original_url.to_string(),
        metadata,
        entries,
    }
}

/// 입력 URL을 다른 서비스 링크로 변환하는 진입점.
#[derive(Debug)]
pub struct LinkTranslator<R: LinkResolver> {
    resolver: R,
    registry: ServiceRegistry,
}

impl<R: LinkResolver> LinkTranslator<R> {
    pub fn new(resolver: R, registry: ServiceRegistry) -> Self {
        Self { resolver, registry }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Resolve `url` through the API and translate the response.
    ///
    /// Does not check `is_supported` first; callers that only accept known
    /// services should pre-validate against [`Self::registry`].
    pub fn translate(&self, url: &str) -> Result<TranslatedLinks> {
        let response = self.resolver.resolve(url).inspect_err(|e| {
            warn!(url, kind = ?e.kind(), "translation failed: {}", e);
        })?;
        let links = translate_response(&self.registry, &response, url);
        info!(url, services = links.entries.len(), "translated");
        Ok(links)
    }
}
