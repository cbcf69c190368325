use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::services::{
    AppleMusic, CustomService, Deezer, MusicService, Spotify, Tidal, YouTube, YouTubeMusic,
};

/// 순서가 있는 서비스 디스크립터 목록.
///
/// 먼저 등록된 서비스가 우선한다. YouTube Music은 `youtube.com`을 포함하는
/// YouTube보다 앞에 있어야 한다.
///
/// `register`는 시작 단계에서만 호출한다. 그 뒤로는 읽기 전용으로 여러 곳에서
/// 공유해도 된다.
#[derive(Clone, Debug)]
pub struct ServiceRegistry {
    services: Vec<Arc<dyn MusicService>>,
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry {
    /// Registry with the six built-in services.
    pub fn new() -> Self {
        Self {
            services: vec![
                Arc::new(AppleMusic),
                Arc::new(Spotify),
                Arc::new(YouTubeMusic),
                Arc::new(YouTube),
                Arc::new(Tidal),
                Arc::new(Deezer),
            ],
        }
    }

    /// Empty registry, for callers that want full control over the order.
    pub fn empty() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    /// Built-ins followed by the custom services from the config file.
    ///
    /// Entries without a usable domain or with a search template that does
    /// not produce an absolute URL are skipped with a warning.
    pub fn with_custom(custom: &[ServiceConfig]) -> Self {
        let mut registry = Self::new();
        for config in custom {
            if let Err(reason) = config.validate() {
                warn!(name = %config.name, "skipping custom service: {}", reason);
                continue;
            }
            registry.register(CustomService::from_config(config));
        }
        registry
    }

    /// Append a service at the lowest priority.
    ///
    /// Duplicate names, platform keys or result keys are tolerated with a
    /// warning. A service whose platform key is already taken never receives
    /// links in a translation. With a duplicate result key, lookups by key
    /// return the earlier service's entry.
    pub fn register(&mut self, service: impl MusicService + 'static) {
        self.register_shared(Arc::new(service));
    }

    pub fn register_shared(&mut self, service: Arc<dyn MusicService>) {
        if self.service_by_name(service.name()).is_some() {
            warn!(name = service.name(), "service name already registered");
        }
        if self
            .services
            .iter()
            .any(|s| s.platform_key() == service.platform_key())
        {
            warn!(
                platform_key = service.platform_key(),
                "platform key already registered"
            );
        }
        if self
            .services
            .iter()
            .any(|s| s.result_key() == service.result_key())
        {
            warn!(
                result_key = service.result_key(),
                "result key already registered"
            );
        }
        debug!(name = service.name(), "registering service");
        self.services.push(service);
    }

    /// Copy of the registered services in priority order.
    pub fn all_services(&self) -> Vec<Arc<dyn MusicService>> {
        self.services.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn MusicService> {
        self.services.iter().map(|s| s.as_ref() as &dyn MusicService)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// First service whose `can_handle` accepts the URL.
    pub fn service_for_url(&self, url: &str) -> Option<&dyn MusicService> {
        let found = self.iter().find(|s| s.can_handle(url));
        debug!(url, service = found.map(|s| s.name()), "service lookup");
        found
    }

    pub fn service_by_name(&self, name: &str) -> Option<&dyn MusicService> {
        self.iter().find(|s| s.name() == name)
    }

    pub fn is_supported(&self, url: &str) -> bool {
        self.service_for_url(url).is_some()
    }

    /// Every service's domains in registry order, duplicates kept.
    pub fn supported_domains(&self) -> Vec<String> {
        self.iter()
            .flat_map(|s| s.domains().into_iter().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    /// Search URL for `query` on every service, in registry order.
    pub fn search_urls(&self, query: &str) -> Vec<(&dyn MusicService, String)> {
        self.iter()
            .map(|s| (s, s.generate_search_url(query)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;

    const SAMPLES: [(&str, &str); 6] = [
        ("Apple Music", "https://music.apple.com/us/album/blueming/1483398911?i=1483399256"),
        ("Spotify", "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"),
        ("YouTube Music", "https://music.youtube.com/watch?v=D1PvIWdJ8xo"),
        ("YouTube", "https://www.youtube.com/watch?v=D1PvIWdJ8xo"),
        ("Tidal", "https://tidal.com/browse/track/118263414"),
        ("Deezer", "https://www.deezer.com/en/track/803463232"),
    ];

    #[test]
    fn test_builtin_order() {
        let registry = ServiceRegistry::new();
        let names: Vec<_> = registry.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["Apple Music", "Spotify", "YouTube Music", "YouTube", "Tidal", "Deezer"]
        );
    }

    #[test]
    fn test_each_service_handles_only_its_own_urls() {
        let registry = ServiceRegistry::new();
        for service in registry.iter() {
            for (owner, url) in SAMPLES {
                let expected = owner == service.name()
                    // youtube.com is a substring of music.youtube.com
                    || (service.name() == "YouTube" && owner == "YouTube Music");
                assert_eq!(
                    service.can_handle(url),
                    expected,
                    "{} on {}",
                    service.name(),
                    url
                );
            }
            assert!(!service.can_handle("not a url"));
            assert!(!service.can_handle(""));
        }
    }

    #[test]
    fn test_service_for_url() {
        let registry = ServiceRegistry::new();
        for (owner, url) in SAMPLES {
            let service = registry.service_for_url(url).expect("no service");
            assert_eq!(service.name(), owner);
        }
        assert!(registry.service_for_url("https://example.com/track/1").is_none());
        assert!(registry.service_for_url("::::").is_none());
    }

    #[test]
    fn test_short_link_resolves_to_youtube() {
        let registry = ServiceRegistry::new();
        let service = registry.service_for_url("https://youtu.be/abc123").unwrap();
        assert_eq!(service.name(), "YouTube");
        assert_eq!(service.parse_url("https://youtu.be/abc123").content_type, ContentType::Track);
    }

    #[test]
    fn test_service_by_name() {
        let registry = ServiceRegistry::new();
        assert_eq!(registry.service_by_name("Tidal").unwrap().platform_key(), "tidal");
        assert!(registry.service_by_name("tidal").is_none());
    }

    #[test]
    fn test_is_supported() {
        let registry = ServiceRegistry::new();
        assert!(registry.is_supported("https://tidal.com/track/1"));
        assert!(!registry.is_supported("https://soundcloud.com/artist/track"));
        assert!(!registry.is_supported("soundcloud"));
    }

    #[test]
    fn test_all_services_is_a_copy() {
        let registry = ServiceRegistry::new();
        let mut copy = registry.all_services();
        copy.clear();
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_register_appends_with_lowest_priority() {
        let mut registry = ServiceRegistry::new();
        registry.register(CustomService::new(
            "SoundCloud",
            vec!["soundcloud.com".to_string()],
            "soundcloud",
        ));
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.iter().last().unwrap().name(), "SoundCloud");
        assert!(registry.is_supported("https://soundcloud.com/artist/track"));
    }

    #[test]
    fn test_overlapping_domain_loses_to_earlier_service() {
        let mut registry = ServiceRegistry::new();
        registry.register(CustomService::new(
            "Spotify Mirror",
            vec!["open.spotify.com".to_string()],
            "spotifyMirror",
        ));
        let service = registry
            .service_for_url("https://open.spotify.com/track/1")
            .unwrap();
        assert_eq!(service.name(), "Spotify");
    }

    #[test]
    fn test_supported_domains_keep_order_and_duplicates() {
        let mut registry = ServiceRegistry::new();
        registry.register(CustomService::new(
            "Deezer Mirror",
            vec!["deezer.com".to_string()],
            "deezerMirror",
        ));
        assert_eq!(
            registry.supported_domains(),
            vec![
                "music.apple.com",
                "spotify.com",
                "open.spotify.com",
                "music.youtube.com",
                "youtube.com",
                "youtu.be",
                "tidal.com",
                "deezer.com",
                "www.deezer.com",
                "deezer.com",
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_is_tolerated() {
        let mut registry = ServiceRegistry::new();
        registry.register(Spotify);
        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry.iter().filter(|s| s.name() == "Spotify").count(),
            2
        );
    }

    #[test]
    fn test_with_custom() {
        let config = ServiceConfig {
            name: "SoundCloud".to_string(),
            domains: vec!["soundcloud.com".to_string()],
            icon: "☁️".to_string(),
            platform_key: "soundcloud".to_string(),
            result_key: None,
            search_url: "https://soundcloud.com/search?q={query}".to_string(),
            type_segment: 0,
            id_segment: 1,
        };
        let registry = ServiceRegistry::with_custom(&[config]);
        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry.service_by_name("SoundCloud").unwrap().icon(),
            "☁️"
        );
    }

    fn soundcloud_config(domains: &[&str], search_url: &str) -> ServiceConfig {
        ServiceConfig {
            name: "SoundCloud".to_string(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
            icon: ServiceConfig::default_icon(),
            platform_key: "soundcloud".to_string(),
            result_key: None,
            search_url: search_url.to_string(),
            type_segment: 0,
            id_segment: 1,
        }
    }

    #[test]
    fn test_with_custom_skips_missing_search_url() {
        let config: crate::config::Config = toml::from_str(
            r#"
[[services]]
name = "SoundCloud"
domains = ["soundcloud.com"]
platform_key = "soundcloud"
"#,
        )
        .unwrap();
        assert!(config.services[0].search_url.is_empty());

        let registry = ServiceRegistry::with_custom(&config.services);
        assert_eq!(registry.len(), 6);
        assert!(registry.service_by_name("SoundCloud").is_none());
    }

    #[test]
    fn test_with_custom_skips_relative_search_url() {
        let registry =
            ServiceRegistry::with_custom(&[soundcloud_config(&["soundcloud.com"], "/search?q={query}")]);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_blank_domain_does_not_match_everything() {
        let config: crate::config::Config = toml::from_str(
            r#"
[[services]]
name = "Anything"
domains = [""]
platform_key = "anything"
search_url = "https://anything.example/search?q={query}"
"#,
        )
        .unwrap();
        let registry = ServiceRegistry::with_custom(&config.services);
        assert!(!registry.is_supported("https://example.com/x"));
        assert!(registry.service_by_name("Anything").is_none());
        assert_eq!(
            registry.service_for_url("https://tidal.com/track/1").unwrap().name(),
            "Tidal"
        );
    }

    #[test]
    fn test_with_custom_trims_domains() {
        let registry = ServiceRegistry::with_custom(&[soundcloud_config(
            &["", " soundcloud.com "],
            "https://soundcloud.com/search?q={query}",
        )]);
        let service = registry.service_by_name("SoundCloud").unwrap();
        assert_eq!(service.domains(), vec!["soundcloud.com"]);
        assert!(!registry.is_supported("https://example.com/x"));
    }

    #[test]
    fn test_duplicate_result_key_is_tolerated() {
        let mut registry = ServiceRegistry::new();
        registry.register(
            CustomService::new("Spotify Mirror", vec!["spotify.example".to_string()], "spotifyMirror")
                .with_result_key("spotify"),
        );
        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry.iter().filter(|s| s.result_key() == "spotify").count(),
            2
        );
        assert_eq!(
            registry.iter().find(|s| s.result_key() == "spotify").unwrap().name(),
            "Spotify"
        );
    }

    #[test]
    fn test_debug_lists_services() {
        let registry = ServiceRegistry::new();
        let text = format!("{:?}", registry);
        assert!(text.contains("Spotify"), "{}", text);
        assert!(text.contains("Deezer"), "{}", text);
    }

    #[test]
    fn test_search_urls_are_encoded() {
        let registry = ServiceRegistry::new();
        let urls = registry.search_urls("a/b c");
        assert_eq!(urls.len(), 6);
        for (service, url) in urls {
            assert!(url.contains("a%2Fb%20c"), "{}: {}", service.name(), url);
            assert!(url::Url::parse(&url).is_ok());
        }
    }
}
