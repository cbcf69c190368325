use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use dialoguer::Input;

use musiclink::config::{self, SongLinkConfig};
use musiclink::services::build_search_query;
use musiclink::songlink::SongLinkClient;
use musiclink::{FailureKind, LinkTranslator, ServiceRegistry, TranslatedLinks};

#[derive(Parser)]
#[command(name = "musiclink", about = "스트리밍 서비스 음악 링크 변환기")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 링크를 다른 서비스 링크로 변환
    Translate {
        /// 변환할 음악 링크
        url: String,
        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },
    /// 링크를 분석하여 서비스, 종류, ID 표시
    Parse {
        /// 분석할 음악 링크
        url: String,
    },
    /// 지원하는 서비스 목록
    Services,
    /// 서비스별 검색 링크 생성
    Search {
        /// 검색어
        query: String,
        /// 특정 서비스만 (예: "Spotify")
        #[arg(long)]
        service: Option<String>,
    },
    /// song.link API 설정
    Config,
}

pub fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_config();
    let registry = ServiceRegistry::with_custom(&cfg.services);

    match cli.command {
        Some(Commands::Translate { url, json }) => cmd_translate(registry, &cfg.songlink, &url, json),
        Some(Commands::Parse { url }) => cmd_parse(&registry, &url),
        Some(Commands::Services) => cmd_services(&registry),
        Some(Commands::Search { query, service }) => cmd_search(&registry, &query, service.as_deref()),
        Some(Commands::Config) => cmd_config(),
        None => {
            println!("사용법: musiclink <명령어>");
            println!("자세한 정보는 musiclink --help를 실행하세요.");
            Ok(())
        }
    }
}

fn cmd_translate(registry: ServiceRegistry, songlink: &SongLinkConfig, url: &str, json: bool) -> Result<()> {
    let Some(service) = registry.service_for_url(url) else {
        bail!(
            "지원하지 않는 링크입니다: {}\n지원 도메인: {}",
            url,
            registry.supported_domains().join(", ")
        );
    };
    let source = service.name().to_string();

    let client = SongLinkClient::new(songlink).context("song.link 클라이언트 생성에 실패했습니다")?;
    let translator = LinkTranslator::new(client, registry);

    let links = match translator.translate(url) {
        Ok(links) => links,
        Err(e) => {
            let hint = match e.kind() {
                FailureKind::Upstream => "변환 서비스를 사용할 수 없습니다. 잠시 후 다시 시도하세요.",
                FailureKind::MalformedResponse => "변환 서비스 응답이 예상과 다릅니다.",
                FailureKind::InvalidInput => "입력 또는 설정을 확인하세요.",
            };
            return Err(anyhow::Error::new(e).context(hint));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }

    print_links(&translator, &source, &links);
    Ok(())
}

fn print_links<R: musiclink::songlink::LinkResolver>(
    translator: &LinkTranslator<R>,
    source: &str,
    links: &TranslatedLinks,
) {
    if let Some(meta) = &links.metadata {
        println!("{}", meta.summary());
        if let Some(thumbnail) = &meta.thumbnail {
            println!("{}", thumbnail);
        }
        println!();
    }

    if links.is_empty() {
        println!("다른 서비스에서 찾은 링크가 없습니다.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["", "서비스", "링크"]);
    for entry in &links.entries {
        let icon = translator
            .registry()
            .service_by_name(&entry.service)
            .map(|s| s.icon().to_string())
            .unwrap_or_default();
        let name = if entry.service == source {
            format!("{} (원본)", entry.service)
        } else {
            entry.service.clone()
        };
        table.add_row(vec![Cell::new(icon), Cell::new(name), Cell::new(&entry.url)]);
    }
    println!("{table}");
}

fn cmd_parse(registry: &ServiceRegistry, url: &str) -> Result<()> {
    let Some(service) = registry.service_for_url(url) else {
        bail!("지원하지 않는 링크입니다: {}", url);
    };

    let parsed = service.parse_url(url);
    let mut table = Table::new();
    table.set_header(vec!["항목", "값"]);
    table.add_row(vec!["서비스", parsed.service.as_str()]);
    table.add_row(vec!["종류", parsed.content_type.as_str()]);
    table.add_row(vec!["ID", if parsed.id.is_empty() { "-" } else { parsed.id.as_str() }]);
    table.add_row(vec!["지역", parsed.region.as_deref().unwrap_or("-")]);
    println!("{table}");

    let query = build_search_query(&parsed, None);
    if !query.is_empty() {
        println!("\n검색: {}", service.generate_search_url(&query));
    }
    Ok(())
}

fn cmd_services(registry: &ServiceRegistry) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["", "서비스", "도메인", "플랫폼 키", "결과 키"]);

    for service in registry.iter() {
        table.add_row(vec![
            Cell::new(service.icon()),
            Cell::new(service.name()),
            Cell::new(service.domains().join(", ")),
            Cell::new(service.platform_key()),
            Cell::new(service.result_key()),
        ]);
    }

    println!("{table}");
    println!("\n총 {}개 서비스", registry.len());
    Ok(())
}

fn cmd_search(registry: &ServiceRegistry, query: &str, service: Option<&str>) -> Result<()> {
    if let Some(name) = service {
        let service = registry
            .service_by_name(name)
            .with_context(|| format!("서비스를 찾을 수 없습니다: {}", name))?;
        println!("{}", service.generate_search_url(query));
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["서비스", "검색 링크"]);
    for (service, url) in registry.search_urls(query) {
        table.add_row(vec![Cell::new(service.name()), Cell::new(url)]);
    }
    println!("{table}");
    Ok(())
}

fn cmd_config() -> Result<()> {
    let mut cfg = config::load_config();

    println!("song.link API 설정");
    println!("(API 키는 선택 사항입니다. 없으면 분당 요청 수가 제한됩니다)\n");

    let base_url: String = Input::new()
        .with_prompt("API URL")
        .with_initial_text(cfg.songlink.base_url.clone())
        .interact_text()?;

    let user_country: String = Input::new()
        .with_prompt("국가 코드 (예: KR, 비워 두면 US)")
        .with_initial_text(cfg.songlink.user_country.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let api_key: String = Input::new()
        .with_prompt("API 키")
        .with_initial_text(cfg.songlink.api_key.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let timeout_secs: u64 = Input::new()
        .with_prompt("타임아웃 (초)")
        .default(cfg.songlink.timeout_secs)
        .interact_text()?;

    let non_empty = |s: String| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    };

    cfg.songlink = SongLinkConfig {
        base_url,
        user_country: non_empty(user_country),
        api_key: non_empty(api_key),
        timeout_secs,
        ..cfg.songlink
    };

    config::save_config(&cfg)?;
    println!("\n설정이 저장되었습니다!");
    Ok(())
}
