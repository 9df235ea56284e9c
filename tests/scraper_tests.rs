use listing_extractor::utils::http::create_client;
use listing_extractor::{Config, EbayScraper, ListingScraper, ScrapeError};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const BLOCKED_PAGE: &str = "<html><head><title>Pardon Our Interruption</title></head><body></body></html>";

const ACTIVE_PAGE: &str = r#"<html><body><ul>
<li class="s-card"><a class="s-card__link" href="/itm/1?trk=1"><div class="s-card__title">Console X</div></a><span class="s-card__price">123,45 €</span></li>
<li class="s-card"><a class="s-card__link" href="/itm/2"><div class="s-card__title">Console Y</div></a><span class="s-card__price">150,00 €</span></li>
</ul></body></html>"#;

fn test_config(dump_dir: &TempDir) -> Arc<Config> {
    let mut config = Config::default();
    config.http.max_retries = 1;
    config.http.timeout_seconds = 5;
    config.debug.dump_html = true;
    config.debug.dump_dir = dump_dir.path().to_string_lossy().into_owned();
    Arc::new(config)
}

fn without_sold_filter(request: &Request) -> bool {
    request.url.query_pairs().all(|(k, _)| k != "LH_Sold")
}

#[tokio::test]
async fn blocked_sold_search_falls_back_to_active_listings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sch/i.html"))
        .and(query_param("LH_Sold", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BLOCKED_PAGE))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sch/i.html"))
        .and(without_sold_filter)
        .respond_with(ResponseTemplate::new(200).set_body_string(ACTIVE_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let dumps = TempDir::new().unwrap();
    let config = test_config(&dumps);
    let client = create_client(&config.http).unwrap();
    let scraper = EbayScraper::new(config);

    let url = format!("{}/sch/i.html?_nkw=ps5&LH_Sold=1&LH_Complete=1", server.uri());
    let report = scraper.scrape(&client, &url).await.unwrap();

    assert!(report.retried);
    assert_eq!(report.requested_url, url);
    assert_eq!(report.final_url, format!("{}/sch/i.html?_nkw=ps5", server.uri()));
    assert_eq!(report.outcome.records.len(), 2);
    assert_eq!(report.outcome.records[0].link, format!("{}/itm/1", server.uri()));

    let dumped = std::fs::read_dir(dumps.path()).unwrap().count();
    assert_eq!(dumped, 1);
}

#[tokio::test]
async fn retry_hop_is_bounded_when_still_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sch/i.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BLOCKED_PAGE))
        .expect(2)
        .mount(&server)
        .await;

    let dumps = TempDir::new().unwrap();
    let config = test_config(&dumps);
    let client = create_client(&config.http).unwrap();
    let scraper = EbayScraper::new(config);

    let url = format!("{}/sch/i.html?_nkw=ps5&LH_Sold=1", server.uri());
    let report = scraper.scrape(&client, &url).await.unwrap();

    assert!(report.retried);
    assert!(report.outcome.records.is_empty());
    assert_eq!(report.outcome.retry_url, None);
}

#[tokio::test]
async fn transport_failure_is_not_reported_as_empty_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dumps = TempDir::new().unwrap();
    let config = test_config(&dumps);
    let client = create_client(&config.http).unwrap();
    let scraper = EbayScraper::new(config);

    let url = format!("{}/sch/i.html?_nkw=ps5", server.uri());
    let err = scraper.scrape(&client, &url).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Blocked { .. }));
}
