//! End-to-end hydration through the real fetcher and parser, with HTTP
//! responses scripted per URL. No network access.

use std::collections::HashMap;
use std::sync::Mutex;
use twitscrape_core::{
    EndpointConfig, Facet, FacetKind, FailureKind, HttpClient, Hydrator, PostRecord, RawResponse,
    ScrapeError, SentimentVolume, StocktwitsFetcher, SymbolStore,
};

const BASE: &str = "http://mock.test";

/// Responses keyed by URL; anything unscripted is a 404.
#[derive(Default)]
struct ScriptedHttp {
    responses: HashMap<String, Result<RawResponse, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedHttp {
    fn respond(mut self, url: String, status: u16, body: &str) -> Self {
        self.responses.insert(url, Ok(RawResponse::new(status, body)));
        self
    }

    fn time_out(mut self, url: String) -> Self {
        self.responses.insert(url, Err("timed out".into()));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl HttpClient for ScriptedHttp {
    fn get(&self, url: &str) -> Result<RawResponse, ScrapeError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(resp)) => Ok(resp.clone()),
            Some(Err(msg)) => Err(ScrapeError::Network(msg.clone())),
            None => Ok(RawResponse::new(404, "Not Found")),
        }
    }
}

fn endpoints() -> EndpointConfig {
    EndpointConfig::with_base(BASE)
}

fn sentiment_page(sentiment: &str, volume: &str) -> String {
    format!(
        "<html><script>var s = {{\"symbol\":\"X\",\"sentimentChange\":{sentiment},\"volumeChange\":{volume},\"lastUpdated\":\"2021-05-01\"}};</script></html>"
    )
}

#[test]
fn invalid_symbol_is_pruned_and_valid_one_is_populated() {
    let e = endpoints();
    let http = ScriptedHttp::default()
        .respond(e.sentiment_url("HOGE.X"), 200, &sentiment_page("12.5", "40.1"))
        .respond(
            e.messages_primary("HOGE.X"),
            200,
            r#"{"messages":[{"body":"hi","user":{"username":"bob"}}]}"#,
        );
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, e));

    let mut store = SymbolStore::new(["HOGE.X", "Fake"]);
    let report = hydrator.hydrate(&mut store);

    assert_eq!(store.symbols(), ["HOGE.X"]);
    assert_eq!(store.get_posts("HOGE.X"), [PostRecord::new("hi", 0, "bob")]);
    assert_eq!(
        store.get_sentiment_volume("HOGE.X"),
        SentimentVolume::new("12.5", "40.1")
    );
    assert_eq!(report.invalid, vec!["Fake".to_string()]);

    // Removed symbol no longer serves anything.
    assert!(store.get_sentiment_volume("Fake").is_empty());
    assert!(store.get_posts("Fake").is_empty());
}

#[test]
fn removed_symbol_had_both_facets_fail_with_fetch_errors() {
    let http = ScriptedHttp::default();
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, endpoints()));

    let mut store = SymbolStore::new(["Fake"]);
    let report = hydrator.hydrate(&mut store);

    assert!(store.is_empty());
    let kinds: Vec<(FacetKind, FailureKind)> = report
        .failures
        .iter()
        .map(|f| (f.facet, f.failure.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (FacetKind::SentimentVolume, FailureKind::Fetch),
            (FacetKind::Posts, FailureKind::Fetch),
        ]
    );
    // Sentiment page, primary stream, fallback stream.
    assert_eq!(http.calls().len(), 3);
}

#[test]
fn posts_come_from_fallback_when_primary_fails() {
    let e = endpoints();
    let http = ScriptedHttp::default()
        .respond(e.messages_primary("AAPL"), 500, "internal error")
        .respond(
            e.messages_fallback("AAPL"),
            200,
            r#"{"messages":[{"body":"from fallback","likes":{"total":7},"user":{"username":"ann"}}]}"#,
        );
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, e.clone()));

    let mut store = SymbolStore::new(["AAPL"]);
    hydrator.hydrate(&mut store);

    assert_eq!(store.get_posts("AAPL"), [PostRecord::new("from fallback", 7, "ann")]);
    let calls = http.calls();
    let fallback_hits = calls
        .iter()
        .filter(|u| **u == e.messages_fallback("AAPL"))
        .count();
    assert_eq!(fallback_hits, 1);
}

#[test]
fn fallback_not_tried_when_primary_succeeds() {
    let e = endpoints();
    let http = ScriptedHttp::default().respond(e.messages_primary("AAPL"), 200, r#"{"messages":[]}"#);
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, e.clone()));

    let mut store = SymbolStore::new(["AAPL"]);
    hydrator.hydrate(&mut store);

    assert!(!http.calls().contains(&e.messages_fallback("AAPL")));
    assert_eq!(store.posts_facet("AAPL"), &Facet::Fetched(Vec::new()));
}

#[test]
fn malformed_sentiment_with_valid_posts_survives() {
    let e = endpoints();
    let http = ScriptedHttp::default()
        .respond(e.sentiment_url("SAFEMOON.X"), 200, "<html>redesigned page</html>")
        .respond(
            e.messages_primary("SAFEMOON.X"),
            200,
            r#"{"messages":[{"body":"gm","likes":{"total":1},"user":{"username":"zed"}}]}"#,
        );
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, e));

    let mut store = SymbolStore::new(["SAFEMOON.X"]);
    let report = hydrator.hydrate(&mut store);

    assert_eq!(store.symbols(), ["SAFEMOON.X"]);
    assert!(store.get_sentiment_volume("SAFEMOON.X").is_empty());
    assert_eq!(
        store.sentiment_facet("SAFEMOON.X").failure().map(|f| f.kind),
        Some(FailureKind::Parse)
    );
    assert_eq!(store.get_posts("SAFEMOON.X").len(), 1);
    assert!(report.all_valid());
}

#[test]
fn timeout_on_one_symbol_does_not_stop_the_pass() {
    let e = endpoints();
    let http = ScriptedHttp::default()
        .time_out(e.sentiment_url("SLOW"))
        .time_out(e.messages_primary("SLOW"))
        .respond(e.sentiment_url("FAST"), 200, &sentiment_page("1", "2"));
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, e));

    let mut store = SymbolStore::new(["SLOW", "FAST"]);
    let report = hydrator.hydrate(&mut store);

    assert_eq!(store.symbols(), ["FAST"]);
    assert_eq!(report.invalid, vec!["SLOW".to_string()]);
    assert!(report.failures[..2]
        .iter()
        .all(|f| f.symbol == "SLOW" && f.failure.kind == FailureKind::Unknown));
}

#[test]
fn every_survivor_has_at_least_one_facet() {
    let e = endpoints();
    let http = ScriptedHttp::default()
        .respond(e.sentiment_url("A"), 200, &sentiment_page("1", "1"))
        .respond(e.messages_fallback("B"), 200, r#"{"messages":[]}"#)
        .respond(e.sentiment_url("C"), 503, "")
        .respond(e.messages_primary("D"), 200, "not json");
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, e));

    let mut store = SymbolStore::new(["A", "B", "C", "D"]);
    hydrator.hydrate(&mut store);

    assert_eq!(store.symbols(), ["A", "B"]);
    for symbol in store.symbols() {
        assert!(
            store.sentiment_facet(symbol).is_fetched() || store.posts_facet(symbol).is_fetched(),
            "{symbol} survived without data"
        );
    }
}

#[test]
fn second_pass_only_touches_survivors() {
    let e = endpoints();
    let http = ScriptedHttp::default().respond(e.sentiment_url("A"), 200, &sentiment_page("1", "1"));
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, e.clone()));

    let mut store = SymbolStore::new(["A", "GONE"]);
    hydrator.hydrate(&mut store);
    let first_pass_calls = http.calls().len();

    let report = hydrator.hydrate(&mut store);
    let second: Vec<String> = http.calls()[first_pass_calls..].to_vec();

    assert_eq!(report.attempted, 1);
    assert!(second.iter().all(|u| !u.contains("GONE")));
    assert_eq!(store.symbols(), ["A"]);
}

#[test]
fn one_bad_message_does_not_cost_the_posts_facet() {
    let e = endpoints();
    let http = ScriptedHttp::default().respond(
        e.messages_primary("SAFEMOON.X"),
        200,
        r#"{"messages":[
            {"body":"deleted author","user":null},
            {"body":"odd likes","likes":{"total":-1},"user":{"username":"kim"}},
            {"body":"fine","likes":{"total":3},"user":{"username":"lee"}}
        ]}"#,
    );
    let hydrator = Hydrator::new(StocktwitsFetcher::new(&http, e));

    let mut store = SymbolStore::new(["SAFEMOON.X"]);
    let report = hydrator.hydrate(&mut store);

    assert_eq!(store.symbols(), ["SAFEMOON.X"]);
    assert!(report.invalid.is_empty());
    assert_eq!(
        store.get_posts("SAFEMOON.X"),
        [
            PostRecord::new("odd likes", 0, "kim"),
            PostRecord::new("fine", 3, "lee"),
        ]
    );
    assert!(matches!(store.posts_facet("SAFEMOON.X"), Facet::Fetched(_)));
}
