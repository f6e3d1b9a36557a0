use proptest::prelude::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::person::Person;
use crate::roster::Roster;
use crate::source::{DataSource, SourceError, SourceOptions};
use crate::transform;

fn people_strategy() -> impl Strategy<Value = Vec<Person>> {
    prop::collection::vec(("[a-zA-Z]{0,6}", "[a-zA-Z]{0,6}", "[a-z]{0,3}"), 0..24).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(first, last, url)| Person::new(&first, &last, &url))
                .collect()
        },
    )
}

fn canonical(list: &[Person]) -> Vec<Person> {
    let mut out = list.to_vec();
    out.sort_by(|a, b| {
        (&a.first_name, &a.last_name, &a.headshot_url).cmp(&(
            &b.first_name,
            &b.last_name,
            &b.headshot_url,
        ))
    });
    out
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(list in people_strategy()) {
        let shuffled = transform::shuffle_list(&list);
        prop_assert_eq!(shuffled.len(), list.len());
        prop_assert_eq!(canonical(&shuffled), canonical(&list));
    }

    #[test]
    fn filter_keeps_exactly_the_matches(list in people_strategy(), query in "[a-zA-Z]{0,3}") {
        let filtered = transform::filter_by_name(&query, &list);
        let q = query.to_lowercase();
        let matches = |p: &Person| {
            p.first_name.to_lowercase().contains(&q) || p.last_name.to_lowercase().contains(&q)
        };
        for p in filtered.iter() {
            prop_assert!(matches(p));
        }
        let expected: Vec<Person> = list.iter().filter(|p| matches(*p)).cloned().collect();
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn empty_query_is_identity(list in people_strategy()) {
        prop_assert_eq!(transform::filter_by_name("", &list), list);
    }

    #[test]
    fn sort_by_first_name_is_non_decreasing(list in people_strategy()) {
        let sorted = transform::sort_by_first_name(&list);
        prop_assert_eq!(sorted.len(), list.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].first_name <= pair[1].first_name);
        }
        prop_assert_eq!(canonical(&sorted), canonical(&list));
    }

    #[test]
    fn sort_by_last_name_is_non_decreasing(list in people_strategy()) {
        let sorted = transform::sort_by_last_name(&list);
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].last_name <= pair[1].last_name);
        }
    }

    #[test]
    fn transforms_leave_input_untouched(list in people_strategy(), query in "[a-z]{0,2}") {
        let before = list.clone();
        let _ = transform::shuffle_list(&list);
        let _ = transform::sort_by_first_name(&list);
        let _ = transform::sort_by_last_name(&list);
        let _ = transform::filter_by_name(&query, &list);
        prop_assert_eq!(list, before);
    }

    #[test]
    fn visible_is_always_drawn_from_full(list in people_strategy(), query in "[a-z]{0,2}") {
        let mut roster = Roster::new();
        roster.on_fetch_complete(list.clone()).unwrap();
        roster.on_search(&query);
        roster.on_shuffle();
        for p in roster.visible() {
            prop_assert!(list.contains(p));
        }
        prop_assert_eq!(roster.full_list(), list.as_slice());
    }
}

/// Serves exactly one canned HTTP response on a loopback port and returns the
/// URL to request.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let mut seen = Vec::new();
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
            if seen.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });
    format!("http://{addr}/api/v1.0/profiles")
}

fn local_source(url: &str) -> DataSource {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    DataSource::with_client(client, url, "http:")
}

#[tokio::test]
async fn fetch_decodes_successful_response() {
    let url = serve_once(
        "200 OK",
        r#"[{"firstName":"Viju","lastName":"Legard","headshot":{"url":"//img/viju.jpg"}},
            {"firstName":"Matt","lastName":"Seibert","headshot":{"url":"//img/matt.jpg"}}]"#,
    )
    .await;
    let people = local_source(&url).fetch_person_list().await.unwrap();
    assert_eq!(
        people,
        vec![
            Person::new("Viju", "Legard", "http://img/viju.jpg"),
            Person::new("Matt", "Seibert", "http://img/matt.jpg"),
        ]
    );
}

#[tokio::test]
async fn fetch_fails_on_server_error_and_roster_stays_empty() {
    let url = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
    let result = local_source(&url).fetch_person_list().await;
    assert!(matches!(result, Err(SourceError::FetchFailed { status: 500 })));

    let mut roster = Roster::new();
    if let Ok(people) = result {
        roster.on_fetch_complete(people).unwrap();
    }
    roster.on_shuffle();
    roster.on_sort_first();
    roster.on_search("a");
    assert!(!roster.is_populated());
    assert!(roster.visible().is_empty());
}

#[tokio::test]
async fn fetch_treats_not_found_as_failure() {
    let url = serve_once("404 Not Found", "[]").await;
    let result = local_source(&url).fetch_person_list().await;
    assert!(matches!(result, Err(SourceError::FetchFailed { status: 404 })));
}

#[tokio::test]
async fn fetch_reports_malformed_body() {
    let url = serve_once("200 OK", "not json").await;
    let result = local_source(&url).fetch_person_list().await;
    assert!(matches!(result, Err(SourceError::Decode { .. })));
}

#[test]
fn invalid_proxy_is_rejected_when_building_the_source() {
    let options = SourceOptions {
        proxy: Some("http://[::1".to_string()),
        ..SourceOptions::default()
    };
    match DataSource::new(options) {
        Err(SourceError::ProxySetup { proxy, .. }) => assert_eq!(proxy, "http://[::1"),
        other => panic!("expected a proxy setup error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_reports_transport_error_when_nothing_listens() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/api/v1.0/profiles");
    let result = local_source(&url).fetch_person_list().await;
    match result {
        Err(SourceError::Transport { url: failed, .. }) => assert_eq!(failed, url),
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[test]
fn viju_juj_scenario() {
    let list = vec![Person::new("Viju", "Legard", "")];
    assert!(transform::filter_by_name("juj", &list).is_empty());
}
