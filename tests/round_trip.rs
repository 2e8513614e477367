use mockito::{Matcher, Server};
use serial_test::serial;
use sk_client::language::Language;
use sk_client::load_config::ENDPOINT_ENV;
use sk_client::pipeline::RunReport;
use sk_client::protocol::SEPARATOR;
use sk_client::{run, Cli};
use std::fs::{create_dir_all, read_to_string, write};
use tempfile::tempdir;

#[tokio::test]
#[serial]
async fn test_run_round_trip_against_service_is_idempotent() {
    std::env::remove_var(ENDPOINT_ENV);
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    let dst = tmp.path().join("dst");
    create_dir_all(src.join("model")).unwrap();
    write(src.join("model/User.swift"), "struct User {}\n").unwrap();

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/sek/")
        .match_query(Matcher::UrlEncoded("input".into(), "swift".into()))
        .match_body(Matcher::Regex("NEW FILE: model/User".into()))
        .with_status(200)
        .with_body(format!("{SEPARATOR}model/User\nclass User\n\n\n"))
        .expect(2)
        .create_async()
        .await;

    let cli = || Cli {
        language: Language::Swift,
        source_dir: src.clone(),
        target_dir: Some(dst.clone()),
        extra: Vec::new(),
        config: None,
        endpoint: Some(format!("{}/sek/", server.url())),
        wait: false,
    };

    let first = run(cli()).await.expect("First run should succeed");
    let second = run(cli()).await.expect("Second run should succeed");

    mock.assert_async().await;
    assert_eq!(read_to_string(dst.join("model/User.kt")).unwrap(), "class User\n");
    match (first, second) {
        (RunReport::RoundTrip { sync: a, .. }, RunReport::RoundTrip { sync: b, .. }) => {
            assert_eq!(a.created, 1);
            assert_eq!(b.created + b.overwritten, 0);
            assert_eq!(b.unchanged, 1);
        }
        other => panic!("Expected round-trip reports, got {other:?}"),
    }
}
