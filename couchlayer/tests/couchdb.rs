#![cfg(feature = "couchdb")]

use couchlayer::{couchdb::CouchDbStore, prelude::*};
use mockito::{Matcher, Server};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const DB_PATH: &str = "/cozy-io-cozy-files";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn store_for(server: &Server) -> DocumentStore<CouchDbStore> {
    init_tracing();
    DocumentStore::new(CouchDbStore::builder(&server.url()).build().await.unwrap())
}

fn created_body(rev: &str, ok: bool) -> String {
    json!({ "ok": ok, "id": "io.cozy.files/x", "rev": rev }).to_string()
}

#[tokio::test]
async fn create_document_into_existing_database() {
    let mut server = Server::new_async().await;
    let post = server
        .mock("POST", DB_PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({ "doctype": "io.cozy.files", "name": "a.txt" })),
            Matcher::Regex(r#""_id":"io\.cozy\.files/[0-9a-f]{32}""#.into()),
        ]))
        .with_status(201)
        .with_body(created_body("1-abc", true))
        .create_async()
        .await;

    let store = store_for(&server).await;
    let mut doc = JsonDoc::new("io.cozy.files");
    doc.insert("name".into(), json!("a.txt"));

    store.create_document("cozy-", &mut doc).await.unwrap();

    assert_eq!(doc.rev(), "1-abc");
    post.assert_async().await;
}

#[tokio::test]
async fn create_document_creates_missing_database_and_retries_once() {
    let mut server = Server::new_async().await;
    let first_post = server
        .mock("POST", DB_PATH)
        .with_status(404)
        .with_body(r#"{"error":"not_found","reason":"Database does not exist."}"#)
        .expect(1)
        .create_async()
        .await;
    let put = server
        .mock("PUT", DB_PATH)
        .with_status(201)
        .with_body(r#"{"ok":true}"#)
        .expect(1)
        .create_async()
        .await;
    let second_post = server
        .mock("POST", DB_PATH)
        .with_status(201)
        .with_body(created_body("1-def", true))
        .expect(1)
        .create_async()
        .await;

    let store = store_for(&server).await;
    let mut doc = JsonDoc::new("io.cozy.files");

    store.create_document("cozy-", &mut doc).await.unwrap();

    assert!(doc.id().starts_with("io.cozy.files/"));
    assert_eq!(doc.rev(), "1-def");
    first_post.assert_async().await;
    put.assert_async().await;
    second_post.assert_async().await;
}

#[tokio::test]
async fn unacknowledged_write_is_a_protocol_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", DB_PATH)
        .with_status(200)
        .with_body(created_body("1-abc", false))
        .create_async()
        .await;

    let store = store_for(&server).await;
    let mut doc = JsonDoc::new("io.cozy.files");

    let err = store.create_document("cozy-", &mut doc).await.unwrap_err();

    assert!(matches!(err, StoreError::Protocol(_)));
    assert!(err.as_server().is_none());
    assert_eq!(doc.rev(), "");
}

#[tokio::test]
async fn preset_id_is_rejected_before_any_request() {
    let mut server = Server::new_async().await;
    let post = server.mock("POST", Matcher::Any).expect(0).create_async().await;
    let put = server.mock("PUT", Matcher::Any).expect(0).create_async().await;

    let store = store_for(&server).await;
    let mut doc = JsonDoc::new("io.cozy.files");
    doc.set_id("io.cozy.files/mine".into());

    let err = store.create_document("cozy-", &mut doc).await.unwrap_err();

    assert!(matches!(err, StoreError::InvalidDocument(_)));
    post.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn get_from_missing_database_is_wrong_doctype() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/cozy-io-cozy-files/io.cozy.files%2F42")
        .with_status(404)
        .with_body(r#"{"error":"not_found","reason":"no_db_file"}"#)
        .create_async()
        .await;

    let store = store_for(&server).await;

    let err = store
        .get::<JsonDoc>("cozy-", "io.cozy.files", "42")
        .await
        .unwrap_err();

    let server_err = err.as_server().unwrap();
    assert_eq!(server_err.status, 404);
    assert_eq!(server_err.reason, "wrong_doctype");
}

#[tokio::test]
async fn get_returns_stored_document() {
    let mut server = Server::new_async().await;
    let id = "io.cozy.files/0123456789abcdef0123456789abcdef";
    let get = server
        .mock("GET", "/cozy-io-cozy-files/io.cozy.files%2F0123456789abcdef0123456789abcdef")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_body(json!({ "_id": id, "_rev": "2-b", "doctype": "io.cozy.files" }).to_string())
        .create_async()
        .await;

    let store = store_for(&server).await;

    let doc: JsonDoc = store.get("cozy-", "io.cozy.files", id).await.unwrap();

    assert_eq!(doc.id(), id);
    assert_eq!(doc.rev(), "2-b");
    assert_eq!(doc.doctype(), "io.cozy.files");
    get.assert_async().await;
}

#[tokio::test]
async fn reset_database_stops_after_failed_delete() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", DB_PATH)
        .with_status(401)
        .with_body(r#"{"error":"unauthorized","reason":"You are not a server admin."}"#)
        .create_async()
        .await;
    let put = server.mock("PUT", DB_PATH).expect(0).create_async().await;

    let store = store_for(&server).await;

    let err = store.reset_database("cozy-", "io.cozy.files").await.unwrap_err();

    assert_eq!(err.as_server().unwrap().status, 401);
    delete.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn reset_database_deletes_then_creates() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", DB_PATH)
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", DB_PATH)
        .with_status(201)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let store = store_for(&server).await;

    store.reset_database("cozy-", "io.cozy.files").await.unwrap();

    delete.assert_async().await;
    put.assert_async().await;
}
