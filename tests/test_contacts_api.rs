//! End-to-end exercise of the contacts API: create, list, search, update,
//! delete and CSV export, driven over HTTP against an in-process server.
//!
//! Requires a reachable Postgres (`DATABASE_URL`); the test skips cleanly
//! when the variable is unset so the suite stays green without a database.

use contact_directory::transport;
use contact_directory::{ContactService, ContactStore};
use serde_json::json;
use std::env;
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_contacts_api() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let Ok(database_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping test_contacts_api");
        return Ok(());
    };

    let store = ContactStore::connect(&database_url, 5).await?;
    let pool = store.pool().clone();
    let service = Arc::new(ContactService::new(store));
    let app_state = transport::http::AppState { contacts: service };
    let router = transport::http::create_router(app_state);

    // Start from a clean slate.
    sqlx::query("TRUNCATE contacts, phone_numbers RESTART IDENTITY")
        .execute(&pool)
        .await?;

    // Bind to an ephemeral port to avoid conflicts if an API server is already running.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Wait for the server to accept connections.
    for _ in 0..30 {
        match tokio::net::TcpStream::connect(("127.0.0.1", port)).await {
            Ok(_) => break,
            Err(_) => tokio::time::sleep(std::time::Duration::from_millis(100)).await,
        }
    }

    let base_url = format!("http://127.0.0.1:{}", port);
    let client = reqwest::Client::new();

    // --- create: two fresh numbers -> 201 ---
    let resp = client
        .post(format!("{}/contacts", base_url))
        .json(&json!({
            "name": "Ada Lovelace",
            "phoneNumbers": ["555-0100", "555-0101"],
            "image": "ada.png"
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), 201);

    // --- list contains both numbers, comma-joined (order-independent) ---
    let contacts: serde_json::Value = client
        .get(format!("{}/contacts", base_url))
        .send()
        .await?
        .json()
        .await?;
    let contacts = contacts.as_array().expect("list returns an array");
    assert_eq!(contacts.len(), 1);
    let ada = &contacts[0];
    assert_eq!(ada["name"], "Ada Lovelace");
    assert_eq!(ada["image"], "ada.png");
    let mut numbers: Vec<&str> = ada["phoneNumbers"]
        .as_str()
        .expect("phoneNumbers is a comma-joined string")
        .split(',')
        .collect();
    numbers.sort_unstable();
    assert_eq!(numbers, ["555-0100", "555-0101"]);
    let ada_id = ada["id"].as_i64().expect("id is an integer");

    // --- create reusing a stored number -> 400 naming it, no partial write ---
    let resp = client
        .post(format!("{}/contacts", base_url))
        .json(&json!({
            "name": "Imposter",
            "phoneNumbers": ["555-0100", "555-9999"],
            "image": null
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await?;
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("555-0100"));

    let contact_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
        .fetch_one(&pool)
        .await?;
    assert_eq!(contact_count, 1, "duplicate create must not write a contact row");
    let number_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM phone_numbers")
        .fetch_one(&pool)
        .await?;
    assert_eq!(number_count, 2, "duplicate create must not write phone-number rows");

    // --- second contact for the search checks ---
    let resp = client
        .post(format!("{}/contacts", base_url))
        .json(&json!({
            "name": "Grace Hopper",
            "phoneNumbers": ["555-0202"]
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), 201);

    // --- search by a substring matching only a phone number ---
    let matches: serde_json::Value = client
        .get(format!("{}/contacts/search", base_url))
        .query(&[("query", "0202")])
        .send()
        .await?
        .json()
        .await?;
    let matches = matches.as_array().expect("search returns an array");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "Grace Hopper");
    assert_eq!(matches[0]["phoneNumbers"], "555-0202");

    // --- search by name substring is case-insensitive ---
    let matches: serde_json::Value = client
        .get(format!("{}/contacts/search", base_url))
        .query(&[("query", "lovelace")])
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(matches.as_array().map(|m| m.len()), Some(1));

    // --- update replaces the phone-number set wholesale ---
    let resp = client
        .put(format!("{}/contacts/{}", base_url, ada_id))
        .json(&json!({
            "name": "Ada King",
            "phoneNumbers": ["555-0303"],
            "image": null
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);

    let rows: Vec<String> =
        sqlx::query_scalar("SELECT phone_number FROM phone_numbers WHERE contact_id = $1")
            .bind(ada_id)
            .fetch_all(&pool)
            .await?;
    assert_eq!(rows, ["555-0303"], "update must replace, not merge");

    // --- export: header + one row per contact, attachment headers set ---
    let resp = client
        .get(format!("{}/contacts/export", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/csv")
    );
    assert_eq!(
        resp.headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"contacts.csv\"")
    );
    let csv_text = resp.text().await?;
    let mut lines = csv_text.lines();
    assert_eq!(lines.next(), Some("ID,Name,Image,Phone Numbers"));
    assert_eq!(lines.count(), 2, "one CSV row per contact");
    assert!(csv_text.contains("Ada King"));

    // --- delete is idempotent: an unknown id still answers 200 ---
    let resp = client
        .delete(format!("{}/contacts/{}", base_url, 999_999))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);

    // --- delete removes the contact and all its numbers ---
    let resp = client
        .delete(format!("{}/contacts/{}", base_url, ada_id))
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    let orphan_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM phone_numbers WHERE contact_id = $1")
            .bind(ada_id)
            .fetch_one(&pool)
            .await?;
    assert_eq!(orphan_count, 0);

    // --- malformed body -> 422 ---
    let resp = client
        .post(format!("{}/contacts", base_url))
        .header("content-type", "application/json")
        .body("{\"name\": 42}")
        .send()
        .await?;
    assert_eq!(resp.status(), 422);

    // --- health ---
    let resp = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(resp.status(), 200);

    Ok(())
}
