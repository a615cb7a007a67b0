//! End-to-end tests: a real server on a loopback port, driven through
//! `StoreClient` and a client `Session`.

use plantcat::client::{self, ClientError, Session, StoreClient};
use plantcat::server::{router, AppState, PlantStore};
use plantcat::{Plant, PlantForm};
use tempfile::TempDir;

const CATALOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CATALOG>
  <PLANT>
    <COMMON>Bloodroot</COMMON>
    <BOTANICAL>Sanguinaria canadensis</BOTANICAL>
    <ZONE>4</ZONE>
    <LIGHT>Mostly Shady</LIGHT>
    <PRICE>$2.44</PRICE>
    <AVAILABILITY>031599</AVAILABILITY>
  </PLANT>
  <PLANT>
    <COMMON>Columbine</COMMON>
    <BOTANICAL>Aquilegia canadensis</BOTANICAL>
    <ZONE>3</ZONE>
    <LIGHT>Mostly Shady</LIGHT>
    <PRICE>$9.37</PRICE>
    <AVAILABILITY>030699</AVAILABILITY>
  </PLANT>
  <PLANT>
    <COMMON>bloodroot</COMMON>
    <BOTANICAL>SANGUINARIA CANADENSIS</BOTANICAL>
    <ZONE>4</ZONE>
    <LIGHT>Sun or Shade</LIGHT>
    <PRICE>$2.44</PRICE>
    <AVAILABILITY>031599</AVAILABILITY>
  </PLANT>
</CATALOG>"#;

/// Bind to port 0 and return the base URL.
async fn start_server(data_dir: &std::path::Path) -> String {
    let app = router(AppState::new(PlantStore::in_dir(data_dir)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn rose(id: u64) -> Plant {
    Plant {
        id,
        common: "Rose".into(),
        botanical: "Rosa".into(),
        zone: "5".into(),
        light: "Full Sun".into(),
        price: "12.50".into(),
        availability: "In stock".into(),
    }
}

#[tokio::test]
async fn health_check() {
    let temp = TempDir::new().unwrap();
    let client = StoreClient::new(&start_server(temp.path()).await);
    assert!(client.check_server().await);
}

#[tokio::test]
async fn unreachable_server_fails_health_check() {
    let client = StoreClient::new("http://127.0.0.1:1");
    assert!(!client.check_server().await);
    assert!(matches!(client.load().await, Err(ClientError::Http(_))));
}

#[tokio::test]
async fn first_load_imports_xml_catalog() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("plant_catalog.xml"), CATALOG).unwrap();
    let client = StoreClient::new(&start_server(temp.path()).await);

    let plants = client.load().await.unwrap();
    let ids: Vec<u64> = plants.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(plants[1].common, "Columbine");
    assert!(temp.path().join("plants.json").exists());
}

#[tokio::test]
async fn save_then_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let client = StoreClient::new(&start_server(temp.path()).await);

    // Spaces, quotes and ampersands must survive form encoding
    let mut tricky = rose(2);
    tricky.common = "Dutchman's Breeches & \"Friends\"".into();
    tricky.price = "$6.44".into();
    let plants = vec![rose(1), tricky];

    let response = client.save(&plants).await.unwrap();
    assert!(response.success);
    assert_eq!(response.message, "Data saved successfully");

    assert_eq!(client.load().await.unwrap(), plants);
}

#[tokio::test]
async fn session_mutations_persist_through_server() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("plant_catalog.xml"), CATALOG).unwrap();
    let client = StoreClient::new(&start_server(temp.path()).await);

    // Deduplicate the imported catalog
    let mut session = Session::new(client.load().await.unwrap());
    let outcome = session.deduplicate();
    assert!(outcome.persist);
    assert!(client::persist(&client, session.plants()).await.is_none());

    let stored = client.load().await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].id, 2);

    // Already clean: nothing to persist
    let mut session = Session::new(stored);
    assert!(!session.deduplicate().persist);

    // Add a plant
    let form = PlantForm::new("Rose", "Rosa", "5", "Full Sun", "12.50", "In stock");
    let outcome = session.add(&form).unwrap();
    assert!(outcome.persist);
    client::persist(&client, session.plants()).await;

    let stored = client.load().await.unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[2].id, 3);

    // Same name pair with different case is rejected before any save
    let mut session = Session::new(stored);
    let duplicate = PlantForm::new("rose", "ROSA", "5", "Full Sun", "1", "now");
    assert!(session.add(&duplicate).is_err());

    // Delete the first record
    session.select(0).unwrap();
    let outcome = session.delete(|_| true).unwrap();
    assert!(outcome.persist);
    client::persist(&client, session.plants()).await;

    let stored = client.load().await.unwrap();
    let commons: Vec<&str> = stored.iter().map(|p| p.common.as_str()).collect();
    assert_eq!(commons, vec!["Columbine", "Rose"]);
}

#[tokio::test]
async fn persist_failure_is_reported_not_fatal() {
    let client = StoreClient::new("http://127.0.0.1:1");
    let failure = client::persist(&client, &[rose(1)]).await.unwrap();
    assert!(failure.is_error());
    assert!(failure.message.starts_with("Error saving data"));
}
