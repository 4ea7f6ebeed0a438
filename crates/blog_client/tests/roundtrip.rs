use blog_client::{ClientConfig, HttpArticleClient};
use blog_core::{ArticleApi, ArticleId, ArticleInput, Error};
use blog_store::MemoryStore;
use chrono::Utc;

async fn client_for(store: MemoryStore) -> HttpArticleClient {
    let (addr, _handle) = blog_store::spawn(store, "articles").await.unwrap();
    HttpArticleClient::new(ClientConfig::new(format!("http://{}", addr))).unwrap()
}

fn input(title: &str) -> ArticleInput {
    ArticleInput {
        title: title.to_string(),
        description: "desc".to_string(),
        content: "First paragraph.\n\nSecond paragraph.".to_string(),
        category: vec!["FINANCE".to_string(), "CAREER".to_string()],
        date: Utc::now(),
        cover_image: Some("https://images.example.com/cover.jpg".to_string()),
    }
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let client = client_for(MemoryStore::new()).await;

    let payload = input("New Post");
    let created = client.create_article(&payload).await.unwrap();
    assert!(!created.id.as_str().is_empty());

    let fetched = client.get_article(&created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.to_input(), payload);
}

#[tokio::test]
async fn test_list_reflects_writes() {
    let client = client_for(MemoryStore::new()).await;
    assert!(client.list_articles().await.unwrap().is_empty());

    client.create_article(&input("One")).await.unwrap();
    client.create_article(&input("Two")).await.unwrap();

    let titles: Vec<_> = client
        .list_articles()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[tokio::test]
async fn test_missing_article_is_not_found() {
    let client = client_for(MemoryStore::new()).await;
    let err = client.get_article(&ArticleId::from("404")).await.unwrap_err();
    assert_eq!(err, Error::NotFound(ArticleId::from("404")));
}

#[tokio::test]
async fn test_rejected_payload_is_validation_error() {
    let client = client_for(MemoryStore::new()).await;
    let mut payload = input("Blank body");
    payload.content = String::new();
    let err = client.create_article(&payload).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_unknown_resource_is_server_error() {
    let (addr, _handle) = blog_store::spawn(MemoryStore::new(), "articles").await.unwrap();
    let config = ClientConfig::new(format!("http://{}", addr)).with_resource("blogs");
    let client = HttpArticleClient::new(config).unwrap();
    let err = client.list_articles().await.unwrap_err();
    assert!(matches!(err, Error::Server { status: 404, .. }), "unexpected error: {:?}", err);
}
