use newsroom_dal::news::News;
use newsroom_e2e_tests::{
    prepare_env,
    rest::{create_author, create_news, error_message},
};
use serde_json::json;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_news_crud() {
    let (client, base_url, _state, _config_guard, _server_guard) =
        prepare_env("test_news_crud").await.unwrap();

    let author = create_author(&client, &base_url, "Writer", "writer@example.org")
        .await
        .unwrap();

    let created = create_news(
        &client,
        &base_url,
        &json!({
            "title": "Hello World News!",
            "excerpt": "A short excerpt",
            "content": "The full content",
            "authorId": author.id,
        }),
    )
    .await
    .unwrap();

    // slug is derived from the title when not supplied
    assert_eq!(created.slug, "hello-world-news");
    assert!(!created.published);
    assert_eq!(created.author_id, author.id);
    assert_eq!(created.author.email, "writer@example.org");

    let response = client
        .get(format!("{base_url}/news/hello-world-news"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let rec: News = response.json().await.unwrap();
    assert_eq!(rec.id, created.id);
    assert_eq!(rec.author.name, "Writer");

    // patching the title leaves the slug alone
    let response = client
        .put(format!("{base_url}/news/hello-world-news"))
        .json(&json!({"title": "Updated title", "published": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let rec: News = response.json().await.unwrap();
    assert_eq!(rec.slug, "hello-world-news");
    assert_eq!(rec.title, "Updated title");
    assert!(rec.published);
    assert_eq!(rec.excerpt, "A short excerpt");

    // an explicit slug is normalized and replaces the old one
    let response = client
        .put(format!("{base_url}/news/hello-world-news"))
        .json(&json!({"slug": "Renamed Slug"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let rec: News = response.json().await.unwrap();
    assert_eq!(rec.slug, "renamed-slug");

    let response = client
        .get(format!("{base_url}/news/hello-world-news"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .delete(format!("{base_url}/news/renamed-slug"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{base_url}/news/renamed-slug"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_news_sanitizes_markup() {
    let (client, base_url, _state, _config_guard, _server_guard) =
        prepare_env("test_news_sanitizes_markup").await.unwrap();

    let author = create_author(&client, &base_url, "Writer", "writer@example.org")
        .await
        .unwrap();

    let created = create_news(
        &client,
        &base_url,
        &json!({
            "title": "<script>alert(1)</script>Big News",
            "excerpt": "Stay <b>tuned</b>",
            "content": "Read <img src=x onerror=alert(1)> more",
            "authorId": author.id,
        }),
    )
    .await
    .unwrap();

    assert_eq!(created.title, "Big News");
    assert_eq!(created.slug, "big-news");
    assert_eq!(created.excerpt, "Stay tuned");
    assert_eq!(created.content, "Read  more");
}

#[tokio::test]
#[traced_test]
async fn test_news_author_not_found() {
    let (client, base_url, _state, _config_guard, _server_guard) =
        prepare_env("test_news_author_not_found").await.unwrap();

    let response = client
        .post(format!("{base_url}/news"))
        .json(&json!({
            "title": "Orphan",
            "excerpt": "Orphan excerpt",
            "content": "Orphan content",
            "authorId": 9999,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await.unwrap(), "author not found");

    // nothing was persisted
    let response = client
        .get(format!("{base_url}/news/count"))
        .send()
        .await
        .unwrap();
    let count: i64 = response.json().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[traced_test]
async fn test_news_slug_conflict() {
    let (client, base_url, _state, _config_guard, _server_guard) =
        prepare_env("test_news_slug_conflict").await.unwrap();

    let author = create_author(&client, &base_url, "Writer", "writer@example.org")
        .await
        .unwrap();

    let payload = json!({
        "title": "Same Title",
        "excerpt": "Excerpt",
        "content": "Content",
        "authorId": author.id,
    });
    create_news(&client, &base_url, &payload).await.unwrap();

    let response = client
        .post(format!("{base_url}/news"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await.unwrap(), "slug already exists");

    // renaming onto a taken slug fails the same way
    create_news(
        &client,
        &base_url,
        &json!({
            "title": "Other Title",
            "excerpt": "Excerpt",
            "content": "Content",
            "authorId": author.id,
        }),
    )
    .await
    .unwrap();
    let response = client
        .put(format!("{base_url}/news/other-title"))
        .json(&json!({"slug": "same-title"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await.unwrap(), "slug already exists");
}

#[tokio::test]
#[traced_test]
async fn test_news_update_revalidates_author() {
    let (client, base_url, _state, _config_guard, _server_guard) =
        prepare_env("test_news_update_revalidates_author")
            .await
            .unwrap();

    let author = create_author(&client, &base_url, "Writer", "writer@example.org")
        .await
        .unwrap();
    create_news(
        &client,
        &base_url,
        &json!({
            "title": "Movable",
            "excerpt": "Excerpt",
            "content": "Content",
            "authorId": author.id,
        }),
    )
    .await
    .unwrap();

    let response = client
        .put(format!("{base_url}/news/movable"))
        .json(&json!({"authorId": 9999}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(error_message(response).await.unwrap(), "author not found");
}

#[tokio::test]
#[traced_test]
async fn test_news_missing() {
    let (client, base_url, _state, _config_guard, _server_guard) =
        prepare_env("test_news_missing").await.unwrap();

    let response = client
        .get(format!("{base_url}/news/no-such-slug"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .put(format!("{base_url}/news/no-such-slug"))
        .json(&json!({"title": "Whatever"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client
        .delete(format!("{base_url}/news/no-such-slug"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
#[traced_test]
async fn test_news_paging() {
    let (client, base_url, _state, _config_guard, _server_guard) =
        prepare_env("test_news_paging").await.unwrap();

    let author = create_author(&client, &base_url, "Writer", "writer@example.org")
        .await
        .unwrap();
    for n in 1..=3 {
        create_news(
            &client,
            &base_url,
            &json!({
                "title": format!("Story {n}"),
                "excerpt": "Excerpt",
                "content": "Content",
                "authorId": author.id,
            }),
        )
        .await
        .unwrap();
    }

    let response = client
        .get(format!("{base_url}/news?limit=2&offset=1"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    let data = body.get("data").unwrap().as_array().unwrap();
    assert_eq!(data.len(), 2);
    // newest first, offset skips the head of the list
    assert_eq!(
        data[0].get("slug").unwrap().as_str(),
        Some("story-2")
    );
    let paging = body.get("paging").unwrap();
    assert_eq!(paging.get("total").unwrap().as_i64(), Some(3));

    // the news listing caps the offset
    let response = client
        .get(format!("{base_url}/news?offset=100001"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}
