use newsroom_cli::commands::seed::{SEED_AUTHORS, SEED_NEWS_COUNT, seed};
use newsroom_dal::{ListingParams, author::AuthorRepository, news::NewsRepository};
use tracing_test::traced_test;

async fn seeded_pool() -> (newsroom_dal::Pool, tempfile::TempDir) {
    let dir = tempfile::TempDir::with_prefix("seed_").unwrap();
    let url = format!("sqlite://{}/newsroom.db?mode=rwc", dir.path().display());
    let pool = newsroom_dal::new_pool(&url).await.unwrap();
    sqlx::migrate!("../../migrations").run(&pool).await.unwrap();
    (pool, dir)
}

#[tokio::test]
#[traced_test]
async fn test_seed_twice_is_idempotent() {
    let (pool, _dir) = seeded_pool().await;

    seed(&pool).await.unwrap();
    seed(&pool).await.unwrap();

    let authors = AuthorRepository::new(pool.clone());
    let news = NewsRepository::new(pool.clone());

    assert_eq!(authors.count().await.unwrap(), SEED_AUTHORS.len() as i64);
    assert_eq!(news.count().await.unwrap(), SEED_NEWS_COUNT as i64);
}

#[tokio::test]
#[traced_test]
async fn test_seed_fixed_values() {
    let (pool, _dir) = seeded_pool().await;

    seed(&pool).await.unwrap();

    let news = NewsRepository::new(pool.clone());

    let third = news.get_by_slug("news-3").await.unwrap();
    assert_eq!(third.title, "News title 3");
    assert_eq!(third.excerpt, "This is the excerpt for news 3.");
    assert_eq!(
        third.content,
        "This is the full content for news 3. Lorem ipsum dolor sit amet..."
    );
    // odd items are unpublished, even items published
    assert!(!third.published);
    let second = news.get_by_slug("news-2").await.unwrap();
    assert!(second.published);

    // authors are assigned round robin
    assert_eq!(third.author.email, "author3@example.org");
    assert_eq!(second.author.name, "author two");
    let fifth = news.get_by_slug("news-5").await.unwrap();
    assert_eq!(fifth.author.email, "author1@example.org");

    let authors = AuthorRepository::new(pool.clone());
    let batch = authors.list(ListingParams::new(0, 10)).await.unwrap();
    assert_eq!(batch.total, 4);
    let mut emails: Vec<_> = batch.rows.iter().map(|a| a.email.clone()).collect();
    emails.sort();
    assert_eq!(
        emails,
        vec![
            "author1@example.org",
            "author2@example.org",
            "author3@example.org",
            "author4@example.org"
        ]
    );
}

#[tokio::test]
#[traced_test]
async fn test_seed_refreshes_drifted_rows() {
    let (pool, _dir) = seeded_pool().await;

    seed(&pool).await.unwrap();

    // drift one row away from the seed values
    let news = NewsRepository::new(pool.clone());
    news.update(
        "news-1",
        newsroom_dal::news::NewsPatch {
            title: Some("Vandalized".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    seed(&pool).await.unwrap();

    let restored = news.get_by_slug("news-1").await.unwrap();
    assert_eq!(restored.title, "News title 1");
    assert_eq!(news.count().await.unwrap(), SEED_NEWS_COUNT as i64);
}

#[tokio::test]
#[traced_test]
async fn test_seed_author_ids_used_round_robin() {
    let (pool, _dir) = seeded_pool().await;

    seed(&pool).await.unwrap();

    let news = NewsRepository::new(pool.clone());
    let batch = news.list(ListingParams::new(0, 100)).await.unwrap();
    assert_eq!(batch.rows.len(), SEED_NEWS_COUNT);
    for item in batch.rows {
        let n: usize = item
            .slug
            .strip_prefix("news-")
            .unwrap()
            .parse()
            .unwrap();
        let expected = SEED_AUTHORS[(n - 1) % SEED_AUTHORS.len()].1;
        assert_eq!(item.author.email, expected, "slug: {}", item.slug);
    }
}
