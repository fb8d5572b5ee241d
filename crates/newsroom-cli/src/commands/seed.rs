use clap::Parser;
use newsroom_dal::{
    Pool,
    author::{AuthorRepository, CreateAuthor},
    news::{CreateNews, NewsRepository},
};
use tracing::info;

use crate::commands::Executor;

pub const SEED_AUTHORS: &[(&str, &str)] = &[
    ("author one", "author1@example.org"),
    ("author two", "author2@example.org"),
    ("author three", "author3@example.org"),
    ("author four", "author4@example.org"),
];

pub const SEED_NEWS_COUNT: usize = 11;

#[derive(Parser, Debug)]
pub struct SeedCmd {
    #[arg(
        long,
        env = "NEWSROOM_DATABASE_URL",
        help = "Database URL e.g. sqlite://newsroom.db?mode=rwc"
    )]
    pub database_url: String,
}

impl Executor for SeedCmd {
    async fn run(self) -> anyhow::Result<()> {
        let pool = newsroom_dal::new_pool(&self.database_url).await?;
        sqlx::migrate!("../../migrations").run(&pool).await?;
        seed(&pool).await
    }
}

/// Idempotent population of the baseline dataset: upserts keyed by the
/// unique email and slug, so re-running refreshes rows instead of
/// duplicating them.
pub async fn seed(pool: &Pool) -> anyhow::Result<()> {
    let author_repo = AuthorRepository::new(pool.clone());
    let news_repo = NewsRepository::new(pool.clone());

    let mut authors = Vec::with_capacity(SEED_AUTHORS.len());
    for (name, email) in SEED_AUTHORS {
        let author = author_repo
            .upsert(CreateAuthor {
                name: name.to_string(),
                email: email.parse()?,
            })
            .await?;
        authors.push(author);
    }

    for n in 1..=SEED_NEWS_COUNT {
        let author = &authors[(n - 1) % authors.len()];
        news_repo
            .upsert(CreateNews {
                slug: format!("news-{n}"),
                title: format!("News title {n}"),
                excerpt: format!("This is the excerpt for news {n}."),
                content: format!(
                    "This is the full content for news {n}. Lorem ipsum dolor sit amet..."
                ),
                published: n % 2 == 0,
                author_id: author.id,
            })
            .await?;
    }

    info!(
        "Seeded {} authors and {} news items",
        authors.len(),
        SEED_NEWS_COUNT
    );
    Ok(())
}
