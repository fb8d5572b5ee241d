use anyhow::Result;
use newsroom_dal::{author::Author, news::News};
use serde_json::json;
use tracing::info;

pub async fn create_author(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    email: &str,
) -> Result<Author> {
    let payload = json!({"name": name, "email": email});

    let response = client
        .post(format!("{base_url}/authors"))
        .json(&payload)
        .send()
        .await?;
    assert!(response.status().is_success());
    assert!(response.status().as_u16() == 201);

    let new_author: Author = response.json().await?;

    Ok(new_author)
}

pub async fn create_news<T>(client: &reqwest::Client, base_url: &str, payload: &T) -> Result<News>
where
    T: serde::Serialize,
{
    let response = client
        .post(format!("{base_url}/news"))
        .json(payload)
        .send()
        .await?;
    info!("Response: {:#?}", response);
    assert!(response.status().is_success());
    assert!(response.status().as_u16() == 201);

    let new_news: News = response.json().await?;

    Ok(new_news)
}

/// Error body shape shared by every failure response.
pub async fn error_message(response: reqwest::Response) -> Result<String> {
    let body: serde_json::Value = response.json().await?;
    Ok(body
        .get("error")
        .and_then(|e| e.as_str())
        .unwrap_or_default()
        .to_string())
}
