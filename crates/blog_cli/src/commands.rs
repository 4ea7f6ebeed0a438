use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use blog_core::ArticleId;
use blog_query::{BlogSession, SubmitOutcome};
use blog_store::StoreConfig;
use chrono::Utc;
use tracing::info;
use crate::format::{detail_lines, time_ago};

pub async fn list(session: &BlogSession) -> Result<()> {
    let articles = session
        .load_list()
        .await
        .with_context(|| session.list_error_message().unwrap_or_default())?;

    if articles.is_empty() {
        println!("No articles yet. Create one with `blog create`.");
        return Ok(());
    }

    let now = Utc::now();
    let active = session.active_id();
    for article in articles.iter() {
        let marker = if Some(&article.id) == active.as_ref() { "▶" } else { " " };
        println!(
            "{} {:>4}  {:<10} {:>14}  {}",
            marker,
            article.id,
            article.primary_category(),
            time_ago(article.date, now),
            article.title
        );
    }
    Ok(())
}

pub async fn show(session: &mut BlogSession, id: String) -> Result<()> {
    let id = ArticleId::from(id);
    session.select(id.clone());
    match session.load_detail().await {
        Some(Ok(article)) => {
            for line in detail_lines(&article) {
                println!("{}", line);
            }
            Ok(())
        }
        Some(Err(e)) => Err(e).with_context(|| {
            session
                .detail_error_message()
                .unwrap_or_else(|| format!("Failed to load article {}", id))
        }),
        None => bail!("No article selected"),
    }
}

pub struct CreateArgs {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub cover_image: Option<String>,
}

pub async fn create(session: &mut BlogSession, args: CreateArgs) -> Result<()> {
    let form = session.form_mut();
    form.title = args.title;
    form.description = args.description;
    form.content = args.content;
    form.category = args.category;
    form.cover_image = args.cover_image.unwrap_or_default();

    match session.submit_form().await {
        SubmitOutcome::Created(article) => {
            println!("Created article {}: {}", article.id, article.title);
            Ok(())
        }
        SubmitOutcome::Blocked => {
            let missing: Vec<_> = session
                .form()
                .missing_fields()
                .iter()
                .map(|f| f.label().to_lowercase())
                .collect();
            bail!("Cannot create article, missing: {}", missing.join(", "))
        }
        SubmitOutcome::Failed(e) => Err(e).context("The article store rejected the new article"),
    }
}

pub async fn serve(resource: String, port: u16, seed: Option<PathBuf>) -> Result<()> {
    let config = StoreConfig {
        port,
        resource,
        seed,
        ..StoreConfig::default()
    };
    info!("🚀 Starting article store on {}", config.addr());
    blog_store::run(config).await.context("Article store failed")?;
    Ok(())
}
