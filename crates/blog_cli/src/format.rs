use blog_core::Article;
use chrono::{DateTime, Utc};

/// Coarse relative age for list cards.
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(date);
    let mins = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if mins < 60 {
        format!("{} mins ago", mins.max(1))
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else {
        format!("{} days ago", days)
    }
}

/// `Jan 5, 2024`
pub fn display_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn read_time(article: &Article) -> String {
    format!("{} min read", article.read_time_minutes())
}

/// Plain-text rendering of the detail pane, shared by `blog show`.
pub fn detail_lines(article: &Article) -> Vec<String> {
    let mut lines = Vec::new();
    match article.cover_image() {
        Some(url) => lines.push(format!("[cover] {}", url)),
        None => lines.push(format!("[{}]", article.placeholder_initial())),
    }
    lines.push(String::new());
    lines.push(format!(
        "{} · {} · {}",
        article.primary_category(),
        read_time(article),
        display_date(article.date)
    ));
    lines.push(article.title.clone());
    lines.push(String::new());
    lines.push(article.description.clone());
    for paragraph in article.paragraphs() {
        lines.push(String::new());
        lines.push(paragraph.to_string());
    }
    if !article.category.is_empty() {
        lines.push(String::new());
        lines.push(
            article
                .category
                .iter()
                .map(|c| format!("#{}", c))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::{ArticleId, ArticleInput};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_time_ago() {
        assert_eq!(time_ago(now(), now()), "1 mins ago");
        assert_eq!(time_ago(now() - Duration::minutes(59), now()), "59 mins ago");
        assert_eq!(time_ago(now() - Duration::hours(5), now()), "5 hours ago");
        assert_eq!(time_ago(now() - Duration::days(3), now()), "3 days ago");
    }

    #[test]
    fn test_display_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(display_date(date), "Jan 5, 2024");
    }

    #[test]
    fn test_detail_lines() {
        let article = ArticleInput {
            title: "Tax Season".to_string(),
            description: "What changed".to_string(),
            content: "One.\n\nTwo.".to_string(),
            category: vec![],
            date: now(),
            cover_image: None,
        }
        .into_article(ArticleId::from("1"));

        let lines = detail_lines(&article);
        assert_eq!(lines[0], "[G]");
        assert_eq!(lines[2], "GENERAL · 1 min read · Jun 1, 2024");
        assert_eq!(lines[3], "Tax Season");
        assert!(lines.contains(&"Two.".to_string()));
    }
}
