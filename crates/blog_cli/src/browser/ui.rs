use blog_core::Article;
use blog_query::FormField;
use chrono::Utc;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use crate::format::{display_date, read_time, time_ago};
use super::app::App;

const ACCENT: Color = Color::Cyan;

pub fn draw<B: Backend>(f: &mut Frame<'_, B>, app: &App) {
    let banner = app.session.list_error_message();
    let mut constraints = vec![Constraint::Length(1)];
    if banner.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.size());

    let title = Paragraph::new(Spans::from(vec![
        Span::styled("Articles", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("  browse and write"),
    ]));
    f.render_widget(title, rows[0]);

    let mut next = 1;
    if let Some(message) = banner {
        let block = Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Error"))
            .wrap(Wrap { trim: true });
        f.render_widget(block, rows[next]);
        next += 1;
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[next]);
    draw_list(f, app, body[0]);
    draw_detail(f, app, body[1]);
    draw_footer(f, app, rows[next + 1]);

    if app.session.form().open {
        draw_form(f, app);
    }
}

fn draw_list<B: Backend>(f: &mut Frame<'_, B>, app: &App, area: Rect) {
    let state = app.session.list_state();
    let block = Block::default().borders(Borders::ALL).title("Latest");

    if state.is_loading() {
        f.render_widget(Paragraph::new("Loading articles...").block(block), area);
        return;
    }

    let articles = app.session.articles();
    if articles.is_empty() {
        let text = if state.is_error() { "" } else { "No articles yet. Press n to write one." };
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = articles
        .iter()
        .map(|article| {
            ListItem::new(vec![
                Spans::from(vec![
                    Span::styled(
                        format!("● {}", article.primary_category()),
                        Style::default().fg(ACCENT),
                    ),
                    Span::raw("  "),
                    Span::styled(time_ago(article.date, now), Style::default().fg(Color::DarkGray)),
                ]),
                Spans::from(Span::styled(
                    article.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(truncate(&article.description, area.width.saturating_sub(4) as usize)),
                Spans::from(""),
            ])
        })
        .collect();

    let active = app.session.active_id();
    let mut list_state = ListState::default();
    list_state.select(active.and_then(|id| articles.iter().position(|a| a.id == id)));

    let title = if state.is_fetching() { "Latest (refreshing)" } else { "Latest" };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▌");
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_detail<B: Backend>(f: &mut Frame<'_, B>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Article");
    let state = app.session.detail_state();

    let text = match (&state.data, app.session.detail_error_message()) {
        (_, Some(message)) => Text::styled(message, Style::default().fg(Color::Red)),
        (Some(article), None) => article_text(article),
        (None, None) if state.is_loading() => Text::raw("Loading article..."),
        (None, None) => Text::raw("Select an article from the list to read it."),
    };

    let detail = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(detail, area);
}

fn article_text(article: &Article) -> Text<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    match article.cover_image() {
        Some(url) => lines.push(Spans::from(Span::styled(format!("🖼  {}", url), muted))),
        None => lines.push(Spans::from(Span::styled(
            format!("[ {} ]", article.placeholder_initial()),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))),
    }
    lines.push(Spans::from(""));
    lines.push(Spans::from(vec![
        Span::styled(
            format!(" {} ", article.primary_category()),
            Style::default().fg(Color::Black).bg(ACCENT),
        ),
        Span::styled(
            format!("  {} · {}", read_time(article), display_date(article.date)),
            muted,
        ),
    ]));
    lines.push(Spans::from(""));
    lines.push(Spans::from(Span::styled(
        article.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Spans::from(Span::styled(
        article.description.clone(),
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    for paragraph in article.paragraphs() {
        lines.push(Spans::from(""));
        for line in paragraph.lines() {
            lines.push(Spans::from(line.to_string()));
        }
    }

    if !article.category.is_empty() {
        lines.push(Spans::from(""));
        let tags: Vec<Span> = article
            .category
            .iter()
            .map(|tag| Span::styled(format!("#{} ", tag), Style::default().fg(ACCENT)))
            .collect();
        lines.push(Spans::from(tags));
    }

    Text::from(lines)
}

fn draw_footer<B: Backend>(f: &mut Frame<'_, B>, app: &App, area: Rect) {
    let keys = if app.session.form().open {
        "Tab next field · Ctrl+S create · Esc close"
    } else {
        "↑/↓ select · g first · n new article · r refresh · q quit"
    };
    let mut spans = vec![Span::styled(keys, Style::default().fg(Color::DarkGray))];
    if let Some(status) = &app.status {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(Spans::from(spans)), area);
}

fn draw_form<B: Backend>(f: &mut Frame<'_, B>, app: &App) {
    let form = app.session.form();
    let area = centered_rect(70, 80, f.size());
    f.render_widget(Clear, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Create a new article");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(2),
        ])
        .split(inner);

    let focus = form.focus.unwrap_or(FormField::Title);
    for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
        let label = if field.is_required() {
            format!("{} *", field.label())
        } else {
            field.label().to_string()
        };
        let style = if *field == focus {
            Style::default().fg(ACCENT)
        } else {
            Style::default()
        };
        let mut value = form.field(*field).to_string();
        if *field == focus {
            value.push('▏');
        }
        let input = Paragraph::new(value)
            .block(Block::default().borders(Borders::ALL).title(label).border_style(style))
            .wrap(Wrap { trim: false });
        f.render_widget(input, *row);
    }

    let status = if app.session.is_submitting() {
        Spans::from(Span::styled("Creating...", Style::default().fg(Color::Yellow)))
    } else if let Some(error) = &form.last_error {
        Spans::from(Span::styled(
            format!("Could not create the article: {}", error),
            Style::default().fg(Color::Red),
        ))
    } else if app.session.can_submit() {
        Spans::from(Span::styled("Ctrl+S to create", Style::default().fg(Color::Green)))
    } else {
        Spans::from(Span::styled(
            "Title, description and content are required",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(status), rows[5]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer line", 6), "a lon…");
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(70, 80, outer);
        assert_eq!(inner.width, 70);
        assert_eq!(inner.height, 40);
        assert_eq!(inner.x, 15);
    }
}
