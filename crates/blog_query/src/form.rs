use blog_core::{ArticleInput, Error};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Category,
    Description,
    CoverImage,
    Content,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Category,
        FormField::Description,
        FormField::CoverImage,
        FormField::Content,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Category => "Categories (comma separated)",
            FormField::Description => "Description",
            FormField::CoverImage => "Cover Image URL",
            FormField::Content => "Content",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, FormField::Title | FormField::Description | FormField::Content)
    }

    /// Fields that accept line breaks.
    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::Description | FormField::Content)
    }

    pub fn next(&self) -> FormField {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> FormField {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Comma-separated tags, trimmed, blanks dropped.
pub fn split_categories(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Creation dialog state. Fields survive closing the dialog and failed
/// submissions; only a successful create clears them.
#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub cover_image: String,
    pub content: String,
    pub open: bool,
    pub focus: Option<FormField>,
    pub last_error: Option<Error>,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.focus.get_or_insert(FormField::Title);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn clear(&mut self) {
        *self = Self {
            open: self.open,
            ..Self::default()
        };
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Category => &self.category,
            FormField::Description => &self.description,
            FormField::CoverImage => &self.cover_image,
            FormField::Content => &self.content,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Category => &mut self.category,
            FormField::Description => &mut self.description,
            FormField::CoverImage => &mut self.cover_image,
            FormField::Content => &mut self.content,
        }
    }

    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.field(*f).trim().is_empty())
            .collect()
    }

    /// Client-side guard only; the store has the final word.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Payload for the store, `None` while a required field is blank.
    pub fn to_input(&self, now: DateTime<Utc>) -> Option<ArticleInput> {
        if !self.is_complete() {
            return None;
        }
        let cover_image = self.cover_image.trim();
        Some(ArticleInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            content: self.content.trim().to_string(),
            category: split_categories(&self.category),
            date: now,
            cover_image: (!cover_image.is_empty()).then(|| cover_image.to_string()),
        })
    }
}
