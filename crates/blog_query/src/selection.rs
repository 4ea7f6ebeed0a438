use blog_core::{Article, ArticleId};

/// Which article the user explicitly picked, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(ArticleId),
}

impl Selection {
    pub fn select(&mut self, id: ArticleId) {
        *self = Selection::Selected(id);
    }

    pub fn reset(&mut self) {
        *self = Selection::Unselected;
    }

    pub fn selected(&self) -> Option<&ArticleId> {
        match self {
            Selection::Selected(id) => Some(id),
            Selection::Unselected => None,
        }
    }

    pub fn active_id(&self, articles: &[Article]) -> Option<ArticleId> {
        active_id(self, articles)
    }
}

/// The article the detail pane shows: the explicit selection, otherwise the
/// first article of the current list, otherwise nothing.
///
/// Derived on every update, never stored.
pub fn active_id(selection: &Selection, articles: &[Article]) -> Option<ArticleId> {
    match selection {
        Selection::Selected(id) => Some(id.clone()),
        Selection::Unselected => articles.first().map(|a| a.id.clone()),
    }
}
