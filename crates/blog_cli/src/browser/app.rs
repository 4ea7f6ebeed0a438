use blog_core::{ArticleId, ArticleInput};
use blog_query::{BlogSession, FormField, SubmitOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};
use super::event::Message;

/// Terminal front end state. Requests run on spawned tasks and report back
/// through `tx`; the session is only touched from the UI loop.
pub struct App {
    pub session: BlogSession,
    pub status: Option<String>,
    pub should_quit: bool,
    tx: UnboundedSender<Message>,
}

impl App {
    pub fn new(session: BlogSession, tx: UnboundedSender<Message>) -> Self {
        Self {
            session,
            status: None,
            should_quit: false,
            tx,
        }
    }

    pub fn start(&mut self) {
        self.spawn_list();
        self.ensure_detail();
    }

    pub fn handle(&mut self, message: Message) {
        match message {
            Message::Input(key) => self.on_key(key),
            Message::Resize => {}
            Message::ListLoaded => self.ensure_detail(),
            Message::DetailLoaded(id) => {
                if !self.session.detail_accepts(&id) {
                    debug!("Ignoring details for {} after the selection moved on", id);
                }
            }
            Message::Created(result) => match self.session.finish_submit(result) {
                SubmitOutcome::Created(article) => {
                    self.status = Some(format!("Created \"{}\"", article.title));
                    self.spawn_list();
                    self.ensure_detail();
                }
                SubmitOutcome::Failed(e) => {
                    self.status = Some(format!("Create failed: {}", e));
                }
                SubmitOutcome::Blocked => {}
            },
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.session.form().open {
            self.on_form_key(key);
        } else {
            self.on_browse_key(key);
        }
    }

    fn on_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Home | KeyCode::Char('g') => {
                self.session.reset_selection();
                self.ensure_detail();
            }
            KeyCode::Char('n') => {
                self.status = None;
                self.session.form_mut().open();
            }
            KeyCode::Char('r') => {
                self.session.client().invalidate_articles();
                if let Some(id) = self.session.detail_id().cloned() {
                    self.session.client().invalidate_article(&id);
                    self.spawn_detail(id);
                }
                self.spawn_list();
            }
            _ => {}
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        let focus = self.session.form().focus.unwrap_or(FormField::Title);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.session.form_mut().close(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Tab => self.session.form_mut().focus = Some(focus.next()),
            KeyCode::BackTab => self.session.form_mut().focus = Some(focus.prev()),
            KeyCode::Enter if focus.is_multiline() => {
                self.session.form_mut().field_mut(focus).push('\n')
            }
            KeyCode::Enter => self.session.form_mut().focus = Some(focus.next()),
            KeyCode::Backspace => {
                self.session.form_mut().field_mut(focus).pop();
            }
            KeyCode::Char(c) if !ctrl => self.session.form_mut().field_mut(focus).push(c),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        self.session.select_offset(delta);
        self.ensure_detail();
    }

    fn submit(&mut self) {
        match self.session.begin_submit() {
            Some(input) => {
                self.status = Some("Creating...".to_string());
                self.spawn_create(input);
            }
            None if self.session.is_submitting() => {}
            None => {
                let missing: Vec<_> = self
                    .session
                    .form()
                    .missing_fields()
                    .iter()
                    .map(|f| f.label())
                    .collect();
                self.status = Some(format!("Required: {}", missing.join(", ")));
            }
        }
    }

    /// Points the detail pane at the active article and loads it unless a
    /// fresh result is cached or a request is already running. Failed and
    /// stale entries load again when they come back on screen.
    fn ensure_detail(&mut self) {
        self.session.sync_detail();
        let Some(id) = self.session.detail_id().cloned() else {
            return;
        };
        let state = self.session.detail_state();
        let fresh = state.is_success() && !self.session.client().article_stale(&id);
        if !fresh && !state.is_fetching() {
            self.spawn_detail(id);
        }
    }

    fn spawn_list(&self) {
        let client = self.session.client().clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = client.fetch_articles().await;
            let _ = tx.send(Message::ListLoaded);
        });
    }

    fn spawn_detail(&self, id: ArticleId) {
        let client = self.session.client().clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let _ = client.fetch_article(&id).await;
            let _ = tx.send(Message::DetailLoaded(id));
        });
    }

    fn spawn_create(&self, input: ArticleInput) {
        info!("Submitting \"{}\"", input.title);
        let client = self.session.client().clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.create_article(&input).await;
            let _ = tx.send(Message::Created(result));
        });
    }
}
