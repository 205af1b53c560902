use crate::config::ConfigStore;
use crate::movie::MovieSummary;
use crate::search::{SearchEvent, SearchOrchestrator, SearchSession, SearchSettings};
use crate::storage::KeyValueStore;
use crate::ui::theme::Theme;

/// Which text input receives typed characters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum InputField {
    #[default]
    Title,
    Genre,
}

/// What the list area shows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ListView {
    #[default]
    Results,
    Favorites,
}

/// Terminal front end state around the search orchestrator.
///
/// Holds only presentation concerns (focus, highlighted row, theme);
/// everything about the search itself lives in the orchestrator.
pub struct App {
    orchestrator: SearchOrchestrator,
    config: ConfigStore,
    theme: Theme,
    theme_store: Box<dyn KeyValueStore>,
    focus: InputField,
    view: ListView,
    genre_input: String,
    highlighted: usize,
    notice: Option<String>,
    animation_tick: u8,
    should_quit: bool,
}

impl App {
    pub fn new(
        orchestrator: SearchOrchestrator,
        config: ConfigStore,
        theme_store: Box<dyn KeyValueStore>,
    ) -> Self {
        let theme = Theme::load(theme_store.as_ref());
        Self {
            orchestrator,
            config,
            theme,
            theme_store,
            focus: InputField::default(),
            view: ListView::default(),
            genre_input: String::new(),
            highlighted: 0,
            notice: None,
            animation_tick: 0,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &SearchSession {
        self.orchestrator.session()
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn focus(&self) -> InputField {
        self.focus
    }

    pub fn view(&self) -> ListView {
        self.view
    }

    pub fn genre_input(&self) -> &str {
        &self.genre_input
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn animation_tick(&self) -> u8 {
        self.animation_tick
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Rows currently listed, either search results or favorites.
    pub fn visible_items(&self) -> &[MovieSummary] {
        match self.view {
            ListView::Results => &self.orchestrator.session().results,
            ListView::Favorites => self.orchestrator.favorites().list(),
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.orchestrator.is_favorite(id)
    }

    pub fn insert_char(&mut self, ch: char) {
        match self.focus {
            InputField::Title => {
                let mut text = self.session().query.text.clone();
                text.push(ch);
                self.orchestrator.set_query(text);
            }
            InputField::Genre => {
                self.genre_input.push(ch);
                self.orchestrator.set_genre(Some(self.genre_input.clone()));
            }
        }
        self.view = ListView::Results;
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            InputField::Title => {
                let mut text = self.session().query.text.clone();
                if text.pop().is_none() {
                    return;
                }
                self.orchestrator.set_query(text);
            }
            InputField::Genre => {
                if self.genre_input.pop().is_none() {
                    return;
                }
                self.orchestrator.set_genre(Some(self.genre_input.clone()));
            }
        }
        self.view = ListView::Results;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            InputField::Title => InputField::Genre,
            InputField::Genre => InputField::Title,
        };
    }

    pub fn clear(&mut self) {
        self.orchestrator.clear();
        self.genre_input.clear();
        self.highlighted = 0;
        self.view = ListView::Results;
        self.notice = None;
    }

    pub fn move_highlight(&mut self, direction: i32) {
        let len = self.visible_items().len();
        if len == 0 {
            self.highlighted = 0;
            return;
        }
        let current = self.highlighted.min(len - 1);
        self.highlighted = if direction.is_negative() {
            if current == 0 {
                len - 1
            } else {
                current - 1
            }
        } else if current + 1 >= len {
            0
        } else {
            current + 1
        };
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ListView::Results => ListView::Favorites,
            ListView::Favorites => ListView::Results,
        };
        self.highlighted = 0;
    }

    pub fn load_more(&mut self) {
        if self.view == ListView::Results {
            self.orchestrator.load_more();
        }
    }

    pub fn open_highlighted(&mut self) {
        let Some(id) = self.visible_items().get(self.highlighted).map(|m| m.id.clone()) else {
            return;
        };
        self.orchestrator.select_id(id);
    }

    pub fn close_overlay(&mut self) {
        self.orchestrator.close_detail();
    }

    /// Toggle the movie in the open overlay, or the highlighted row.
    pub fn toggle_favorite(&mut self) {
        let now_favorite = if self.session().overlay_open() {
            self.orchestrator.toggle_selected_favorite()
        } else {
            match self.visible_items().get(self.highlighted).cloned() {
                Some(movie) => Some(self.orchestrator.toggle_favorite(&movie)),
                None => None,
            }
        };
        if now_favorite.is_some() {
            self.clamp_highlight();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.theme.save(self.theme_store.as_mut());
    }

    /// Re-read the config file and apply the search settings.
    pub fn reload_config(&mut self) {
        match self.config.reload() {
            Ok(false) => self.notice = Some("Config unchanged".to_string()),
            Ok(true) => {
                let settings = SearchSettings::from(&self.config.get().search);
                self.orchestrator.apply_settings(settings);
                tracing::info!(path = %self.config.path().display(), "Config reloaded");
                self.notice = Some("Config reloaded".to_string());
            }
            Err(err) => {
                tracing::warn!(error = %err, "Config reload failed");
                self.notice = Some(err.to_string());
            }
        }
    }

    pub fn on_tick(&mut self) {
        if self.session().loading {
            self.animation_tick = self.animation_tick.wrapping_add(1);
        }
    }

    pub fn on_search_event(&mut self, event: SearchEvent) {
        self.orchestrator.handle_event(event);
        self.clamp_highlight();
    }

    fn clamp_highlight(&mut self) {
        let len = self.visible_items().len();
        if self.highlighted >= len {
            self.highlighted = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::favorites::FavoritesStore;
    use crate::movie::{MovieDetail, ResultPage};
    use crate::omdb::{MovieApi, SearchError};
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::mpsc::UnboundedReceiver;

    struct StaticApi;

    #[async_trait]
    impl MovieApi for StaticApi {
        async fn search_by_title(
            &self,
            query: &str,
            _page: u32,
        ) -> Result<ResultPage, SearchError> {
            Ok(ResultPage {
                items: (0..3)
                    .map(|i| MovieSummary::new(format!("tt{}", i), format!("{} {}", query, i), "2000"))
                    .collect(),
                total_results: Some(3),
            })
        }

        async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, SearchError> {
            Err(SearchError::NoResults(format!("{} not found", id)))
        }
    }

    fn make_app() -> (App, UnboundedReceiver<SearchEvent>, MemoryStore) {
        let storage = MemoryStore::new();
        let favorites = FavoritesStore::load(Box::new(storage.clone()));
        let (orchestrator, events) =
            SearchOrchestrator::new(Arc::new(StaticApi), favorites, SearchSettings::default());
        let config = ConfigStore::new(Config::default(), PathBuf::from("/tmp/moviefinder-test.toml"));
        let app = App::new(orchestrator, config, Box::new(storage.clone()));
        (app, events, storage)
    }

    async fn settle(app: &mut App, events: &mut UnboundedReceiver<SearchEvent>) {
        while app.orchestrator().is_busy() {
            let event = events.recv().await.unwrap();
            app.on_search_event(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn typing_builds_query_and_searches() {
        let (mut app, mut events, _) = make_app();
        for ch in "cat".chars() {
            app.insert_char(ch);
        }
        settle(&mut app, &mut events).await;
        assert_eq!(app.session().query.text, "cat");
        assert_eq!(app.visible_items().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_wraps_around() {
        let (mut app, mut events, _) = make_app();
        app.insert_char('x');
        settle(&mut app, &mut events).await;

        app.move_highlight(-1);
        assert_eq!(app.highlighted(), 2);
        app.move_highlight(1);
        assert_eq!(app.highlighted(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn favorites_view_lists_toggled_rows() {
        let (mut app, mut events, _) = make_app();
        app.insert_char('x');
        settle(&mut app, &mut events).await;

        app.move_highlight(1);
        app.toggle_favorite();
        assert!(app.is_favorite("tt1"));

        app.toggle_view();
        assert_eq!(app.view(), ListView::Favorites);
        assert_eq!(app.visible_items().len(), 1);

        app.toggle_favorite();
        assert!(app.visible_items().is_empty());
        assert_eq!(app.highlighted(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn genre_input_feeds_query_genre() {
        let (mut app, _events, _) = make_app();
        app.toggle_focus();
        for ch in "Drama".chars() {
            app.insert_char(ch);
        }
        assert_eq!(app.session().query.genre.as_deref(), Some("Drama"));
        app.clear();
        assert_eq!(app.genre_input(), "");
        assert_eq!(app.session().query.genre, None);
    }

    #[tokio::test(start_paused = true)]
    async fn theme_toggle_persists() {
        let (mut app, _events, storage) = make_app();
        assert_eq!(app.theme(), Theme::Dark);
        app.toggle_theme();
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(storage.raw(crate::ui::theme::THEME_KEY).as_deref(), Some("light"));
    }
}
