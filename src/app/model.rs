//! Application model types: `App`, `Page` and `Favorites`.
//!
//! `App` owns the catalog, the playback controller and the visualizer, and
//! tracks which page is shown, which track is current and the list cursor.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::forms::{FormInput, ProfileForm, TrackForm};
use crate::catalog::{Catalog, Track};
use crate::config::StartPage;
use crate::playback::{PlaybackController, PlaybackDevice};
use crate::visualizer::Visualizer;

/// The page shown in the main content area.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Player,
    Playlists,
    Favorites,
    Profile,
    Admin,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Player,
        Page::Playlists,
        Page::Favorites,
        Page::Profile,
        Page::Admin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Player => "Now Playing",
            Page::Playlists => "Playlists",
            Page::Favorites => "Favorites",
            Page::Profile => "Profile",
            Page::Admin => "Admin",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&p| p == self).unwrap_or(0)
    }

    /// Page for a 1-based number key.
    pub fn from_number(n: u32) -> Option<Page> {
        let i = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(i).copied()
    }

    pub fn next(self) -> Page {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Page {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether the page shows a selectable list of catalog tracks.
    pub fn lists_tracks(self) -> bool {
        matches!(self, Page::Home | Page::Favorites | Page::Admin)
    }
}

impl From<StartPage> for Page {
    fn from(p: StartPage) -> Self {
        match p {
            StartPage::Home => Page::Home,
            StartPage::Player => Page::Player,
            StartPage::Playlists => Page::Playlists,
            StartPage::Favorites => Page::Favorites,
            StartPage::Profile => Page::Profile,
            StartPage::Admin => Page::Admin,
        }
    }
}

/// Set of favorite track ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites(BTreeSet<String>);

impl Favorites {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Flip membership of `id`. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether key presses drive the shell or edit the page's form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// The main application model.
pub struct App<D: PlaybackDevice> {
    pub catalog: Catalog,
    pub page: Page,
    /// Catalog index of the current track.
    pub current: Option<usize>,
    /// Cursor into the track list of the current page.
    pub cursor: usize,
    pub favorites: Favorites,
    pub player: PlaybackController<D>,
    pub visualizer: Visualizer,
    pub upload: TrackForm,
    pub profile: ProfileForm,
    pub input_mode: InputMode,
    /// Short message shown in the player bar until the next action.
    pub status: Option<String>,
    pub autoplay: bool,
}

impl<D: PlaybackDevice> App<D> {
    /// Create a new `App` on the home page with the catalog's initial
    /// favorites.
    pub fn new(catalog: Catalog, player: PlaybackController<D>, visualizer: Visualizer) -> Self {
        let favorites = Favorites::new(catalog.initial_favorites().iter().cloned());
        Self {
            catalog,
            page: Page::Home,
            current: None,
            cursor: 0,
            favorites,
            player,
            visualizer,
            upload: TrackForm::default(),
            profile: ProfileForm::default(),
            input_mode: InputMode::Normal,
            status: None,
            autoplay: false,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.catalog.get(i))
    }

    /// Switch page. The visualizer's frame loop only runs while the player
    /// page is shown.
    pub fn navigate(&mut self, page: Page) {
        if page == self.page && (page != Page::Player || self.visualizer.is_mounted()) {
            return;
        }
        debug!(from = ?self.page, to = ?page, "navigate");
        self.page = page;
        self.cursor = 0;
        self.input_mode = InputMode::Normal;
        if page == Page::Player {
            self.visualizer.mount();
        } else {
            self.visualizer.unmount();
        }
    }

    /// Make the track at `index` current and bind it to the player.
    pub fn select_track(&mut self, index: usize) {
        let Some(track) = self.catalog.get(index) else {
            return;
        };
        info!(id = %track.id, title = %track.title, "select track");
        self.current = Some(index);
        self.status = None;
        self.player.load(track);
        if self.autoplay {
            self.player.play();
        }
    }

    pub fn next_track(&mut self) {
        if let Some(i) = self.current.and_then(|c| wrap_next(c, self.catalog.len())) {
            self.select_track(i);
        }
    }

    pub fn previous_track(&mut self) {
        if let Some(i) = self.current.and_then(|c| wrap_prev(c, self.catalog.len())) {
            self.select_track(i);
        }
    }

    /// Flip favorite membership of `id`. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now = self.favorites.toggle(id);
        self.clamp_cursor();
        now
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Catalog indices of favorite tracks, in catalog order.
    pub fn favorite_indices(&self) -> Vec<usize> {
        self.catalog
            .tracks()
            .iter()
            .enumerate()
            .filter(|(_, t)| self.favorites.contains(&t.id))
            .map(|(i, _)| i)
            .collect()
    }

    /// Catalog indices listed on the current page.
    pub fn visible_tracks(&self) -> Vec<usize> {
        match self.page {
            Page::Home | Page::Admin => (0..self.catalog.len()).collect(),
            Page::Favorites => self.favorite_indices(),
            _ => Vec::new(),
        }
    }

    /// Catalog index under the cursor.
    pub fn selected(&self) -> Option<usize> {
        self.visible_tracks().get(self.cursor).copied()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn cursor_down(&mut self) {
        let len = self.visible_tracks().len();
        if let Some(next) = wrap_next(self.cursor, len) {
            self.cursor = next;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn cursor_up(&mut self) {
        let len = self.visible_tracks().len();
        if let Some(prev) = wrap_prev(self.cursor, len) {
            self.cursor = prev;
        }
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.visible_tracks().len().saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_tracks().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Select the track under the cursor.
    pub fn activate_selected(&mut self) {
        if let Some(i) = self.selected() {
            self.select_track(i);
        }
    }

    /// Toggle favorite on the track under the cursor, or on the current
    /// track when the page has no list.
    pub fn toggle_selected_favorite(&mut self) {
        let target = if self.page.lists_tracks() {
            self.selected()
        } else {
            self.current
        };
        if let Some(id) = target.and_then(|i| self.catalog.get(i)).map(|t| t.id.clone()) {
            self.toggle_favorite(&id);
        }
    }

    /// Form edited on the current page, if any.
    pub fn active_form(&mut self) -> Option<&mut dyn FormInput> {
        match self.page {
            Page::Admin => Some(&mut self.upload as &mut dyn FormInput),
            Page::Profile => Some(&mut self.profile as &mut dyn FormInput),
            _ => None,
        }
    }

    pub fn start_editing(&mut self) {
        if self.active_form().is_some() {
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Submit the form on the current page. Nothing is persisted.
    pub fn submit_form(&mut self) {
        match self.page {
            Page::Admin => {
                let f = &self.upload;
                info!(
                    title = %f.title,
                    artist = %f.artist,
                    album = %f.album,
                    duration = f.duration_secs(),
                    audio_file = %f.audio_file,
                    "track upload requested; uploads are not available"
                );
                self.status = Some("Uploads are not available".to_string());
            }
            Page::Profile => {
                info!(name = %self.profile.name, email = %self.profile.email, "profile edited");
                self.status = Some("Profile changes kept for this session".to_string());
            }
            _ => {}
        }
        self.input_mode = InputMode::Normal;
    }

    /// Drain device events and advance the visualizer if a frame is due.
    pub fn tick(&mut self) -> bool {
        self.player.tick();
        self.visualizer.pump(self.player.is_playing())
    }
}

/// Index after `i` in a list of `len`, wrapping to 0.
pub fn wrap_next(i: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (i + 1) % len)
}

/// Index before `i` in a list of `len`, wrapping to the end.
pub fn wrap_prev(i: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (i.min(len - 1) + len - 1) % len)
}
