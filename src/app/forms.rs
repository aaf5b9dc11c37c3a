//! Local-only forms: the admin upload form and the profile editor.
//!
//! Neither form has a commit target; values live for the session only.

/// Text editing shared by the forms so key handling can stay generic.
pub trait FormInput {
    fn push_char(&mut self, c: char);
    fn pop_char(&mut self);
    fn focus_next(&mut self);
    fn focus_prev(&mut self);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UploadField {
    Title,
    Artist,
    Album,
    Cover,
    Duration,
    AudioFile,
}

impl UploadField {
    pub const ALL: [UploadField; 6] = [
        UploadField::Title,
        UploadField::Artist,
        UploadField::Album,
        UploadField::Cover,
        UploadField::Duration,
        UploadField::AudioFile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UploadField::Title => "Track title",
            UploadField::Artist => "Artist",
            UploadField::Album => "Album",
            UploadField::Cover => "Cover URL",
            UploadField::Duration => "Duration (seconds)",
            UploadField::AudioFile => "Audio file",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            UploadField::Title => "e.g. Night City",
            UploadField::Artist => "e.g. Artem Volkov",
            UploadField::Album => "e.g. City Lights",
            UploadField::Cover => "https://example.com/cover.jpg",
            UploadField::Duration => "234",
            UploadField::AudioFile => "/path/to/track.mp3",
        }
    }
}

/// Staged values of the admin "add track" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackForm {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover: String,
    pub duration: String,
    pub audio_file: String,
    pub focus: UploadField,
}

impl Default for TrackForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            cover: String::new(),
            duration: String::new(),
            audio_file: String::new(),
            focus: UploadField::Title,
        }
    }
}

impl TrackForm {
    pub fn value(&self, field: UploadField) -> &str {
        match field {
            UploadField::Title => &self.title,
            UploadField::Artist => &self.artist,
            UploadField::Album => &self.album,
            UploadField::Cover => &self.cover,
            UploadField::Duration => &self.duration,
            UploadField::AudioFile => &self.audio_file,
        }
    }

    fn value_mut(&mut self, field: UploadField) -> &mut String {
        match field {
            UploadField::Title => &mut self.title,
            UploadField::Artist => &mut self.artist,
            UploadField::Album => &mut self.album,
            UploadField::Cover => &mut self.cover,
            UploadField::Duration => &mut self.duration,
            UploadField::AudioFile => &mut self.audio_file,
        }
    }

    /// Duration as entered, coerced: anything unparsable becomes 0.
    pub fn duration_secs(&self) -> u32 {
        coerce_seconds(&self.duration)
    }
}

impl FormInput for TrackForm {
    fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.value_mut(self.focus).push(c);
        }
    }

    fn pop_char(&mut self) {
        self.value_mut(self.focus).pop();
    }

    fn focus_next(&mut self) {
        self.focus = cycle(&UploadField::ALL, self.focus, 1);
    }

    fn focus_prev(&mut self) {
        self.focus = cycle(&UploadField::ALL, self.focus, UploadField::ALL.len() - 1);
    }
}

/// Leading decimal digits of `text` as seconds; 0 when there are none or
/// the number does not fit.
pub fn coerce_seconds(text: &str) -> u32 {
    let trimmed = text.trim_start();
    let digits: &str = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().unwrap_or(0)
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let pos = all.iter().position(|&f| f == current).unwrap_or(0);
    all[(pos + step) % all.len()]
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProfileTab {
    Profile,
    Subscription,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub plan: String,
    pub tab: ProfileTab,
    pub focus: ProfileField,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: "Иван Петров".to_string(),
            email: "ivan@example.com".to_string(),
            plan: "Premium".to_string(),
            tab: ProfileTab::Profile,
            focus: ProfileField::Name,
        }
    }
}

impl ProfileForm {
    pub const PERKS: [&'static str; 3] = ["No ads", "High quality audio", "Offline mode"];

    /// Initials shown in the avatar badge.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn toggle_tab(&mut self) {
        self.tab = match self.tab {
            ProfileTab::Profile => ProfileTab::Subscription,
            ProfileTab::Subscription => ProfileTab::Profile,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
        }
    }
}

impl FormInput for ProfileForm {
    fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.focused_mut().push(c);
        }
    }

    fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            ProfileField::Name => ProfileField::Email,
            ProfileField::Email => ProfileField::Name,
        };
    }

    fn focus_prev(&mut self) {
        self.focus_next();
    }
}
