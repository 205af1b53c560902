use ratatui::style::Color;

use crate::storage::KeyValueStore;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors used by the renderer for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight: Color,
    pub error: Color,
    pub favorite: Color,
}

const DARK: Palette = Palette {
    background: Color::Rgb(0x17, 0x17, 0x17),
    text: Color::Rgb(0xe5, 0xe5, 0xe5),
    muted: Color::Rgb(0x6b, 0x72, 0x80),
    accent: Color::Rgb(0x3b, 0x82, 0xf6),
    border: Color::Rgb(0x40, 0x40, 0x40),
    highlight: Color::Rgb(0x26, 0x26, 0x26),
    error: Color::Rgb(0xef, 0x44, 0x44),
    favorite: Color::Rgb(0xf4, 0x3f, 0x5e),
};

const LIGHT: Palette = Palette {
    background: Color::Rgb(0xfa, 0xfa, 0xfa),
    text: Color::Rgb(0x17, 0x17, 0x17),
    muted: Color::Rgb(0x6b, 0x72, 0x80),
    accent: Color::Rgb(0x00, 0x7b, 0xff),
    border: Color::Rgb(0xd4, 0xd4, 0xd4),
    highlight: Color::Rgb(0xe5, 0xe7, 0xeb),
    error: Color::Rgb(0xdc, 0x35, 0x45),
    favorite: Color::Rgb(0xe1, 0x1d, 0x48),
};

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }

    /// Read the saved theme. Missing, unknown or unreadable values give `Dark`.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY) {
            Ok(Some(raw)) => Self::parse(&raw).unwrap_or_default(),
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read theme preference");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Err(err) = store.set(THEME_KEY, self.as_str()) {
            tracing::warn!(error = %err, "Failed to save theme preference");
        }
    }
}
