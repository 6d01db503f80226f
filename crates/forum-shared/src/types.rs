use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifier of the (single) local user profile.
    UserId
);
uuid_id!(PostId);
uuid_id!(MessageId);
uuid_id!(
    /// Identifier of an attachment waiting in the staging area.
    MediaId
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// The screens of the application. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    #[serde(rename = "feedScreen")]
    Feed,
    #[serde(rename = "profileScreen")]
    Profile,
    #[serde(rename = "createPostScreen")]
    CreatePost,
    #[serde(rename = "searchScreen")]
    Search,
    #[serde(rename = "chatScreen")]
    Chat,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Feed,
        Screen::Profile,
        Screen::CreatePost,
        Screen::Search,
        Screen::Chat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feedScreen",
            Self::Profile => "profileScreen",
            Self::CreatePost => "createPostScreen",
            Self::Search => "searchScreen",
            Self::Chat => "chatScreen",
        }
    }

    /// Whether the footer has a navigation icon for this screen.
    pub fn has_nav_icon(self) -> bool {
        !matches!(self, Self::CreatePost | Self::Search)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown screen: {0}")]
pub struct UnknownScreen(pub String);

impl FromStr for Screen {
    type Err = UnknownScreen;

    /// Accepts both the persisted names (`feedScreen`) and short names (`feed`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Screen::ALL
            .into_iter()
            .find(|screen| {
                let full = screen.as_str().to_ascii_lowercase();
                full == wanted || full.trim_end_matches("screen") == wanted
            })
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_flip_is_an_involution() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn screen_names_match_persisted_layout() {
        assert_eq!(serde_json::to_string(&Screen::Feed).unwrap(), "\"feedScreen\"");
        assert_eq!(
            serde_json::from_str::<Screen>("\"createPostScreen\"").unwrap(),
            Screen::CreatePost
        );
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }

    #[test]
    fn screen_from_str_accepts_short_names() {
        assert_eq!("chat".parse::<Screen>().unwrap(), Screen::Chat);
        assert_eq!("createPost".parse::<Screen>().unwrap(), Screen::CreatePost);
        assert_eq!("profileScreen".parse::<Screen>().unwrap(), Screen::Profile);
        let err = "settings".parse::<Screen>().unwrap_err();
        assert_eq!(err, UnknownScreen("settings".into()));
        assert_eq!(err.to_string(), "unknown screen: settings");
    }

    #[test]
    fn ids_are_distinct_and_transparent() {
        let a = PostId::new();
        let b = PostId::new();
        assert_ne!(a, b);

        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, format!("\"{}\"", a.0));
        assert_eq!(PostId::parse(&a.to_string()).unwrap(), a);
    }
}
