use forum_shared::{ForumError, Screen, UserId};
use forum_store::{KeyValueStore, User};
use tracing::{info, warn};

use crate::render::{render_header, render_nav};
use crate::state::Forum;

impl<S: KeyValueStore> Forum<S> {
    /// Create the profile, replacing any existing one wholesale.
    ///
    /// Missing pictures fall back to the configured placeholders. On success
    /// the feed screen is shown.
    pub fn save_profile(
        &mut self,
        username: &str,
        profile_pic: Option<&str>,
        cover_pic: Option<&str>,
    ) -> Result<UserId, ForumError> {
        let username = username.trim();
        if username.is_empty() {
            warn!("Profile rejected: empty username");
            return Err(ForumError::EmptyUsername);
        }

        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            profile_pic: profile_pic
                .unwrap_or(&self.settings.default_profile_pic)
                .to_string(),
            cover_pic: cover_pic
                .unwrap_or(&self.settings.default_cover_pic)
                .to_string(),
        };
        let id = user.id;

        // the profile and the move to the feed land in one write
        let previous_user = self.state.current_user.replace(user);
        let previous_screen = std::mem::replace(&mut self.state.current_screen, Screen::Feed);
        self.persist_or_revert(move |state| {
            state.current_user = previous_user;
            state.current_screen = previous_screen;
        })?;
        self.display.header = render_header(self.state.current_user.as_ref(), &self.settings);
        self.display.nav = render_nav(Screen::Feed);

        info!(user_id = %id, username, "Profile saved");
        Ok(id)
    }

    /// Check that a profile exists; otherwise send the user to create one.
    pub(crate) fn require_profile(&mut self) -> Result<User, ForumError> {
        if let Some(user) = &self.state.current_user {
            return Ok(user.clone());
        }

        warn!("Action requires a profile, redirecting");
        self.show_screen(Screen::Profile)?;
        Err(ForumError::NoProfile)
    }
}
