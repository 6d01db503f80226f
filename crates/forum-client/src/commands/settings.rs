use forum_shared::{ForumError, Screen, Theme};
use forum_store::KeyValueStore;
use tracing::{debug, info};

use crate::render::{render_nav, render_theme};
use crate::state::Forum;

impl<S: KeyValueStore> Forum<S> {
    /// Show `screen` (and only it) and persist the choice.
    pub fn show_screen(&mut self, screen: Screen) -> Result<(), ForumError> {
        let previous = std::mem::replace(&mut self.state.current_screen, screen);
        self.persist_or_revert(move |state| state.current_screen = previous)?;
        self.display.nav = render_nav(screen);

        debug!(%screen, "Screen shown");
        Ok(())
    }

    /// Flip between the light and dark theme and persist it.
    pub fn toggle_theme(&mut self) -> Result<Theme, ForumError> {
        let previous = self.state.theme;
        let theme = previous.toggled();
        self.state.theme = theme;
        self.persist_or_revert(move |state| state.theme = previous)?;
        self.display.theme = render_theme(theme);

        info!(theme = theme.as_str(), "Theme toggled");
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use forum_shared::{ForumError, Screen, Theme};

    use crate::state::tests::{failing_forum, fresh_forum, reopen};

    #[test]
    fn toggle_theme_flips_and_persists() {
        let mut forum = fresh_forum();

        assert_eq!(forum.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(forum.store().load().unwrap().unwrap().theme, Theme::Dark);
        assert!(forum.display().theme.dark_mode);

        assert_eq!(forum.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(forum.store().load().unwrap().unwrap().theme, Theme::Light);
        assert!(!forum.display().theme.dark_mode);
    }

    #[test]
    fn screen_change_persists_and_restores() {
        let mut forum = fresh_forum();
        forum.show_screen(Screen::Chat).unwrap();
        assert_eq!(forum.display().nav.active, Screen::Chat);

        let restored = reopen(&forum);
        assert_eq!(restored.state().current_screen, Screen::Chat);
        assert_eq!(restored.display().nav.highlighted, Some(Screen::Chat));
    }

    #[test]
    fn refused_write_leaves_theme_and_screen_alone() {
        let (mut forum, backend) = failing_forum();
        backend.refuse_writes(true);

        assert!(matches!(forum.toggle_theme(), Err(ForumError::Store(_))));
        assert_eq!(forum.state().theme, Theme::Light);
        assert!(!forum.display().theme.dark_mode);

        assert!(matches!(forum.show_screen(Screen::Chat), Err(ForumError::Store(_))));
        assert_eq!(forum.state().current_screen, Screen::Feed);
        assert_eq!(forum.display().nav.active, Screen::Feed);

        backend.refuse_writes(false);
        assert_eq!(forum.toggle_theme().unwrap(), Theme::Dark);
        assert!(forum.display().theme.dark_mode);
    }
}
