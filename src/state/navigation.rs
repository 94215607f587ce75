use crate::model::{Role, User};

/// Every page the client can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Dashboard,
    Login,
    Register,
    UpdateUser,
    CreateGame,
    ReconfigGame,
    GameSearch,
    Game,
    UserHelp,
    Operator,
    Moderator,
    AddRemoveModerator,
    BlacklistWhitelist,
}

pub const ALL_PAGES: [Page; 14] = [
    Page::Home,
    Page::Dashboard,
    Page::Login,
    Page::Register,
    Page::UpdateUser,
    Page::CreateGame,
    Page::ReconfigGame,
    Page::GameSearch,
    Page::Game,
    Page::UserHelp,
    Page::Operator,
    Page::Moderator,
    Page::AddRemoveModerator,
    Page::BlacklistWhitelist,
];

impl Page {
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Dashboard => "dashboard",
            Page::Login => "login",
            Page::Register => "register",
            Page::UpdateUser => "update_user",
            Page::CreateGame => "create_game",
            Page::ReconfigGame => "reconfig_game",
            Page::GameSearch => "game_search",
            Page::Game => "game",
            Page::UserHelp => "user_help",
            Page::Operator => "operator",
            Page::Moderator => "moderator",
            Page::AddRemoveModerator => "add_remove_moderator",
            Page::BlacklistWhitelist => "blacklist_whitelist",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Page> {
        let slug = slug.trim_start_matches('#');
        ALL_PAGES.into_iter().find(|p| p.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Welcome",
            Page::Dashboard => "Dashboard",
            Page::Login => "Log in",
            Page::Register => "Register",
            Page::UpdateUser => "Update account",
            Page::CreateGame => "Create game",
            Page::ReconfigGame => "Reconfigure game",
            Page::GameSearch => "Search games",
            Page::Game => "Game Overview",
            Page::UserHelp => "Help",
            Page::Operator => "Operator",
            Page::Moderator => "Moderator",
            Page::AddRemoveModerator => "Moderators",
            Page::BlacklistWhitelist => "Blacklist",
        }
    }

    /// Pages that only make sense with a session.
    pub fn needs_login(self) -> bool {
        !matches!(self, Page::Home | Page::Login | Page::Register)
    }

    /// Pages that restore cleanly from a bookmark. Game and reconfigure
    /// views need data pushed by the server first.
    pub fn restorable(self) -> bool {
        !matches!(self, Page::Game | Page::ReconfigGame)
    }

    pub fn home_for(user: Option<&User>) -> Page {
        match user {
            Some(_) => Page::Dashboard,
            None => Page::Home,
        }
    }

    /// Administration page for the user's role, if any.
    pub fn power_page(role: Role) -> Option<Page> {
        match role {
            Role::Operator => Some(Page::Operator),
            Role::Moderator => Some(Page::Moderator),
            Role::User => None,
        }
    }

    /// Whether `role` may open this page.
    pub fn allowed_for(self, role: Role) -> bool {
        match self {
            Page::Operator => role == Role::Operator,
            Page::Moderator | Page::AddRemoveModerator | Page::BlacklistWhitelist => {
                matches!(role, Role::Moderator | Role::Operator)
            }
            _ => true,
        }
    }
}

/// Where the user is and what they are inspecting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub page: Page,
    /// Game shown on the game page or the operator overview.
    pub view_game_id: Option<String>,
    /// Country whose press is being inspected in the operator overview.
    pub focus_country: Option<String>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self { page: Page::Home, view_game_id: None, focus_country: None }
    }
}

impl Navigation {
    /// Moves to `page`, dropping the inspection context when leaving it.
    pub fn goto(&mut self, page: Page) {
        if page != self.page {
            self.view_game_id = None;
            self.focus_country = None;
        }
        self.page = page;
    }

    pub fn view_game(&mut self, page: Page, game_id: String) {
        self.goto(page);
        if self.view_game_id.as_deref() != Some(game_id.as_str()) {
            self.focus_country = None;
        }
        self.view_game_id = Some(game_id);
    }

    pub fn is_viewing(&self, page: Page, game_id: &str) -> bool {
        self.page == page && self.view_game_id.as_deref() == Some(game_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_for_every_page() {
        for page in ALL_PAGES {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("#game_search"), Some(Page::GameSearch));
        assert_eq!(Page::from_slug("nowhere"), None);
    }

    #[test]
    fn role_pages() {
        assert_eq!(Page::power_page(Role::Operator), Some(Page::Operator));
        assert_eq!(Page::power_page(Role::User), None);
        assert!(Page::BlacklistWhitelist.allowed_for(Role::Operator));
        assert!(!Page::Operator.allowed_for(Role::Moderator));
        assert!(Page::Dashboard.allowed_for(Role::User));
    }

    #[test]
    fn leaving_a_page_clears_inspection_context() {
        let mut nav = Navigation::default();
        nav.view_game(Page::Operator, "12".to_owned());
        nav.focus_country = Some("italy".to_owned());
        nav.goto(Page::Operator);
        assert_eq!(nav.focus_country.as_deref(), Some("italy"));
        nav.goto(Page::Dashboard);
        assert_eq!(nav, Navigation { page: Page::Dashboard, view_game_id: None, focus_country: None });
    }

    #[test]
    fn switching_games_drops_focus() {
        let mut nav = Navigation::default();
        nav.view_game(Page::Operator, "1".to_owned());
        nav.focus_country = Some("italy".to_owned());
        nav.view_game(Page::Operator, "1".to_owned());
        assert!(nav.focus_country.is_some());
        nav.view_game(Page::Operator, "2".to_owned());
        assert!(nav.focus_country.is_none());
        assert!(nav.is_viewing(Page::Operator, "2"));
        assert!(!nav.is_viewing(Page::Game, "2"));
    }
}
