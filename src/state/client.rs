use std::rc::Rc;

use yew::prelude::*;

use crate::model::{GameMessages, GameSettings, PlayerGameOverview, Role, User, value_text};
use crate::protocol::ServerEvent;
use crate::state::navigation::{Navigation, Page};
use crate::state::notice::{Notice, NoticeKind};
use crate::state::overview::{InspectTarget, OverviewTree, build_overview};
use crate::state::table::{
    Table, TableAction, current_games_table, database_status_table, ongoing_games_table, reports_table,
    search_results_table,
};
use crate::util::cwarn;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connection {
    #[default]
    Connecting,
    Open,
    Closed,
    Unsupported,
}

/// Everything the pages render from. Server events and user actions only
/// ever reach the UI through `ClientAction`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientState {
    pub user: Option<User>,
    pub session: Option<String>,
    pub nav: Navigation,
    pub connection: Connection,
    pub notice: Option<Notice>,
    /// Bumped on every new notice so the dismissal timer restarts even when
    /// the same text is shown twice.
    pub notice_seq: u64,

    pub current_games: Option<Table>,
    pub search_results: Option<Table>,
    pub game: Option<PlayerGameOverview>,
    pub game_settings: Option<GameSettings>,

    pub system_status: Option<String>,
    pub database_status: Option<Table>,
    pub ongoing_games: Option<Table>,
    pub reports: Option<Table>,
    pub overview: Option<OverviewTree>,
    pub messages: Option<GameMessages>,
    pub hide_muted: bool,
}

pub enum ClientAction {
    /// Session found in the cookie jar on page load.
    Restore { session: String, user: Option<User>, page: Option<Page> },
    Goto(Page),
    Inspect(InspectTarget),
    ToggleHideMuted,
    RemoveReport(String),
    Notify(Notice),
    DismissNotice,
    Connection(Connection),
    Server(ServerEvent),
}

impl ClientState {
    pub fn logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn role(&self) -> Role {
        self.user.as_ref().map(|u| u.role).unwrap_or_default()
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_seq = self.notice_seq.wrapping_add(1);
    }

    /// Moves to `page` unless the session or role forbids it.
    fn open(&mut self, page: Page) {
        if page.needs_login() && !self.logged_in() {
            self.notify(Notice::new(NoticeKind::Warning, "Please log in first."));
            self.nav.goto(Page::Login);
        } else if !page.allowed_for(self.role()) {
            self.notify(Notice::error("You are not allowed to open that page."));
            self.nav.goto(Page::home_for(self.user.as_ref()));
        } else {
            self.nav.goto(page);
        }
    }

    fn apply(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::LoginSuccess(login) => {
                self.session = Some(login.session_id);
                self.user = Some(login.user);
                self.nav.goto(Page::Dashboard);
            }
            ServerEvent::LogoutSuccess => {
                let notice_seq = self.notice_seq;
                *self = ClientState { connection: self.connection, notice_seq, ..Default::default() };
            }
            ServerEvent::UserUpdated(updated) => {
                let role = self.role();
                self.user = Some(User { role, ..updated });
                self.notify(Notice::new(NoticeKind::Success, "Account updated."));
            }
            ServerEvent::GamesCurrent(games) => {
                let user_id = self.user.as_ref().map(|u| &u.id);
                self.current_games = Some(current_games_table(&games, user_id));
            }
            ServerEvent::GameOverview(game) => {
                self.nav.view_game(Page::Game, game.id_text());
                self.game = Some(game);
            }
            ServerEvent::PhaseChange(game) => {
                if self.nav.is_viewing(Page::Game, &game.id_text()) {
                    self.notice = None;
                    self.game = Some(game);
                }
            }
            ServerEvent::GameSettings(settings) => {
                let id = value_text(&settings.id);
                self.nav.view_game(Page::ReconfigGame, id);
                self.game_settings = Some(settings);
            }
            ServerEvent::GameSearch(games) => {
                self.search_results = Some(search_results_table(&games));
            }
            ServerEvent::OperatorGameOverview(overview) => {
                self.nav.view_game(Page::Operator, overview.id_text());
                self.overview = Some(build_overview(&overview));
                self.messages = None;
            }
            ServerEvent::OperatorGameMessages(messages) => {
                self.messages = Some(messages);
            }
            ServerEvent::GamesOngoing(ids) => {
                self.ongoing_games = Some(ongoing_games_table(&ids));
            }
            ServerEvent::SystemStatus(status) => {
                self.system_status = Some(status);
            }
            ServerEvent::DatabaseStatus(stats) => match database_status_table(&stats) {
                Ok(table) => self.database_status = Some(table),
                Err(e) => {
                    cwarn(&format!("database status: {}", e));
                    self.notify(Notice::error("Could not read database status."));
                }
            },
            ServerEvent::Reports(reports) => {
                self.reports = Some(reports_table(&reports));
            }
            ServerEvent::GameOrderAccepted(orders) => {
                if let Some(game) = self.game.as_mut() {
                    game.orders = Some(orders);
                }
                self.notify(Notice::new(NoticeKind::Success, "Orders received."));
            }
            ServerEvent::Notice(notice) => self.notify(notice),
            ServerEvent::Unhandled(_) => {}
        }
    }
}

impl Reducible for ClientState {
    type Action = ClientAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            ClientAction::Restore { session, user, page } => {
                new.session = Some(session);
                new.user = user;
                let page = page.filter(|p| p.restorable() && p.needs_login()).unwrap_or(Page::Dashboard);
                new.open(page);
            }
            ClientAction::Goto(page) => new.open(page),
            ClientAction::Inspect(target) => {
                new.nav.focus_country = target.country;
                new.messages = None;
            }
            ClientAction::ToggleHideMuted => {
                new.hide_muted = !new.hide_muted;
            }
            ClientAction::RemoveReport(id) => {
                if let Some(reports) = new.reports.as_mut() {
                    reports.remove_row_with(&TableAction::MarkDone(id));
                }
            }
            ClientAction::Notify(notice) => new.notify(notice),
            ClientAction::DismissNotice => {
                if new.notice.is_none() {
                    return self;
                }
                new.notice = None;
            }
            ClientAction::Connection(status) => {
                new.connection = status;
                match status {
                    Connection::Open => {
                        new.notify(Notice::new(NoticeKind::Success, "Connected to server via websockets"))
                    }
                    Connection::Closed => new.notify(Notice::error("Connection to server closed").sticky()),
                    Connection::Unsupported => new.notify(Notice::error("Unsupported browser!").sticky()),
                    Connection::Connecting => {}
                }
            }
            ClientAction::Server(event) => {
                if let ServerEvent::Unhandled(name) = &event {
                    cwarn(&format!("unhandled server event: {}", name));
                    return self;
                }
                new.apply(event);
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::LoginData;
    use serde_json::json;

    fn reduce(state: ClientState, action: ClientAction) -> ClientState {
        (*Rc::new(state).reduce(action)).clone()
    }

    fn event(name: &str, data: serde_json::Value) -> ClientAction {
        ClientAction::Server(ServerEvent::from_parts(name, data).unwrap())
    }

    fn logged_in(role: Role) -> ClientState {
        reduce(
            ClientState::default(),
            ClientAction::Server(ServerEvent::LoginSuccess(LoginData {
                session_id: "s1".into(),
                user: User { id: json!(5), nick: "bob".into(), role, ..Default::default() },
            })),
        )
    }

    #[test]
    fn login_opens_dashboard_and_logout_clears_everything() {
        let state = logged_in(Role::User);
        assert_eq!(state.nav.page, Page::Dashboard);
        assert_eq!(state.session(), Some("s1"));

        let state = reduce(state, event("games_current_success", json!([{"id": 1, "status": "ongoing"}])));
        assert!(state.current_games.is_some());

        let state = reduce(state, event("logout_success", json!(null)));
        assert!(!state.logged_in());
        assert!(state.current_games.is_none());
        assert_eq!(state.nav.page, Page::Home);
    }

    #[test]
    fn pages_are_gated_by_session_and_role() {
        let state = reduce(ClientState::default(), ClientAction::Goto(Page::Dashboard));
        assert_eq!(state.nav.page, Page::Login);
        assert_eq!(state.notice.map(|n| n.kind), Some(NoticeKind::Warning));

        let state = reduce(logged_in(Role::User), ClientAction::Goto(Page::Operator));
        assert_eq!(state.nav.page, Page::Dashboard);

        let state = reduce(logged_in(Role::Operator), ClientAction::Goto(Page::Operator));
        assert_eq!(state.nav.page, Page::Operator);
    }

    #[test]
    fn restore_skips_pages_that_need_pushed_data() {
        let restore = |page| ClientAction::Restore { session: "s".into(), user: None, page: Some(page) };
        let state = reduce(ClientState::default(), restore(Page::Game));
        assert_eq!(state.nav.page, Page::Dashboard);
        let state = reduce(ClientState::default(), restore(Page::GameSearch));
        assert_eq!(state.nav.page, Page::GameSearch);
    }

    #[test]
    fn phase_change_only_touches_the_viewed_game() {
        let state = logged_in(Role::User);
        let state = reduce(state, event("game_overview_success", json!({"game_id": 7, "year": 1901})));
        assert!(state.nav.is_viewing(Page::Game, "7"));

        let state = reduce(state, event("phase_change", json!({"game_id": 8, "year": 1902})));
        assert_eq!(state.game.as_ref().map(|g| g.id_text()), Some("7".to_owned()));

        let state = reduce(state, event("phase_change", json!({"game_id": 7, "year": 1902})));
        assert_eq!(state.game.and_then(|g| g.year), Some(json!(1902)));
    }

    #[test]
    fn accepted_orders_replace_the_players_orders() {
        let state = logged_in(Role::User);
        let state = reduce(state, event("game_overview_success", json!({"game_id": 7})));
        let state = reduce(
            state,
            event("game_order_success", json!({"my_orders": [{"action": "hold", "u1": "army", "l1": "par"}]})),
        );
        assert_eq!(state.game.and_then(|g| g.orders).map(|o| o.len()), Some(1));
        assert_eq!(state.notice.map(|n| n.kind), Some(NoticeKind::Success));
    }

    #[test]
    fn operator_overview_and_inspection() {
        let state = logged_in(Role::Operator);
        let state = reduce(
            state,
            event("operator_game_overview_success", json!({"game_id": 3, "year_season": "1903-spring", "links": {}})),
        );
        assert!(state.nav.is_viewing(Page::Operator, "3"));
        assert_eq!(state.overview.as_ref().map(|t| t.years.len()), Some(2));

        let slot = state.overview.as_ref().unwrap().years[0].phases[0].slots[2].target.clone();
        let state = reduce(state, ClientAction::Inspect(slot));
        assert_eq!(state.nav.focus_country.as_deref(), Some("france"));

        let state = reduce(
            state,
            event("operator_get_game_msg_success", json!({"order": "A par Hold", "msg": []})),
        );
        assert!(state.messages.is_some());
        let next = state.overview.as_ref().unwrap().years[0].phases[0].slots[3].target.clone();
        let state = reduce(state, ClientAction::Inspect(next));
        assert_eq!(state.messages, None);

        let state = reduce(state, ClientAction::Inspect(InspectTarget::game_context("3")));
        assert_eq!(state.nav.focus_country, None);
    }

    #[test]
    fn done_reports_disappear() {
        let state = logged_in(Role::Moderator);
        let state = reduce(state, event("get_reports_success", json!([{"id": "a"}, {"id": "b"}])));
        let state = reduce(state, ClientAction::RemoveReport("a".into()));
        assert_eq!(state.reports.map(|t| t.rows.len()), Some(1));
    }

    #[test]
    fn notices_bump_the_sequence() {
        let state = reduce(ClientState::default(), ClientAction::Notify(Notice::error("x")));
        let state = reduce(state, ClientAction::Notify(Notice::error("x")));
        assert_eq!(state.notice_seq, 2);
        let state = reduce(state, ClientAction::DismissNotice);
        assert!(state.notice.is_none());
        let state = reduce(state, ClientAction::Connection(Connection::Closed));
        assert_eq!(state.notice.map(|n| n.transient), Some(false));
    }
}
