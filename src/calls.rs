// Requests that carry no user-typed fields.

use crate::protocol::{Payload, Request};

fn session_only(action: &str, session: Option<&str>) -> Request {
    Request::new(action, Payload::new().with_session(session))
}

fn with_game(action: &str, session: Option<&str>, game_id: &str) -> Request {
    Request::new(action, Payload::new().with_session(session).with("game_id", game_id.to_owned()))
}

pub fn logout(session: Option<&str>) -> Request {
    session_only("logout", session)
}

/// Rebinds server pushes to this socket after a page reload.
pub fn set_push_receiver(session: Option<&str>) -> Request {
    session_only("set_push_receiver", session)
}

pub fn games_current(session: Option<&str>) -> Request {
    session_only("games_current", session)
}

pub fn game_overview(session: Option<&str>, game_id: &str) -> Request {
    with_game("game_overview", session, game_id)
}

pub fn get_game(session: Option<&str>, game_id: &str) -> Request {
    with_game("get_game", session, game_id)
}

pub fn stop_game(session: Option<&str>, game_id: &str) -> Request {
    with_game("stop_game", session, game_id)
}

pub fn get_reports(session: Option<&str>) -> Request {
    session_only("get_reports", session)
}

pub fn mark_as_done(session: Option<&str>, issue_id: &str) -> Request {
    Request::new(
        "mark_as_done",
        Payload::new().with_session(session).with("issue_id", issue_id.to_owned()),
    )
}

pub fn get_system_status(session: Option<&str>) -> Request {
    session_only("get_system_status", session)
}

pub fn get_database_status(session: Option<&str>) -> Request {
    session_only("get_db_stats", session)
}

pub fn get_games_ongoing(session: Option<&str>) -> Request {
    session_only("get_games_ongoing", session)
}

/// The operator overview takes the game id first.
pub fn operator_game_overview(session: Option<&str>, game_id: &str) -> Request {
    Request::new(
        "operator_game_overview",
        Payload::new().with("game_id", game_id.to_owned()).with_session(session),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_overview_puts_game_first() {
        assert_eq!(operator_game_overview(Some("s"), "4").keys(), vec!["game_id", "session_id"]);
        assert_eq!(game_overview(Some("s"), "4").keys(), vec!["session_id", "game_id"]);
    }

    #[test]
    fn database_status_uses_server_name() {
        assert_eq!(get_database_status(None).action, "get_db_stats");
        assert_eq!(mark_as_done(None, "7").keys(), vec!["session_id", "issue_id"]);
    }
}
