//! Wire format shared with the game server.
//!
//! Requests go out as `{"action": op, "data": {"content": [{key: value}, ...]}}`.
//! The server matches `content` entries by position, so their order is part of
//! the contract. Replies and pushes come back as `{"event": name, "event_data": ...}`.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::model::{GameMessages, GameOverview, GameSettings, Order, PlayerGameOverview, User, lenient_list};
use crate::state::notice::{Notice, NoticeKind};

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub value: Value,
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Payload {
    pub content: Vec<Field>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.content.push(Field { key, value: value.into() });
        self
    }

    /// The server expects `false` when the browser holds no session.
    pub fn with_session(self, session: Option<&str>) -> Self {
        let value = session.map(Value::from).unwrap_or(Value::Bool(false));
        self.with("session_id", value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Request {
    pub action: String,
    pub data: Payload,
}

impl Request {
    pub fn new(action: impl Into<String>, data: Payload) -> Self {
        Self { action: action.into(), data }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
impl Payload {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.content.iter().find(|f| f.key == key).map(|f| &f.value)
    }
}

#[cfg(test)]
impl Request {
    pub fn keys(&self) -> Vec<&'static str> {
        self.data.content.iter().map(|f| f.key).collect()
    }
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    event_data: Value,
}

/// Login reply: the session id plus the account it belongs to.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginData {
    pub session_id: String,
    #[serde(flatten)]
    pub user: User,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ServerEvent {
    LoginSuccess(LoginData),
    LogoutSuccess,
    UserUpdated(User),
    GamesCurrent(Vec<Map<String, Value>>),
    GameOverview(PlayerGameOverview),
    PhaseChange(PlayerGameOverview),
    GameSettings(GameSettings),
    GameSearch(Vec<Map<String, Value>>),
    OperatorGameOverview(GameOverview),
    OperatorGameMessages(GameMessages),
    GamesOngoing(Vec<Value>),
    SystemStatus(String),
    DatabaseStatus(Map<String, Value>),
    Reports(Vec<Map<String, Value>>),
    /// Orders the server now holds for the player.
    GameOrderAccepted(Vec<Order>),
    Notice(Notice),
    Unhandled(String),
}

#[derive(Debug)]
pub enum EventError {
    Envelope(serde_json::Error),
    Data { event: String, source: serde_json::Error },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::Envelope(e) => write!(f, "malformed server message: {}", e),
            EventError::Data { event, source } => {
                write!(f, "malformed data for event \"{}\": {}", event, source)
            }
        }
    }
}

fn data<T: for<'de> Deserialize<'de>>(event: &str, value: Value) -> Result<T, EventError> {
    serde_json::from_value(value).map_err(|source| EventError::Data { event: event.to_owned(), source })
}

fn notice_text(op: &str, data: &Value, fallback: &str) -> String {
    match data {
        Value::String(s) if !s.is_empty() => s.clone(),
        _ => format!("{}: {}", op.replace('_', " "), fallback),
    }
}

impl ServerEvent {
    pub fn parse(raw: &str) -> Result<Self, EventError> {
        let env: Envelope = serde_json::from_str(raw).map_err(EventError::Envelope)?;
        Self::from_parts(&env.event, env.event_data)
    }

    pub fn from_parts(event: &str, event_data: Value) -> Result<Self, EventError> {
        Ok(match event {
            "login_success" => Self::LoginSuccess(data(event, event_data)?),
            "logout_success" => Self::LogoutSuccess,
            "update_user_success" => Self::UserUpdated(data(event, event_data)?),
            "games_current_success" => Self::GamesCurrent(data(event, event_data)?),
            "game_overview_success" => Self::GameOverview(data(event, event_data)?),
            "phase_change" => Self::PhaseChange(data(event, event_data)?),
            "get_game_success" => Self::GameSettings(data(event, event_data)?),
            "game_search_success" => Self::GameSearch(data(event, event_data)?),
            "operator_game_overview_success" => Self::OperatorGameOverview(data(event, event_data)?),
            "operator_get_game_msg_success" => Self::OperatorGameMessages(data(event, event_data)?),
            "get_games_ongoing_success" => Self::GamesOngoing(data(event, event_data)?),
            "get_system_status_success" => {
                #[derive(Deserialize)]
                struct Status {
                    system_status: String,
                }
                Self::SystemStatus(data::<Status>(event, event_data)?.system_status)
            }
            "get_db_stats_success" => Self::DatabaseStatus(data(event, event_data)?),
            "get_reports_success" => Self::Reports(data(event, event_data)?),
            "game_order_success" => {
                #[derive(Deserialize)]
                struct Ack {
                    #[serde(default, deserialize_with = "lenient_list")]
                    my_orders: Option<Vec<Order>>,
                }
                Self::GameOrderAccepted(data::<Ack>(event, event_data)?.my_orders.unwrap_or_default())
            }
            "message" => {
                #[derive(Deserialize)]
                struct Raw {
                    #[serde(rename = "type")]
                    kind: String,
                    message: String,
                }
                let raw: Raw = data(event, event_data)?;
                match Notice::from_parts(&raw.kind, &raw.message) {
                    Some(n) => Self::Notice(n),
                    None => Self::Unhandled(format!("message of type \"{}\"", raw.kind)),
                }
            }
            other => {
                if let Some(op) = other.strip_suffix("_success") {
                    Self::Notice(Notice::new(NoticeKind::Success, notice_text(op, &event_data, "done")))
                } else if let Some(op) =
                    other.strip_suffix("_invalid_data").or_else(|| other.strip_suffix("_error"))
                {
                    Self::Notice(Notice::new(NoticeKind::Error, notice_text(op, &event_data, "failed")))
                } else {
                    Self::Unhandled(other.to_owned())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::order_lines;
    use serde_json::json;

    #[test]
    fn payload_keeps_field_order() {
        let req = Request::new(
            "operator_get_game_msg",
            Payload::new().with("order_key", "").with("game_id", "3").with_session(Some("s1")),
        );
        let v: Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        assert_eq!(
            v,
            json!({
                "action": "operator_get_game_msg",
                "data": {"content": [{"order_key": ""}, {"game_id": "3"}, {"session_id": "s1"}]}
            })
        );
    }

    #[test]
    fn missing_session_is_sent_as_false() {
        let p = Payload::new().with_session(None);
        assert_eq!(p.get("session_id"), Some(&Value::Bool(false)));
    }

    #[test]
    fn parses_login_reply() {
        let ev = ServerEvent::parse(
            r#"{"event":"login_success","event_data":{"session_id":"abc","id":5,"nick":"bob","email":"b@x.org","name":"Bob","role":"moderator"}}"#,
        )
        .unwrap();
        match ev {
            ServerEvent::LoginSuccess(d) => {
                assert_eq!(d.session_id, "abc");
                assert_eq!(d.user.nick, "bob");
                assert_eq!(d.user.role, crate::model::Role::Moderator);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn generic_outcomes_become_notices() {
        let ev = ServerEvent::from_parts("create_game_success", json!(12)).unwrap();
        assert_eq!(ev, ServerEvent::Notice(Notice::new(NoticeKind::Success, "create game: done")));
        let ev = ServerEvent::from_parts("join_game_invalid_data", json!("Country taken")).unwrap();
        assert_eq!(ev, ServerEvent::Notice(Notice::new(NoticeKind::Error, "Country taken")));
    }

    #[test]
    fn unknown_events_and_types_are_unhandled() {
        assert_eq!(
            ServerEvent::from_parts("mystery", Value::Null).unwrap(),
            ServerEvent::Unhandled("mystery".to_owned())
        );
        let ev = ServerEvent::from_parts("message", json!({"type": "shout", "message": "hi"})).unwrap();
        assert!(matches!(ev, ServerEvent::Unhandled(_)));
    }

    #[test]
    fn malformed_data_reports_event_name() {
        let err = ServerEvent::from_parts("get_reports_success", json!("nope")).unwrap_err();
        assert!(err.to_string().contains("get_reports_success"));
        assert!(ServerEvent::parse("not json").is_err());
    }

    #[test]
    fn null_message_list_reads_as_empty() {
        let ev = ServerEvent::from_parts(
            "operator_get_game_msg_success",
            json!({"order": "A vie Hold", "msg": null}),
        )
        .unwrap();
        match ev {
            ServerEvent::OperatorGameMessages(m) => {
                assert_eq!(m.order.as_deref(), Some("A vie Hold"));
                assert!(m.msg.is_empty());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn broken_order_entries_keep_the_overview() {
        let ev = ServerEvent::from_parts(
            "game_overview_success",
            json!({
                "game_id": 5,
                "game_status": "ongoing",
                "orders": [
                    {"action": "move", "u1": "army", "l1": "bud", "l2": null},
                    {"action": "hold", "u1": "fleet", "l1": "tri"}
                ],
                "order_result": "pending"
            }),
        )
        .unwrap();
        match ev {
            ServerEvent::GameOverview(game) => {
                assert_eq!(game.orders.as_deref().map(order_lines), Some(vec!["fleet tri Hold".to_owned()]));
                assert_eq!(game.order_result, None);
            }
            other => panic!("unexpected event {:?}", other),
        }
        let ack = ServerEvent::from_parts("game_order_success", json!({"my_orders": [{"action": "hold"}]})).unwrap();
        assert_eq!(ack, ServerEvent::GameOrderAccepted(vec![Order::Unknown]));
    }
}
