//! Form checks. Every validator runs its checks in order and stops at the
//! first failure; on success it yields the request to send.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::model::{GameSettings, User, value_text};
use crate::protocol::{Payload, Request};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_.\-+])+@(([a-zA-Z0-9\-])+\.)+([a-zA-Z0-9]{2,4})+$")
        .expect("email pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    Empty(String),
    NotInteger(String),
    InvalidEmail,
    PasswordMismatch,
    NoSearchCriteria,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(message) => f.write_str(message),
            ValidationError::NotInteger(name) => write!(f, "{} should be an integer.", name),
            ValidationError::InvalidEmail => f.write_str("Invalid email. Please enter a valid email."),
            ValidationError::PasswordMismatch => {
                f.write_str("Passwords don't match. Please try again.")
            }
            ValidationError::NoSearchCriteria => f.write_str("Please enter some search criteria."),
        }
    }
}

pub type Validated = Result<Request, ValidationError>;

pub fn is_empty(value: &str) -> bool {
    value.is_empty()
}

pub fn non_empty(value: &str, name: &str) -> Result<(), ValidationError> {
    if is_empty(value) {
        return Err(ValidationError::Empty(format!("Please enter {}", name)));
    }
    Ok(())
}

pub fn non_empty_or(value: &str, message: &str) -> Result<(), ValidationError> {
    if is_empty(value) {
        return Err(ValidationError::Empty(message.to_owned()));
    }
    Ok(())
}

pub fn integer(value: &str, name: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::NotInteger(name.to_owned())),
    }
}

/// Integer check that lets an empty field through.
pub fn optional_integer(value: &str, name: &str) -> Result<(), ValidationError> {
    if is_empty(value) { Ok(()) } else { integer(value, name) }
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn passwords_match(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub nick: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Validated {
        non_empty(&self.nick, "nick")?;
        non_empty(&self.password, "password")?;
        Ok(Request::new(
            "login",
            Payload::new().with("nick", self.nick.clone()).with("password", self.password.clone()),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub nick: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Validated {
        non_empty(&self.email, "email")?;
        non_empty(&self.name, "full name")?;
        non_empty(&self.nick, "nick")?;
        non_empty(&self.password, "password")?;
        non_empty(&self.confirm_password, "password confirmation")?;
        email(&self.email)?;
        passwords_match(&self.password, &self.confirm_password)?;
        Ok(Request::new(
            "register",
            Payload::new()
                .with("email", self.email.clone())
                .with("name", self.name.clone())
                .with("nick", self.nick.clone())
                .with("password", self.password.clone()),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateUserForm {
    pub email: String,
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

impl UpdateUserForm {
    pub fn for_user(user: &User) -> Self {
        Self { email: user.email.clone(), name: user.name.clone(), ..Default::default() }
    }

    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.email, "email")?;
        non_empty(&self.name, "full name")?;
        non_empty(&self.password, "password")?;
        non_empty(&self.confirm_password, "password confirmation")?;
        email(&self.email)?;
        passwords_match(&self.password, &self.confirm_password)?;
        Ok(Request::new(
            "update_user",
            Payload::new()
                .with_session(session)
                .with("email", self.email.clone())
                .with("name", self.name.clone())
                .with("password", self.password.clone()),
        ))
    }
}

/// Settings shared by game creation and reconfiguration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameSettingsForm {
    /// Set when reconfiguring an existing game.
    pub game_id: Option<String>,
    pub name: String,
    pub description: String,
    pub password: String,
    pub press: String,
    pub order_phase: String,
    pub retreat_phase: String,
    pub build_phase: String,
    pub waiting_time: String,
    pub num_players: String,
}

impl From<&GameSettings> for GameSettingsForm {
    /// Prefills the reconfigure form with the game's current settings.
    fn from(game: &GameSettings) -> Self {
        Self {
            game_id: Some(value_text(&game.id)),
            name: game.name.clone(),
            description: game.description.clone(),
            password: game.password.clone(),
            press: game.press.clone(),
            order_phase: value_text(&game.order_phase),
            retreat_phase: value_text(&game.retreat_phase),
            build_phase: value_text(&game.build_phase),
            waiting_time: value_text(&game.waiting_time),
            num_players: value_text(&game.num_players),
        }
    }
}

impl GameSettingsForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.name, "name")?;
        non_empty(&self.press, "press")?;
        non_empty(&self.order_phase, "order_phase")?;
        non_empty(&self.retreat_phase, "retreat_phase")?;
        non_empty(&self.build_phase, "build_phase")?;
        non_empty(&self.waiting_time, "waiting_time")?;
        non_empty(&self.num_players, "num_players")?;
        integer(&self.order_phase, "order_phase")?;
        integer(&self.retreat_phase, "retreat_phase")?;
        integer(&self.build_phase, "build_phase")?;
        integer(&self.waiting_time, "waiting_time")?;

        let payload = Payload::new()
            .with_session(session)
            .with("name", self.name.clone())
            .with("description", self.description.clone())
            .with("password", self.password.clone())
            .with("press", self.press.clone())
            .with("order_phase", self.order_phase.clone())
            .with("retreat_phase", self.retreat_phase.clone())
            .with("build_phase", self.build_phase.clone())
            .with("waiting_time", self.waiting_time.clone())
            .with("num_players", self.num_players.clone());
        Ok(match &self.game_id {
            Some(id) => Request::new("reconfig_game", payload.with("game_id", id.clone())),
            None => Request::new("create_game", payload),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameSearchForm {
    pub name: String,
    pub description: String,
    pub status: String,
    pub press: String,
    pub order_phase: String,
    pub retreat_phase: String,
    pub build_phase: String,
    pub waiting_time: String,
    pub num_players: String,
}

impl GameSearchForm {
    fn fields(&self) -> [&str; 9] {
        [
            self.name.as_str(),
            self.description.as_str(),
            self.status.as_str(),
            self.press.as_str(),
            self.order_phase.as_str(),
            self.retreat_phase.as_str(),
            self.build_phase.as_str(),
            self.waiting_time.as_str(),
            self.num_players.as_str(),
        ]
    }

    pub fn validate(&self, session: Option<&str>) -> Validated {
        optional_integer(&self.order_phase, "order_phase")?;
        optional_integer(&self.retreat_phase, "retreat_phase")?;
        optional_integer(&self.build_phase, "build_phase")?;
        optional_integer(&self.waiting_time, "waiting_time")?;
        if self.fields().iter().all(|f| is_empty(f)) {
            return Err(ValidationError::NoSearchCriteria);
        }
        Ok(Request::new(
            "game_search",
            Payload::new()
                .with_session(session)
                .with("name", self.name.clone())
                .with("description", self.description.clone())
                .with("status", self.status.clone())
                .with("press", self.press.clone())
                .with("order_phase", self.order_phase.clone())
                .with("retreat_phase", self.retreat_phase.clone())
                .with("build_phase", self.build_phase.clone())
                .with("waiting_time", self.waiting_time.clone())
                .with("num_players", self.num_players.clone()),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameOrderForm {
    pub game_id: String,
    pub game_order: String,
}

impl GameOrderForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.game_order, "game_order")?;
        non_empty(&self.game_id, "game_id")?;
        Ok(Request::new(
            "game_order",
            Payload::new()
                .with_session(session)
                .with("game_id", self.game_id.clone())
                .with("game_order", self.game_order.clone()),
        ))
    }
}

/// In-game press. Power messages go out as `power_msg`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PressForm {
    pub game_id: String,
    pub to: String,
    pub content: String,
    pub power: bool,
}

impl PressForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.game_id, "Press Game Id")?;
        integer(&self.game_id, "Press Game Id")?;
        non_empty_or(&self.content, "Cannot send empty message")?;
        let action = if self.power { "power_msg" } else { "game_msg" };
        Ok(Request::new(
            action,
            Payload::new()
                .with_session(session)
                .with("game_id", self.game_id.clone())
                .with("to", self.to.clone())
                .with("content", self.content.clone()),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OffGameMessageForm {
    pub to: String,
    pub content: String,
}

impl OffGameMessageForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.content, "message, cannot send empty message")?;
        non_empty(&self.to, "recipient, no recipient specified")?;
        Ok(Request::new(
            "user_msg",
            Payload::new()
                .with_session(session)
                .with("to", self.to.clone())
                .with("content", self.content.clone()),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoinGameForm {
    pub game_id: String,
    pub country: String,
}

impl JoinGameForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.game_id, "Game Id")?;
        non_empty(&self.country, "Country")?;
        integer(&self.game_id, "Game Id")?;
        Ok(Request::new(
            "join_game",
            Payload::new()
                .with_session(session)
                .with("game_id", self.game_id.clone())
                .with("country", self.country.clone()),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresenceForm {
    pub user_nick: String,
}

impl PresenceForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.user_nick, "User nick")?;
        Ok(Request::new(
            "get_presence",
            Payload::new().with_session(session).with("nick", self.user_nick.clone()),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportForm {
    pub report_type: String,
    pub message: String,
}

impl ReportForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty_or(&self.report_type, "Please choose a type of issue")?;
        non_empty_or(&self.message, "Please enter a message")?;
        let to = if self.report_type == "report_user" { "moderator" } else { "operator" };
        Ok(Request::new(
            "send_report",
            Payload::new()
                .with_session(session)
                .with("to", to)
                .with("type", self.report_type.clone())
                .with("content", self.message.clone()),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModeratorForm {
    pub nick: String,
    pub make_moderator: bool,
}

impl ModeratorForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.nick, "nick")?;
        Ok(Request::new(
            "assign_moderator",
            Payload::new()
                .with_session(session)
                .with("nick", self.nick.clone())
                .with("is_moderator", if self.make_moderator { "add" } else { "remove" }),
        ))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlacklistForm {
    pub nick: String,
    pub blacklist: bool,
}

impl BlacklistForm {
    pub fn validate(&self, session: Option<&str>) -> Validated {
        non_empty(&self.nick, "nick")?;
        let action = if self.blacklist { "blacklist" } else { "whitelist" };
        Ok(Request::new(action, Payload::new().with_session(session).with("nick", self.nick.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register() -> RegisterForm {
        RegisterForm {
            email: "foo@bar.com".into(),
            name: "Foo Bar".into(),
            nick: "foo".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
        }
    }

    #[test]
    fn email_requires_top_level_domain() {
        assert_eq!(email("foo@bar"), Err(ValidationError::InvalidEmail));
        assert_eq!(email("foo@bar.com"), Ok(()));
        assert_eq!(email("first.last+tag@mail.example.org"), Ok(()));
        assert!(email("no-at-sign.com").is_err());
    }

    #[test]
    fn integer_check() {
        assert!(integer("42", "n").is_ok());
        assert!(integer("-3", "n").is_ok());
        assert_eq!(integer("4.5", "waiting_time").unwrap_err().to_string(), "waiting_time should be an integer.");
        assert!(integer("abc", "n").is_err());
        assert!(optional_integer("", "n").is_ok());
    }

    #[test]
    fn password_mismatch_blocks_with_single_error() {
        let form = RegisterForm { confirm_password: "other".into(), ..register() };
        let err = form.validate().unwrap_err();
        assert_eq!(err, ValidationError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords don't match. Please try again.");
    }

    #[test]
    fn first_failing_check_wins() {
        let form = RegisterForm { email: "bad".into(), name: String::new(), ..register() };
        assert_eq!(form.validate().unwrap_err().to_string(), "Please enter full name");
        let form = RegisterForm { email: "bad".into(), ..register() };
        assert_eq!(form.validate().unwrap_err(), ValidationError::InvalidEmail);
    }

    #[test]
    fn register_payload_order() {
        let req = register().validate().unwrap();
        assert_eq!(req.action, "register");
        assert_eq!(req.keys(), vec!["email", "name", "nick", "password"]);
    }

    #[test]
    fn game_settings_create_and_reconfigure() {
        let mut form = GameSettingsForm {
            game_id: None,
            name: "g".into(),
            description: String::new(),
            password: String::new(),
            press: "grey".into(),
            order_phase: "10".into(),
            retreat_phase: "5".into(),
            build_phase: "5".into(),
            waiting_time: "60".into(),
            num_players: "7".into(),
        };
        let create = form.validate(Some("s")).unwrap();
        assert_eq!(create.action, "create_game");
        assert_eq!(create.keys().len(), 10);
        assert_eq!(create.keys()[0], "session_id");

        form.game_id = Some("31".into());
        let reconfig = form.validate(Some("s")).unwrap();
        assert_eq!(reconfig.action, "reconfig_game");
        assert_eq!(reconfig.keys().last(), Some(&"game_id"));

        form.build_phase = "soon".into();
        assert_eq!(form.validate(None), Err(ValidationError::NotInteger("build_phase".into())));
    }

    #[test]
    fn search_needs_some_criteria() {
        assert_eq!(GameSearchForm::default().validate(None), Err(ValidationError::NoSearchCriteria));
        let form = GameSearchForm { waiting_time: "x".into(), ..Default::default() };
        assert_eq!(form.validate(None), Err(ValidationError::NotInteger("waiting_time".into())));
        let form = GameSearchForm { status: "ongoing".into(), ..Default::default() };
        assert_eq!(form.validate(None).unwrap().action, "game_search");
    }

    #[test]
    fn press_picks_operation_from_power_flag() {
        let form = PressForm { game_id: "9".into(), to: "italy".into(), content: "hi".into(), power: false };
        assert_eq!(form.validate(Some("s")).unwrap().action, "game_msg");
        let form = PressForm { power: true, ..form };
        assert_eq!(form.validate(Some("s")).unwrap().action, "power_msg");
        let form = PressForm { content: String::new(), ..form };
        assert_eq!(form.validate(None).unwrap_err().to_string(), "Cannot send empty message");
    }

    #[test]
    fn reports_route_by_type() {
        let form = ReportForm { report_type: "report_user".into(), message: "spam".into() };
        assert_eq!(form.validate(Some("s")).unwrap().data.get("to"), Some(&json!("moderator")));
        let form = ReportForm { report_type: "report_bug".into(), ..form };
        assert_eq!(form.validate(Some("s")).unwrap().data.get("to"), Some(&json!("operator")));
        let form = ReportForm::default();
        assert_eq!(form.validate(None).unwrap_err().to_string(), "Please choose a type of issue");
    }

    #[test]
    fn moderation_forms() {
        let req = ModeratorForm { nick: "bob".into(), make_moderator: false }.validate(None).unwrap();
        assert_eq!(req.data.get("is_moderator"), Some(&json!("remove")));
        let req = BlacklistForm { nick: "bob".into(), blacklist: true }.validate(None).unwrap();
        assert_eq!(req.action, "blacklist");
        assert!(BlacklistForm::default().validate(None).is_err());
    }

    #[test]
    fn join_checks_id_after_presence() {
        let form = JoinGameForm { game_id: "abc".into(), country: String::new() };
        assert_eq!(form.validate(None).unwrap_err().to_string(), "Please enter Country");
        let form = JoinGameForm { country: "france".into(), ..form };
        assert_eq!(form.validate(None).unwrap_err(), ValidationError::NotInteger("Game Id".into()));
    }

    #[test]
    fn reconfigure_form_prefills_from_settings() {
        let settings: GameSettings = serde_json::from_value(json!({
            "id": 12, "name": "g", "press": "grey", "order_phase": 60, "retreat_phase": 30,
            "build_phase": 30, "waiting_time": 120, "num_players": 7
        }))
        .unwrap();
        let form = GameSettingsForm::from(&settings);
        assert_eq!(form.game_id.as_deref(), Some("12"));
        assert_eq!(form.order_phase, "60");
        let req = form.validate(Some("s")).unwrap();
        assert_eq!(req.action, "reconfig_game");
        assert_eq!(req.keys().last(), Some(&"game_id"));
    }
}
