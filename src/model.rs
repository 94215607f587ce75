//! Game data as pushed by the server.
//! Field names follow the server's JSON; every type here is decoded with serde.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// First year of every game; the overview tree starts here.
pub const FIRST_YEAR: u32 = 1901;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Austria,
    England,
    France,
    Germany,
    Italy,
    Russia,
    Turkey,
}

/// The seven seats, in the order the server lists them.
pub const ROSTER: [Country; 7] = [
    Country::Austria,
    Country::England,
    Country::France,
    Country::Germany,
    Country::Italy,
    Country::Russia,
    Country::Turkey,
];

impl Country {
    pub fn key(self) -> &'static str {
        match self {
            Country::Austria => "austria",
            Country::England => "england",
            Country::France => "france",
            Country::Germany => "germany",
            Country::Italy => "italy",
            Country::Russia => "russia",
            Country::Turkey => "turkey",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Fall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Order,
    Retreat,
    Build,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeasonPhase {
    pub season: Season,
    pub phase: Phase,
}

/// Every season-phase a game year goes through, in play order.
pub const SEASON_PHASES: [SeasonPhase; 5] = [
    SeasonPhase { season: Season::Spring, phase: Phase::Order },
    SeasonPhase { season: Season::Spring, phase: Phase::Retreat },
    SeasonPhase { season: Season::Fall, phase: Phase::Order },
    SeasonPhase { season: Season::Fall, phase: Phase::Retreat },
    SeasonPhase { season: Season::Fall, phase: Phase::Build },
];

impl Season {
    pub fn key(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Fall => "fall",
        }
    }
}

impl Phase {
    pub fn key(self) -> &'static str {
        match self {
            Phase::Order => "order_phase",
            Phase::Retreat => "retreat_phase",
            Phase::Build => "build_phase",
        }
    }
}

impl SeasonPhase {
    /// Key used in overview links, e.g. `spring-order_phase`.
    pub fn key(self) -> String {
        format!("{}-{}", self.season.key(), self.phase.key())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Operator,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Value,
    pub nick: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

/// `links[year][season_phase]` lists up to seven countries; `null` marks a
/// seat that exchanged no messages in that phase.
pub type OverviewLinks = BTreeMap<String, BTreeMap<String, Vec<Option<String>>>>;

/// Operator's view of one game, as sent with `operator_game_overview`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GameOverview {
    pub game_id: Value,
    pub year_season: String,
    #[serde(default)]
    pub links: Option<OverviewLinks>,
    #[serde(default)]
    pub players: Map<String, Value>,
    /// Remaining scalar fields, shown as-is in the info listing.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameOverview {
    /// Year the game is currently in, taken from the `1905-spring` style label.
    pub fn current_year(&self) -> Option<u32> {
        self.year_season.split('-').next()?.trim().parse().ok()
    }

    pub fn id_text(&self) -> String {
        value_text(&self.game_id)
    }
}

/// Reply to `operator_get_game_msg`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GameMessages {
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub msg: Vec<MessageRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Order {
    Hold { u1: String, l1: String },
    Move { u1: String, l1: String, l2: String },
    SupportMove { u1: String, l1: String, u2: String, l2: String, l3: String },
    SupportHold { u1: String, l1: String, u2: String, l2: String },
    Convoy { u1: String, l1: String, u2: String, l2: String, l3: String },
    Build { u1: String, l1: String },
    Disband { u1: String, l1: String },
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Hold { u1, l1 } => write!(f, "{} {} Hold", u1, l1),
            Order::Move { u1, l1, l2 } => write!(f, "{} {}->{}", u1, l1, l2),
            Order::SupportMove { u1, l1, u2, l2, l3 } => {
                write!(f, "{} {} Support {} {}->{}", u1, l1, u2, l2, l3)
            }
            Order::SupportHold { u1, l1, u2, l2 } => {
                write!(f, "{} {} Support {} {} hold", u1, l1, u2, l2)
            }
            Order::Convoy { u1, l1, u2, l2, l3 } => {
                write!(f, "{} {} Convoy {} {}->{}", u1, l1, u2, l2, l3)
            }
            Order::Build { u1, l1 } => write!(f, "Build {} {}", u1, l1),
            Order::Disband { u1, l1 } => write!(f, "Disband {} {}", u1, l1),
            Order::Unknown => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ResultOrder {
    Dislodge { u1: String, c1: String, l1: String },
    HasBuilds { country: String, count: Value },
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ResultOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultOrder::Dislodge { u1, c1, l1 } => write!(f, "dislodged {} {} {}", u1, c1, l1),
            ResultOrder::HasBuilds { country, count } => {
                write!(f, "{} can build {} new units", country, value_text(count))
            }
            ResultOrder::Unknown => Ok(()),
        }
    }
}

/// Display lines for a list of orders; unknown actions produce nothing.
pub fn order_lines(orders: &[Order]) -> Vec<String> {
    orders.iter().filter(|o| **o != Order::Unknown).map(|o| o.to_string()).collect()
}

pub fn result_lines(results: &[ResultOrder]) -> Vec<String> {
    results.iter().filter(|o| **o != ResultOrder::Unknown).map(|o| o.to_string()).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Finished,
    Waiting,
    #[default]
    #[serde(other)]
    Other,
}

/// Player's view of a game, as sent with `game_overview`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PlayerGameOverview {
    pub game_id: Value,
    #[serde(default)]
    pub game_status: GameStatus,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub orders: Option<Vec<Order>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub order_result: Option<Vec<ResultOrder>>,
    #[serde(default)]
    pub player_units: Value,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub unit_list: Value,
    #[serde(default)]
    pub owner_list: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerGameOverview {
    pub fn id_text(&self) -> String {
        value_text(&self.game_id)
    }

    /// Scalar fields for the info listing, game id and seat first.
    pub fn info(&self) -> Vec<(String, String)> {
        let mut info = vec![("game_id".to_owned(), self.id_text())];
        if let Some(country) = &self.country {
            info.push(("country".to_owned(), country.clone()));
        }
        info.extend(self.extra.iter().map(|(k, v)| (k.clone(), value_text(v))));
        info
    }

    /// Extra input for the map renderer; only running games have one.
    pub fn map_data(&self) -> Option<Value> {
        if self.game_status != GameStatus::Ongoing {
            return None;
        }
        Some(serde_json::json!({
            "punits": self.player_units,
            "country": self.country,
            "phase": self.phase,
            "resOrd": self.order_result,
        }))
    }

    /// `1903_fall_order_phase` style label of the running phase.
    pub fn stat_label(&self) -> String {
        format!(
            "{}_{}_{}",
            self.year.as_ref().map(value_text).unwrap_or_default(),
            self.season.clone().unwrap_or_default(),
            self.phase.clone().unwrap_or_default()
        )
    }
}

/// Game configuration, as sent with `get_game`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GameSettings {
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub press: String,
    #[serde(default)]
    pub order_phase: Value,
    #[serde(default)]
    pub retreat_phase: Value,
    #[serde(default)]
    pub build_phase: Value,
    #[serde(default)]
    pub waiting_time: Value,
    #[serde(default)]
    pub num_players: Value,
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes a list entry by entry; an entry that does not decode becomes
/// `T::default()`, anything other than an array becomes `None`.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => {
            Some(items.into_iter().map(|item| serde_json::from_value(item).unwrap_or_default()).collect())
        }
        _ => None,
    })
}

/// Scalar JSON rendered the way it reads on screen: strings unquoted, null empty.
pub fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn season_phase_keys_match_server_links() {
        let keys: Vec<String> = SEASON_PHASES.iter().map(|sp| sp.key()).collect();
        assert_eq!(
            keys,
            vec![
                "spring-order_phase",
                "spring-retreat_phase",
                "fall-order_phase",
                "fall-retreat_phase",
                "fall-build_phase"
            ]
        );
    }

    #[test]
    fn overview_keeps_unknown_fields_and_parses_year() {
        let ov: GameOverview = serde_json::from_value(json!({
            "game_id": 42,
            "year_season": "1904-fall",
            "status": "ongoing",
            "players": {"england": 7},
            "links": {"1901": {"spring-order_phase": ["austria", null]}}
        }))
        .unwrap();
        assert_eq!(ov.current_year(), Some(1904));
        assert_eq!(ov.id_text(), "42");
        assert_eq!(ov.extra.get("status"), Some(&json!("ongoing")));
        assert_eq!(ov.links.unwrap()["1901"]["spring-order_phase"], vec![Some("austria".to_owned()), None]);
    }

    #[test]
    fn orders_render_and_skip_unknown_actions() {
        let orders: Vec<Order> = serde_json::from_value(json!([
            {"action": "move", "u1": "army", "l1": "vie", "l2": "bud"},
            {"action": "teleport", "u1": "army"},
            {"action": "support_hold", "u1": "fleet", "l1": "lon", "u2": "army", "l2": "wal"},
            {"action": "build", "u1": "fleet", "l1": "edi"}
        ]))
        .unwrap();
        assert_eq!(
            order_lines(&orders),
            vec!["army vie->bud", "fleet lon Support army wal hold", "Build fleet edi"]
        );
    }

    #[test]
    fn result_orders_render() {
        let results: Vec<ResultOrder> = serde_json::from_value(json!([
            {"action": "dislodge", "u1": "army", "c1": "france", "l1": "par"},
            {"action": "has_builds", "country": "russia", "count": 2}
        ]))
        .unwrap();
        assert_eq!(
            result_lines(&results),
            vec!["dislodged army france par", "russia can build 2 new units"]
        );
    }

    #[test]
    fn player_overview_info_and_map_data() {
        let game: PlayerGameOverview = serde_json::from_value(json!({
            "game_id": 9,
            "game_status": "ongoing",
            "country": "italy",
            "name": "friday game",
            "year": 1902,
            "season": "fall",
            "phase": "order_phase",
            "player_units": [{"unit": "army", "loc": "rom"}],
            "order_result": [{"action": "has_builds", "country": "italy", "count": 1}],
            "unit_list": [],
            "owner_list": []
        }))
        .unwrap();
        assert_eq!(game.stat_label(), "1902_fall_order_phase");
        assert_eq!(
            game.info(),
            vec![
                ("game_id".to_owned(), "9".to_owned()),
                ("country".to_owned(), "italy".to_owned()),
                ("name".to_owned(), "friday game".to_owned()),
            ]
        );
        let map = game.map_data().unwrap();
        assert_eq!(map["phase"], json!("order_phase"));
        assert_eq!(map["resOrd"][0]["action"], json!("has_builds"));

        let finished = PlayerGameOverview { game_status: GameStatus::Finished, ..game };
        assert_eq!(finished.map_data(), None);
    }
}
