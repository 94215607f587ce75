//! Operator's game history tree: year -> season-phase -> country.
//!
//! The server only lists the branches that carry press. The tree built here is
//! always complete: every year from 1901 up to (not including) the current one,
//! all five season-phases per year and all seven seats per phase. Branches the
//! server left out are marked as having no messages; they stay inspectable so
//! the operator can still look at the orders given there.

use crate::model::{FIRST_YEAR, GameOverview, ROSTER, SEASON_PHASES, SeasonPhase, value_text};
use crate::protocol::{Payload, Request};
use crate::util::cwarn;

const UNDEFINED: &str = "undefined";
/// Most years the tree will show; later labels are clamped to this.
pub const MAX_YEARS: u32 = 200;

/// What an inspect link asks the server for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectTarget {
    pub game_id: String,
    pub year: Option<u32>,
    pub season_phase: Option<SeasonPhase>,
    /// `None` for context links, which fetch messages only.
    pub country: Option<String>,
}

impl InspectTarget {
    pub fn game_context(game_id: &str) -> Self {
        Self { game_id: game_id.to_owned(), year: None, season_phase: None, country: None }
    }

    /// Key the server files a country's orders under; empty for context links.
    pub fn order_key(&self) -> String {
        let Some(country) = &self.country else {
            return String::new();
        };
        format!(
            "{}-{}-{}-{}",
            self.game_id,
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.season_phase.map(|sp| sp.key()).unwrap_or_default(),
            country
        )
    }

    pub fn request(&self, session: Option<&str>) -> Request {
        let year = self.year.map(|y| y.to_string()).unwrap_or_else(|| UNDEFINED.to_owned());
        let (season, phase) = match self.season_phase {
            Some(sp) => (sp.season.key(), sp.phase.key()),
            None => (UNDEFINED, UNDEFINED),
        };
        Request::new(
            "operator_get_game_msg",
            Payload::new()
                .with("order_key", self.order_key())
                .with("game_id", self.game_id.clone())
                .with("year", year)
                .with("season", season)
                .with("phase", phase)
                .with_session(session),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CountrySlot {
    pub country: String,
    pub has_messages: bool,
    pub target: InspectTarget,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhaseNode {
    pub year: u32,
    pub season_phase: SeasonPhase,
    pub has_messages: bool,
    pub context: Option<InspectTarget>,
    pub slots: Vec<CountrySlot>,
}

impl PhaseNode {
    pub fn node_id(&self) -> String {
        format!("{}{}", self.year, self.season_phase.key())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct YearNode {
    pub year: u32,
    pub has_messages: bool,
    pub context: Option<InspectTarget>,
    pub phases: Vec<PhaseNode>,
}

impl YearNode {
    pub fn node_id(&self) -> String {
        self.year.to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverviewTree {
    pub game_id: String,
    pub game_context: Option<InspectTarget>,
    pub years: Vec<YearNode>,
    /// Scalar game fields in the order the server sent them.
    pub info: Vec<(String, String)>,
    /// `(country, player)` pairs.
    pub players: Vec<(String, String)>,
}

fn phase_node(
    game_id: &str, year: u32, season_phase: SeasonPhase, countries: Option<&Vec<Option<String>>>,
) -> PhaseNode {
    let slots = ROSTER
        .iter()
        .enumerate()
        .map(|(k, seat)| {
            let listed = countries.and_then(|c| c.get(k)).and_then(|c| c.as_deref()).filter(|c| !c.is_empty());
            let country = listed.unwrap_or(seat.key()).to_owned();
            CountrySlot {
                has_messages: listed.is_some(),
                target: InspectTarget {
                    game_id: game_id.to_owned(),
                    year: Some(year),
                    season_phase: Some(season_phase),
                    country: Some(country.clone()),
                },
                country,
            }
        })
        .collect();
    PhaseNode {
        year,
        season_phase,
        has_messages: countries.is_some(),
        context: countries.map(|_| InspectTarget {
            game_id: game_id.to_owned(),
            year: Some(year),
            season_phase: Some(season_phase),
            country: None,
        }),
        slots,
    }
}

pub fn build_overview(overview: &GameOverview) -> OverviewTree {
    let game_id = overview.id_text();
    let mut current_year = overview.current_year().unwrap_or(FIRST_YEAR);
    if current_year > FIRST_YEAR + MAX_YEARS {
        cwarn(&format!("game {}: year {} out of range, showing {} years", game_id, current_year, MAX_YEARS));
        current_year = FIRST_YEAR + MAX_YEARS;
    }
    let links = overview.links.as_ref();

    let years = (FIRST_YEAR..current_year)
        .map(|year| {
            let phases_of_year = links.and_then(|l| l.get(&year.to_string()));
            let phases = SEASON_PHASES
                .iter()
                .map(|sp| phase_node(&game_id, year, *sp, phases_of_year.and_then(|p| p.get(&sp.key()))))
                .collect();
            YearNode {
                year,
                has_messages: phases_of_year.is_some(),
                context: phases_of_year.map(|_| InspectTarget {
                    game_id: game_id.clone(),
                    year: Some(year),
                    season_phase: None,
                    country: None,
                }),
                phases,
            }
        })
        .collect();

    let mut info = vec![
        ("game_id".to_owned(), game_id.clone()),
        ("year_season".to_owned(), overview.year_season.clone()),
    ];
    info.extend(overview.extra.iter().map(|(k, v)| (k.clone(), value_text(v))));

    OverviewTree {
        game_context: links.map(|_| InspectTarget::game_context(&game_id)),
        game_id,
        years,
        info,
        players: overview.players.iter().map(|(k, v)| (k.clone(), value_text(v))).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overview(year_season: &str, links: serde_json::Value) -> GameOverview {
        serde_json::from_value(json!({
            "game_id": 77,
            "year_season": year_season,
            "status": "ongoing",
            "players": {"austria": 3, "england": 9},
            "links": links,
        }))
        .unwrap()
    }

    #[test]
    fn absurd_years_are_clamped() {
        let tree = build_overview(&overview("99999999-spring", json!({})));
        assert_eq!(tree.years.len(), MAX_YEARS as usize);
        assert_eq!(tree.years.last().map(|y| y.year), Some(FIRST_YEAR + MAX_YEARS - 1));
    }

    #[test]
    fn one_node_per_past_year_regardless_of_links() {
        for (label, expected) in [("1901-spring", 0), ("1902-fall", 1), ("1910-spring", 9)] {
            for links in [json!({}), json!({"1901": {"fall-order_phase": ["austria"]}})] {
                let tree = build_overview(&overview(label, links));
                let years: Vec<u32> = tree.years.iter().map(|y| y.year).collect();
                assert_eq!(years.len(), expected, "{}", label);
                assert!(years.iter().copied().eq(1901..1901 + expected as u32));
            }
        }
    }

    #[test]
    fn every_year_has_five_phases_of_seven_slots() {
        let tree = build_overview(&overview(
            "1905-spring",
            json!({"1902": {"spring-order_phase": [null, "england", null, null, null, null, "turkey"]}}),
        ));
        assert_eq!(tree.years.len(), 4);
        for year in &tree.years {
            assert_eq!(year.phases.len(), 5);
            for phase in &year.phases {
                assert_eq!(phase.slots.len(), 7);
            }
        }
    }

    #[test]
    fn sparse_links_mark_missing_branches_muted() {
        let tree = build_overview(&overview(
            "1903-spring",
            json!({"1902": {"fall-order_phase": [null, "england", null, null, null, null, "turkey"]}}),
        ));
        let y1901 = &tree.years[0];
        assert!(!y1901.has_messages);
        assert!(y1901.context.is_none());
        assert!(y1901.phases.iter().all(|p| !p.has_messages && p.slots.iter().all(|s| !s.has_messages)));

        let y1902 = &tree.years[1];
        assert!(y1902.has_messages);
        assert!(y1902.context.is_some());
        let fall = &y1902.phases[2];
        assert_eq!(fall.season_phase.key(), "fall-order_phase");
        assert!(fall.has_messages);
        let flags: Vec<bool> = fall.slots.iter().map(|s| s.has_messages).collect();
        assert_eq!(flags, vec![false, true, false, false, false, false, true]);
        let names: Vec<&str> = fall.slots.iter().map(|s| s.country.as_str()).collect();
        assert_eq!(names, vec!["austria", "england", "france", "germany", "italy", "russia", "turkey"]);
        assert!(!y1902.phases[0].has_messages);
        assert!(y1902.phases[0].context.is_none());
    }

    #[test]
    fn missing_links_still_yield_full_tree_without_game_context() {
        let ov: GameOverview =
            serde_json::from_value(json!({"game_id": "5", "year_season": "1903-fall"})).unwrap();
        let tree = build_overview(&ov);
        assert!(tree.game_context.is_none());
        assert_eq!(tree.years.len(), 2);
        assert_eq!(tree.years[1].phases[4].slots[6].country, "turkey");
    }

    #[test]
    fn info_and_players_keep_server_order() {
        let tree = build_overview(&overview("1902-spring", json!({})));
        assert_eq!(tree.info[0], ("game_id".to_owned(), "77".to_owned()));
        assert_eq!(tree.info[2], ("status".to_owned(), "ongoing".to_owned()));
        assert_eq!(tree.players, vec![("austria".to_owned(), "3".to_owned()), ("england".to_owned(), "9".to_owned())]);
        assert!(tree.game_context.is_some());
    }

    #[test]
    fn country_target_request_carries_order_key() {
        let tree = build_overview(&overview("1902-spring", json!({})));
        let slot = &tree.years[0].phases[1].slots[2];
        let req = slot.target.request(Some("sess"));
        assert_eq!(req.action, "operator_get_game_msg");
        assert_eq!(req.keys(), vec!["order_key", "game_id", "year", "season", "phase", "session_id"]);
        assert_eq!(req.data.get("order_key"), Some(&json!("77-1901-spring-retreat_phase-france")));
        assert_eq!(req.data.get("season"), Some(&json!("spring")));
        assert_eq!(req.data.get("phase"), Some(&json!("retreat_phase")));
    }

    #[test]
    fn context_target_request_uses_undefined_placeholders() {
        let req = InspectTarget::game_context("77").request(None);
        assert_eq!(req.data.get("order_key"), Some(&json!("")));
        assert_eq!(req.data.get("year"), Some(&json!("undefined")));
        assert_eq!(req.data.get("phase"), Some(&json!("undefined")));
        assert_eq!(req.data.get("session_id"), Some(&json!(false)));
    }
}
