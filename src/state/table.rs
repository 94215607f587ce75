//! Listing tables: ongoing games, current games, search results, report inbox.

use serde_json::{Map, Value};

use crate::model::value_text;

/// What pressing an action cell does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction {
    ViewGame(String),
    ReconfigGame(String),
    OperatorView(String),
    StopGame(String),
    MarkDone(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Danger,
    Disabled,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Action { label: &'static str, style: ButtonStyle, action: Option<TableAction> },
}

impl Cell {
    pub fn action(label: &'static str, style: ButtonStyle, action: TableAction) -> Self {
        Cell::Action { label, style, action: Some(action) }
    }

    pub fn disabled(label: &'static str) -> Self {
        Cell::Action { label, style: ButtonStyle::Disabled, action: None }
    }
}

/// One row of input, keyed by column name, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    cells: Vec<(String, Cell)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(map: &Map<String, Value>) -> Self {
        Self { cells: map.iter().map(|(k, v)| (k.clone(), Cell::Text(value_text(v)))).collect() }
    }

    pub fn with(mut self, key: impl Into<String>, cell: Cell) -> Self {
        self.insert(key, cell);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, cell: Cell) {
        let key = key.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = cell,
            None => self.cells.push((key, cell)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.cells.retain(|(k, _)| k != key);
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, c)| c)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Drops the row holding `action`, e.g. a report just marked as done.
    pub fn remove_row_with(&mut self, action: &TableAction) {
        self.rows.retain(|row| {
            !row.iter().any(|cell| matches!(cell, Cell::Action { action: Some(a), .. } if a == action))
        });
    }
}

/// Columns of the first record, in its key order.
pub fn keys_of(records: &[Record]) -> Vec<String> {
    records.first().map(|r| r.keys().map(str::to_owned).collect()).unwrap_or_default()
}

pub fn to_table(records: &[Record], columns: &[String]) -> Table {
    Table {
        columns: columns.to_vec(),
        rows: records
            .iter()
            .map(|r| columns.iter().map(|c| r.get(c).cloned().unwrap_or_default()).collect())
            .collect(),
    }
}

/// Table with columns taken from the first record.
pub fn to_table_auto(records: &[Record]) -> Table {
    to_table(records, &keys_of(records))
}

/// Operator's list of running games: id, View, Stop.
pub fn ongoing_games_table(game_ids: &[Value]) -> Table {
    let records: Vec<Record> = game_ids
        .iter()
        .map(|id| {
            let id = value_text(id);
            Record::new()
                .with("Game Id", Cell::Text(id.clone()))
                .with("View", Cell::action("View", ButtonStyle::Primary, TableAction::OperatorView(id.clone())))
                .with("Stop", Cell::action("Stop", ButtonStyle::Danger, TableAction::StopGame(id)))
        })
        .collect();
    to_table_auto(&records)
}

const HIDDEN_GAME_FIELDS: [&str; 6] =
    ["creator_id", "order_phase", "retreat_phase", "build_phase", "num_players", "waiting_time"];

/// Player's current games. Waiting games cannot be viewed yet; only the
/// creator may reconfigure.
pub fn current_games_table(games: &[Map<String, Value>], user_id: Option<&Value>) -> Table {
    let records: Vec<Record> = games
        .iter()
        .map(|game| {
            let id = game.get("id").map(value_text).unwrap_or_default();
            let mut record = Record::from_json(game);
            let view = if game.get("status").and_then(Value::as_str) == Some("waiting") {
                Cell::disabled("View")
            } else {
                Cell::action("View", ButtonStyle::Primary, TableAction::ViewGame(id.clone()))
            };
            record.insert("View", view);
            let is_creator = match (user_id, game.get("creator_id")) {
                (Some(user), Some(creator)) => value_text(user) == value_text(creator),
                _ => false,
            };
            let reconfig = if is_creator {
                Cell::action("Reconfig", ButtonStyle::Primary, TableAction::ReconfigGame(id))
            } else {
                Cell::Text("-".to_owned())
            };
            record.insert("Reconfig", reconfig);
            for field in HIDDEN_GAME_FIELDS {
                record.remove(field);
            }
            record
        })
        .collect();
    to_table_auto(&records)
}

pub fn search_results_table(games: &[Map<String, Value>]) -> Table {
    let records: Vec<Record> = games.iter().map(Record::from_json).collect();
    to_table_auto(&records)
}

/// Report inbox with a Done button per report.
pub fn reports_table(reports: &[Map<String, Value>]) -> Table {
    let records: Vec<Record> = reports
        .iter()
        .map(|report| {
            let id = report.get("id").map(value_text).unwrap_or_default();
            Record::from_json(report).with("Done", Cell::action("Done", ButtonStyle::Primary, TableAction::MarkDone(id)))
        })
        .collect();
    to_table_auto(&records)
}

/// Database statistics, one column per node. The server sends `db_count`
/// and each node's stats as a JSON string under `db_stats<N>`.
pub fn database_status_table(event: &Map<String, Value>) -> Result<Table, serde_json::Error> {
    let count = event
        .get("db_count")
        .map(value_text)
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0);
    let nodes = (0..count)
        .map(|i| {
            let raw = event.get(&format!("db_stats{}", i)).map(value_text).unwrap_or_default();
            serde_json::from_str::<Map<String, Value>>(&raw)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut columns = vec![String::new()];
    columns.extend((1..=count).map(|n| format!("Node{}", n)));
    let keys: Vec<String> = nodes.first().map(|n| n.keys().cloned().collect()).unwrap_or_default();
    let rows = keys
        .iter()
        .map(|key| {
            let mut row = vec![Cell::Text(key.clone())];
            row.extend(nodes.iter().map(|n| n.get(key).map(|v| Cell::Text(value_text(v))).unwrap_or_default()));
            row
        })
        .collect();
    Ok(Table { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn maps(v: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn rows_and_columns_match_inputs_even_with_missing_keys() {
        let records = vec![
            Record::new().with("a", Cell::Text("1".into())).with("b", Cell::Text("2".into())),
            Record::new().with("b", Cell::Text("3".into())),
            Record::new(),
        ];
        let cols = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        let table = to_table(&records, &cols);
        assert_eq!(table.columns, cols);
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows.iter().all(|r| r.len() == 3));
        assert_eq!(table.rows[1][0], Cell::Empty);
        assert_eq!(table.rows[1][1], Cell::Text("3".into()));
    }

    #[test]
    fn auto_columns_follow_first_record_order() {
        let records: Vec<Record> =
            maps(json!([{"zeta": 1, "alpha": "x"}, {"alpha": "y"}])).iter().map(Record::from_json).collect();
        let table = to_table_auto(&records);
        assert_eq!(table.columns, vec!["zeta", "alpha"]);
        assert_eq!(table.rows[1], vec![Cell::Empty, Cell::Text("y".into())]);
        assert_eq!(to_table_auto(&[]), Table::default());
    }

    #[test]
    fn ongoing_games_get_view_and_stop_actions() {
        let table = ongoing_games_table(&[json!(4), json!(9)]);
        assert_eq!(table.columns, vec!["Game Id", "View", "Stop"]);
        assert_eq!(
            table.rows[1][2],
            Cell::action("Stop", ButtonStyle::Danger, TableAction::StopGame("9".into()))
        );
    }

    #[test]
    fn current_games_hide_settings_and_gate_actions() {
        let games = maps(json!([
            {"id": 1, "name": "mine", "status": "ongoing", "creator_id": 5, "order_phase": 10},
            {"id": 2, "name": "theirs", "status": "waiting", "creator_id": 6, "waiting_time": 3}
        ]));
        let table = current_games_table(&games, Some(&json!(5)));
        assert_eq!(table.columns, vec!["id", "name", "status", "View", "Reconfig"]);
        assert_eq!(table.rows[0][4], Cell::action("Reconfig", ButtonStyle::Primary, TableAction::ReconfigGame("1".into())));
        assert_eq!(table.rows[1][3], Cell::disabled("View"));
        assert_eq!(table.rows[1][4], Cell::Text("-".into()));
    }

    #[test]
    fn reports_get_done_column() {
        let table = reports_table(&maps(json!([{"id": "r1", "content": "spam"}])));
        assert_eq!(table.columns, vec!["id", "content", "Done"]);
        assert_eq!(table.rows[0][2], Cell::action("Done", ButtonStyle::Primary, TableAction::MarkDone("r1".into())));
    }

    #[test]
    fn done_reports_can_be_removed() {
        let mut table = reports_table(&maps(json!([{"id": "r1"}, {"id": "r2"}])));
        table.remove_row_with(&TableAction::MarkDone("r1".into()));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], Cell::Text("r2".into()));
    }

    #[test]
    fn database_status_is_transposed_per_node() {
        let event: Map<String, Value> = serde_json::from_value(json!({
            "db_count": "2",
            "db_stats0": "{\"keys\": 10, \"disk\": \"1MB\"}",
            "db_stats1": "{\"keys\": 12, \"disk\": \"2MB\"}"
        }))
        .unwrap();
        let table = database_status_table(&event).unwrap();
        assert_eq!(table.columns, vec!["", "Node1", "Node2"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[1],
            vec![Cell::Text("disk".into()), Cell::Text("1MB".into()), Cell::Text("2MB".into())]
        );
    }
}
