use crate::model::MessageRecord;
use crate::util::text_lines;

/// Background band of a conversation batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    First,
    Second,
}

impl Band {
    pub fn class(self) -> &'static str {
        match self {
            Band::First => "admin_msg_bg1",
            Band::Second => "admin_msg_bg2",
        }
    }

    fn toggled(current: Option<Band>) -> Band {
        match current {
            Some(Band::First) => Band::Second,
            _ => Band::First,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLine {
    pub text: String,
    /// Only set when a focus country is being inspected.
    pub band: Option<Band>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageView {
    /// `None` renders the "No Orders" placeholder.
    pub orders: Option<Vec<String>>,
    /// Empty renders the "No Message" placeholder.
    pub lines: Vec<MessageLine>,
}

/// Lays out press for the operator's message screen.
///
/// With a focus country, each message is written from that country's point
/// of view and consecutive messages with the same counterpart share a band.
pub fn format_messages(
    order_text: Option<&str>, messages: &[MessageRecord], focus: Option<&str>,
) -> MessageView {
    let orders = order_text.filter(|o| !o.is_empty()).map(text_lines);

    let lines = match focus {
        Some(focus) => {
            let mut band = None;
            let mut last_party: Option<&str> = None;
            messages
                .iter()
                .map(|m| {
                    let outgoing = m.from == focus;
                    let party = if outgoing { m.to.as_str() } else { m.from.as_str() };
                    if last_party != Some(party) {
                        band = Some(Band::toggled(band));
                    }
                    last_party = Some(party);
                    let text = if outgoing {
                        format!("{} -> {}: {}", m.from, m.to, m.content)
                    } else {
                        format!("{} <- {}: {}", m.to, m.from, m.content)
                    };
                    MessageLine { text, band }
                })
                .collect()
        }
        None => messages
            .iter()
            .map(|m| MessageLine { text: format!("{} -> {}: {}", m.from, m.to, m.content), band: None })
            .collect(),
    };

    MessageView { orders, lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(from: &str, to: &str, content: &str) -> MessageRecord {
        MessageRecord { from: from.to_owned(), to: to.to_owned(), content: content.to_owned() }
    }

    #[test]
    fn empty_input_yields_both_placeholders() {
        let view = format_messages(None, &[], None);
        assert_eq!(view.orders, None);
        assert!(view.lines.is_empty());
    }

    #[test]
    fn missing_orders_still_lists_messages() {
        let view = format_messages(None, &[msg("france", "italy", "hello")], None);
        assert_eq!(view.orders, None);
        assert_eq!(view.lines, vec![MessageLine { text: "france -> italy: hello".to_owned(), band: None }]);
    }

    #[test]
    fn orders_are_split_into_lines() {
        let view = format_messages(Some("A vie Hold\nF tri->adr"), &[], None);
        assert_eq!(view.orders, Some(vec!["A vie Hold".to_owned(), "F tri->adr".to_owned()]));
    }

    #[test]
    fn focus_bands_toggle_on_counterpart_change_only() {
        let msgs = [
            msg("france", "italy", "a"),
            msg("italy", "france", "b"),
            msg("france", "england", "c"),
            msg("england", "france", "d"),
            msg("france", "italy", "e"),
        ];
        let view = format_messages(None, &msgs, Some("france"));
        let bands: Vec<Option<Band>> = view.lines.iter().map(|l| l.band).collect();
        assert_eq!(
            bands,
            vec![
                Some(Band::First),
                Some(Band::First),
                Some(Band::Second),
                Some(Band::Second),
                Some(Band::First)
            ]
        );
        assert_eq!(view.lines[0].text, "france -> italy: a");
        assert_eq!(view.lines[1].text, "france <- italy: b");
    }

    #[test]
    fn unfocused_messages_are_uniform() {
        let msgs = [msg("france", "italy", "a"), msg("russia", "turkey", "b")];
        let view = format_messages(Some("orders"), &msgs, None);
        assert!(view.lines.iter().all(|l| l.band.is_none()));
        assert_eq!(view.lines[1].text, "russia -> turkey: b");
    }
}
