use std::collections::HashSet;

use yew::prelude::*;

use crate::state::overview::{CountrySlot, InspectTarget, OverviewTree, PhaseNode, YearNode};

#[derive(Properties, PartialEq, Clone)]
pub struct OverviewTreeProps {
    pub tree: OverviewTree,
    pub hide_muted: bool,
    pub on_inspect: Callback<InspectTarget>,
    pub on_toggle_hide: Callback<()>,
}

const LINK_STYLE: &str = "color:#58a6ff; cursor:pointer; margin-right:8px;";
const MUTED_STYLE: &str = "color:#6e7681; cursor:pointer; margin-right:8px;";

fn link_style(active: bool) -> &'static str {
    if active { LINK_STYLE } else { MUTED_STYLE }
}

/// Year and season-phase branches the operator has opened.
#[derive(Clone, Debug, Default, PartialEq)]
struct Expanded(HashSet<String>);

impl Expanded {
    fn toggled(&self, node_id: &str) -> Self {
        let mut open = self.0.clone();
        if !open.remove(node_id) {
            open.insert(node_id.to_owned());
        }
        Self(open)
    }

    fn is_open(&self, node_id: &str) -> bool {
        self.0.contains(node_id)
    }
}

#[function_component]
pub fn OverviewTreeView(props: &OverviewTreeProps) -> Html {
    let expanded = use_state(Expanded::default);
    {
        let expanded = expanded.clone();
        use_effect_with(props.tree.game_id.clone(), move |_| {
            expanded.set(Expanded::default());
            || ()
        });
    }

    let inspect = |target: InspectTarget| {
        let cb = props.on_inspect.clone();
        Callback::from(move |_: MouseEvent| cb.emit(target.clone()))
    };
    let toggle = |node_id: String| {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(expanded.toggled(&node_id)))
    };
    let context_link = |context: &Option<InspectTarget>, label: &'static str| match context {
        Some(target) => html! { <a style={LINK_STYLE} onclick={inspect(target.clone())}>{ label }</a> },
        None => html! {},
    };
    let visible = |has_messages: bool| has_messages || !props.hide_muted;

    let render_slot = |slot: &CountrySlot| {
        if !visible(slot.has_messages) {
            return html! {};
        }
        html! {
            <li>
                <a class={classes!((!slot.has_messages).then_some("b_hide"))}
                    style={link_style(slot.has_messages)}
                    onclick={inspect(slot.target.clone())}>{ slot.country.clone() }</a>
            </li>
        }
    };

    let render_phase = |phase: &PhaseNode| {
        if !visible(phase.has_messages) {
            return html! {};
        }
        let id = phase.node_id();
        let open = expanded.is_open(&id);
        html! {
            <li>
                <a style={link_style(phase.has_messages)} onclick={toggle(id.clone())}>
                    { format!("{} {}", if open { "[-]" } else { "[+]" }, phase.season_phase.key()) }
                </a>
                { context_link(&phase.context, "(context)") }
                if open {
                    <ul>{ for phase.slots.iter().map(render_slot) }</ul>
                }
            </li>
        }
    };

    let render_year = |year: &YearNode| {
        if !visible(year.has_messages) {
            return html! {};
        }
        let id = year.node_id();
        let open = expanded.is_open(&id);
        html! {
            <div>
                <a style={link_style(year.has_messages)} onclick={toggle(id.clone())}>
                    { format!("{} {}", if open { "[-]" } else { "[+]" }, year.year) }
                </a>
                { context_link(&year.context, "(context)") }
                if open {
                    <ul>{ for year.phases.iter().map(render_phase) }</ul>
                }
            </div>
        }
    };

    let on_hide = {
        let cb = props.on_toggle_hide.clone();
        Callback::from(move |_: Event| cb.emit(()))
    };
    let tree = &props.tree;

    html! {
        <div id="game_overview_tree">
            <div style="margin-bottom:8px;">
                { for tree.info.iter().map(|(k, v)| html! { <div>{ format!("{}: ", k) }<b>{ v.clone() }</b></div> }) }
            </div>
            <div>{"Players:"}</div>
            <ul>
                { for tree.players.iter().map(|(country, player)| html! {
                    <li>{ format!("{}: ", country) }<b>{ player.clone() }</b></li>
                }) }
            </ul>
            <label style="display:flex; align-items:center; gap:6px; margin:8px 0;">
                <b>{"Hide non-message branch"}</b>
                <input id="hide_non_msg" type="checkbox" checked={props.hide_muted} onchange={on_hide} />
            </label>
            { context_link(&tree.game_context, "(Game context)") }
            { for tree.years.iter().map(render_year) }
        </div>
    }
}
