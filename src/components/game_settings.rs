use yew::prelude::*;

use super::ClientContext;
use super::data_table::DataTable;
use super::dashboard::game_action;
use super::forms::{PANEL_STYLE, SelectField, TextField, field, on_submit};
use crate::validate::{GameSearchForm, GameSettingsForm};

fn options(values: &[&'static str], blank: &'static str) -> Vec<(AttrValue, AttrValue)> {
    let mut out = vec![(AttrValue::from(""), AttrValue::from(blank))];
    out.extend(values.iter().map(|v| (AttrValue::from(*v), AttrValue::from(*v))));
    out
}

const PRESS: [&str; 3] = ["white", "grey", "none"];
const STATUS: [&str; 4] = ["waiting", "ongoing", "finished", "stopped"];

#[derive(Properties, PartialEq, Clone)]
pub struct GameSettingsPageProps {
    pub reconfigure: bool,
}

#[function_component]
pub fn GameSettingsPage(props: &GameSettingsPageProps) -> Html {
    let ctx = use_context::<ClientContext>();
    let settings = ctx.as_ref().and_then(|c| c.state.game_settings.clone());
    let form = use_state(GameSettingsForm::default);

    // The reconfigure page starts from the game's stored settings.
    {
        let form = form.clone();
        let reconfigure = props.reconfigure;
        use_effect_with((reconfigure, settings), move |(reconfigure, settings)| {
            match (reconfigure, settings) {
                (true, Some(settings)) => form.set(GameSettingsForm::from(settings)),
                _ => form.set(GameSettingsForm::default()),
            }
            || ()
        });
    }

    let Some(ctx) = ctx else {
        return html! {};
    };
    let submit = {
        let ctx = ctx.clone();
        let form = form.clone();
        Callback::from(move |_| {
            ctx.submit(form.validate(ctx.session()));
        })
    };
    let legend = match (&form.game_id, props.reconfigure) {
        (Some(id), true) => format!("Game {}", id),
        _ => "New game".to_owned(),
    };

    html! {
        <form id="game_form" style={PANEL_STYLE} onsubmit={on_submit(submit)}>
            <h3 id="game_legend" style="margin:0 0 8px;">{ legend }</h3>
            <TextField label="Name" value={form.name.clone()} on_change={field(&form, |f, v| f.name = v)} />
            <TextField label="Description" value={form.description.clone()}
                on_change={field(&form, |f, v| f.description = v)} />
            <TextField label="Password" password=true value={form.password.clone()}
                on_change={field(&form, |f, v| f.password = v)} />
            <SelectField label="Press" value={form.press.clone()} options={options(&PRESS, "Choose press")}
                on_change={field(&form, |f, v| f.press = v)} />
            <TextField label="Order phase (min)" value={form.order_phase.clone()}
                on_change={field(&form, |f, v| f.order_phase = v)} />
            <TextField label="Retreat phase (min)" value={form.retreat_phase.clone()}
                on_change={field(&form, |f, v| f.retreat_phase = v)} />
            <TextField label="Build phase (min)" value={form.build_phase.clone()}
                on_change={field(&form, |f, v| f.build_phase = v)} />
            <TextField label="Waiting time (min)" value={form.waiting_time.clone()}
                on_change={field(&form, |f, v| f.waiting_time = v)} />
            <TextField label="Players" value={form.num_players.clone()}
                on_change={field(&form, |f, v| f.num_players = v)} />
            <button type="submit">{ if props.reconfigure { "Reconfigure" } else { "Create" } }</button>
        </form>
    }
}

#[function_component]
pub fn GameSearchPage() -> Html {
    let form = use_state(GameSearchForm::default);
    let Some(ctx) = use_context::<ClientContext>() else {
        return html! {};
    };
    let submit = {
        let ctx = ctx.clone();
        let form = form.clone();
        Callback::from(move |_| {
            ctx.submit(form.validate(ctx.session()));
        })
    };

    html! {
        <div>
            <form id="game_search_form" style={PANEL_STYLE} onsubmit={on_submit(submit)}>
                <TextField label="Name" value={form.name.clone()} on_change={field(&form, |f, v| f.name = v)} />
                <TextField label="Description" value={form.description.clone()}
                    on_change={field(&form, |f, v| f.description = v)} />
                <SelectField label="Status" value={form.status.clone()} options={options(&STATUS, "Any status")}
                    on_change={field(&form, |f, v| f.status = v)} />
                <SelectField label="Press" value={form.press.clone()} options={options(&PRESS, "Any press")}
                    on_change={field(&form, |f, v| f.press = v)} />
                <TextField label="Order phase (min)" value={form.order_phase.clone()}
                    on_change={field(&form, |f, v| f.order_phase = v)} />
                <TextField label="Retreat phase (min)" value={form.retreat_phase.clone()}
                    on_change={field(&form, |f, v| f.retreat_phase = v)} />
                <TextField label="Build phase (min)" value={form.build_phase.clone()}
                    on_change={field(&form, |f, v| f.build_phase = v)} />
                <TextField label="Waiting time (min)" value={form.waiting_time.clone()}
                    on_change={field(&form, |f, v| f.waiting_time = v)} />
                <TextField label="Players" value={form.num_players.clone()}
                    on_change={field(&form, |f, v| f.num_players = v)} />
                <button type="submit">{"Search"}</button>
            </form>
            if let Some(table) = &ctx.state.search_results {
                <DataTable table={table.clone()} on_action={game_action(&ctx)} empty_text="No games found" />
            }
        </div>
    }
}
