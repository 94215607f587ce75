use yew::prelude::*;

use super::ClientContext;
use super::data_table::DataTable;
use super::forms::{PANEL_STYLE, SelectField, TextArea, TextField, field, on_submit};
use crate::calls;
use crate::model::ROSTER;
use crate::state::ClientAction;
use crate::state::table::TableAction;
use crate::validate::{JoinGameForm, OffGameMessageForm, PresenceForm};

pub fn country_options() -> Vec<(AttrValue, AttrValue)> {
    let mut options = vec![(AttrValue::from(""), AttrValue::from("Choose a country"))];
    options.extend(ROSTER.iter().map(|c| (AttrValue::from(c.key()), AttrValue::from(c.key()))));
    options
}

/// Game buttons shared by every games listing.
pub fn game_action(ctx: &ClientContext) -> Callback<TableAction> {
    let ctx = ctx.clone();
    Callback::from(move |action| {
        let session = ctx.session();
        match action {
            TableAction::ViewGame(id) => ctx.call.emit(calls::game_overview(session, &id)),
            TableAction::ReconfigGame(id) => ctx.call.emit(calls::get_game(session, &id)),
            TableAction::OperatorView(id) => ctx.call.emit(calls::operator_game_overview(session, &id)),
            TableAction::StopGame(id) => {
                let confirmed = web_sys::window()
                    .and_then(|w| w.confirm_with_message(&format!("Stop game {}?", id)).ok())
                    .unwrap_or(false);
                if confirmed {
                    ctx.call.emit(calls::stop_game(session, &id));
                    ctx.call.emit(calls::get_games_ongoing(session));
                }
            }
            TableAction::MarkDone(id) => {
                ctx.call.emit(calls::mark_as_done(session, &id));
                ctx.dispatch(ClientAction::RemoveReport(id));
            }
        }
    })
}

#[function_component]
pub fn DashboardPage() -> Html {
    let join = use_state(JoinGameForm::default);
    let presence = use_state(PresenceForm::default);
    let message = use_state(OffGameMessageForm::default);
    let ctx = use_context::<ClientContext>();

    {
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            if let Some(ctx) = ctx {
                ctx.call.emit(calls::games_current(ctx.session()));
            }
            || ()
        });
    }

    let Some(ctx) = ctx else {
        return html! {};
    };

    let submit_join = {
        let ctx = ctx.clone();
        let join = join.clone();
        Callback::from(move |_| {
            if ctx.submit(join.validate(ctx.session())) {
                join.set(JoinGameForm::default());
            }
        })
    };
    let submit_presence = {
        let ctx = ctx.clone();
        let presence = presence.clone();
        Callback::from(move |_| {
            ctx.submit(presence.validate(ctx.session()));
        })
    };
    let submit_message = {
        let ctx = ctx.clone();
        let message = message.clone();
        Callback::from(move |_| {
            if ctx.submit(message.validate(ctx.session())) {
                message.set(OffGameMessageForm { content: String::new(), ..(*message).clone() });
            }
        })
    };
    let refresh = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| ctx.call.emit(calls::games_current(ctx.session())))
    };

    html! {
        <div id="dashboard">
            <div style={PANEL_STYLE}>
                <div style="display:flex; align-items:center; gap:12px;">
                    <h3 style="margin:0;">{"Your games"}</h3>
                    <button onclick={refresh}>{"Refresh"}</button>
                </div>
                {
                    match &ctx.state.current_games {
                        Some(table) => html! {
                            <DataTable table={table.clone()} on_action={game_action(&ctx)} empty_text="No games found" />
                        },
                        None => html! { <p style="opacity:0.7;">{"Loading games..."}</p> },
                    }
                }
            </div>

            <form id="join_game_form" style={PANEL_STYLE} onsubmit={on_submit(submit_join)}>
                <h3 style="margin:0 0 8px;">{"Join a game"}</h3>
                <TextField label="Game id" value={join.game_id.clone()} on_change={field(&join, |f, v| f.game_id = v)} />
                <SelectField label="Country" value={join.country.clone()} options={country_options()}
                    on_change={field(&join, |f, v| f.country = v)} />
                <button type="submit">{"Join"}</button>
            </form>

            <form id="presence_form" style={PANEL_STYLE} onsubmit={on_submit(submit_presence)}>
                <h3 style="margin:0 0 8px;">{"Is someone online?"}</h3>
                <TextField label="Nick" value={presence.user_nick.clone()}
                    on_change={field(&presence, |f, v| f.user_nick = v)} />
                <button type="submit">{"Check"}</button>
            </form>

            <form id="user_msg_form" style={PANEL_STYLE} onsubmit={on_submit(submit_message.clone())}>
                <h3 style="margin:0 0 8px;">{"Send a message"}</h3>
                <TextField label="To" value={message.to.clone()} on_change={field(&message, |f, v| f.to = v)} />
                <TextArea label="Message" value={message.content.clone()} on_enter={submit_message}
                    on_change={field(&message, |f, v| f.content = v)} />
                <button type="submit">{"Send"}</button>
            </form>
        </div>
    }
}
