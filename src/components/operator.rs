use yew::prelude::*;

use super::ClientContext;
use super::dashboard::game_action;
use super::data_table::DataTable;
use super::forms::PANEL_STYLE;
use super::message_panel::MessagePanel;
use super::overview_tree::OverviewTreeView;
use crate::calls;
use crate::state::ClientAction;
use crate::state::messages::format_messages;
use crate::state::overview::InspectTarget;
use crate::util::text_lines;

fn refresh_all(ctx: &ClientContext) {
    let session = ctx.session();
    ctx.call.emit(calls::get_system_status(session));
    ctx.call.emit(calls::get_database_status(session));
    ctx.call.emit(calls::get_games_ongoing(session));
    ctx.call.emit(calls::get_reports(session));
}

#[function_component]
pub fn OperatorPage() -> Html {
    let ctx = use_context::<ClientContext>();
    {
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            if let Some(ctx) = ctx {
                refresh_all(&ctx);
            }
            || ()
        });
    }
    let Some(ctx) = ctx else {
        return html! {};
    };
    let state = &ctx.state;

    let refresh = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| refresh_all(&ctx))
    };
    let on_inspect = {
        let ctx = ctx.clone();
        Callback::from(move |target: InspectTarget| {
            ctx.call.emit(target.request(ctx.session()));
            ctx.dispatch(ClientAction::Inspect(target));
        })
    };
    let on_toggle_hide = {
        let ctx = ctx.clone();
        Callback::from(move |_: ()| ctx.dispatch(ClientAction::ToggleHideMuted))
    };

    let overview = state.overview.as_ref().filter(|tree| state.nav.view_game_id.as_deref() == Some(tree.game_id.as_str()));
    let messages = state.messages.as_ref().map(|m| {
        format_messages(m.order.as_deref(), &m.msg, state.nav.focus_country.as_deref())
    });

    html! {
        <div id="operator">
            <button onclick={refresh}>{"Refresh"}</button>

            <div style={PANEL_STYLE}>
                <h3 style="margin:0 0 8px;">{"System status"}</h3>
                <div id="system_status_data">
                    {
                        match &state.system_status {
                            Some(status) => html! {<>
                                { for text_lines(status).into_iter().map(|line| html! { <div>{ line }</div> }) }
                            </>},
                            None => html! { <p style="opacity:0.7;">{"Waiting for status..."}</p> },
                        }
                    }
                </div>
            </div>

            <div style={PANEL_STYLE}>
                <h3 style="margin:0 0 8px;">{"Database status"}</h3>
                if let Some(table) = &state.database_status {
                    <DataTable table={table.clone()} empty_text="No database statistics" />
                }
            </div>

            <div style={PANEL_STYLE}>
                <h3 style="margin:0 0 8px;">{"Ongoing games"}</h3>
                if let Some(table) = &state.ongoing_games {
                    <DataTable table={table.clone()} on_action={game_action(&ctx)} empty_text="No games found" />
                }
            </div>

            <div style={PANEL_STYLE}>
                <h3 style="margin:0 0 8px;">{"Reports"}</h3>
                if let Some(table) = &state.reports {
                    <DataTable table={table.clone()} on_action={game_action(&ctx)} empty_text="No reports found" />
                }
            </div>

            if let Some(tree) = overview {
                <div style={format!("{} display:flex; gap:24px; align-items:flex-start;", PANEL_STYLE)}>
                    <div style="flex:1;">
                        <h3 style="margin:0 0 8px;">{ format!("Game {}", tree.game_id) }</h3>
                        <OverviewTreeView tree={tree.clone()} hide_muted={state.hide_muted}
                            {on_inspect} {on_toggle_hide} />
                    </div>
                    <div style="flex:1;">
                        if let Some(view) = messages {
                            <MessagePanel {view} />
                        } else {
                            <p style="opacity:0.7;">{"Pick a year, phase or country to inspect."}</p>
                        }
                    </div>
                </div>
            }
        </div>
    }
}
