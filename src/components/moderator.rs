use yew::prelude::*;

use super::ClientContext;
use super::dashboard::game_action;
use super::data_table::DataTable;
use super::forms::{CheckField, PANEL_STYLE, TextField, field, on_submit};
use crate::calls;
use crate::state::Page;
use crate::validate::{BlacklistForm, ModeratorForm};

#[function_component]
pub fn ModeratorPage() -> Html {
    let ctx = use_context::<ClientContext>();
    {
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            if let Some(ctx) = ctx {
                ctx.call.emit(calls::get_reports(ctx.session()));
            }
            || ()
        });
    }
    let Some(ctx) = ctx else {
        return html! {};
    };
    let link = |page: Page, label: &'static str| {
        let ctx = ctx.clone();
        let onclick = Callback::from(move |_: MouseEvent| ctx.goto(page));
        html! { <button {onclick} style="margin-right:8px;">{ label }</button> }
    };

    html! {
        <div id="moderator">
            { link(Page::AddRemoveModerator, "Add or remove moderators") }
            { link(Page::BlacklistWhitelist, "Blacklist or whitelist players") }
            <div style={PANEL_STYLE}>
                <h3 style="margin:0 0 8px;">{"Reports"}</h3>
                if let Some(table) = &ctx.state.reports {
                    <DataTable table={table.clone()} on_action={game_action(&ctx)} empty_text="No reports found" />
                }
            </div>
        </div>
    }
}

#[function_component]
pub fn AddRemoveModeratorPage() -> Html {
    let form = use_state(|| ModeratorForm { make_moderator: true, ..Default::default() });
    let Some(ctx) = use_context::<ClientContext>() else {
        return html! {};
    };
    let submit = {
        let form = form.clone();
        Callback::from(move |_| {
            ctx.submit(form.validate(ctx.session()));
        })
    };
    html! {
        <form id="add_remove_moderator_form" style={PANEL_STYLE} onsubmit={on_submit(submit)}>
            <TextField label="Nick" value={form.nick.clone()} on_change={field(&form, |f, v| f.nick = v)} />
            <CheckField label="Moderator" checked={form.make_moderator}
                on_change={field(&form, |f, v| f.make_moderator = v)} />
            <button type="submit">{"Apply"}</button>
        </form>
    }
}

#[function_component]
pub fn BlacklistWhitelistPage() -> Html {
    let form = use_state(|| BlacklistForm { blacklist: true, ..Default::default() });
    let Some(ctx) = use_context::<ClientContext>() else {
        return html! {};
    };
    let submit = {
        let form = form.clone();
        Callback::from(move |_| {
            ctx.submit(form.validate(ctx.session()));
        })
    };
    html! {
        <form id="blacklist_whitelist_form" style={PANEL_STYLE} onsubmit={on_submit(submit)}>
            <TextField label="Nick" value={form.nick.clone()} on_change={field(&form, |f, v| f.nick = v)} />
            <CheckField label="Blacklisted" checked={form.blacklist} on_change={field(&form, |f, v| f.blacklist = v)} />
            <button type="submit">{"Apply"}</button>
        </form>
    }
}
