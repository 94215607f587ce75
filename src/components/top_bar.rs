use yew::prelude::*;

use super::ClientContext;
use crate::calls;
use crate::state::{Connection, Page};

fn nav_button(ctx: &ClientContext, page: Page, label: &'static str) -> Html {
    let onclick = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| ctx.goto(page))
    };
    let current = ctx.state.nav.page == page;
    let style = if current {
        "padding:4px 10px; background:#30363d; color:#fff; border:1px solid #58a6ff; border-radius:6px;"
    } else {
        "padding:4px 10px; background:transparent; color:#c9d1d9; border:1px solid #30363d; border-radius:6px;"
    };
    html! { <button {style} {onclick}>{ label }</button> }
}

#[function_component]
pub fn TopBar() -> Html {
    let Some(ctx) = use_context::<ClientContext>() else {
        return html! {};
    };
    let state = &ctx.state;

    let menu = if state.logged_in() {
        let logout = {
            let ctx = ctx.clone();
            Callback::from(move |_: MouseEvent| ctx.call.emit(calls::logout(ctx.session())))
        };
        let power = Page::power_page(state.role()).map(|page| nav_button(&ctx, page, page.title()));
        html! {
            <>
                { nav_button(&ctx, Page::Dashboard, "Dashboard") }
                { nav_button(&ctx, Page::CreateGame, "Create game") }
                { nav_button(&ctx, Page::GameSearch, "Search games") }
                { nav_button(&ctx, Page::UpdateUser, "Account") }
                { nav_button(&ctx, Page::UserHelp, "Help") }
                { for power }
                <span style="flex:1;"></span>
                <span style="opacity:0.8;">{ state.user.as_ref().map(|u| u.nick.clone()).unwrap_or_default() }</span>
                <button onclick={logout} style="padding:4px 10px;">{"Log out"}</button>
            </>
        }
    } else {
        html! {
            <>
                { nav_button(&ctx, Page::Home, "Home") }
                { nav_button(&ctx, Page::Login, "Log in") }
                { nav_button(&ctx, Page::Register, "Register") }
                <span style="flex:1;"></span>
            </>
        }
    };

    let (dot, dot_title) = match state.connection {
        Connection::Open => ("#2ea043", "connected"),
        Connection::Connecting => ("#d29922", "connecting"),
        Connection::Closed | Connection::Unsupported => ("#f85149", "offline"),
    };

    html! {
        <div id="top-bar" style="display:flex; align-items:center; gap:8px; padding:10px 24px; background:#161b22; border-bottom:1px solid #30363d;">
            <strong style="margin-right:16px; font-size:18px;">{"Treacherous Talks"}</strong>
            { menu }
            <span title={dot_title} style={format!("width:10px; height:10px; border-radius:50%; background:{};", dot)}></span>
        </div>
    }
}
