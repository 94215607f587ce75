use yew::prelude::*;

use super::ClientContext;
use super::forms::{PANEL_STYLE, TextField, field, on_submit};
use crate::state::Page;
use crate::validate::LoginForm;

#[function_component]
pub fn LoginPanel() -> Html {
    let form = use_state(LoginForm::default);
    let Some(ctx) = use_context::<ClientContext>() else {
        return html! {};
    };
    let submit = {
        let form = form.clone();
        Callback::from(move |_| {
            ctx.submit(form.validate());
        })
    };
    html! {
        <form id="login_form" style={PANEL_STYLE} onsubmit={on_submit(submit)}>
            <TextField label="Nick" value={form.nick.clone()} on_change={field(&form, |f, v| f.nick = v)} />
            <TextField label="Password" password=true value={form.password.clone()}
                on_change={field(&form, |f, v| f.password = v)} />
            <button type="submit">{"Log in"}</button>
        </form>
    }
}

#[function_component]
pub fn HomePage() -> Html {
    let Some(ctx) = use_context::<ClientContext>() else {
        return html! {};
    };
    let to_register = {
        let ctx = ctx.clone();
        Callback::from(move |_: MouseEvent| ctx.goto(Page::Register))
    };
    html! {
        <div>
            <p>{"Treacherous Talks is a game of negotiation, alliances and betrayal across Europe in 1901. \
                 Seven powers, one board, and nobody to trust."}</p>
            if !ctx.state.logged_in() {
                <LoginPanel />
                <p>{"New here? "}<a style="color:#58a6ff; cursor:pointer;" onclick={to_register}>{"Create an account"}</a></p>
            }
        </div>
    }
}

#[function_component]
pub fn LoginPage() -> Html {
    html! { <LoginPanel /> }
}
