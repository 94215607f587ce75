use yew::prelude::*;

use super::ClientContext;
use super::forms::{PANEL_STYLE, TextField, field, on_submit};
use crate::validate::{RegisterForm, UpdateUserForm};

#[function_component]
pub fn RegisterPage() -> Html {
    let form = use_state(RegisterForm::default);
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
        <form id="register_form" style={PANEL_STYLE} onsubmit={on_submit(submit)}>
            <TextField label="Email" value={form.email.clone()} on_change={field(&form, |f, v| f.email = v)} />
            <TextField label="Full name" value={form.name.clone()} on_change={field(&form, |f, v| f.name = v)} />
            <TextField label="Nick" value={form.nick.clone()} on_change={field(&form, |f, v| f.nick = v)} />
            <TextField label="Password" password=true value={form.password.clone()}
                on_change={field(&form, |f, v| f.password = v)} />
            <TextField label="Confirm password" password=true value={form.confirm_password.clone()}
                on_change={field(&form, |f, v| f.confirm_password = v)} />
            <button type="submit">{"Register"}</button>
        </form>
    }
}

#[function_component]
pub fn UpdateUserPage() -> Html {
    let ctx = use_context::<ClientContext>();
    let user = ctx.as_ref().and_then(|c| c.state.user.clone());
    let form = use_state(|| user.as_ref().map(UpdateUserForm::for_user).unwrap_or_default());

    // Refill when the account changes underneath the page.
    {
        let form = form.clone();
        use_effect_with(user, move |user| {
            if let Some(user) = user {
                form.set(UpdateUserForm::for_user(user));
            }
            || ()
        });
    }

    let Some(ctx) = ctx else {
        return html! {};
    };
    let submit = {
        let form = form.clone();
        Callback::from(move |_| {
            if ctx.submit(form.validate(ctx.session())) {
                form.set(UpdateUserForm { password: String::new(), confirm_password: String::new(), ..(*form).clone() });
            }
        })
    };
    html! {
        <form id="update_user_form" style={PANEL_STYLE} onsubmit={on_submit(submit)}>
            <TextField label="Email" value={form.email.clone()} on_change={field(&form, |f, v| f.email = v)} />
            <TextField label="Full name" value={form.name.clone()} on_change={field(&form, |f, v| f.name = v)} />
            <TextField label="Password" password=true value={form.password.clone()}
                on_change={field(&form, |f, v| f.password = v)} />
            <TextField label="Confirm password" password=true value={form.confirm_password.clone()}
                on_change={field(&form, |f, v| f.confirm_password = v)} />
            <button type="submit">{"Update"}</button>
        </form>
    }
}
