use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::ClientContext;
use crate::state::ClientAction;

#[function_component]
pub fn NoticeBar() -> Html {
    let ctx = use_context::<ClientContext>();
    // Replacing the handle drops, and so cancels, the pending dismissal.
    let timer = use_mut_ref(|| None::<Timeout>);

    let seq = ctx.as_ref().map(|c| c.state.notice_seq).unwrap_or(0);
    let transient = ctx.as_ref().and_then(|c| c.state.notice.as_ref()).map(|n| n.transient).unwrap_or(false);
    {
        let ctx = ctx.clone();
        use_effect_with((seq, transient), move |(_, transient)| {
            *timer.borrow_mut() = match (ctx, *transient) {
                (Some(ctx), true) => {
                    let dispatcher = ctx.state.dispatcher();
                    Some(Timeout::new(ctx.config.notice_delay_ms, move || {
                        dispatcher.dispatch(ClientAction::DismissNotice)
                    }))
                }
                _ => None,
            };
            || ()
        });
    }

    let Some(ctx) = ctx else {
        return html! {};
    };
    let Some(notice) = ctx.state.notice.clone() else {
        return html! {};
    };
    let dismiss = {
        let dispatcher = ctx.state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(ClientAction::DismissNotice))
    };
    let color = notice.kind.color();

    html! {
        <div id="notice" class={classes!("notice", notice.kind.class())}
            style={format!("display:flex; align-items:center; justify-content:space-between; gap:12px; margin:8px 24px; padding:8px 14px; border:1px solid {}; border-radius:8px; background:rgba(22,27,34,0.9); color:{};", color, color)}>
            <span>{ notice.text }</span>
            <button onclick={dismiss} style="padding:2px 8px;">{"×"}</button>
        </div>
    }
}
