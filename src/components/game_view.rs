use serde_json::Value;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

use super::ClientContext;
use super::dashboard::country_options;
use super::forms::{CheckField, PANEL_STYLE, SelectField, TextArea, field, on_submit};
use crate::calls;
use crate::model::{GameStatus, PlayerGameOverview, Role, order_lines, result_lines};
use crate::rust_error;
use crate::util::{JsResult, cwarn, js_error_text};
use crate::validate::{GameOrderForm, PressForm};

#[wasm_bindgen]
extern "C" {
    /// Map renderer loaded by the host page.
    #[wasm_bindgen(catch, js_name = prepareCanvas)]
    fn prepare_canvas(units: &JsValue, owners: &JsValue, map_data: &JsValue) -> Result<(), JsValue>;
}

fn to_js(value: &Value) -> JsResult<JsValue> {
    let text = serde_json::to_string(value).map_err(|e| rust_error!("map data: {}", e))?;
    js_sys::JSON::parse(&text)
}

fn draw_map(game: &PlayerGameOverview) -> JsResult<()> {
    let map_data = match game.map_data() {
        Some(data) => to_js(&data)?,
        None => JsValue::UNDEFINED,
    };
    prepare_canvas(&to_js(&game.unit_list)?, &to_js(&game.owner_list)?, &map_data)
}

#[function_component]
pub fn GamePage() -> Html {
    let ctx = use_context::<ClientContext>();
    let game = ctx.as_ref().and_then(|c| c.state.game.clone());
    let order = use_state(GameOrderForm::default);
    let press = use_state(PressForm::default);

    // Redraw the map and retarget the forms whenever new game data arrives.
    {
        let order = order.clone();
        let press = press.clone();
        use_effect_with(game.clone(), move |game| {
            if let Some(game) = game {
                let id = game.id_text();
                order.set(GameOrderForm { game_id: id.clone(), game_order: String::new() });
                press.set(PressForm { game_id: id, ..(*press).clone() });
                if let Err(e) = draw_map(game) {
                    cwarn(&format!("map not drawn: {}", js_error_text(&e)));
                }
            }
            || ()
        });
    }

    let (Some(ctx), Some(game)) = (ctx, game) else {
        return html! { <p style="opacity:0.7;">{"No game selected."}</p> };
    };

    let submit_order = {
        let ctx = ctx.clone();
        let order = order.clone();
        Callback::from(move |_| {
            ctx.submit(order.validate(ctx.session()));
        })
    };
    let submit_press = {
        let ctx = ctx.clone();
        let press = press.clone();
        Callback::from(move |_| {
            if ctx.submit(press.validate(ctx.session())) {
                press.set(PressForm { content: String::new(), ..(*press).clone() });
            }
        })
    };
    let refresh = {
        let ctx = ctx.clone();
        let id = game.id_text();
        Callback::from(move |_: MouseEvent| ctx.call.emit(calls::game_overview(ctx.session(), &id)))
    };
    // Clicking a listed order copies it into the order box.
    let copy_order = |line: String| {
        let order = order.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*order).clone();
            if !next.game_order.is_empty() && !next.game_order.ends_with('\n') {
                next.game_order.push('\n');
            }
            next.game_order.push_str(&line);
            order.set(next);
        })
    };

    let ongoing = game.game_status == GameStatus::Ongoing;
    let heading = match game.game_status {
        GameStatus::Finished => "Finished Game Overview",
        _ => "Game Overview",
    };
    let orders = game.orders.as_deref().map(order_lines);
    let results = game.order_result.as_deref().map(result_lines);
    let mut recipients = country_options();
    recipients[0] = (AttrValue::from(""), AttrValue::from("Choose a recipient"));

    html! {
        <div id="game_page" style="display:flex; gap:16px; align-items:flex-start;">
            <div style="min-width:320px; max-width:420px;">
                <div style={PANEL_STYLE}>
                    <div style="display:flex; align-items:center; justify-content:space-between;">
                        <h3 id="game_header" style="margin:0;">{ heading }</h3>
                        <button onclick={refresh}>{"Refresh"}</button>
                    </div>
                    if ongoing {
                        <div id="game_stat_info"><b>{ game.stat_label() }</b></div>
                    }
                    <div id="gov_info" style="margin-top:8px;">
                        { for game.info().into_iter().map(|(k, v)| html! { <div>{ format!("{}: ", k) }<b>{ v }</b></div> }) }
                    </div>
                </div>

                if ongoing {
                    <div style={PANEL_STYLE}>
                        <h4 style="margin:0 0 6px;">{"Your orders"}</h4>
                        <div id="game_order_info">
                            {
                                match orders {
                                    Some(lines) if !lines.is_empty() => html! {<>
                                        { for lines.into_iter().map(|line| html! {
                                            <div style="cursor:pointer;" title="Copy to the order box"
                                                onclick={copy_order(line.clone())}><b>{ line }</b></div>
                                        }) }
                                    </>},
                                    _ => html! { <div style="opacity:0.7;">{"No Orders"}</div> },
                                }
                            }
                        </div>
                        <h4 style="margin:10px 0 6px;">{"Last results"}</h4>
                        <div id="order_feedback">
                            {
                                match results {
                                    Some(lines) if !lines.is_empty() => html! {<>
                                        { for lines.into_iter().map(|line| html! { <div>{ line }</div> }) }
                                    </>},
                                    _ => html! { <div style="opacity:0.7;">{"No resulting orders"}</div> },
                                }
                            }
                        </div>
                        <form id="game_order_form" onsubmit={on_submit(submit_order.clone())}>
                            <TextArea label="Orders (one per line, Shift+Enter sends)" rows={6} value={order.game_order.clone()}
                                on_enter={submit_order} send_on_shift={true} on_change={field(&order, |f, v| f.game_order = v)} />
                            <button type="submit">{"Send orders"}</button>
                        </form>
                    </div>

                    <form id="press_form" style={PANEL_STYLE} onsubmit={on_submit(submit_press.clone())}>
                        <h4 style="margin:0 0 6px;">{"Press"}</h4>
                        <SelectField label="To" value={press.to.clone()} options={recipients}
                            on_change={field(&press, |f, v| f.to = v)} />
                        <TextArea label="Message" value={press.content.clone()} on_enter={submit_press}
                            on_change={field(&press, |f, v| f.content = v)} />
                        if ctx.state.role() != Role::User {
                            <CheckField label="Send as power message" checked={press.power}
                                on_change={field(&press, |f, v| f.power = v)} />
                        }
                        <button type="submit">{"Send"}</button>
                    </form>
                }
            </div>
            <div id="canvas_div" style="flex:1; overflow:auto;">
                <canvas id="canvas" width="1154" height="996"></canvas>
            </div>
        </div>
    }
}
