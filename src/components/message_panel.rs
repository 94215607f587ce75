use yew::prelude::*;

use crate::state::messages::{Band, MessageView};

#[derive(Properties, PartialEq, Clone)]
pub struct MessagePanelProps {
    pub view: MessageView,
}

fn band_color(band: Band) -> &'static str {
    match band {
        Band::First => "#1c2330",
        Band::Second => "#2a2f3a",
    }
}

#[function_component]
pub fn MessagePanel(props: &MessagePanelProps) -> Html {
    let orders = match &props.view.orders {
        Some(lines) => html! { <>{ for lines.iter().map(|l| html! { <div>{ l.clone() }</div> }) }</> },
        None => html! { <div style="opacity:0.7;">{"No Orders"}</div> },
    };
    let messages = if props.view.lines.is_empty() {
        html! { <div style="opacity:0.7;">{"No Message"}</div> }
    } else {
        html! {<>
            { for props.view.lines.iter().map(|line| {
                let class = line.band.map(Band::class);
                let style = line
                    .band
                    .map(|b| format!("padding:2px 6px; background:{};", band_color(b)))
                    .unwrap_or_else(|| "padding:2px 6px;".to_owned());
                html! { <div class={classes!(class)} {style}>{ line.text.clone() }</div> }
            }) }
        </>}
    };

    html! {
        <div id="game_msg_panel" style="display:flex; flex-direction:column; gap:10px;">
            <div>
                <h4 style="margin:4px 0;">{"Orders"}</h4>
                <div id="order_info">{ orders }</div>
            </div>
            <div>
                <h4 style="margin:4px 0;">{"Messages"}</h4>
                <div id="msg_info">{ messages }</div>
            </div>
        </div>
    }
}
