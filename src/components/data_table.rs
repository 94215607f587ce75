use yew::prelude::*;

use crate::state::table::{ButtonStyle, Cell, Table, TableAction};

#[derive(Properties, PartialEq, Clone)]
pub struct DataTableProps {
    pub table: Table,
    #[prop_or_default]
    pub on_action: Callback<TableAction>,
    /// Shown instead of an empty table.
    pub empty_text: AttrValue,
}

fn button_style(style: ButtonStyle) -> &'static str {
    match style {
        ButtonStyle::Primary => "padding:2px 10px; background:#1f6feb; color:#fff; border:none; border-radius:4px;",
        ButtonStyle::Danger => "padding:2px 10px; background:#da3633; color:#fff; border:none; border-radius:4px;",
        ButtonStyle::Disabled => "padding:2px 10px; opacity:0.5;",
    }
}

#[function_component]
pub fn DataTable(props: &DataTableProps) -> Html {
    if props.table.rows.is_empty() {
        return html! { <p style="opacity:0.7;">{ props.empty_text.clone() }</p> };
    }
    let cell_style = "padding:4px 10px; border-bottom:1px solid #30363d; text-align:left;";

    let render_cell = |cell: &Cell| match cell {
        Cell::Empty => html! {},
        Cell::Text(text) => html! { { text.clone() } },
        Cell::Action { label, style, action } => {
            let onclick = action.clone().map(|action| {
                let cb = props.on_action.clone();
                Callback::from(move |_: MouseEvent| cb.emit(action.clone()))
            });
            html! {
                <button style={button_style(*style)} disabled={action.is_none()} {onclick}>{ *label }</button>
            }
        }
    };

    html! {
        <table style="border-collapse:collapse; margin:8px 0;">
            <thead>
                <tr>
                    { for props.table.columns.iter().map(|c| html! { <th style={cell_style}>{ c.clone() }</th> }) }
                </tr>
            </thead>
            <tbody>
                { for props.table.rows.iter().map(|row| html! {
                    <tr>
                        { for row.iter().map(|cell| html! { <td style={cell_style}>{ render_cell(cell) }</td> }) }
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
