use yew::prelude::*;

use super::ClientContext;
use super::forms::{PANEL_STYLE, SelectField, TextArea, field, on_submit};
use crate::validate::ReportForm;

fn report_types() -> Vec<(AttrValue, AttrValue)> {
    vec![
        (AttrValue::from(""), AttrValue::from("Choose a type of issue")),
        (AttrValue::from("report_user"), AttrValue::from("Report a player")),
        (AttrValue::from("report_problem"), AttrValue::from("Report a problem")),
    ]
}

#[function_component]
pub fn UserHelpPage() -> Html {
    let form = use_state(ReportForm::default);
    let Some(ctx) = use_context::<ClientContext>() else {
        return html! {};
    };
    let submit = {
        let form = form.clone();
        Callback::from(move |_| {
            if ctx.submit(form.validate(ctx.session())) {
                form.set(ReportForm::default());
            }
        })
    };
    html! {
        <div>
            <p>{"Player reports go to the moderators, everything else to the operators."}</p>
            <form id="report_form" style={PANEL_STYLE} onsubmit={on_submit(submit)}>
                <SelectField label="Type" value={form.report_type.clone()} options={report_types()}
                    on_change={field(&form, |f, v| f.report_type = v)} />
                <TextArea label="Message" rows={6} value={form.message.clone()}
                    on_change={field(&form, |f, v| f.message = v)} />
                <button type="submit">{"Send report"}</button>
            </form>
        </div>
    }
}
