//! Labelled inputs shared by the form pages.

use yew::prelude::*;

use crate::util::{event_checked, event_value};

pub const FIELD_STYLE: &str = "display:flex; align-items:center; gap:10px; margin:6px 0;";
pub const LABEL_STYLE: &str = "min-width:160px; font-weight:500;";
pub const PANEL_STYLE: &str =
    "background:#161b22; border:1px solid #30363d; border-radius:12px; padding:14px 18px; margin:12px 0;";

#[derive(Properties, PartialEq, Clone)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub password: bool,
    #[prop_or_default]
    pub placeholder: AttrValue,
}

#[function_component]
pub fn TextField(props: &TextFieldProps) -> Html {
    let oninput = {
        let cb = props.on_change.clone();
        Callback::from(move |e: InputEvent| cb.emit(event_value(&e)))
    };
    let kind = if props.password { "password" } else { "text" };
    html! {
        <label style={FIELD_STYLE}>
            <span style={LABEL_STYLE}>{ props.label.clone() }</span>
            <input type={kind} value={props.value.clone()} placeholder={props.placeholder.clone()} {oninput} />
        </label>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TextAreaProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    /// Fired on Enter, or on Shift+Enter when `send_on_shift` is set.
    #[prop_or_default]
    pub on_enter: Option<Callback<()>>,
    /// Plain Enter then starts a new line.
    #[prop_or_default]
    pub send_on_shift: bool,
    #[prop_or(4)]
    pub rows: u32,
}

fn sends(key: &str, shift: bool, send_on_shift: bool) -> bool {
    key == "Enter" && shift == send_on_shift
}

#[function_component]
pub fn TextArea(props: &TextAreaProps) -> Html {
    let oninput = {
        let cb = props.on_change.clone();
        Callback::from(move |e: InputEvent| cb.emit(event_value(&e)))
    };
    let onkeydown = {
        let on_enter = props.on_enter.clone();
        let send_on_shift = props.send_on_shift;
        Callback::from(move |e: KeyboardEvent| {
            if let Some(cb) = &on_enter {
                if sends(&e.key(), e.shift_key(), send_on_shift) {
                    e.prevent_default();
                    cb.emit(());
                }
            }
        })
    };
    html! {
        <label style="display:flex; flex-direction:column; gap:4px; margin:6px 0;">
            <span style={LABEL_STYLE}>{ props.label.clone() }</span>
            <textarea rows={props.rows.to_string()} value={props.value.clone()} {oninput} {onkeydown} />
        </label>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    /// `(value, label)` pairs; an empty value acts as the "choose" entry.
    pub options: Vec<(AttrValue, AttrValue)>,
    pub on_change: Callback<String>,
}

#[function_component]
pub fn SelectField(props: &SelectFieldProps) -> Html {
    let onchange = {
        let cb = props.on_change.clone();
        Callback::from(move |e: Event| cb.emit(event_value(&e)))
    };
    html! {
        <label style={FIELD_STYLE}>
            <span style={LABEL_STYLE}>{ props.label.clone() }</span>
            <select {onchange}>
                { for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == props.value}>{ label.clone() }</option>
                }) }
            </select>
        </label>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct CheckFieldProps {
    pub label: AttrValue,
    pub checked: bool,
    pub on_change: Callback<bool>,
}

#[function_component]
pub fn CheckField(props: &CheckFieldProps) -> Html {
    let onchange = {
        let cb = props.on_change.clone();
        Callback::from(move |e: Event| cb.emit(event_checked(&e)))
    };
    html! {
        <label style={FIELD_STYLE}>
            <input type="checkbox" checked={props.checked} {onchange} />
            <span>{ props.label.clone() }</span>
        </label>
    }
}

/// Callback that updates one field of a form held in `use_state`.
pub fn field<F, T>(form: &UseStateHandle<F>, set: impl Fn(&mut F, T) + 'static) -> Callback<T>
where
    F: Clone + 'static,
    T: 'static,
{
    let form = form.clone();
    Callback::from(move |value: T| {
        let mut next = (*form).clone();
        set(&mut next, value);
        form.set(next);
    })
}

/// `submit` as a form's onsubmit handler, without the page reload.
pub fn on_submit(submit: Callback<()>) -> Callback<SubmitEvent> {
    Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        submit.emit(());
    })
}

#[cfg(test)]
mod tests {
    use super::sends;

    #[test]
    fn enter_binding_follows_send_mode() {
        assert!(sends("Enter", false, false));
        assert!(!sends("Enter", true, false));
        assert!(sends("Enter", true, true));
        assert!(!sends("Enter", false, true));
        assert!(!sends("a", true, true));
    }
}
