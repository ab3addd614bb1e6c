//! Form Field Components
//!
//! Inputs bound to a [`FormHandle`]: edits go through `change`, focus loss
//! through `blur`, and the field's error shows once it has been touched.

use leptos::prelude::*;

use crate::hooks::FormHandle;

fn input_class(form: FormHandle, name: &'static str) -> &'static str {
    if form.error(name).is_some() {
        "input input-error"
    } else {
        "input"
    }
}

#[component]
fn FieldError(form: FormHandle, name: &'static str) -> impl IntoView {
    move || form.error(name).map(|e| view! { <p class="field-error">{e}</p> })
}

#[component]
pub fn TextField(
    form: FormHandle,
    name: &'static str,
    #[prop(into)] label: String,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] max_length: Option<usize>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label for=name>{label}</label>
            <input
                id=name
                name=name
                type=input_type
                placeholder=placeholder
                maxlength=max_length.map(|n| n.to_string())
                class=move || input_class(form, name)
                prop:value=move || form.value(name)
                prop:disabled=move || form.is_submitting()
                on:input=move |ev| form.change(name, event_target_value(&ev))
                on:blur=move |_| form.blur(name)
            />
            <FieldError form=form name=name />
        </div>
    }
}

#[component]
pub fn TextAreaField(
    form: FormHandle,
    name: &'static str,
    #[prop(optional, into)] label: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(default = 4)] rows: u32,
) -> impl IntoView {
    view! {
        <div class="form-field">
            {(!label.is_empty()).then(|| view! { <label for=name>{label.clone()}</label> })}
            <textarea
                id=name
                name=name
                rows=rows
                placeholder=placeholder
                class=move || input_class(form, name)
                prop:value=move || form.value(name)
                prop:disabled=move || form.is_submitting()
                on:input=move |ev| form.change(name, event_target_value(&ev))
                on:blur=move |_| form.blur(name)
            ></textarea>
            <FieldError form=form name=name />
        </div>
    }
}

/// `(value, label)` pairs; an empty value acts as "none".
#[component]
pub fn SelectField(
    form: FormHandle,
    name: &'static str,
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label for=name>{label}</label>
            <select
                id=name
                name=name
                class=move || input_class(form, name)
                prop:value=move || form.value(name)
                prop:disabled=move || form.is_submitting()
                on:change=move |ev| form.change(name, event_target_value(&ev))
                on:blur=move |_| form.blur(name)
            >
                {move || {
                    let current = form.value(name);
                    options
                        .get()
                        .into_iter()
                        .map(|(value, text)| {
                            let selected = value == current;
                            view! { <option value=value selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <FieldError form=form name=name />
        </div>
    }
}

/// Options for a fixed vocabulary, labelled as-is.
pub fn vocabulary_options(values: &[&str]) -> Vec<(String, String)> {
    values.iter().map(|v| (v.to_string(), v.replace('_', " "))).collect()
}
