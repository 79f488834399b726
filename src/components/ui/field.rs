//! Form building blocks shared by the auth pages.

use super::{Alert, AlertKind, Spinner};
use crate::app_lib::AppError;
use leptos::prelude::*;

const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-slate-900";
const INPUT_CLASS: &str = "w-full rounded-lg border border-slate-200 bg-slate-50 px-3 py-2.5 text-sm text-slate-900 focus:border-slate-400 focus:ring-2 focus:ring-slate-200";

/// Labelled required input that writes every keystroke into `value`.
#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    value: WriteSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "off")] autocomplete: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="mb-5">
            <label class=LABEL_CLASS for=id>{label}</label>
            <input
                id=id
                type=input_type
                class=INPUT_CLASS
                autocomplete=autocomplete
                placeholder=placeholder
                spellcheck="false"
                required
                on:input=move |event| value.set(event_target_value(&event))
            />
        </div>
    }
}

/// Spinner while a submission is in flight, then the error if it failed.
#[component]
pub fn FormStatus(
    #[prop(into)] pending: Signal<bool>,
    error: ReadSignal<Option<AppError>>,
) -> impl IntoView {
    view! {
        <div class="mt-4 space-y-3">
            {move || pending.get().then(|| view! { <Spinner /> })}
            {move || {
                error
                    .get()
                    .map(|err| view! { <Alert kind=AlertKind::Error message=err.to_string() /> })
            }}
        </div>
    }
}
