//! Inline notices for form outcomes. Errors use `role="alert"` so screen readers
//! announce them; success notices are polite. Messages come from `AppError`
//! display output and never contain passwords or tokens.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub enum AlertKind {
    Error,
    Success,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Error => {
                "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700"
            }
            AlertKind::Success => {
                "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700"
            }
        }
    }

    fn role(self) -> &'static str {
        match self {
            AlertKind::Error => "alert",
            AlertKind::Success => "status",
        }
    }
}

#[component]
pub fn Alert(kind: AlertKind, message: String) -> impl IntoView {
    view! { <div class=kind.class() role=kind.role()>{message}</div> }
}
