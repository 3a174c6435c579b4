use leptos::prelude::*;

use crate::models::TaskStatus;

/// Colored pill showing a task status
#[component]
pub fn StatusBadge(status: TaskStatus) -> impl IntoView {
    let class = format!("status-badge {}", status.css_class());
    view! { <span class=class>{status.as_wire().to_string()}</span> }
}
