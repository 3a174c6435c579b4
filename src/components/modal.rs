use leptos::prelude::*;

/// Overlay and dialog frame shared by every modal. Without `on_close` there
/// is no close button.
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    #[prop(default = None)] on_close: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="modal-overlay">
            <div class="modal" role="dialog">
                <div class="modal-header">
                    <h3>{title}</h3>
                    {on_close.map(|close| view! {
                        <button class="modal-close" on:click=move |_| close.run(())>"×"</button>
                    })}
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
