use leptos::prelude::*;

/// Placeholder shown while the session is still resolving.
#[component]
pub fn LoadingSkeleton(#[prop(default = 3)] lines: usize) -> impl IntoView {
    view! {
        <div class="skeleton" role="status" aria-busy="true" aria-label="Loading">
            <div class="skeleton__title"></div>
            {(0..lines).map(|_| view! { <div class="skeleton__line"></div> }).collect_view()}
        </div>
    }
}
