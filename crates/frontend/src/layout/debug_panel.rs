//! Debug panel: the latest value reported under each key, in first-seen order

use crate::shared::event_bus::use_bus;
use leptos::prelude::*;

#[component]
pub fn DebugPanel() -> impl IntoView {
    let bus = use_bus();
    let entries = RwSignal::new(Vec::<(String, String)>::new());

    bus.debug
        .subscribe(move |update| {
            entries.try_update(|state| update.apply_to(state));
        })
        .until_cleanup();

    view! {
        <div class="app-panel__content debug-panel">
            <div class="debug-panel__title">"Debug"</div>
            <Show
                when=move || entries.with(|e| !e.is_empty())
                fallback=|| view! { <div class="debug-panel__empty">"Belum ada data"</div> }
            >
                <dl class="debug-panel__list">
                    <For
                        each=move || entries.get()
                        key=|(key, value)| format!("{}={}", key, value)
                        children=|(key, value)| {
                            view! {
                                <dt class="debug-panel__key">{key}</dt>
                                <dd class="debug-panel__value">{value}</dd>
                            }
                        }
                    />
                </dl>
            </Show>
        </div>
    }
}
