use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Tab strip over the open pages
#[component]
pub fn Center(children: Children) -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <div class="app-tabs__bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| {
                        let key_active = tab.key.clone();
                        let key_click = tab.key.clone();
                        let key_close = tab.key.clone();
                        view! {
                            <div
                                class="app-tabs__tab"
                                class:app-tabs__tab--active=move || {
                                    tabs_store.active.get().as_deref() == Some(key_active.as_str())
                                }
                                on:click=move |_| tabs_store.activate_tab(&key_click)
                            >
                                <span class="app-tabs__title">{tab.title}</span>
                                <button
                                    class="app-tabs__close"
                                    title="Tutup"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        tabs_store.close_tab(&key_close);
                                    }
                                >
                                    {icon("cancel")}
                                </button>
                            </div>
                        }
                    }
                />
            </div>
            {children()}
        </div>
    }
}
