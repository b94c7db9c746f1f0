use contracts::shared::autocomplete::{
    handle_input, Candidate, CandidateKind, Matcher, Outcome, Selection,
};
use leptos::prelude::*;

use crate::shared::config::config;

/// Text input with a mandor/penyadap dropdown.
///
/// `selected_id` holds the picked id as text and is cleared as soon as the
/// text stops matching the pick. Writing an id into it from outside (edit
/// mode) selects the matching candidate; writing `""` clears the input.
#[component]
pub fn AutocompleteInput(
    kind: CandidateKind,
    #[prop(into)] candidates: Signal<Vec<Candidate>>,
    selected_id: RwSignal<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] input_id: String,
    /// Called with the raw text on every edit, e.g. to refresh `candidates` from the server
    #[prop(optional)]
    on_query: Option<Callback<String>>,
    #[prop(optional)] on_select: Option<Callback<Candidate>>,
) -> impl IntoView {
    let matcher = Matcher::new(kind).with_min_len(config().autocomplete.min_query_len);
    let text = RwSignal::new(String::new());
    let outcome = RwSignal::new(Outcome::Hidden);
    let focused = RwSignal::new(false);
    let selection = StoredValue::new(Selection::default());

    let rematch = move |value: &str| {
        let mut current = selection.get_value();
        let next = candidates.with_untracked(|list| handle_input(&mut current, &matcher, value, list));
        if current.id().is_none() && !selected_id.get_untracked().is_empty() {
            selected_id.set(String::new());
        }
        selection.set_value(current);
        outcome.set(next);
    };

    // External writes to `selected_id`
    Effect::new(move |_| {
        let id = selected_id.get();
        let committed = selection.with_value(|s| s.id());
        if id.is_empty() {
            if committed.is_some() {
                selection.update_value(|s| s.clear());
                text.set(String::new());
            }
            return;
        }
        if committed.map(|c| c.to_string()).as_deref() == Some(id.as_str()) {
            return;
        }
        let found = candidates.with(|list| list.iter().find(|c| c.id.to_string() == id).cloned());
        if let Some(candidate) = found {
            let display = candidate.display_value();
            selection.update_value(|s| {
                s.select(candidate);
            });
            text.set(display);
        }
    });

    // Server-side candidate refreshes while typing
    Effect::new(move |_| {
        candidates.track();
        if focused.get_untracked() {
            rematch(&text.get_untracked());
        }
    });

    let pick = move |candidate: Candidate| {
        let id = candidate.id.to_string();
        let mut current = selection.get_value();
        let display = current.select(candidate.clone());
        selection.set_value(current);
        text.set(display);
        outcome.set(Outcome::Hidden);
        selected_id.set(id);
        if let Some(cb) = on_select {
            cb.run(candidate);
        }
    };

    let dropdown = move || match outcome.get() {
        Outcome::Hidden => view! { <></> }.into_any(),
        Outcome::NoData => view! {
            <div class="autocomplete__list">
                <div class="autocomplete__empty">"Data belum tersedia"</div>
            </div>
        }
        .into_any(),
        Outcome::NotFound => view! {
            <div class="autocomplete__list">
                <div class="autocomplete__empty">"Tidak ditemukan"</div>
            </div>
        }
        .into_any(),
        Outcome::Matches(items) => view! {
            <div class="autocomplete__list">
                {items
                    .into_iter()
                    .map(|candidate| {
                        let detail = match candidate.tahun_tanam {
                            Some(tahun) => format!("NIK {} · {}", candidate.nik, tahun),
                            None => format!("NIK {}", candidate.nik),
                        };
                        let name = candidate.name.clone();
                        view! {
                            <div
                                class="autocomplete__item"
                                on:mousedown=move |ev| {
                                    ev.prevent_default();
                                    pick(candidate.clone());
                                }
                            >
                                <strong>{name}</strong>
                                <small>{detail}</small>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="autocomplete">
            <input
                type="text"
                class="form__input"
                id=input_id
                autocomplete="off"
                placeholder=placeholder
                prop:value=move || text.get()
                on:focus=move |_| focused.set(true)
                on:blur=move |_| {
                    focused.set(false);
                    outcome.set(Outcome::Hidden);
                }
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    text.set(value.clone());
                    rematch(&value);
                    if let Some(cb) = on_query {
                        cb.run(value);
                    }
                }
            />
            {dropdown}
        </div>
    }
}

