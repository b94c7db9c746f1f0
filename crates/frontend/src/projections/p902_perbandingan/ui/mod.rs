use contracts::projections::p900_monitoring::dto::{MonitoringSummary, SearchQuery, ViewMode};
use contracts::projections::p902_perbandingan::dto::{
    can_add_card, highlights, metric_label, metric_value, primary_shares, validate_cards,
    ComparisonCard, ComparisonResult, Metric, MAX_CARDS, MIN_CARDS,
};
use contracts::shared::api::ApiError;
use contracts::shared::autocomplete::{Candidate, CandidateKind};
use contracts::shared::numeric::format_fixed2;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_mandor::api as mandor_api;
use crate::domain::a002_penyadap::api as penyadap_api;
use crate::projections::p900_monitoring::api as search_api;
use crate::shared::components::{AutocompleteInput, CardStatus, StatCard, TipeProduksiSelect, ValueFormat};
use crate::shared::date_utils::today_str;
use crate::shared::dialogs::alert_error;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::polling::RequestGeneration;

/// Inputs of one card; all [`MAX_CARDS`] exist up front, `count` decides how many show
#[derive(Clone, Copy)]
struct CardInputs {
    form: RwSignal<ComparisonCard>,
    person_id: RwSignal<String>,
}

impl CardInputs {
    fn new() -> Self {
        Self {
            form: RwSignal::new(blank_card()),
            person_id: RwSignal::new(String::new()),
        }
    }

    fn snapshot(&self) -> ComparisonCard {
        let mut card = self.form.get_untracked();
        card.person_id = self.person_id.get_untracked();
        card
    }

    fn clear(&self) {
        self.form.set(blank_card());
        self.person_id.set(String::new());
    }
}

fn blank_card() -> ComparisonCard {
    ComparisonCard {
        tanggal_akhir: today_str(),
        ..ComparisonCard::default()
    }
}

async fn fetch_summary(mode: ViewMode, query: &SearchQuery) -> Result<MonitoringSummary, ApiError> {
    match mode {
        ViewMode::Penyadap => search_api::search_penyadap(query).await.map(|(_, s)| s),
        ViewMode::Mandor => search_api::search_mandor(query).await.map(|(_, s)| s),
    }
}

fn metric_format(mode: ViewMode, metric: Metric) -> ValueFormat {
    match (mode, metric) {
        (ViewMode::Mandor, Metric::Primary) => ValueFormat::Integer,
        _ => ValueFormat::Fixed2,
    }
}

fn card_view(
    index: usize,
    inputs: CardInputs,
    mode: RwSignal<ViewMode>,
    candidates: Signal<Vec<Candidate>>,
) -> impl IntoView {
    let form = inputs.form;
    let on_select = Callback::new(move |c: Candidate| {
        form.update(|f| f.display_name = c.name.clone());
    });
    view! {
        <div class="comparison__card">
            <h4>{format!("Kartu {}", index + 1)}</h4>
            <div class="form__group">
                <label>{move || mode.get().display_name()}</label>
                {move || {
                    let kind = match mode.get() {
                        ViewMode::Penyadap => CandidateKind::Penyadap,
                        ViewMode::Mandor => CandidateKind::Mandor,
                    };
                    view! {
                        <AutocompleteInput
                            kind=kind
                            candidates=candidates
                            selected_id=inputs.person_id
                            placeholder="Ketik nama atau NIK"
                            on_select=on_select
                        />
                    }
                }}
            </div>
            <div class="form__group">
                <label>"Tanggal Awal"</label>
                <input
                    type="date"
                    class="form__input"
                    prop:value=move || form.get().tanggal_awal
                    on:input=move |ev| form.update(|f| f.tanggal_awal = event_target_value(&ev))
                />
            </div>
            <div class="form__group">
                <label>"Tanggal Akhir"</label>
                <input
                    type="date"
                    class="form__input"
                    prop:value=move || form.get().tanggal_akhir
                    on:input=move |ev| form.update(|f| f.tanggal_akhir = event_target_value(&ev))
                />
            </div>
            <div class="form__group">
                <label>"Tipe Produksi"</label>
                <TipeProduksiSelect
                    value=Signal::derive(move || form.get().tipe_produksi)
                    on_change=Callback::new(move |v| form.update(|f| f.tipe_produksi = v))
                    allow_all=true
                />
            </div>
        </div>
    }
}

/// Side-by-side summaries of two to four people
#[component]
pub fn PerbandinganPage() -> impl IntoView {
    let mode = RwSignal::new(ViewMode::Penyadap);
    let inputs: Vec<CardInputs> = (0..MAX_CARDS).map(|_| CardInputs::new()).collect();
    let inputs = StoredValue::new(inputs);
    let count = RwSignal::new(MIN_CARDS);
    let mandor_candidates = RwSignal::new(Vec::<Candidate>::new());
    let penyadap_candidates = RwSignal::new(Vec::<Candidate>::new());
    let results = RwSignal::new(None::<(ViewMode, Vec<ComparisonResult>)>);
    let loading = RwSignal::new(false);
    let generation = StoredValue::new(RequestGeneration::new());

    spawn_local(async move {
        match mandor_api::fetch_candidates().await {
            Ok(list) => mandor_candidates.set(list),
            Err(e) => log::warn!("perbandingan mandor list: {}", e),
        }
    });
    spawn_local(async move {
        match penyadap_api::fetch_candidates().await {
            Ok(list) => penyadap_candidates.set(list),
            Err(e) => log::warn!("perbandingan penyadap list: {}", e),
        }
    });

    let candidates = Signal::derive(move || match mode.get() {
        ViewMode::Penyadap => penyadap_candidates.get(),
        ViewMode::Mandor => mandor_candidates.get(),
    });

    let set_mode = move |next: ViewMode| {
        if mode.get_untracked() == next {
            return;
        }
        mode.set(next);
        inputs.with_value(|list| list.iter().for_each(|c| c.person_id.set(String::new())));
        results.set(None);
        generation.with_value(|g| g.invalidate());
        loading.set(false);
    };

    let add_card = move |_| match can_add_card(count.get_untracked()) {
        Ok(()) => count.update(|c| *c += 1),
        Err(e) => alert_error("perbandingan", &ApiError::from(e)),
    };

    let remove_card = move |_| {
        let current = count.get_untracked();
        if current <= MIN_CARDS {
            return;
        }
        inputs.with_value(|list| list[current - 1].clear());
        count.set(current - 1);
    };

    let compare = move |_| {
        let view_mode = mode.get_untracked();
        let cards: Vec<ComparisonCard> = inputs.with_value(|list| {
            list.iter()
                .take(count.get_untracked())
                .map(CardInputs::snapshot)
                .collect()
        });
        let queries = match validate_cards(view_mode, &cards) {
            Ok(q) => q,
            Err(e) => return alert_error("perbandingan", &ApiError::from(e)),
        };
        let Some(ticket) = generation.try_with_value(|g| g.next()) else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            let mut fetched = Vec::with_capacity(queries.len());
            let mut failure = None;
            for (name, query) in &queries {
                match fetch_summary(view_mode, query).await {
                    Ok(summary) => fetched.push(ComparisonResult {
                        name: name.clone(),
                        summary,
                    }),
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }
            if !generation
                .try_with_value(|g| g.accept(ticket, "perbandingan"))
                .unwrap_or(false)
            {
                return;
            }
            match failure {
                Some(e) => {
                    alert_error("perbandingan", &e);
                    results.set(None);
                }
                None => results.set(Some((view_mode, fetched))),
            }
            loading.set(false);
        });
    };

    view! {
        <PageFrame page_id="p902_perbandingan--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Perbandingan Produksi" />

            <div class="page__toolbar">
                {[ViewMode::Penyadap, ViewMode::Mandor]
                    .into_iter()
                    .map(|m| view! {
                        <button
                            class="button"
                            class:button--primary=move || mode.get() == m
                            class:button--secondary=move || mode.get() != m
                            on:click=move |_| set_mode(m)
                        >
                            {m.display_name()}
                        </button>
                    })
                    .collect_view()}
            </div>

            <div class="comparison__cards">
                {move || {
                    let shown = count.get();
                    inputs
                        .with_value(|list| list.iter().copied().take(shown).collect::<Vec<_>>())
                        .into_iter()
                        .enumerate()
                        .map(|(i, card)| card_view(i, card, mode, candidates))
                        .collect_view()
                }}
            </div>

            <div class="form__actions">
                <button class="button button--secondary" on:click=add_card disabled=move || count.get() >= MAX_CARDS>
                    {icon("plus")}
                    "Tambah Kartu"
                </button>
                <button class="button button--secondary" on:click=remove_card disabled=move || count.get() <= MIN_CARDS>
                    {icon("delete")}
                    "Hapus Kartu"
                </button>
                <button class="button button--primary" on:click=compare disabled=move || loading.get()>
                    {icon("columns")}
                    "Bandingkan"
                </button>
            </div>

            {move || loading.get().then(|| view! { <p class="page__empty">"Memuat..."</p> })}

            {move || results.get().map(|(view_mode, list)| {
                let marks = highlights(view_mode, &list);
                let shares = primary_shares(view_mode, &list);
                let badge = |on: bool| Signal::derive(move || on.then(|| "Terbaik".to_string()));
                let status = |on: bool| Signal::derive(move || if on { CardStatus::Good } else { CardStatus::Neutral });
                let cards = list
                    .iter()
                    .zip(marks.iter().copied())
                    .map(|(r, mark)| {
                        let primary = metric_value(view_mode, Metric::Primary, &r.summary);
                        let secondary = metric_value(view_mode, Metric::Secondary, &r.summary);
                        view! {
                            <div class="comparison__result">
                                <h4>{r.name.clone()}</h4>
                                <StatCard
                                    label=metric_label(view_mode, Metric::Primary)
                                    value=Signal::derive(move || Some(primary))
                                    format=metric_format(view_mode, Metric::Primary)
                                    badge=badge(mark.primary)
                                    status=status(mark.primary)
                                />
                                <StatCard
                                    label=metric_label(view_mode, Metric::Secondary)
                                    value=Signal::derive(move || Some(secondary))
                                    format=metric_format(view_mode, Metric::Secondary)
                                    badge=badge(mark.secondary)
                                    status=status(mark.secondary)
                                />
                            </div>
                        }
                    })
                    .collect_view();
                let share_rows = list
                    .iter()
                    .zip(shares)
                    .map(|(r, share)| view! {
                        <tr class="table__row">
                            <td class="table__cell">{r.name.clone()}</td>
                            <td class="table__cell table__cell--right">
                                {format_fixed2(metric_value(view_mode, Metric::Primary, &r.summary))}
                            </td>
                            <td class="table__cell table__cell--right">{format!("{}%", format_fixed2(share))}</td>
                        </tr>
                    })
                    .collect_view();
                view! {
                    <div class="comparison__results">{cards}</div>
                    <div class="table-container">
                        <table class="table__data">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">"Nama"</th>
                                    <th class="table__header-cell">{metric_label(view_mode, Metric::Primary)}</th>
                                    <th class="table__header-cell">"Porsi"</th>
                                </tr>
                            </thead>
                            <tbody>{share_rows}</tbody>
                        </table>
                    </div>
                }
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api::ValidationError;

    #[test]
    fn test_hko_is_shown_as_integer() {
        assert_eq!(metric_format(ViewMode::Mandor, Metric::Primary), ValueFormat::Integer);
        assert_eq!(metric_format(ViewMode::Mandor, Metric::Secondary), ValueFormat::Fixed2);
        assert_eq!(metric_format(ViewMode::Penyadap, Metric::Primary), ValueFormat::Fixed2);
    }

    #[test]
    fn test_card_limit_message() {
        let err = ApiError::from(can_add_card(MAX_CARDS).unwrap_err());
        assert!(matches!(err, ApiError::Validation(ValidationError::TooManyComparisons(4))));
    }
}
