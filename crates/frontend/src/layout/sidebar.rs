//! Sidebar with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "produksi",
            label: "Produksi",
            icon: "clipboard",
            items: vec![("a003_baku", "clipboard"), ("a003_baku_rekap", "columns")],
        },
        MenuGroup {
            id: "master",
            label: "Master Data",
            icon: "users",
            items: vec![
                ("a001_mandor", "user-check"),
                ("a002_penyadap", "users"),
                ("a004_peta", "map"),
                ("a005_master", "upload"),
            ],
        },
        MenuGroup {
            id: "laporan",
            label: "Laporan",
            icon: "bar-chart",
            items: vec![
                ("d400_afdeling_summary", "activity"),
                ("p900_monitoring", "search"),
                ("p901_visualisasi", "bar-chart"),
                ("p902_perbandingan", "columns"),
            ],
        },
        MenuGroup {
            id: "pengaturan",
            label: "Pengaturan",
            icon: "settings",
            items: vec![("sys_account", "user")],
        },
    ]
}

fn toggle_group(open: &mut Vec<&'static str>, id: &'static str) {
    match open.iter().position(|g| *g == id) {
        Some(pos) => {
            open.remove(pos);
        }
        None => open.push(id),
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let expanded = RwSignal::new(vec!["produksi", "laporan"]);

    let menu_item = move |(key, icon_name): (&'static str, &'static str)| {
        let label = tab_label_for_key(key);
        view! {
            <div
                class="app-sidebar__item app-sidebar__item--child"
                class:app-sidebar__item--active=move || ctx.active.get().as_deref() == Some(key)
                on:click=move |_| ctx.open_tab(key, label)
            >
                <div class="app-sidebar__item-content">
                    {icon(icon_name)}
                    <span>{label}</span>
                </div>
            </div>
        }
    };

    view! {
        <div class="app-sidebar__content">
            {menu_groups()
                .into_iter()
                .map(|group| {
                    let id = group.id;
                    let is_open = move || expanded.with(|open| open.contains(&id));
                    let items = StoredValue::new(group.items);
                    view! {
                        <div class="app-sidebar__group">
                            <div
                                class="app-sidebar__item"
                                on:click=move |_| expanded.update(|open| toggle_group(open, id))
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(group.icon)}
                                    <span>{group.label}</span>
                                </div>
                                <div class="app-sidebar__chevron" class:app-sidebar__chevron--expanded=is_open>
                                    {icon("chevron-right")}
                                </div>
                            </div>
                            <Show when=is_open>
                                <div class="app-sidebar__children">
                                    {items.get_value().into_iter().map(menu_item).collect_view()}
                                </div>
                            </Show>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_item_has_a_title() {
        for group in menu_groups() {
            for (key, _) in group.items {
                assert!(!tab_label_for_key(key).is_empty(), "no title for {}", key);
            }
        }
    }

    #[test]
    fn test_toggle_group() {
        let mut open = vec!["produksi"];
        toggle_group(&mut open, "master");
        assert_eq!(open, vec!["produksi", "master"]);
        toggle_group(&mut open, "produksi");
        assert_eq!(open, vec!["master"]);
    }
}
