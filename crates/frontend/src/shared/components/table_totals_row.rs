use leptos::prelude::*;

/// Totals row for report tables (TOTAL per group, JUMLAH PRODUKSI, summary rows).
///
/// ```rust,ignore
/// <TableTotalsRow class="table__totals-row--grand">
///     <td colspan="3">"JUMLAH PRODUKSI"</td>
///     <td class="table__cell--right">{format_decimal(totals.kebun_latek)}</td>
/// </TableTotalsRow>
/// ```
#[component]
pub fn TableTotalsRow(
    children: Children,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    let row_class = if class.is_empty() {
        "table__totals-row".to_string()
    } else {
        format!("table__totals-row {}", class)
    };

    view! {
        <tr class=row_class>
            {children()}
        </tr>
    }
}
