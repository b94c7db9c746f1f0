use contracts::shared::numeric::{format_decimal, format_fixed2};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueFormat {
    /// One decimal, trailing ".0" dropped
    #[default]
    Decimal,
    Fixed2,
    Percent,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStatus {
    #[default]
    Neutral,
    Good,
    Warning,
}

pub fn format_value(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Decimal => format_decimal(value),
        ValueFormat::Fixed2 => format_fixed2(value),
        ValueFormat::Percent => format!("{}%", format_fixed2(value)),
        ValueFormat::Integer => format_thousands(value.round() as i64),
    }
}

/// Dot-grouped thousands as printed in Indonesian reports: 12500 -> "12.500"
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// `None` renders a dash (loading or error)
    #[prop(into)]
    value: Signal<Option<f64>>,
    #[prop(optional)] format: ValueFormat,
    #[prop(into, optional)] status: Signal<CardStatus>,
    /// Badge next to the value, e.g. "Terbaik"
    #[prop(into, optional)]
    badge: Signal<Option<String>>,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let status_class = move || match status.get() {
        CardStatus::Good => "stat-card stat-card--success",
        CardStatus::Warning => "stat-card stat-card--warning",
        CardStatus::Neutral => "stat-card",
    };

    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "-".to_string(),
    };

    view! {
        <div class=status_class>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {formatted}
                    {move || badge.get().map(|b| view! { <span class="stat-card__badge">{b}</span> })}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(12500), "12.500");
        assert_eq!(format_thousands(-1234567), "-1.234.567");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.0, ValueFormat::Decimal), "12");
        assert_eq!(format_value(3.456, ValueFormat::Percent), "3.46%");
        assert_eq!(format_value(1499.6, ValueFormat::Integer), "1.500");
    }
}
