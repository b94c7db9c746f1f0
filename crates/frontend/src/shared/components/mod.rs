pub mod autocomplete_input;
pub mod bar_chart;
pub mod selects;
pub mod stat_card;
pub mod table_totals_row;

pub use autocomplete_input::AutocompleteInput;
pub use bar_chart::BarChart;
pub use selects::{AfdelingSelect, TipeProduksiOptions, TipeProduksiSelect};
pub use stat_card::{CardStatus, StatCard, ValueFormat};
pub use table_totals_row::TableTotalsRow;
