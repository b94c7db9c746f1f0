pub mod aggregation;
pub mod api;
pub mod autocomplete;
pub mod events;
pub mod lenient;
pub mod numeric;
pub mod series;
