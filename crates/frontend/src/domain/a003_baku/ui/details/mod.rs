//! Production entry form: mandor select, penyadap autocomplete, yields

mod view;
mod view_model;

pub use view::BakuDetails;
pub use view_model::BakuDetailsViewModel;
