mod view;
mod view_model;

pub use view::PenyadapDetails;
pub use view_model::PenyadapDetailsViewModel;
