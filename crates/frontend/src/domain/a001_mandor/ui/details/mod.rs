//! Mandor form.
//!
//! - view_model.rs: form state and the save command
//! - view.rs: the form component

mod view;
mod view_model;

pub use view::MandorDetails;
pub use view_model::MandorDetailsViewModel;
