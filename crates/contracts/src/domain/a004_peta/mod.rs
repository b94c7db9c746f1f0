pub mod aggregate;
pub mod detect;
