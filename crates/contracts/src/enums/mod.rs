pub mod afdeling;
pub mod tipe_produksi;

pub use afdeling::{AfdelingKey, AfdelingStyle, UNKNOWN_AFDELING_LABEL};
pub use tipe_produksi::TipeProduksi;
