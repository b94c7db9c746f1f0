//! Tab management: `page` wraps one open tab, `registry` maps a tab key to
//! its page and `tab_labels` holds the titles.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::tab_label_for_key;
