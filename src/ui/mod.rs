//! Reusable presentation widgets.

pub mod chart_view;
mod panel;
mod selector;
mod table_view;

pub use panel::{AggPanel, AggPanelConfig};
pub use selector::Selector;
pub use table_view::TableView;
