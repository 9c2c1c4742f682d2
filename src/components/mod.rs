//! UI Components
//!
//! Leptos components for the order page.

mod catalog_modal;
mod dual_amount;
mod item_row;
mod items_table;
mod order_form;
mod pagination;
mod party_section;
mod totals_footer;
mod unit_select;

pub use catalog_modal::CatalogModal;
pub use dual_amount::DualAmountCell;
pub use item_row::ItemRow;
pub use items_table::ItemsTable;
pub use order_form::OrderForm;
pub use pagination::PaginationNav;
pub use party_section::PartySection;
pub use totals_footer::TotalsFooter;
pub use unit_select::UnitSelect;
