//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod filter_bar;
mod home_page;
mod nav_bar;
mod pagination;
mod record_form;
mod record_list;
mod record_page;
mod reference_autocomplete;
mod status_banner;
mod variety_detail;

pub use delete_confirm_button::DeleteConfirmButton;
pub use filter_bar::FilterBar;
pub use home_page::HomePage;
pub use nav_bar::NavBar;
pub use pagination::Pagination;
pub use record_form::RecordForm;
pub use record_list::RecordList;
pub use record_page::RecordPage;
pub use reference_autocomplete::ReferenceAutocomplete;
pub use status_banner::StatusBanner;
pub use variety_detail::VarietyDetail;
