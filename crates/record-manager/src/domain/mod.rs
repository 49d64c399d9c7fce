//! Domain Layer
//!
//! Records, drafts, filters, pagination and edit state. Nothing here does
//! I/O.

mod record;
mod page;
mod filter;
mod draft;
mod mode;

pub use record::{display_value, Record, RecordId};
pub use page::{total_pages, Page, PageCursor, DEFAULT_PAGE_SIZE};
pub use filter::FilterSet;
pub use draft::Draft;
pub use mode::{EditMode, Notice, NoticeKind, Sort, SortDirection};
