pub mod calendar;
pub mod sync;

pub use calendar::CalendarError;
pub use sync::{SyncError, SyncService};
