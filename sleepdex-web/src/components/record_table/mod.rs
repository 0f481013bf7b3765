mod filters;
mod view;

pub use filters::{FilterRow, Props as FilterRowProps};
pub use view::{BulkAction, Props, RecordTable};
