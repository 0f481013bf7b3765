pub mod backup_bar;
pub mod confirm_modal;
pub mod rarity_checklist;
pub mod record_table;
pub mod reverse_search;
pub mod summary_table;
pub mod tab_nav;

pub use backup_bar::BackupBar;
pub use confirm_modal::ConfirmModal;
pub use rarity_checklist::RarityChecklist;
pub use record_table::{BulkAction, RecordTable};
pub use reverse_search::ReverseSearch;
pub use summary_table::SummaryTableView;
pub use tab_nav::TabNav;
