mod record_form;
mod record_list;

pub use record_form::RecordFormView;
pub use record_list::RecordListView;
