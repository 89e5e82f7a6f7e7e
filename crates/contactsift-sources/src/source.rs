use crate::Result;
use contactsift_core::Table;

/// Something that can hand over rows plus header names for the dataset pipeline.
pub trait TableSource {
    fn source_name(&self) -> &'static str;
    fn fetch_table(&self) -> Result<Table>;
}
