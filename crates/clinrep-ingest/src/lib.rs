pub mod clean;
pub mod error;
pub mod frame;
pub mod lookup;
pub mod normalize;
pub mod source;

pub use clean::clean_value;
pub use error::{IngestError, Result};
pub use frame::{any_to_string, column_names, column_values, select_renamed, table_frame};
pub use lookup::{find_table, table_at};
pub use normalize::normalize_columns;
pub use source::{JsonSource, MemorySource, SourceAdapter};
