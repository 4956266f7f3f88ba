pub mod error;
pub mod fields;

pub use error::FilterError;
pub use fields::FieldFilter;
