//! Business module - the input side of an analysis.

mod category;
mod description;

pub use category::BusinessCategory;
pub use description::{BusinessDescription, MAX_BUSINESS_NAME_LEN};
