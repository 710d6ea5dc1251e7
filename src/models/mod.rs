mod category;
mod record;

pub use category::Category;
pub use record::{Record, RecordInput};
pub(crate) use record::category_totals;

#[cfg(test)]
mod tests;
