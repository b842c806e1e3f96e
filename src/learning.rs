//! Value learning over canonical boards

pub mod brain;
pub mod value_table;

pub use brain::{Brain, MoveOption, SharedBrain};
pub use value_table::{SIGNIFICANCE_THRESHOLD, ValueTable};
