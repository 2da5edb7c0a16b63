mod predicate;
mod sort;

pub use predicate::Where;
pub use sort::{Direction, Sort, SortOrder};
