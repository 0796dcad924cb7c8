//! Predicate engine: conditions over device metrics, breakpoints, text syntax.

pub mod breakpoints;
pub mod condition;
pub mod matcher;
pub mod parser;
pub mod tokenizer;

pub use breakpoints::{Breakpoint, BreakpointError, BreakpointTable};
pub use condition::{Condition, ConditionError};
pub use matcher::matches;
pub use parser::{parse_query, ParseError};
