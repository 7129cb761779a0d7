//! Error types for ChatEval
//!
//! Every fallible operation in the adapter returns [`ChatEvalResult`]. Errors
//! never cross the per-item boundary of a batch call: the adapter turns them
//! into sentinel results and logs them.

mod constructors;
mod conversions;
mod types;

pub use types::{ChatEvalError, ChatEvalResult};
