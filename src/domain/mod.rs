mod fixed_expense;
mod format;
mod ledger;
mod money;
mod transaction;
mod validation;

pub use fixed_expense::*;
pub use format::*;
pub use ledger::*;
pub use money::*;
pub use transaction::*;
pub use validation::*;
