pub mod expense_manager;
pub mod utils;

pub use expense_manager::ExpenseManager;
pub use utils::PathResolver;
