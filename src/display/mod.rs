//! Display formatting for terminal output

pub mod transaction;

pub use transaction::{
    format_load_warnings, format_transaction_details, format_transaction_grid,
    format_transaction_row,
};
