//! Integration tests for Strata configuration resolution

mod cli_binary;
mod logging_output;
mod parameter_store;
mod test_utils;
