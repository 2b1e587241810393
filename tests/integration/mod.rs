//! Integration tests for the prompt compilation engine

mod cli_run;
mod engine_scenarios;
mod snapshot_loading;
mod test_utils;
