mod account_repository_tests;
mod connection_tests;
