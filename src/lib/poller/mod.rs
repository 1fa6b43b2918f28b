pub mod poller;
pub mod types;
