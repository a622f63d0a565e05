extern crate chrono;
extern crate colored;
extern crate serde;
extern crate serde_json;
extern crate uuid;

mod dashboard;

pub mod config;
pub mod error;
pub mod id;
pub mod identity;
pub mod notify;
pub mod persistence;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;
pub mod traits;
pub mod viewer;

pub use config::Config;
pub use dashboard::*;
pub use error::Error;
