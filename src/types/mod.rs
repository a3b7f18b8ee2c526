//! Type definitions for the fraud demo datasets

pub mod city;
pub mod event;
pub mod transaction;

pub use city::City;
pub use event::DemoEvent;
pub use transaction::TransactionRecord;
