//! Taskboard: terminal task tracker library.
//!
//! The state layer lives in [`store`] (snapshot, actions, reducer),
//! [`storage`] (durable task slot), [`roster`] (remote user roster),
//! [`view`] (search and filters), and [`session`], which wires them
//! together. [`app`] and [`ui`] are the terminal front end built on top.

pub mod app;
pub mod config;
pub mod roster;
pub mod session;
pub mod storage;
pub mod store;
pub mod tasks;
pub mod ui;
pub mod view;
