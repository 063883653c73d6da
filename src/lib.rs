//! Generic CRUD services over a SQLite persistence context.
//!
//! [`storage::DataContext`] owns the connection, [`service::RecordService`]
//! implements create/read/update/delete for any entity, and
//! [`service::CategoryService`] / [`service::TodoService`] bind it to the two
//! sample tables.

pub mod cli;
pub mod config;
pub mod demo;
pub mod dto;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod models;
pub mod service;
pub mod storage;

pub use error::AppError;
pub use service::{CategoryService, Mappers, RecordService, TodoService};
pub use storage::{DataContext, Entity, StorageError, Table};
