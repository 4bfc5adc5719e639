// Service module exports

pub mod dashboard;
pub mod database;
pub mod grid;
pub mod notification;
pub mod profile;
pub mod reminder;
pub mod schedule;
mod shared;
pub mod subject;
pub mod task;
