//! # Domain Services
//!
//! エンティティに属さないビジネスルール

pub mod progress_tracker;
