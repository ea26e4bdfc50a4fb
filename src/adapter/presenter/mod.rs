//! Presenter Adapter Modules

pub mod console_presenter;

pub use console_presenter::ConsolePresenter;
