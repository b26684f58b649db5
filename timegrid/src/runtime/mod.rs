mod action_queue;
mod actions;
mod event_loop;
mod views;

pub(crate) use action_queue::Action;
pub use event_loop::run_app;
