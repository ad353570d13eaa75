pub mod core;
pub mod impl_gui;
pub mod presentation;
pub mod run_effect;
