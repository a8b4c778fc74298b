pub mod aria;
pub mod config;
pub mod data_model;
pub mod edit_session;
pub mod events;
pub mod filter;
pub mod grid_state;
pub mod navigation;
pub mod selection;
pub mod sort;
