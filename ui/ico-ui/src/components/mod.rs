pub mod action_panel;
pub mod alert;
pub mod connection_status;
pub mod layout;
pub mod stats;
