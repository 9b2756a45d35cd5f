pub mod data_manager;
pub mod dataapi;
pub mod keyboard;
pub mod lookup;
pub mod search;
