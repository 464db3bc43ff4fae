pub mod catalog;
pub mod generate;
pub mod history;
pub mod status;
