pub mod form;
pub mod ip;
