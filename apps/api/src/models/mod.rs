pub mod cv;
pub mod form;
