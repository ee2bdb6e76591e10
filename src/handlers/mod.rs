pub mod meta;
pub mod todos;
