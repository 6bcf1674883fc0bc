pub mod page;
pub mod templates;
