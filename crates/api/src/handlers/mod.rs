pub mod pages;
pub mod users;
pub mod validation;
