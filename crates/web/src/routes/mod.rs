pub mod admin;
pub mod items;
pub mod pages;
