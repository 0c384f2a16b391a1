pub mod application;
pub mod cart;
pub mod contact;
pub mod note;
pub mod product;
pub mod student;
