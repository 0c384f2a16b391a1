pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;

pub use catalog::Catalog;
pub use domain::application::{ApplicationStatus, JobApplication};
pub use domain::cart::{price_lines, CartLine, CheckoutSummary, LineSnapshot};
pub use domain::contact::Contact;
pub use domain::note::Note;
pub use domain::product::{Product, ProductId};
pub use domain::student::Student;
pub use errors::DomainError;
