pub mod applications;
pub mod cart;
pub mod catalog;
pub mod contacts;
pub mod json_file;
pub mod notes;
pub mod students;

pub use applications::ApplicationStore;
pub use cart::CartStore;
pub use catalog::load_catalog;
pub use contacts::ContactStore;
pub use json_file::StoreError;
pub use notes::NoteStore;
pub use students::StudentStore;

use std::path::{Path, PathBuf};

pub const PRODUCTS_FILE: &str = "products.json";
pub const CART_FILE: &str = "cart.json";
pub const STUDENTS_FILE: &str = "students.json";
pub const APPLICATIONS_FILE: &str = "applications.json";
pub const NOTES_DIR: &str = "notes";

/// Well-known locations of every store under the data directory.
#[derive(Clone, Debug)]
pub struct StoragePaths {
    pub products: PathBuf,
    pub cart: PathBuf,
    pub students: PathBuf,
    pub applications: PathBuf,
    pub notes_dir: PathBuf,
}

impl StoragePaths {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            products: data_dir.join(PRODUCTS_FILE),
            cart: data_dir.join(CART_FILE),
            students: data_dir.join(STUDENTS_FILE),
            applications: data_dir.join(APPLICATIONS_FILE),
            notes_dir: data_dir.join(NOTES_DIR),
        }
    }
}
