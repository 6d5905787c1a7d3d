//! Product store module

mod catalog;
mod traits;

pub use catalog::ProductCatalog;
pub use traits::ProductStore;

#[cfg(test)]
pub use traits::MockProductStore;
