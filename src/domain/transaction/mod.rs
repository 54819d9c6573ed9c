//! Transaction aggregate: the payment settling a device

pub mod model;
pub mod repository;

pub use model::{PaymentMethod, Transaction};
pub use repository::TransactionRepository;
