// Driven port - durable key-value storage (output port)

use crate::application::errors::StorageError;

#[cfg_attr(test, mockall::automock)]
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
