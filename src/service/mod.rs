mod collection;
mod resource;
mod transaction;

pub use collection::CollectionService;
pub use resource::ResourceService;
pub use transaction::TransactionService;

use uuid::Uuid;

/// Identifier stamped into freshly templated resources.
pub(crate) fn uuidgen() -> String {
    Uuid::new_v4().to_string()
}
