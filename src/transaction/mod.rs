pub mod mempool;
pub mod model;

pub use mempool::Mempool;
pub use model::Transaction;
