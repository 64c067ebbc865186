pub mod consensus;
pub mod fetch;
pub mod registry;

pub use consensus::ConsensusResolver;
pub use fetch::HttpChainFetcher;
pub use registry::NodeRegistry;
