mod builders;
mod stores;

pub use builders::*;
pub use stores::*;
