// IT resource recommendation: corpus synthesis, the fitted IT bundle and
// its cluster-then-rank suggestion query.

pub mod corpus;
pub mod handlers;
pub mod suggest;
