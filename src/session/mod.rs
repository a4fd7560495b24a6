pub(crate) mod batch;
pub(crate) mod sink;
pub(crate) mod snapshot;
