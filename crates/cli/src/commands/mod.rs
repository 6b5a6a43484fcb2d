pub(crate) mod migrate;
pub(crate) mod resolve;
pub(crate) mod show;
