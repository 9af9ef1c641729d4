pub(crate) mod posts;
