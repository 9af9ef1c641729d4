pub(crate) mod body_limit;
pub(crate) mod cors;
pub(crate) mod trace;
