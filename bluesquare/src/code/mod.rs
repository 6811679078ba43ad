pub(crate) mod matrix;
pub(crate) mod source;
