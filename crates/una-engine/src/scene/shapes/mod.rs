pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod rect;
pub(crate) mod text;
