pub(crate) mod directives;
pub(crate) mod transform;
