//! Request description types.
//!
//! [`RequestSpec`] accumulates configuration; [`BodySource`] owns the
//! single-use body stream; [`HttpMethod`] is the closed verb set.

mod body;
mod method;
pub(crate) mod spec;

pub use body::BodySource;
pub use method::HttpMethod;
pub use spec::RequestSpec;
