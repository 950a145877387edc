//! Pure transformations: encoding rules, auth header computation and the
//! finalized request both backends are built from.

mod auth;
mod encode;
mod prepare;

pub use auth::Credentials;
pub use encode::{FORM_CONTENT_TYPE, append_query, encode_pairs, encode_value};
pub(crate) use encode::header_pair;
pub use prepare::{
    AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, EmitWarning, PreparedBody, PreparedRequest,
    TRANSFER_ENCODING,
};
