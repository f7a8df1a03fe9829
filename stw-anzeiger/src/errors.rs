//! Standard fare error handling.

pub use failure::Error;
use failure_derive::Fail;
use serde_json::Error as JsonError;
use std::io::Error as IoError;
use stw_util::impl_from_for_error;
use stw_util::http::StatusCode;

/// Error that could occur when processing a request.
#[derive(Fail, Debug)]
pub enum AnzeigerError {
    /// The API path doesn't exist.
    #[fail(display = "invalid path")]
    InvalidPath,
    /// The request carried no body.
    #[fail(display = "request body missing")]
    NoBody,
    /// The request body wasn't valid JSON for the expected type.
    #[fail(display = "JSON: {}", _0)]
    Json(JsonError),
    /// Reading the reference-data file failed.
    #[fail(display = "I/O: {}", _0)]
    Io(IoError),
}

impl StatusCode for AnzeigerError {
    fn status_code(&self) -> u16 {
        use self::AnzeigerError::*;

        match *self {
            InvalidPath => 400,
            NoBody => 400,
            Json(_) => 400,
            Io(_) => 500,
        }
    }
}

pub type AnzeigerResult<T, E = AnzeigerError> = ::std::result::Result<T, E>;
pub type Result<T, E = Error> = ::std::result::Result<T, E>;

impl_from_for_error!(AnzeigerError,
                     JsonError => Json,
                     IoError => Io);
