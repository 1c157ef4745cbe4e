//! Opaque error taxonomy for the engine (spec §7).
//!
//! Decoders consumed by `verify` recover locally by returning `false` and
//! never surface these variants. Decoders consumed by `sign`/`keygen`
//! (decoding a caller-supplied `sk`) surface [`Error::InvalidEncoding`] —
//! a malformed `sk` is a caller bug, not a protocol event. None of the
//! messages below report which check failed or how many signing attempts
//! were rejected: that information is secret-dependent and must not leak.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Opaque error kinds. Never extend with variants that describe *why* a
/// decode failed beyond "malformed" — see module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A public key, secret key, or signature byte string failed a
    /// structural or range check during decoding.
    #[error("malformed key or signature encoding")]
    InvalidEncoding,

    /// A caller-supplied argument has the wrong length or otherwise
    /// violates an API precondition (seed/rnd not 32 bytes, mismatched
    /// parameter set between inputs).
    #[error("invalid parameter")]
    InvalidParameter,

    /// The bounded rejection-sampling loop in `sign` exhausted its attempt
    /// budget without producing a valid signature. This indicates an
    /// implementation defect, not a property of the input; the message is
    /// intentionally generic.
    #[error("internal fault: signing did not converge")]
    InternalFault,
}
