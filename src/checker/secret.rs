//! Capability token gating checker invocation
//!
//! A single token exists per process. Checkers compare the token they are
//! handed against it by address, so only code inside this crate, which can
//! name the static, is able to invoke them.

/// Message of the invariant violation raised on a direct checker call.
pub const DIRECT_CALL_MESSAGE: &str =
    "Calling TypeChecker validators directly is not supported by the `type-checker` package. \
     Use `TypeChecker::check_prop_types()` to call them.";

/// Opaque capability token. It has no public constructor.
#[derive(Debug)]
pub struct Secret {
    // Non-zero-sized so the static has a unique address.
    _sealed: u8,
}

static SECRET: Secret = Secret { _sealed: 0 };

impl Secret {
    /// The process-wide token.
    pub(crate) fn token() -> &'static Secret {
        &SECRET
    }

    /// True only for the process-wide token itself.
    pub(crate) fn verify(candidate: Option<&Secret>) -> bool {
        candidate.is_some_and(|secret| std::ptr::eq(secret, &SECRET))
    }

    #[cfg(test)]
    pub(crate) fn forged() -> Secret {
        Secret { _sealed: 0 }
    }
}
