use thiserror::Error;

/// Errors surfaced by the pairing engine.
///
/// Points at infinity are not errors: they contribute the identity to
/// any (multi-)pairing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PairingError {
    #[error("length mismatch: {g1} G1 points but {g2} G2 points")]
    LengthMismatch { g1: usize, g2: usize },

    #[error("empty pairing input")]
    EmptyInput,

    #[error("cubical pairing unsupported: {0}")]
    CubicalUnsupported(&'static str),

    #[error("invalid curve configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("a Miller loop worker panicked")]
    WorkerPanicked,
}

pub type Result<T> = core::result::Result<T, PairingError>;

#[cfg(test)]
mod tests {
    use super::PairingError;

    #[test]
    fn messages() {
        let e = PairingError::LengthMismatch { g1: 2, g2: 3 };
        assert_eq!(e.to_string(), "length mismatch: 2 G1 points but 3 G2 points");
        assert_eq!(PairingError::CubicalUnsupported("BN family").to_string(),
            "cubical pairing unsupported: BN family");
    }
}
