//! Code generation

use rand::Rng;
use viscend::verification::{CODE_SPACE, VerificationCode};

/// Uniformly random, zero-padded six digit code.
pub fn generate() -> VerificationCode {
    VerificationCode::from_number(rand::thread_rng().gen_range(0..CODE_SPACE))
}
