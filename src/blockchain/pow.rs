use log::debug;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::PowError;

/// Required prefix of the digest (fixed difficulty: four hex zeros).
pub const DIFFICULTY_PREFIX: &str = "0000";

/// How many candidates are tried between two looks at the cancel flag.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Check the puzzle: SHA-256 of the decimal `proof² - previous_proof²`
/// must start with [`DIFFICULTY_PREFIX`].
pub fn verify(proof: u64, previous_proof: u64) -> bool {
    let mut hasher = Sha256::new();
    hasher.update(square_difference(proof, previous_proof).as_bytes());
    hex::encode(hasher.finalize()).starts_with(DIFFICULTY_PREFIX)
}

/// Exact `proof² - previous_proof²` in base 10, with a leading `-` when negative.
fn square_difference(proof: u64, previous_proof: u64) -> String {
    let a = u128::from(proof) * u128::from(proof);
    let b = u128::from(previous_proof) * u128::from(previous_proof);
    if a >= b {
        (a - b).to_string()
    } else {
        format!("-{}", b - a)
    }
}

/// Finds the proof that follows `previous_proof`.
pub trait ProofSearch {
    fn solve(&self, previous_proof: u64, cancel: &AtomicBool) -> Result<u64, PowError>;
}

/// Brute-force search for the next proof.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofOfWork {
    max_attempts: Option<u64>,
}

impl ProofOfWork {
    /// Search until a proof is found or the caller cancels.
    pub fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Give up with [`PowError::Exhausted`] after `max_attempts` candidates.
    pub fn with_max_attempts(max_attempts: u64) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    /// Try candidates 1, 2, 3, ... and return the first one that verifies
    /// against `previous_proof`.
    pub fn solve(&self, previous_proof: u64, cancel: &AtomicBool) -> Result<u64, PowError> {
        let mut candidate: u64 = 1;
        let mut attempts: u64 = 0;
        loop {
            if attempts % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
                debug!("POW - cancelled after {} attempts", attempts);
                return Err(PowError::Cancelled);
            }
            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(PowError::Exhausted { attempts });
            }

            attempts += 1;
            if verify(candidate, previous_proof) {
                debug!(
                    "POW - found proof {} for previous {} in {} attempts",
                    candidate, previous_proof, attempts
                );
                return Ok(candidate);
            }
            candidate = candidate
                .checked_add(1)
                .ok_or(PowError::Exhausted { attempts })?;
        }
    }
}

impl ProofSearch for ProofOfWork {
    fn solve(&self, previous_proof: u64, cancel: &AtomicBool) -> Result<u64, PowError> {
        ProofOfWork::solve(self, previous_proof, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::{ProofOfWork, square_difference, verify};
    use crate::error::PowError;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn solves_known_vectors() {
        let pow = ProofOfWork::unbounded();
        let go = AtomicBool::new(false);
        assert_eq!(pow.solve(1, &go), Ok(533));
        assert_eq!(pow.solve(533, &go), Ok(45293));
    }

    #[test]
    fn solve_then_verify_agrees() {
        let pow = ProofOfWork::unbounded();
        let go = AtomicBool::new(false);
        for previous in [1u64, 7, 533, 100_000] {
            let proof = pow.solve(previous, &go).unwrap();
            assert!(verify(proof, previous), "proof {proof} for {previous}");
        }
    }

    #[test]
    fn negative_difference_keeps_its_sign() {
        assert_eq!(square_difference(1, 533), "-284088");
        assert_eq!(square_difference(533, 1), "284088");
        assert_eq!(square_difference(5, 5), "0");
        // "-284088" hashes to 601a..., so the reversed pair must not pass.
        assert!(verify(533, 1));
        assert!(!verify(1, 533));
    }

    #[test]
    fn square_difference_does_not_overflow() {
        assert_eq!(
            square_difference(u64::MAX, 0),
            "340282366920938463426481119284349108225"
        );
        assert_eq!(
            square_difference(0, u64::MAX),
            "-340282366920938463426481119284349108225"
        );
    }

    #[test]
    fn attempt_cap_is_inclusive() {
        let go = AtomicBool::new(false);
        assert_eq!(ProofOfWork::with_max_attempts(533).solve(1, &go), Ok(533));
        assert_eq!(
            ProofOfWork::with_max_attempts(532).solve(1, &go),
            Err(PowError::Exhausted { attempts: 532 })
        );
    }

    #[test]
    fn raised_flag_cancels_search() {
        let stop = AtomicBool::new(true);
        assert_eq!(
            ProofOfWork::unbounded().solve(1, &stop),
            Err(PowError::Cancelled)
        );
    }
}
