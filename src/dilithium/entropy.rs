//! Randomness supplied by the host
//!
//! Key generation and hedged signing draw their randomness through
//! [`EntropySource`]. Any cryptographically secure `rand_core` generator
//! qualifies; [`HostEntropy`] reads the platform generator directly, which on
//! `wasm32` with the `wasm` feature is `crypto.getRandomValues`.

use crate::{Error, Result};
use rand_core::{CryptoRng, RngCore};

/// A source of cryptographically secure random bytes
pub trait EntropySource {
    /// Fill `dest` entirely with random bytes.
    ///
    /// A failure must be reported, never papered over with weaker randomness.
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<R: RngCore + CryptoRng> EntropySource for R {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.try_fill_bytes(dest).map_err(|_| {
            log::warn!("entropy source failed to fill {} bytes", dest.len());
            Error::EntropyFailure
        })
    }
}

/// The host platform's secure random generator
#[derive(Debug, Clone, Copy, Default)]
pub struct HostEntropy;

impl EntropySource for HostEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        #[cfg(feature = "std")]
        {
            getrandom::getrandom(dest).map_err(|err| {
                log::warn!("host entropy unavailable: {}", err);
                Error::EntropyFailure
            })
        }
        #[cfg(not(feature = "std"))]
        {
            let _ = dest;
            log::warn!("no host entropy source in no_std builds");
            Err(Error::EntropyFailure)
        }
    }
}
