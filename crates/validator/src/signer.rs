//! HMAC-SHA256 binding between a session and its server-issued seed.
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes in a freshly issued seed.
pub const SEED_BYTES: usize = 32;

/// A seed together with its hex signature, handed to the client at session start.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignedSeed {
    pub seed: String,
    pub signature: String,
}

/// Signs and verifies session seeds with a shared secret.
#[derive(Clone)]
pub struct SeedSigner {
    secret: Vec<u8>,
}

impl SeedSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length")
    }

    /// Hex HMAC-SHA256 of `seed`.
    pub fn sign(&self, seed: &str) -> String {
        let mut mac = self.mac();
        mac.update(seed.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time check of a hex signature. Non-hex input never verifies.
    pub fn verify(&self, seed: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let mut mac = self.mac();
        mac.update(seed.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    /// Issues a fresh random seed and its signature.
    pub fn issue(&self) -> SignedSeed {
        let mut bytes = [0u8; SEED_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let seed = hex::encode(bytes);
        let signature = self.sign(&seed);
        SignedSeed { seed, signature }
    }
}

impl std::fmt::Debug for SeedSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedSigner").finish_non_exhaustive()
    }
}

/// Issues a signed seed for a new session.
pub fn generate_signed_seed(secret: &str) -> SignedSeed {
    SeedSigner::new(secret).issue()
}
