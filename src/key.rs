use std::fmt;

use der::Encode;
use dsa::{Components, SigningKey as DsaSigningKey};
use ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::{Signature as P256Signature, SigningKey as P256SigningKey};
use p384::ecdsa::{Signature as P384Signature, SigningKey as P384SigningKey};
use pkcs8::EncodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};

pub use dsa::KeySize as DsaKeySize;

use crate::cert::algorithm::{HashAlgorithm, KeyFamily, SigningScheme};
use crate::error::{Result, X509GenError};
use crate::pki::{SignatureProvider, SubjectPublicKey, software_digest};

/// Supported key types for certificate operations.
///
/// Every variant can export its `SubjectPublicKeyInfo` and sign with any
/// [`SigningScheme`] of its own [`KeyFamily`].
#[derive(Clone)]
pub enum KeyPair {
    Rsa {
        private: Box<RsaPrivateKey>,
        public: RsaPublicKey,
    },
    Dsa {
        signing_key: Box<DsaSigningKey>,
    },
    EcdsaP256 {
        signing_key: P256SigningKey,
    },
    EcdsaP384 {
        signing_key: P384SigningKey,
    },
}

impl KeyPair {
    /// Generate an RSA key pair with the specified number of bits.
    pub fn generate_rsa(bits: usize) -> Result<Self> {
        let mut rng = rand_core::OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| X509GenError::KeyGenerationError(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        Ok(KeyPair::Rsa {
            private: Box::new(private),
            public,
        })
    }

    /// Generate a DSA key pair with fresh domain parameters.
    pub fn generate_dsa(key_size: DsaKeySize) -> Self {
        let mut rng = rand_core::OsRng;
        let components = Components::generate(&mut rng, key_size);
        let signing_key = DsaSigningKey::generate(&mut rng, components);
        KeyPair::Dsa {
            signing_key: Box::new(signing_key),
        }
    }

    /// Generate an ECDSA P-256 key pair.
    pub fn generate_ecdsa_p256() -> Self {
        let mut rng = rand_core::OsRng;
        KeyPair::EcdsaP256 {
            signing_key: P256SigningKey::random(&mut rng),
        }
    }

    /// Generate an ECDSA P-384 key pair.
    pub fn generate_ecdsa_p384() -> Self {
        let mut rng = rand_core::OsRng;
        KeyPair::EcdsaP384 {
            signing_key: P384SigningKey::random(&mut rng),
        }
    }

    pub fn family(&self) -> KeyFamily {
        match self {
            KeyPair::Rsa { .. } => KeyFamily::Rsa,
            KeyPair::Dsa { .. } => KeyFamily::Dsa,
            KeyPair::EcdsaP256 { .. } | KeyPair::EcdsaP384 { .. } => KeyFamily::Ecdsa,
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            KeyPair::Rsa { .. } => "Rsa",
            KeyPair::Dsa { .. } => "Dsa",
            KeyPair::EcdsaP256 { .. } => "EcdsaP256",
            KeyPair::EcdsaP384 { .. } => "EcdsaP384",
        };
        f.debug_struct("KeyPair").field("kind", &kind).finish_non_exhaustive()
    }
}

/// PKCS#1 v1.5 padding carrying the `DigestInfo` prefix for `hash`.
fn pkcs1v15_padding(hash: HashAlgorithm) -> Pkcs1v15Sign {
    match hash {
        HashAlgorithm::Md2 => Pkcs1v15Sign::new::<md2::Md2>(),
        HashAlgorithm::Md5 => Pkcs1v15Sign::new::<md5::Md5>(),
        HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<sha1::Sha1>(),
        HashAlgorithm::Sha224 => Pkcs1v15Sign::new::<sha2::Sha224>(),
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<sha2::Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<sha2::Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<sha2::Sha512>(),
    }
}

impl SubjectPublicKey for KeyPair {
    fn subject_public_key_info(&self) -> Result<Vec<u8>> {
        let document = match self {
            KeyPair::Rsa { public, .. } => public.to_public_key_der()?,
            KeyPair::Dsa { signing_key } => signing_key.verifying_key().to_public_key_der()?,
            KeyPair::EcdsaP256 { signing_key } => {
                signing_key.verifying_key().to_public_key_der()?
            }
            KeyPair::EcdsaP384 { signing_key } => {
                signing_key.verifying_key().to_public_key_der()?
            }
        };
        Ok(document.as_bytes().to_vec())
    }
}

impl SignatureProvider for KeyPair {
    fn sign(&self, scheme: SigningScheme, message: &[u8]) -> Result<Vec<u8>> {
        if scheme.family != self.family() {
            return Err(X509GenError::UnsupportedAlgorithm(format!(
                "{scheme} cannot be produced with a {} key",
                self.family()
            )));
        }

        let digest = software_digest(scheme.hash, message);
        match self {
            KeyPair::Rsa { private, .. } => {
                Ok(private.sign(pkcs1v15_padding(scheme.hash), &digest)?)
            }
            KeyPair::Dsa { signing_key } => {
                let signature: dsa::Signature = signing_key.sign_prehash(&digest)?;
                Ok(signature.to_der()?)
            }
            KeyPair::EcdsaP256 { signing_key } => {
                let signature: P256Signature = signing_key.sign_prehash(&digest)?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
            KeyPair::EcdsaP384 { signing_key } => {
                let signature: P384Signature = signing_key.sign_prehash(&digest)?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
        }
    }
}
