//! Capabilities the certificate generator consumes from a cryptographic
//! backend.
//!
//! The generator never touches key material or hash state directly: it asks a
//! [`SubjectPublicKey`] for the DER `SubjectPublicKeyInfo` to embed, a
//! [`SignatureProvider`] to sign the serialized `TBSCertificate`, and a
//! [`DigestProvider`] to fingerprint finished certificates. [`KeyPair`] and
//! [`SoftwareDigest`] implement them on top of the RustCrypto crates; any
//! other backend (an HSM, a platform keystore) can be plugged in the same way.
//!
//! [`KeyPair`]: crate::key::KeyPair

use md2::Md2;
use md5::Md5;
use sha1::{Digest, Sha1};
use sha2::{Sha224, Sha256, Sha384, Sha512};

use crate::cert::algorithm::{HashAlgorithm, SigningScheme};
use crate::error::Result;

/// Source of the public key placed in a certificate.
pub trait SubjectPublicKey {
    /// The DER encoded `SubjectPublicKeyInfo`.
    fn subject_public_key_info(&self) -> Result<Vec<u8>>;
}

/// Signs messages with a private key the caller never sees.
pub trait SignatureProvider {
    /// Hashes `message` with `scheme.hash` and signs the digest.
    ///
    /// Returns the signature as it is carried in an X.509 `signatureValue`:
    /// the raw PKCS#1 v1.5 block for RSA and a DER `SEQUENCE { r, s }` for DSA
    /// and ECDSA. A scheme the key cannot produce fails with
    /// `UnsupportedAlgorithm`; a failing primitive with `SigningFailure`.
    fn sign(&self, scheme: SigningScheme, message: &[u8]) -> Result<Vec<u8>>;
}

/// One-shot message digests.
pub trait DigestProvider {
    fn digest(&self, algorithm: HashAlgorithm, data: &[u8]) -> Result<Vec<u8>>;
}

impl<T: SubjectPublicKey + ?Sized> SubjectPublicKey for &T {
    fn subject_public_key_info(&self) -> Result<Vec<u8>> {
        (**self).subject_public_key_info()
    }
}

impl<T: SignatureProvider + ?Sized> SignatureProvider for &T {
    fn sign(&self, scheme: SigningScheme, message: &[u8]) -> Result<Vec<u8>> {
        (**self).sign(scheme, message)
    }
}

impl<T: DigestProvider + ?Sized> DigestProvider for &T {
    fn digest(&self, algorithm: HashAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        (**self).digest(algorithm, data)
    }
}

/// Digest of `data`, computed with the RustCrypto hash crates.
pub(crate) fn software_digest(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Md2 => Md2::digest(data).to_vec(),
        HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
        HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        HashAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// [`DigestProvider`] backed by the RustCrypto hash implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareDigest;

impl DigestProvider for SoftwareDigest {
    fn digest(&self, algorithm: HashAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        Ok(software_digest(algorithm, data))
    }
}
