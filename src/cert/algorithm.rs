use std::fmt;
use std::str::FromStr;

use crate::error::{Result, X509GenError};

/// The public-key family a signing scheme belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Rsa,
    Dsa,
    Ecdsa,
}

impl KeyFamily {
    pub fn name(self) -> &'static str {
        match self {
            KeyFamily::Rsa => "RSA",
            KeyFamily::Dsa => "DSA",
            KeyFamily::Ecdsa => "ECDSA",
        }
    }
}

impl fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Message digests usable in a signing scheme or for fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md2,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 7] = [
        HashAlgorithm::Md2,
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Name as used in signing scheme identifiers, e.g. `SHA256`.
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md2 => "MD2",
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha224 => "SHA224",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Md2 | HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 => 28,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// MD2, MD5 and SHA-1 are kept for compatibility only.
    pub fn is_legacy(self) -> bool {
        matches!(
            self,
            HashAlgorithm::Md2 | HashAlgorithm::Md5 | HashAlgorithm::Sha1
        )
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = X509GenError;

    /// Accepts `SHA256` as well as `SHA-256`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.replace('-', "");
        HashAlgorithm::ALL
            .into_iter()
            .find(|hash| hash.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| X509GenError::UnsupportedAlgorithm(format!("unknown hash {s:?}")))
    }
}

/// Identifier handed to a [`SignatureProvider`](crate::pki::SignatureProvider):
/// which hash to apply and which key family signs it.
///
/// Displays in the conventional `SHA256withRSA` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SigningScheme {
    pub family: KeyFamily,
    pub hash: HashAlgorithm,
}

impl fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}with{}", self.hash, self.family)
    }
}

impl FromStr for SigningScheme {
    type Err = X509GenError;

    fn from_str(s: &str) -> Result<Self> {
        let unsupported = || X509GenError::UnsupportedAlgorithm(format!("unknown scheme {s:?}"));
        let (hash, family) = s.split_once("with").ok_or_else(unsupported)?;
        let family = [KeyFamily::Rsa, KeyFamily::Dsa, KeyFamily::Ecdsa]
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(family))
            .ok_or_else(unsupported)?;
        let hash = hash.parse().map_err(|_| unsupported())?;
        Ok(SigningScheme { family, hash })
    }
}

/// Signature algorithms a certificate can be signed with.
///
/// Each case carries the OID written into both `AlgorithmIdentifier` fields
/// and the [`SigningScheme`] used to produce the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// md2WithRSAEncryption.
    RsaMd2,
    /// md5WithRSAEncryption.
    RsaMd5,
    /// sha1WithRSAEncryption.
    RsaSha1,
    /// sha224WithRSAEncryption.
    RsaSha224,
    /// sha256WithRSAEncryption.
    RsaSha256,
    /// sha384WithRSAEncryption.
    RsaSha384,
    /// sha512WithRSAEncryption.
    RsaSha512,
    /// id-dsa-with-sha1.
    DsaSha1,
    /// id-dsa-with-sha224.
    DsaSha224,
    /// id-dsa-with-sha256.
    DsaSha256,
    /// ecdsa-with-SHA1.
    EcdsaSha1,
    /// ecdsa-with-SHA224.
    EcdsaSha224,
    /// ecdsa-with-SHA256.
    EcdsaSha256,
    /// ecdsa-with-SHA384.
    EcdsaSha384,
    /// ecdsa-with-SHA512.
    EcdsaSha512,
}

impl SignatureAlgorithm {
    pub const ALL: [SignatureAlgorithm; 15] = [
        SignatureAlgorithm::RsaMd2,
        SignatureAlgorithm::RsaMd5,
        SignatureAlgorithm::RsaSha1,
        SignatureAlgorithm::RsaSha224,
        SignatureAlgorithm::RsaSha256,
        SignatureAlgorithm::RsaSha384,
        SignatureAlgorithm::RsaSha512,
        SignatureAlgorithm::DsaSha1,
        SignatureAlgorithm::DsaSha224,
        SignatureAlgorithm::DsaSha256,
        SignatureAlgorithm::EcdsaSha1,
        SignatureAlgorithm::EcdsaSha224,
        SignatureAlgorithm::EcdsaSha256,
        SignatureAlgorithm::EcdsaSha384,
        SignatureAlgorithm::EcdsaSha512,
    ];

    /// Dotted-decimal object identifier of the algorithm.
    pub fn oid(self) -> &'static str {
        match self {
            SignatureAlgorithm::RsaMd2 => "1.2.840.113549.1.1.2",
            SignatureAlgorithm::RsaMd5 => "1.2.840.113549.1.1.4",
            SignatureAlgorithm::RsaSha1 => "1.2.840.113549.1.1.5",
            SignatureAlgorithm::RsaSha224 => "1.2.840.113549.1.1.14",
            SignatureAlgorithm::RsaSha256 => "1.2.840.113549.1.1.11",
            SignatureAlgorithm::RsaSha384 => "1.2.840.113549.1.1.12",
            SignatureAlgorithm::RsaSha512 => "1.2.840.113549.1.1.13",
            SignatureAlgorithm::DsaSha1 => "1.2.840.10040.4.3",
            SignatureAlgorithm::DsaSha224 => "2.16.840.1.101.3.4.3.1",
            SignatureAlgorithm::DsaSha256 => "2.16.840.1.101.3.4.3.2",
            SignatureAlgorithm::EcdsaSha1 => "1.2.840.10045.4.1",
            SignatureAlgorithm::EcdsaSha224 => "1.2.840.10045.4.3.1",
            SignatureAlgorithm::EcdsaSha256 => "1.2.840.10045.4.3.2",
            SignatureAlgorithm::EcdsaSha384 => "1.2.840.10045.4.3.3",
            SignatureAlgorithm::EcdsaSha512 => "1.2.840.10045.4.3.4",
        }
    }

    /// The scheme the signer has to apply for this algorithm.
    pub fn scheme(self) -> SigningScheme {
        use HashAlgorithm::*;
        use KeyFamily::*;

        let (family, hash) = match self {
            SignatureAlgorithm::RsaMd2 => (Rsa, Md2),
            SignatureAlgorithm::RsaMd5 => (Rsa, Md5),
            SignatureAlgorithm::RsaSha1 => (Rsa, Sha1),
            SignatureAlgorithm::RsaSha224 => (Rsa, Sha224),
            SignatureAlgorithm::RsaSha256 => (Rsa, Sha256),
            SignatureAlgorithm::RsaSha384 => (Rsa, Sha384),
            SignatureAlgorithm::RsaSha512 => (Rsa, Sha512),
            SignatureAlgorithm::DsaSha1 => (Dsa, Sha1),
            SignatureAlgorithm::DsaSha224 => (Dsa, Sha224),
            SignatureAlgorithm::DsaSha256 => (Dsa, Sha256),
            SignatureAlgorithm::EcdsaSha1 => (Ecdsa, Sha1),
            SignatureAlgorithm::EcdsaSha224 => (Ecdsa, Sha224),
            SignatureAlgorithm::EcdsaSha256 => (Ecdsa, Sha256),
            SignatureAlgorithm::EcdsaSha384 => (Ecdsa, Sha384),
            SignatureAlgorithm::EcdsaSha512 => (Ecdsa, Sha512),
        };
        SigningScheme { family, hash }
    }

    /// Looks an algorithm up by its dotted-decimal OID.
    pub fn from_oid(oid: &str) -> Result<Self> {
        SignatureAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.oid() == oid)
            .ok_or_else(|| {
                X509GenError::UnsupportedAlgorithm(format!("no signature algorithm for OID {oid}"))
            })
    }

    /// Looks an algorithm up by its signing scheme.
    pub fn from_scheme(scheme: SigningScheme) -> Result<Self> {
        SignatureAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.scheme() == scheme)
            .ok_or_else(|| {
                X509GenError::UnsupportedAlgorithm(format!("no signature algorithm for {scheme}"))
            })
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.scheme(), f)
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = X509GenError;

    /// Parses a scheme name such as `SHA256withECDSA`.
    fn from_str(s: &str) -> Result<Self> {
        SignatureAlgorithm::from_scheme(s.parse()?)
    }
}
