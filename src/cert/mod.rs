pub mod algorithm;
pub mod params;

use std::fmt;

use log::{debug, trace, warn};

use crate::asn1::DerBuilder;
use crate::error::Result;
use crate::pki::{DigestProvider, SignatureProvider, SubjectPublicKey};
use crate::tbs_certificate::{TbsCertificate, algorithm_identifier};
use algorithm::{HashAlgorithm, SignatureAlgorithm};
use params::{AttributeLookup, CertificateParams, StandardAttributes};

/// Hash used by [`X509Generator::fingerprint`].
pub const DEFAULT_FINGERPRINT_HASH: HashAlgorithm = HashAlgorithm::Sha1;

/// Generates DER encoded X.509v3 certificates signed with one
/// [`SignatureAlgorithm`].
///
/// A generator holds no per-certificate state; every [`generate`](Self::generate)
/// call builds its own structures, so one instance can be shared between
/// threads.
///
/// ```rust,no_run
/// use x509gen::cert::X509Generator;
/// use x509gen::cert::algorithm::SignatureAlgorithm;
/// use x509gen::cert::params::{CertificateParams, DistinguishedName};
/// use x509gen::key::KeyPair;
///
/// # fn main() -> Result<(), x509gen::error::X509GenError> {
/// let key_pair = KeyPair::generate_rsa(2048)?;
/// let params = CertificateParams::builder()
///     .subject(DistinguishedName::from([("CN", "GeneratorTest")]))
///     .serial_number(1)
///     .build();
///
/// let der = X509Generator::new(SignatureAlgorithm::RsaSha256).generate(&params, &key_pair)?;
/// println!("{}", x509gen::cert::format_fingerprint(&X509Generator::fingerprint(&der)));
/// # Ok(())
/// # }
/// ```
pub struct X509Generator {
    signature_algorithm: SignatureAlgorithm,
    attributes: Box<dyn AttributeLookup>,
}

impl X509Generator {
    /// A generator resolving names through [`StandardAttributes`].
    pub fn new(signature_algorithm: SignatureAlgorithm) -> Self {
        Self {
            signature_algorithm,
            attributes: Box::new(StandardAttributes),
        }
    }

    /// Replaces the attribute table used to resolve RDN keys.
    pub fn with_attribute_lookup(mut self, lookup: impl AttributeLookup + 'static) -> Self {
        self.attributes = Box::new(lookup);
        self
    }

    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.signature_algorithm
    }

    /// Builds, signs and encodes a certificate.
    ///
    /// The subject and issuer names are resolved before the key is asked to
    /// sign anything, so a bad attribute never reaches the signer. The
    /// returned bytes are the DER encoding of
    ///
    /// ```text
    /// Certificate ::= SEQUENCE {
    ///     tbsCertificate       TBSCertificate,
    ///     signatureAlgorithm   AlgorithmIdentifier,
    ///     signatureValue       BIT STRING }
    /// ```
    pub fn generate<K>(&self, params: &CertificateParams, key: &K) -> Result<Vec<u8>>
    where
        K: SubjectPublicKey + SignatureProvider + ?Sized,
    {
        let scheme = self.signature_algorithm.scheme();
        debug!(
            "generating certificate serial={} algorithm={}",
            params.serial_number, scheme
        );
        if scheme.hash.is_legacy() {
            warn!("{scheme} relies on a hash that is no longer collision resistant");
        }

        let tbs_certificate = TbsCertificate {
            serial_number: params.serial_number.clone(),
            signature_algorithm: self.signature_algorithm,
            issuer: params.issuer().clone(),
            validity: params.validity()?,
            subject: params.subject.clone(),
            subject_public_key_info: key.subject_public_key_info()?,
        };
        let tbs_der = tbs_certificate.to_der(self.attributes.as_ref())?;
        trace!("encoded TBSCertificate, {} bytes", tbs_der.len());

        let signature = key.sign(scheme, &tbs_der)?;
        trace!("signed with {scheme}, {} byte signature", signature.len());

        let algorithm = algorithm_identifier(self.signature_algorithm)?;
        let mut certificate = DerBuilder::new();
        certificate
            .append_raw(&tbs_der)
            .append_sequence(&algorithm)
            .append_bit_string(&signature);
        Ok(certificate.to_der())
    }

    /// SHA-1 fingerprint of an encoded certificate.
    pub fn fingerprint(certificate: &[u8]) -> Vec<u8> {
        crate::pki::software_digest(DEFAULT_FINGERPRINT_HASH, certificate)
    }

    /// Fingerprint of an encoded certificate using any hash `hasher` offers.
    pub fn fingerprint_with<H: DigestProvider + ?Sized>(
        hasher: &H,
        algorithm: HashAlgorithm,
        certificate: &[u8],
    ) -> Result<Vec<u8>> {
        hasher.digest(algorithm, certificate)
    }
}

impl Default for X509Generator {
    fn default() -> Self {
        Self::new(SignatureAlgorithm::RsaSha256)
    }
}

impl fmt::Debug for X509Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X509Generator")
            .field("signature_algorithm", &self.signature_algorithm)
            .finish_non_exhaustive()
    }
}

/// Renders a fingerprint the way certificate viewers show it, `AB:CD:...`.
pub fn format_fingerprint(fingerprint: &[u8]) -> String {
    fingerprint
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}
