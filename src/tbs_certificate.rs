use num_bigint::BigInt;

use crate::asn1::DerBuilder;
use crate::cert::algorithm::SignatureAlgorithm;
use crate::cert::params::{AttributeLookup, DistinguishedName, Validity};
use crate::error::{Result, X509GenError};

/// X.509 version field value for v3 certificates.
const VERSION_V3: i32 = 2;

/// Represents the "To Be Signed" (TBS) portion of an X.509 certificate.
///
/// # Fields
/// * `serial_number` - The serial number of the certificate.
/// * `signature_algorithm` - The algorithm the issuer signs with.
/// * `issuer` - The distinguished name of the certificate issuer.
/// * `validity` - The validity period.
/// * `subject` - The distinguished name of the certificate subject.
/// * `subject_public_key_info` - DER encoded `SubjectPublicKeyInfo`, embedded as-is.
#[derive(Clone, Debug)]
pub struct TbsCertificate {
    pub serial_number: BigInt,
    pub signature_algorithm: SignatureAlgorithm,
    pub issuer: DistinguishedName,
    pub validity: Validity,
    pub subject: DistinguishedName,
    pub subject_public_key_info: Vec<u8>,
}

impl TbsCertificate {
    /// Encodes the `TBSCertificate` SEQUENCE.
    ///
    /// ```text
    /// TBSCertificate ::= SEQUENCE {
    ///     version         [0] EXPLICIT Version DEFAULT v1,
    ///     serialNumber        CertificateSerialNumber,
    ///     signature           AlgorithmIdentifier,
    ///     issuer              Name,
    ///     validity            Validity,
    ///     subject             Name,
    ///     subjectPublicKeyInfo SubjectPublicKeyInfo }
    /// ```
    ///
    /// Names are resolved first, so an unknown attribute fails before any
    /// other field is encoded.
    pub fn to_der(&self, attributes: &dyn AttributeLookup) -> Result<Vec<u8>> {
        let issuer = encode_name(&self.issuer, attributes)?;
        let subject = encode_name(&self.subject, attributes)?;
        let algorithm = algorithm_identifier(self.signature_algorithm)?;
        let validity = encode_validity(&self.validity)?;

        let mut version = DerBuilder::new();
        version.append_integer(VERSION_V3);

        let mut tbs = DerBuilder::new();
        tbs.append_explicit(0, &version)?
            .append_big_integer(&self.serial_number)
            .append_sequence(&algorithm)
            .append_sequence(&issuer)
            .append_sequence(&validity)
            .append_sequence(&subject)
            .append_raw(&self.subject_public_key_info);
        Ok(tbs.to_der())
    }
}

/// `AlgorithmIdentifier` contents: the algorithm OID followed by NULL
/// parameters, for every key family.
pub(crate) fn algorithm_identifier(algorithm: SignatureAlgorithm) -> Result<DerBuilder> {
    let mut identifier = DerBuilder::new();
    identifier.append_object_id(algorithm.oid())?.append_null();
    Ok(identifier)
}

/// `Name` contents: one single-valued RDN SET per entry, in entry order.
pub(crate) fn encode_name(
    name: &DistinguishedName,
    attributes: &dyn AttributeLookup,
) -> Result<DerBuilder> {
    let mut rdn_sequence = DerBuilder::new();
    for (attribute, value) in name.entries() {
        let oid = attributes.oid(attribute).ok_or_else(|| {
            X509GenError::InvalidArgument(format!("unknown RDN attribute {attribute:?}"))
        })?;

        let mut type_and_value = DerBuilder::new();
        type_and_value.append_object_id(oid)?.append_string(value, true);

        let mut rdn = DerBuilder::new();
        rdn.append_sequence(&type_and_value);
        rdn_sequence.append_set(&rdn);
    }
    Ok(rdn_sequence)
}

/// `Validity` contents: notBefore and notAfter as UTCTime.
pub(crate) fn encode_validity(validity: &Validity) -> Result<DerBuilder> {
    let mut encoded = DerBuilder::new();
    encoded
        .append_utc_time(&validity.not_before)?
        .append_utc_time(&validity.not_after)?;
    Ok(encoded)
}
