mod util;

use openssl::nid::Nid;
use openssl::x509::X509;
use time::macros::datetime;

use x509gen::cert::X509Generator;
use x509gen::cert::algorithm::SignatureAlgorithm;
use x509gen::cert::params::{CertificateParams, DistinguishedName};
use x509gen::key::KeyPair;

fn generate(algorithm: SignatureAlgorithm, key: &KeyPair) -> X509 {
    let params = CertificateParams::builder()
        .subject(DistinguishedName::from([
            ("C", "PL"),
            ("O", "x509gen"),
            ("CN", "openssl.test"),
        ]))
        .not_before(datetime!(2024-01-01 00:00:00 UTC))
        .serial_number(1)
        .build();
    let der = X509Generator::new(algorithm).generate(&params, key).unwrap();
    X509::from_der(&der).expect("Failed to parse DER")
}

fn common_name(name: &openssl::x509::X509NameRef) -> String {
    let entry = name.entries_by_nid(Nid::COMMONNAME).next().unwrap();
    String::from_utf8(entry.data().as_slice().to_vec()).unwrap()
}

#[test]
fn test_openssl_crate_parses_rsa_cert() {
    util::init_logging();
    let x509 = generate(SignatureAlgorithm::RsaSha256, util::rsa_key());

    assert_eq!(common_name(x509.subject_name()), "openssl.test");
    assert_eq!(common_name(x509.issuer_name()), "openssl.test");
    assert_eq!(x509.version(), 2, "X509 version should be 3 (0-based index)");

    let serial = x509.serial_number().to_bn().unwrap().to_dec_str().unwrap();
    assert_eq!(serial.to_string(), "1", "Serial number should be 1");

    assert_eq!(
        x509.signature_algorithm().object().nid(),
        Nid::SHA256WITHRSAENCRYPTION
    );
    assert_eq!(x509.not_before().to_string(), "Jan  1 00:00:00 2024 GMT");
    assert_eq!(x509.not_after().to_string(), "Jan  1 00:00:00 2044 GMT");

    let public_key = x509.public_key().unwrap();
    assert!(x509.verify(&public_key).unwrap(), "signature should verify");
}

#[test]
fn test_openssl_crate_verifies_ecdsa_cert() {
    let x509 = generate(SignatureAlgorithm::EcdsaSha256, util::p256_key());

    assert_eq!(common_name(x509.subject_name()), "openssl.test");
    assert_eq!(
        x509.signature_algorithm().object().nid(),
        Nid::ECDSA_WITH_SHA256
    );

    let public_key = x509.public_key().unwrap();
    assert!(x509.verify(&public_key).unwrap(), "signature should verify");
}

#[test]
fn test_openssl_crate_verifies_dsa_cert() {
    let x509 = generate(SignatureAlgorithm::DsaSha256, util::dsa_key());

    assert_eq!(common_name(x509.subject_name()), "openssl.test");
    assert_eq!(
        x509.signature_algorithm().object().nid(),
        Nid::DSA_WITH_SHA256
    );

    let public_key = x509.public_key().unwrap();
    assert!(x509.verify(&public_key).unwrap(), "signature should verify");
}
