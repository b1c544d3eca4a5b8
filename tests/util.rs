#![allow(dead_code)]

use std::sync::OnceLock;

use der::{Decode, Encode};
use ecdsa::signature::hazmat::PrehashVerifier;
use pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use x509_cert::Certificate;

use x509gen::cert::algorithm::{HashAlgorithm, KeyFamily, SignatureAlgorithm};
use x509gen::key::{DsaKeySize, KeyPair};
use x509gen::pki::{DigestProvider, SoftwareDigest};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rsa_key() -> &'static KeyPair {
    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(|| KeyPair::generate_rsa(2048).unwrap())
}

// 1024-bit domain parameters keep generation fast enough for a test run.
#[allow(deprecated)]
pub fn dsa_key() -> &'static KeyPair {
    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(|| KeyPair::generate_dsa(DsaKeySize::DSA_1024_160))
}

pub fn p256_key() -> &'static KeyPair {
    static KEY: OnceLock<KeyPair> = OnceLock::new();
    KEY.get_or_init(KeyPair::generate_ecdsa_p256)
}

/// A key able to sign with `algorithm`.
pub fn key_for(algorithm: SignatureAlgorithm) -> &'static KeyPair {
    match algorithm.scheme().family {
        KeyFamily::Rsa => rsa_key(),
        KeyFamily::Dsa => dsa_key(),
        KeyFamily::Ecdsa => p256_key(),
    }
}

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

/// Checks the certificate signature against the public key it embeds,
/// using only what can be read back out of the encoding.
pub fn verify_self_signed(der: &[u8]) {
    let certificate = Certificate::from_der(der).expect("certificate should parse");
    let tbs = certificate.tbs_certificate.to_der().unwrap();
    let spki = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .unwrap();
    let signature = certificate.signature.raw_bytes();

    let algorithm =
        SignatureAlgorithm::from_oid(&certificate.signature_algorithm.oid.to_string()).unwrap();
    let scheme = algorithm.scheme();
    let digest = SoftwareDigest.digest(scheme.hash, &tbs).unwrap();

    match scheme.family {
        KeyFamily::Rsa => {
            let key = RsaPublicKey::from_public_key_der(&spki).unwrap();
            key.verify(pkcs1v15_padding(scheme.hash), &digest, signature)
                .unwrap_or_else(|e| panic!("{algorithm}: {e}"));
        }
        KeyFamily::Dsa => {
            let key = dsa::VerifyingKey::from_public_key_der(&spki).unwrap();
            let signature = dsa::Signature::from_der(signature).unwrap();
            key.verify_prehash(&digest, &signature)
                .unwrap_or_else(|e| panic!("{algorithm}: {e}"));
        }
        KeyFamily::Ecdsa => {
            let key = p256::ecdsa::VerifyingKey::from_public_key_der(&spki).unwrap();
            let signature = p256::ecdsa::Signature::from_der(signature).unwrap();
            key.verify_prehash(&digest, &signature)
                .unwrap_or_else(|e| panic!("{algorithm}: {e}"));
        }
    }
}
