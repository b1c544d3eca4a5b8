//! # x509gen - Self-Signed X.509v3 Certificates in Pure Rust
//!
//! x509gen builds DER encoded X.509v3 certificates from a subject name, a
//! validity period, a serial number and a key pair. It carries its own small
//! ASN.1 DER encoder and leaves the cryptography to the rustcrypto crates
//! behind a pair of capability traits, so any signer that can hash-and-sign
//! can be plugged in.
//!
//! ## Supported Signature Algorithms
//!
//! - **RSA** (PKCS#1 v1.5): MD2, MD5, SHA-1, SHA-224, SHA-256, SHA-384, SHA-512
//! - **DSA**: SHA-1, SHA-224, SHA-256
//! - **ECDSA**: SHA-1, SHA-224, SHA-256, SHA-384, SHA-512 on P-256 and P-384
//!
//! Certificates carry no extensions and are always signed by the key whose
//! public half they contain.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use x509gen::{
//!     cert::{X509Generator, algorithm::SignatureAlgorithm, format_fingerprint},
//!     cert::params::{CertificateParams, DistinguishedName},
//!     key::KeyPair,
//! };
//!
//! # fn main() -> Result<(), x509gen::error::X509GenError> {
//! // Generate an RSA key pair
//! let key_pair = KeyPair::generate_rsa(2048)?;
//!
//! // Only the subject is required; the issuer defaults to the subject
//! // and the certificate is valid for twenty years from now.
//! let params = CertificateParams::builder()
//!     .subject(DistinguishedName::from([
//!         ("CN", "example.com"),
//!         ("O", "Example Corp"),
//!         ("C", "US"),
//!     ]))
//!     .build();
//!
//! let generator = X509Generator::new(SignatureAlgorithm::RsaSha256);
//! let der = generator.generate(&params, &key_pair)?;
//!
//! println!("SHA1 fingerprint: {}", format_fingerprint(&X509Generator::fingerprint(&der)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Encoding ASN.1 by Hand
//!
//! The [`asn1::DerBuilder`] used for certificates is public and can encode
//! any structure made of the primitive types it knows:
//!
//! ```rust
//! use x509gen::asn1::DerBuilder;
//!
//! # fn main() -> Result<(), x509gen::error::X509GenError> {
//! let mut builder = DerBuilder::new();
//! builder.append_integer(5).append_object_id("1.2.840.113549")?;
//! assert_eq!(
//!     builder.to_der(),
//!     [0x30, 0x0b, 0x02, 0x01, 0x05, 0x06, 0x06, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns an [`error::X509GenError`]:
//!
//! ```rust
//! use x509gen::{
//!     cert::{X509Generator, algorithm::SignatureAlgorithm},
//!     cert::params::{CertificateParams, DistinguishedName},
//!     error::X509GenError,
//!     key::KeyPair,
//! };
//!
//! let key_pair = KeyPair::generate_ecdsa_p256();
//! let params = CertificateParams::builder()
//!     .subject(DistinguishedName::from([("EMAIL", "admin@example.com")]))
//!     .build();
//!
//! match X509Generator::new(SignatureAlgorithm::EcdsaSha256).generate(&params, &key_pair) {
//!     Ok(_) => println!("Certificate generated"),
//!     Err(X509GenError::InvalidArgument(msg)) => println!("Bad input: {}", msg),
//!     Err(X509GenError::UnsupportedAlgorithm(msg)) => println!("Wrong key: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`asn1`]: DER structural encoder
//! - [`cert`]: Certificate generation, signature algorithms and parameters
//! - [`key`]: Key generation and the rustcrypto signing backend
//! - [`pki`]: Capability traits consumed by the generator
//! - [`error`]: Error types
//! - [`tbs_certificate`]: The to-be-signed portion of a certificate

pub mod asn1;
pub mod cert;
pub mod error;
pub mod key;
pub mod pki;
pub mod tbs_certificate;
