use x509gen::cert::algorithm::{KeyFamily, SignatureAlgorithm};
use x509gen::cert::params::{CertificateParams, DistinguishedName};
use x509gen::cert::{X509Generator, format_fingerprint};
use x509gen::key::{DsaKeySize, KeyPair};

fn main() -> Result<(), x509gen::error::X509GenError> {
    env_logger::init();

    // Signature algorithm as a scheme name, e.g. `SHA384withECDSA`
    let algorithm: SignatureAlgorithm = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("SHA256withRSA")
        .parse()?;

    let key_pair = match algorithm.scheme().family {
        KeyFamily::Rsa => KeyPair::generate_rsa(2048)?,
        KeyFamily::Dsa => KeyPair::generate_dsa(DsaKeySize::DSA_2048_256),
        KeyFamily::Ecdsa => KeyPair::generate_ecdsa_p256(),
    };

    let subject = DistinguishedName::from([
        ("C", "US"),
        ("O", "Example Corp"),
        ("CN", "My Test Certificate"),
    ]);
    let params = CertificateParams::builder().subject(subject).build();

    let der = X509Generator::new(algorithm).generate(&params, &key_pair)?;

    println!("Algorithm:   {algorithm} ({})", algorithm.oid());
    println!("Serial:      {}", params.serial_number);
    println!("Size:        {} bytes", der.len());
    println!("Fingerprint: {}", format_fingerprint(&X509Generator::fingerprint(&der)));
    Ok(())
}
