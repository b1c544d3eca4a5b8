use std::sync::atomic::{AtomicI64, Ordering};

use bon::Builder;
use num_bigint::BigInt;
use time::OffsetDateTime;

use crate::error::{Result, X509GenError};

/// Lifetime given to a certificate when no `not_after` is supplied.
pub const DEFAULT_VALIDITY_YEARS: i32 = 20;

/// Parameters for generating an X.509 certificate.
///
/// Only the subject is required. Unset fields fall back to a self-signed
/// profile: the issuer is the subject, the validity starts now and lasts
/// [`DEFAULT_VALIDITY_YEARS`], and the serial number is time-derived.
///
/// # Fields
/// * `subject` - The distinguished name of the certificate subject.
/// * `issuer` - The distinguished name of the issuer, defaults to `subject`.
/// * `not_before` - Start of the validity period, defaults to now.
/// * `not_after` - End of the validity period, defaults to `not_before` plus 20 years.
/// * `serial_number` - Defaults to [`next_serial_number`].
///
/// ```
/// use x509gen::cert::params::{CertificateParams, DistinguishedName};
///
/// let params = CertificateParams::builder()
///     .subject(DistinguishedName::from([("CN", "example.com"), ("O", "Example")]))
///     .serial_number(1)
///     .build();
/// assert_eq!(params.issuer(), &params.subject);
/// ```
#[derive(Clone, Debug, Builder)]
pub struct CertificateParams {
    #[builder(into)]
    pub subject: DistinguishedName,
    #[builder(into)]
    pub issuer: Option<DistinguishedName>,
    #[builder(default = OffsetDateTime::now_utc())]
    pub not_before: OffsetDateTime,
    pub not_after: Option<OffsetDateTime>,
    #[builder(into, default = next_serial_number())]
    pub serial_number: BigInt,
}

impl CertificateParams {
    /// The issuer name, falling back to the subject for self-signed
    /// certificates.
    pub fn issuer(&self) -> &DistinguishedName {
        self.issuer.as_ref().unwrap_or(&self.subject)
    }

    /// The validity period with defaults applied.
    pub fn validity(&self) -> Result<Validity> {
        match self.not_after {
            Some(not_after) => Ok(Validity {
                not_before: self.not_before,
                not_after,
            }),
            None => Validity::for_years(self.not_before, DEFAULT_VALIDITY_YEARS),
        }
    }
}

/// Certificate validity period.
///
/// # Fields
/// * `not_before` - The start of the validity period.
/// * `not_after` - The end of the validity period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// A validity period starting at `not_before` and lasting `years` calendar
    /// years. February 29th ends on February 28th in non-leap years.
    pub fn for_years(not_before: OffsetDateTime, years: i32) -> Result<Self> {
        let target = not_before.year() + years;
        let not_after = not_before
            .replace_year(target)
            .or_else(|_| {
                not_before
                    .replace_day(28)
                    .and_then(|clamped| clamped.replace_year(target))
            })
            .map_err(|e| X509GenError::EncodingOverflow(format!("validity end: {e}")))?;
        Ok(Self {
            not_before,
            not_after,
        })
    }
}

static LAST_SERIAL: AtomicI64 = AtomicI64::new(0);

/// Default serial number: the current Unix time in milliseconds, bumped so
/// that successive calls in this process never repeat.
///
/// Nothing coordinates this across processes. Supply an explicit serial
/// whenever uniqueness matters.
pub fn next_serial_number() -> BigInt {
    let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let previous = LAST_SERIAL
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    BigInt::from(now.max(previous + 1))
}

/// An ordered list of RDN attributes, e.g. `CN=example.com, O=Example`.
///
/// Attribute keys are abbreviations resolved through an
/// [`AttributeLookup`] when the certificate is generated. Entries keep the
/// order they were added in, duplicates included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    entries: Vec<(String, String)>,
}

impl DistinguishedName {
    pub fn new() -> Self {
        Self::default()
    }

    /// A name holding only a common name.
    pub fn common_name(value: impl Into<String>) -> Self {
        Self::new().with("CN", value)
    }

    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(attribute, value);
        self
    }

    pub fn push(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.entries.push((attribute.into(), value.into()));
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First value stored under `attribute`.
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.entries()
            .find(|(key, _)| *key == attribute)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DistinguishedName {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut name = Self::new();
        for (attribute, value) in iter {
            name.push(attribute, value);
        }
        name
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for DistinguishedName {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Resolves RDN attribute abbreviations to dotted-decimal OIDs.
pub trait AttributeLookup: Send + Sync {
    fn oid(&self, attribute: &str) -> Option<&str>;
}

/// The X.520 attribute types understood out of the box.
pub const STANDARD_ATTRIBUTES: [(&str, &str); 9] = [
    ("CN", "2.5.4.3"),
    ("OU", "2.5.4.11"),
    ("O", "2.5.4.10"),
    ("L", "2.5.4.7"),
    ("ST", "2.5.4.8"),
    ("C", "2.5.4.6"),
    ("SN", "2.5.4.5"),
    ("GN", "2.5.4.42"),
    ("SURNAME", "2.5.4.4"),
];

/// [`AttributeLookup`] over [`STANDARD_ATTRIBUTES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAttributes;

impl AttributeLookup for StandardAttributes {
    fn oid(&self, attribute: &str) -> Option<&str> {
        STANDARD_ATTRIBUTES
            .iter()
            .find(|(key, _)| *key == attribute)
            .map(|(_, oid)| *oid)
    }
}
