//! A small ASN.1 DER structural encoder.
//!
//! [`DerBuilder`] accumulates already-encoded TLV values in append order and
//! covers the subset of X.690 that an X.509 certificate needs: INTEGER,
//! BOOLEAN, NULL, BIT STRING, OCTET STRING, PrintableString, UTF8String,
//! OBJECT IDENTIFIER, UTCTime, SEQUENCE, SET and context-specific EXPLICIT
//! tags. Nested structures are built in their own builder and then wrapped
//! into the parent.
//!
//! ```
//! use x509gen::asn1::DerBuilder;
//!
//! # fn main() -> x509gen::error::Result<()> {
//! let mut algorithm = DerBuilder::new();
//! algorithm
//!     .append_object_id("1.2.840.113549.1.1.11")?
//!     .append_null();
//!
//! let der = algorithm.to_der();
//! assert_eq!(der[0], 0x30);
//! assert_eq!(&der[2..4], &[0x06, 0x09]);
//! # Ok(())
//! # }
//! ```

mod oid;
mod utc_time;

use num_bigint::BigInt;
use time::OffsetDateTime;

use crate::error::{Result, X509GenError};

pub(crate) use self::oid::encode_object_id;
pub(crate) use self::utc_time::format_utc_time;

/// Universal and context-specific tag bytes emitted by [`DerBuilder`].
pub mod tag {
    pub const BOOLEAN: u8 = 0x01;
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const UTF8_STRING: u8 = 0x0c;
    pub const PRINTABLE_STRING: u8 = 0x13;
    pub const UTC_TIME: u8 = 0x17;
    pub const SEQUENCE: u8 = 0x30;
    pub const SET: u8 = 0x31;
    /// Context-specific, constructed. OR the tag number into the low bits.
    pub const CONTEXT_SPECIFIC_CONSTRUCTED: u8 = 0xa0;
}

/// Tag numbers from 31 up use the multi-octet identifier form.
const HIGH_TAG_NUMBER: u8 = 0x1f;

/// Encodes a DER length.
///
/// Lengths below 128 use the one-byte short form. Longer ones use the long
/// form: `0x80 | n` followed by the `n` byte big-endian magnitude with no
/// leading zero byte.
pub fn encode_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        return vec![len as u8];
    }
    let be = len.to_be_bytes();
    let skip = be.iter().take_while(|&&b| b == 0).count();
    let magnitude = &be[skip..];

    let mut out = Vec::with_capacity(magnitude.len() + 1);
    out.push(0x80 | magnitude.len() as u8);
    out.extend_from_slice(magnitude);
    out
}

/// Strips redundant sign-extension bytes from a big-endian two's-complement
/// integer. A leading 0x00 (or 0xff) is only dropped when the following byte
/// still carries the same sign bit.
fn minimal_twos_complement(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    while start + 1 < bytes.len() {
        let next_negative = bytes[start + 1] & 0x80 != 0;
        match bytes[start] {
            0x00 if !next_negative => start += 1,
            0xff if next_negative => start += 1,
            _ => break,
        }
    }
    &bytes[start..]
}

/// An ordered, append-only sequence of DER encoded values.
///
/// Every `append_*` call writes one complete TLV (or, for
/// [`append_raw`](Self::append_raw), pre-encoded bytes) after the ones
/// already present and hands the builder back for chaining. Serializing with
/// [`to_der`](Self::to_der) wraps everything in a single SEQUENCE.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerBuilder {
    data: Vec<u8>,
}

impl DerBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn append_tlv(&mut self, tag: u8, value: &[u8]) -> &mut Self {
        self.data.push(tag);
        self.data.extend(encode_length(value.len()));
        self.data.extend_from_slice(value);
        self
    }

    fn append_twos_complement(&mut self, bytes: &[u8]) -> &mut Self {
        match minimal_twos_complement(bytes) {
            [] => self.append_tlv(tag::INTEGER, &[0x00]),
            value => self.append_tlv(tag::INTEGER, value),
        }
    }

    /// Appends an INTEGER.
    pub fn append_integer(&mut self, number: i32) -> &mut Self {
        self.append_twos_complement(&number.to_be_bytes())
    }

    /// Appends an INTEGER.
    pub fn append_long(&mut self, number: i64) -> &mut Self {
        self.append_twos_complement(&number.to_be_bytes())
    }

    /// Appends an INTEGER of arbitrary size.
    pub fn append_big_integer(&mut self, number: &BigInt) -> &mut Self {
        self.append_twos_complement(&number.to_signed_bytes_be())
    }

    /// Appends a UTF8String when `utf8` is set, a PrintableString otherwise.
    ///
    /// The value is written as-is; restricting PrintableString content to its
    /// character set is up to the caller.
    pub fn append_string(&mut self, string: &str, utf8: bool) -> &mut Self {
        let string_tag = if utf8 {
            tag::UTF8_STRING
        } else {
            tag::PRINTABLE_STRING
        };
        self.append_tlv(string_tag, string.as_bytes())
    }

    /// Wraps the contents of `structure` in a SEQUENCE.
    pub fn append_sequence(&mut self, structure: &DerBuilder) -> &mut Self {
        self.append_tlv(tag::SEQUENCE, &structure.data)
    }

    /// Wraps the contents of `structure` in a SET.
    ///
    /// Elements are kept in append order, so callers holding more than one
    /// element must append them already sorted.
    pub fn append_set(&mut self, structure: &DerBuilder) -> &mut Self {
        self.append_tlv(tag::SET, &structure.data)
    }

    /// Appends a byte-aligned BIT STRING (zero unused bits).
    pub fn append_bit_string(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.push(tag::BIT_STRING);
        self.data.extend(encode_length(bytes.len() + 1));
        self.data.push(0x00);
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn append_octet_string(&mut self, bytes: &[u8]) -> &mut Self {
        self.append_tlv(tag::OCTET_STRING, bytes)
    }

    pub fn append_boolean(&mut self, value: bool) -> &mut Self {
        self.append_tlv(tag::BOOLEAN, &[if value { 0xff } else { 0x00 }])
    }

    pub fn append_null(&mut self) -> &mut Self {
        self.append_tlv(tag::NULL, &[])
    }

    /// Appends a UTCTime (`YYMMDDHHMMSSZ`) for `time` converted to UTC.
    ///
    /// Fails with `EncodingOverflow` for years outside 1900..2100.
    pub fn append_utc_time(&mut self, time: &OffsetDateTime) -> Result<&mut Self> {
        let value = format_utc_time(time)?;
        Ok(self.append_tlv(tag::UTC_TIME, value.as_bytes()))
    }

    /// Appends an OBJECT IDENTIFIER given in dotted-decimal form.
    ///
    /// A malformed identifier fails with `InvalidArgument` and leaves the
    /// builder untouched.
    pub fn append_object_id(&mut self, oid: &str) -> Result<&mut Self> {
        let value = encode_object_id(oid)?;
        Ok(self.append_tlv(tag::OBJECT_IDENTIFIER, &value))
    }

    /// Wraps the contents of `structure` in an EXPLICIT `[index]` tag.
    ///
    /// Only the low tag numbers 0..=30 fit in a single identifier octet;
    /// anything larger fails with `InvalidArgument` and appends nothing.
    pub fn append_explicit(&mut self, index: u8, structure: &DerBuilder) -> Result<&mut Self> {
        if index >= HIGH_TAG_NUMBER {
            return Err(X509GenError::InvalidArgument(format!(
                "context-specific tag [{index}] needs the high tag number form"
            )));
        }
        Ok(self.append_tlv(tag::CONTEXT_SPECIFIC_CONSTRUCTED | index, &structure.data))
    }

    /// Splices already encoded DER verbatim.
    pub fn append_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// The accumulated values without the enclosing SEQUENCE.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Serializes the accumulated values as one top-level SEQUENCE.
    pub fn to_der(&self) -> Vec<u8> {
        let length = encode_length(self.data.len());
        let mut out = Vec::with_capacity(1 + length.len() + self.data.len());
        out.push(tag::SEQUENCE);
        out.extend(length);
        out.extend_from_slice(&self.data);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::X509GenError;

    /// Reads a DER length back, returning the value and the bytes consumed.
    fn decode_length(bytes: &[u8]) -> (usize, usize) {
        let first = bytes[0];
        if first & 0x80 == 0 {
            return (first as usize, 1);
        }
        let count = (first & 0x7f) as usize;
        let value = bytes[1..=count]
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize);
        (value, count + 1)
    }

    fn integer_value(der: &[u8]) -> &[u8] {
        assert_eq!(der[0], tag::INTEGER);
        let (len, consumed) = decode_length(&der[1..]);
        let value = &der[1 + consumed..];
        assert_eq!(value.len(), len);
        value
    }

    #[test]
    fn length_round_trip() {
        let mut lengths: Vec<usize> = (0..=300).collect();
        lengths.extend((0..(1 << 24)).step_by(4099));
        for bits in 7..24 {
            lengths.push((1 << bits) - 1);
            lengths.push(1 << bits);
        }
        lengths.push((1 << 24) - 1);

        for len in lengths {
            let encoded = encode_length(len);
            let (decoded, consumed) = decode_length(&encoded);
            assert_eq!(decoded, len);
            assert_eq!(consumed, encoded.len());
            if len < 128 {
                assert_eq!(encoded.len(), 1);
            } else {
                assert_eq!(encoded[0] & 0x80, 0x80);
                assert_eq!((encoded[0] & 0x7f) as usize, encoded.len() - 1);
                assert_ne!(encoded[1], 0, "leading zero in {len}");
            }
        }
    }

    #[test]
    fn length_forms() {
        assert_eq!(encode_length(0), [0x00]);
        assert_eq!(encode_length(127), [0x7f]);
        assert_eq!(encode_length(128), [0x81, 0x80]);
        assert_eq!(encode_length(255), [0x81, 0xff]);
        assert_eq!(encode_length(256), [0x82, 0x01, 0x00]);
        assert_eq!(encode_length(0x01_00_00), [0x83, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn integer_round_trip() {
        let values: [i64; 20] = [
            0,
            1,
            -1,
            127,
            128,
            -128,
            -129,
            255,
            256,
            32767,
            32768,
            -32768,
            -32769,
            8_388_607,
            8_388_608,
            i32::MAX as i64,
            i32::MIN as i64,
            1_603_718_400_000,
            i64::MAX,
            i64::MIN,
        ];
        for value in values {
            let mut builder = DerBuilder::new();
            builder.append_long(value);
            let bytes = integer_value(builder.as_bytes());
            assert_eq!(BigInt::from_signed_bytes_be(bytes), BigInt::from(value));
            assert_eq!(bytes, minimal_twos_complement(bytes), "not minimal: {value}");

            if let Ok(small) = i32::try_from(value) {
                let mut narrow = DerBuilder::new();
                narrow.append_integer(small);
                assert_eq!(narrow, builder);
            }
        }
    }

    #[test]
    fn integer_sign_byte_is_kept() {
        let mut builder = DerBuilder::new();
        builder.append_integer(128).append_integer(-128).append_integer(0);
        assert_eq!(
            builder.as_bytes(),
            [0x02, 0x02, 0x00, 0x80, 0x02, 0x01, 0x80, 0x02, 0x01, 0x00]
        );
    }

    #[test]
    fn big_integer_round_trip() {
        let big: BigInt = "-340282366920938463463374607431768211457".parse().unwrap();
        let positive = BigInt::from(1u8) << 127;
        for value in [big, positive, BigInt::from(0)] {
            let mut builder = DerBuilder::new();
            builder.append_big_integer(&value);
            let bytes = integer_value(builder.as_bytes());
            assert_eq!(BigInt::from_signed_bytes_be(bytes), value);
        }

        let mut builder = DerBuilder::new();
        builder.append_big_integer(&(BigInt::from(1u8) << 127));
        assert_eq!(builder.as_bytes()[1], 17);
        assert_eq!(builder.as_bytes()[2], 0x00);
    }

    #[test]
    fn primitive_encodings() {
        let mut builder = DerBuilder::new();
        builder
            .append_boolean(true)
            .append_boolean(false)
            .append_null()
            .append_octet_string(&[0xde, 0xad])
            .append_bit_string(&[0xbe, 0xef])
            .append_string("AB", false)
            .append_string("ż", true);
        assert_eq!(
            builder.as_bytes(),
            [
                0x01, 0x01, 0xff, //
                0x01, 0x01, 0x00, //
                0x05, 0x00, //
                0x04, 0x02, 0xde, 0xad, //
                0x03, 0x03, 0x00, 0xbe, 0xef, //
                0x13, 0x02, b'A', b'B', //
                0x0c, 0x02, 0xc5, 0xbc,
            ]
        );
    }

    #[test]
    fn constructed_encodings() {
        let mut version = DerBuilder::new();
        version.append_integer(2);

        let mut inner = DerBuilder::new();
        inner.append_null();

        let mut builder = DerBuilder::new();
        builder
            .append_explicit(0, &version)
            .unwrap()
            .append_sequence(&inner)
            .append_set(&inner)
            .append_raw(&[0x05, 0x00]);
        assert_eq!(
            builder.as_bytes(),
            [
                0xa0, 0x03, 0x02, 0x01, 0x02, //
                0x30, 0x02, 0x05, 0x00, //
                0x31, 0x02, 0x05, 0x00, //
                0x05, 0x00,
            ]
        );
        assert_eq!(builder.to_der()[..2], [0x30, 15]);
    }

    #[test]
    fn long_content_uses_long_form() {
        let mut builder = DerBuilder::new();
        builder.append_octet_string(&[0u8; 300]);
        assert_eq!(builder.as_bytes()[..4], [0x04, 0x82, 0x01, 0x2c]);

        let der = builder.to_der();
        assert_eq!(der[..4], [0x30, 0x82, 0x01, 0x30]);
        assert_eq!(der.len(), 4 + 304);
    }

    #[test]
    fn empty_builder_serializes_to_empty_sequence() {
        assert_eq!(DerBuilder::new().to_der(), [0x30, 0x00]);
    }

    #[test]
    fn failed_append_leaves_builder_untouched() {
        let mut builder = DerBuilder::new();
        builder.append_null();
        let err = builder.append_object_id("1.x.3").unwrap_err();
        assert!(matches!(err, X509GenError::InvalidArgument(_)));
        assert_eq!(builder.as_bytes(), [0x05, 0x00]);
    }

    #[test]
    fn explicit_tags_stay_in_the_low_tag_range() {
        let mut inner = DerBuilder::new();
        inner.append_null();

        let mut builder = DerBuilder::new();
        builder.append_explicit(30, &inner).unwrap();
        assert_eq!(builder.as_bytes(), [0xbe, 0x02, 0x05, 0x00]);

        for index in [31, 32, 255] {
            assert!(matches!(
                builder.append_explicit(index, &inner),
                Err(X509GenError::InvalidArgument(_))
            ));
        }
        assert_eq!(builder.as_bytes(), [0xbe, 0x02, 0x05, 0x00]);
    }
}
