use crate::error::{Result, X509GenError};

fn invalid(oid: &str, reason: &str) -> X509GenError {
    X509GenError::InvalidArgument(format!("malformed OID {oid:?}: {reason}"))
}

/// Writes `value` as base-128 big-endian, setting the continuation bit on
/// every byte except the last one produced for it (X.690 8.19.2).
fn push_base128(out: &mut Vec<u8>, mut value: u64) {
    let mut groups = [0u8; 10];
    let mut count = 0;
    loop {
        groups[count] = (value & 0x7f) as u8;
        count += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..count).rev() {
        let continuation = if i == 0 { 0x00 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
}

/// Encodes the value octets of an OBJECT IDENTIFIER from its dotted-decimal
/// form.
///
/// The first two arcs share one subidentifier (`arc0 * 40 + arc1`); each
/// following arc is its own subidentifier. A zero arc encodes as `0x00` and an
/// arc of exactly 128 as `0x81 0x00`.
pub(crate) fn encode_object_id(oid: &str) -> Result<Vec<u8>> {
    let arcs = oid
        .split('.')
        .map(|arc| {
            if arc.is_empty() || !arc.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(oid, &format!("non-numeric arc {arc:?}")));
            }
            arc.parse::<u64>()
                .map_err(|_| invalid(oid, &format!("arc {arc} is too large")))
        })
        .collect::<Result<Vec<u64>>>()?;

    let (first, second, rest) = match arcs.as_slice() {
        [first, second, rest @ ..] => (*first, *second, rest),
        _ => return Err(invalid(oid, "at least two arcs are required")),
    };
    if first > 2 {
        return Err(invalid(oid, "first arc must be 0, 1 or 2"));
    }
    if first < 2 && second >= 40 {
        return Err(invalid(oid, "second arc must be below 40"));
    }
    let leading = second
        .checked_add(first * 40)
        .ok_or_else(|| invalid(oid, "second arc is too large"))?;

    let mut out = Vec::with_capacity(arcs.len() + 4);
    push_base128(&mut out, leading);
    for &arc in rest {
        push_base128(&mut out, arc);
    }
    Ok(out)
}
