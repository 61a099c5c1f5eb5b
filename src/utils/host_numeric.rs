//! Decoding of numeric IPv4 host encodings.
//!
//! Browsers and `inet_aton` accept IPv4 hosts written as a single decimal
//! number (DWORD), a hex number, or dotted octal. All three collapse to the
//! same dotted-decimal form so that equivalent hosts compare equal.

use std::net::Ipv4Addr;

/// Decodes a numeric host into an IPv4 address.
///
/// Returns `None` for anything that is not one of the encodings below or
/// does not fit an IPv4 address.
///
/// | Form    | Example         | Decodes to  |
/// |---------|-----------------|-------------|
/// | DWORD   | `2130706433`    | `127.0.0.1` |
/// | hex     | `0x7f000001`    | `127.0.0.1` |
/// | octal   | `0177.0.0.01`   | `127.0.0.1` |
pub fn decode_numeric_host(host: &str) -> Option<Ipv4Addr> {
    if let Some(hex) = host.strip_prefix("0x").or_else(|| host.strip_prefix("0X")) {
        return decode_hex(hex);
    }

    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() == 4 && parts.iter().all(|p| p.starts_with('0')) {
        return decode_octal(&parts);
    }

    decode_dword(host)
}

fn decode_hex(digits: &str) -> Option<Ipv4Addr> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(Ipv4Addr::from)
}

fn decode_octal(parts: &[&str]) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(parts) {
        if !part.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return None;
        }
        *octet = u8::from_str_radix(part, 8).ok()?;
    }
    Some(Ipv4Addr::from(octets))
}

fn decode_dword(host: &str) -> Option<Ipv4Addr> {
    if host.is_empty() || !host.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    host.parse::<u32>().ok().map(Ipv4Addr::from)
}
