const MARKER: &str = "ooTextFile";
const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Turns raw file contents into text. UTF-16 is tried first (by byte-order
/// mark, or by where the zero bytes fall), and UTF-8 is used whenever the
/// UTF-16 reading does not contain the TextGrid file marker.
pub fn decode_buffer(bytes: &[u8]) -> String {
    let utf16 = match bytes {
        [0xFF, 0xFE, rest @ ..] => Some(decode_utf16(rest, ByteOrder::LittleEndian)),
        [0xFE, 0xFF, rest @ ..] => Some(decode_utf16(rest, ByteOrder::BigEndian)),
        _ => guess_byte_order(bytes).map(|order| decode_utf16(bytes, order)),
    };

    match utf16 {
        Some(text) if text.contains(MARKER) => strip_bom(text),
        _ => strip_bom(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// ASCII text encoded as UTF-16 has a zero in every other byte.
fn guess_byte_order(bytes: &[u8]) -> Option<ByteOrder> {
    let zeros_at = |parity: usize| {
        bytes
            .iter()
            .skip(parity)
            .step_by(2)
            .filter(|&&byte| byte == 0)
            .count()
    };
    let (even, odd) = (zeros_at(0), zeros_at(1));
    if odd > even {
        Some(ByteOrder::LittleEndian)
    } else if even > odd {
        Some(ByteOrder::BigEndian)
    } else {
        None
    }
}

fn decode_utf16(bytes: &[u8], order: ByteOrder) -> String {
    let units = bytes.chunks_exact(2).map(|pair| match order {
        ByteOrder::LittleEndian => u16::from_le_bytes([pair[0], pair[1]]),
        ByteOrder::BigEndian => u16::from_be_bytes([pair[0], pair[1]]),
    });
    char::decode_utf16(units)
        .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

fn strip_bom(text: String) -> String {
    match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
