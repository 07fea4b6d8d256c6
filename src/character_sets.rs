/// Scheme characters: ALPHA / DIGIT / "+" / "-" / "."
const SCHEME_CHAR_TABLE: [bool; 256] = {
    let mut table = [false; 256];

    let mut i = b'a';
    while i <= b'z' {
        table[i as usize] = true;
        table[i.to_ascii_uppercase() as usize] = true;
        i += 1;
    }
    let mut i = b'0';
    while i <= b'9' {
        table[i as usize] = true;
        i += 1;
    }
    table[b'+' as usize] = true;
    table[b'-' as usize] = true;
    table[b'.' as usize] = true;

    table
};

/// Characters allowed after the dot of an IPvFuture literal:
/// unreserved / sub-delims / ":"
const IPVFUTURE_CHAR_TABLE: [bool; 256] = {
    let mut table = [false; 256];

    let mut i = b'a';
    while i <= b'z' {
        table[i as usize] = true;
        table[i.to_ascii_uppercase() as usize] = true;
        i += 1;
    }
    let mut i = b'0';
    while i <= b'9' {
        table[i as usize] = true;
        i += 1;
    }

    let extra = b"-._~!$&'()*+,;=:";
    let mut i = 0;
    while i < extra.len() {
        table[extra[i] as usize] = true;
        i += 1;
    }

    table
};

pub fn is_scheme_char(b: u8) -> bool {
    SCHEME_CHAR_TABLE[b as usize]
}

pub fn is_ipvfuture_char(b: u8) -> bool {
    IPVFUTURE_CHAR_TABLE[b as usize]
}
