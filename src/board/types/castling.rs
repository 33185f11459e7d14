//! Castling rights bitmask.

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Per-square masks ANDed into the rights after every move: any move that
/// touches a king or rook home square (moving from it or capturing on it)
/// clears the affected rights in one table lookup.
pub(crate) const CASTLING_RIGHTS_MASK: [u8; 64] = build_rights_mask();

const fn build_rights_mask() -> [u8; 64] {
    let mut mask = [ALL_CASTLING_RIGHTS; 64];
    mask[0] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_Q; // a1
    mask[4] = ALL_CASTLING_RIGHTS & !(CASTLE_WHITE_K | CASTLE_WHITE_Q); // e1
    mask[7] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_K; // h1
    mask[56] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_Q; // a8
    mask[60] = ALL_CASTLING_RIGHTS & !(CASTLE_BLACK_K | CASTLE_BLACK_Q); // e8
    mask[63] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_K; // h8
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castle_bits_distinct() {
        let bits = [CASTLE_WHITE_K, CASTLE_WHITE_Q, CASTLE_BLACK_K, CASTLE_BLACK_Q];
        for (i, a) in bits.iter().enumerate() {
            for b in bits.iter().skip(i + 1) {
                assert_eq!(a & b, 0);
            }
        }
        assert_eq!(
            bits.iter().fold(0, |acc, b| acc | b),
            ALL_CASTLING_RIGHTS
        );
    }

    #[test]
    fn test_rights_mask_home_squares() {
        assert_eq!(CASTLING_RIGHTS_MASK[4] & CASTLE_WHITE_K, 0);
        assert_eq!(CASTLING_RIGHTS_MASK[4] & CASTLE_WHITE_Q, 0);
        assert_eq!(CASTLING_RIGHTS_MASK[0] & CASTLE_WHITE_Q, 0);
        assert_eq!(CASTLING_RIGHTS_MASK[7] & CASTLE_WHITE_K, 0);
        assert_eq!(CASTLING_RIGHTS_MASK[60] & (CASTLE_BLACK_K | CASTLE_BLACK_Q), 0);
        assert_eq!(CASTLING_RIGHTS_MASK[56] & CASTLE_BLACK_Q, 0);
        assert_eq!(CASTLING_RIGHTS_MASK[63] & CASTLE_BLACK_K, 0);
        // An untouched square keeps everything.
        assert_eq!(CASTLING_RIGHTS_MASK[27], ALL_CASTLING_RIGHTS);
    }
}
