//! ISO 639-2 to Windows LCID lookup for stream languages.

/// (ISO 639-2 code, LCID). Bibliographic and terminology forms both appear.
const LANGUAGES: &[(&[u8; 3], u32)] = &[
    (b"alb", 0x041C),
    (b"sqi", 0x041C),
    (b"ara", 0x0401),
    (b"arm", 0x042B),
    (b"hye", 0x042B),
    (b"baq", 0x042D),
    (b"eus", 0x042D),
    (b"bul", 0x0402),
    (b"cat", 0x0403),
    (b"chi", 0x0804),
    (b"zho", 0x0804),
    (b"hrv", 0x041A),
    (b"cze", 0x0405),
    (b"ces", 0x0405),
    (b"dan", 0x0406),
    (b"dut", 0x0413),
    (b"nld", 0x0413),
    (b"eng", 0x0409),
    (b"est", 0x0425),
    (b"fin", 0x040B),
    (b"fre", 0x040C),
    (b"fra", 0x040C),
    (b"geo", 0x0437),
    (b"kat", 0x0437),
    (b"ger", 0x0407),
    (b"deu", 0x0407),
    (b"glg", 0x0456),
    (b"gre", 0x0408),
    (b"ell", 0x0408),
    (b"heb", 0x040D),
    (b"hin", 0x0439),
    (b"hun", 0x040E),
    (b"ice", 0x040F),
    (b"isl", 0x040F),
    (b"ind", 0x0421),
    (b"ita", 0x0410),
    (b"jpn", 0x0411),
    (b"kor", 0x0412),
    (b"lav", 0x0426),
    (b"lit", 0x0427),
    (b"mac", 0x042F),
    (b"mkd", 0x042F),
    (b"may", 0x043E),
    (b"msa", 0x043E),
    (b"nor", 0x0414),
    (b"nob", 0x0414),
    (b"nno", 0x0814),
    (b"per", 0x0429),
    (b"fas", 0x0429),
    (b"pol", 0x0415),
    (b"por", 0x0816),
    (b"rum", 0x0418),
    (b"ron", 0x0418),
    (b"rus", 0x0419),
    (b"srp", 0x0C1A),
    (b"slo", 0x041B),
    (b"slk", 0x041B),
    (b"slv", 0x0424),
    (b"spa", 0x0C0A),
    (b"swe", 0x041D),
    (b"tam", 0x0449),
    (b"tel", 0x044A),
    (b"tha", 0x041E),
    (b"tur", 0x041F),
    (b"ukr", 0x0422),
    (b"vie", 0x042A),
    (b"wel", 0x0452),
    (b"cym", 0x0452),
];

/// Windows locale identifier for an ISO 639-2 code, or 0 when unknown.
///
/// Matching is case-insensitive.
pub fn iso6392_to_lcid(code: &[u8; 3]) -> u32 {
    let lower = code.map(|b| b.to_ascii_lowercase());
    LANGUAGES
        .iter()
        .find(|(iso, _)| **iso == lower)
        .map(|&(_, lcid)| lcid)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(iso6392_to_lcid(b"eng"), 0x0409);
        assert_eq!(iso6392_to_lcid(b"jpn"), 0x0411);
        assert_eq!(iso6392_to_lcid(b"FRE"), 0x040C);
    }

    #[test]
    fn test_bibliographic_and_terminology_agree() {
        for (b, t) in [(b"ger", b"deu"), (b"chi", b"zho"), (b"dut", b"nld")] {
            assert_eq!(iso6392_to_lcid(b), iso6392_to_lcid(t));
            assert_ne!(iso6392_to_lcid(b), 0);
        }
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(iso6392_to_lcid(b"und"), 0);
        assert_eq!(iso6392_to_lcid(b"\0\0\0"), 0);
    }
}
