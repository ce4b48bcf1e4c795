// Copyright (c) 2026 rezky_nightky

use std::str::FromStr;

use crate::random::RandomSource;

/// A contiguous run of code points the rain draws its glyphs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alphabet {
    first: char,
    last: char,
}

impl Alphabet {
    pub const LATIN: Alphabet = Alphabet {
        first: 'A',
        last: '~',
    };
    pub const ASCII: Alphabet = Alphabet {
        first: '!',
        last: '~',
    };
    pub const DIGITS: Alphabet = Alphabet {
        first: '0',
        last: '9',
    };
    pub const BINARY: Alphabet = Alphabet {
        first: '0',
        last: '1',
    };
    pub const KATAKANA: Alphabet = Alphabet {
        first: '\u{FF66}',
        last: '\u{FF9D}',
    };
    pub const GREEK: Alphabet = Alphabet {
        first: '\u{03B1}',
        last: '\u{03C9}',
    };
    pub const CYRILLIC: Alphabet = Alphabet {
        first: '\u{0410}',
        last: '\u{044F}',
    };
    pub const RUNIC: Alphabet = Alphabet {
        first: '\u{16A0}',
        last: '\u{16EA}',
    };
    pub const BRAILLE: Alphabet = Alphabet {
        first: '\u{2801}',
        last: '\u{28FF}',
    };

    pub fn new(first: char, last: char) -> Result<Self, String> {
        if first > last {
            return Err(format!(
                "range start U+{:04X} is after end U+{:04X}",
                first as u32, last as u32
            ));
        }
        // Every value between two chars must itself be a char.
        if (first as u32) < 0xD800 && (last as u32) > 0xDFFF {
            return Err("range must not span the surrogate block (D800-DFFF)".to_string());
        }
        Ok(Self { first, last })
    }

    pub fn first(self) -> char {
        self.first
    }

    pub fn last(self) -> char {
        self.last
    }

    pub fn size(self) -> u32 {
        self.last as u32 - self.first as u32 + 1
    }

    #[cfg(test)]
    pub fn contains(self, ch: char) -> bool {
        (self.first..=self.last).contains(&ch)
    }

    pub fn random_char<R: RandomSource + ?Sized>(self, rng: &mut R) -> char {
        let offset = rng.range(0, self.size());
        char::from_u32(self.first as u32 + offset).unwrap_or(self.first)
    }
}

impl FromStr for Alphabet {
    type Err = String;

    /// Parses `FIRST,LAST` as two hex code points, e.g. `30,39`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(',')
            .ok_or_else(|| "expected: HEX1,HEX2".to_string())?;
        let first = parse_hex_char(a).map_err(|e| format!("range start: {}", e))?;
        let last = parse_hex_char(b).map_err(|e| format!("range end: {}", e))?;
        Alphabet::new(first, last)
    }
}

fn parse_hex_char(s: &str) -> Result<char, String> {
    let s = s.trim();
    let s = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix("u+"))
        .or_else(|| s.strip_prefix("0x"))
        .unwrap_or(s);
    let v = u32::from_str_radix(s, 16).map_err(|_| format!("invalid hex value: {}", s))?;
    char::from_u32(v).ok_or_else(|| format!("invalid unicode scalar: {:X}", v))
}

pub fn alphabet_from_str(name: &str, default_to_ascii: bool) -> Result<Alphabet, String> {
    let name = name.trim().to_ascii_lowercase();
    match name.as_str() {
        "auto" => Ok(if default_to_ascii {
            Alphabet::LATIN
        } else {
            Alphabet::KATAKANA
        }),
        "latin" | "classic" => Ok(Alphabet::LATIN),
        "ascii" => Ok(Alphabet::ASCII),
        "digits" | "dec" | "decimal" => Ok(Alphabet::DIGITS),
        "bin" | "binary" | "01" => Ok(Alphabet::BINARY),
        "katakana" => Ok(Alphabet::KATAKANA),
        "greek" => Ok(Alphabet::GREEK),
        "cyrillic" => Ok(Alphabet::CYRILLIC),
        "runic" => Ok(Alphabet::RUNIC),
        "braille" => Ok(Alphabet::BRAILLE),
        _ => Err(format!(
            "unsupported charset: {} (see --list-charsets)",
            name
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    #[test]
    fn random_char_stays_in_range() {
        let mut rng = SeededRandom::new(Some(3));
        for alphabet in [Alphabet::LATIN, Alphabet::BINARY, Alphabet::KATAKANA] {
            for _ in 0..5_000 {
                let ch = alphabet.random_char(&mut rng);
                assert!(alphabet.contains(ch), "{:?} outside {:?}", ch, alphabet);
            }
        }
    }

    #[test]
    fn binary_produces_both_digits() {
        let mut rng = SeededRandom::new(Some(11));
        let mut seen = [false; 2];
        for _ in 0..200 {
            let ch = Alphabet::BINARY.random_char(&mut rng);
            seen[(ch as u32 - '0' as u32) as usize] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn parses_hex_range() {
        let a: Alphabet = "30,39".parse().unwrap();
        assert_eq!(a, Alphabet::DIGITS);
        let b: Alphabet = "U+FF66, U+FF9D".parse().unwrap();
        assert_eq!(b, Alphabet::KATAKANA);
    }

    #[test]
    fn rejects_bad_ranges() {
        assert!("39,30".parse::<Alphabet>().is_err());
        assert!("41".parse::<Alphabet>().is_err());
        assert!("zz,41".parse::<Alphabet>().is_err());
        assert!("D7FF,E000".parse::<Alphabet>().is_err());
    }

    #[test]
    fn auto_selects_latin_when_non_utf() {
        assert_eq!(alphabet_from_str("auto", true).unwrap(), Alphabet::LATIN);
        assert_eq!(alphabet_from_str("auto", false).unwrap(), Alphabet::KATAKANA);
        assert!(alphabet_from_str("nope", false).is_err());
    }

    #[test]
    fn latin_size_matches_code_points() {
        assert_eq!(Alphabet::LATIN.size(), 62);
        assert_eq!(Alphabet::BINARY.size(), 2);
    }
}
