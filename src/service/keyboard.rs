//! Hangul ⇄ QWERTY keystroke reinterpretation for the standard 2-set
//! (두벌식) layout. Korean input methods emit either Hangul or raw Latin
//! keystrokes depending on the active system layout; these conversions
//! recover the string the user most likely meant to type.

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const VOWEL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

const LEADS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

const VOWELS: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

// Index 0 is "no trailing consonant".
const FINALS: [Option<char>; 28] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

/// QWERTY keystrokes that produce a single jamo. Compound vowels carry the
/// full two-key sequence directly.
fn jamo_to_keys(jamo: char) -> Option<&'static str> {
    match jamo {
        // Consonants
        'ㄱ' => Some("r"),
        'ㄲ' => Some("R"),
        'ㄴ' => Some("s"),
        'ㄷ' => Some("e"),
        'ㄸ' => Some("E"),
        'ㄹ' => Some("f"),
        'ㅁ' => Some("a"),
        'ㅂ' => Some("q"),
        'ㅃ' => Some("Q"),
        'ㅅ' => Some("t"),
        'ㅆ' => Some("T"),
        'ㅇ' => Some("d"),
        'ㅈ' => Some("w"),
        'ㅉ' => Some("W"),
        'ㅊ' => Some("c"),
        'ㅋ' => Some("z"),
        'ㅌ' => Some("x"),
        'ㅍ' => Some("v"),
        'ㅎ' => Some("g"),
        // Vowels
        'ㅏ' => Some("k"),
        'ㅐ' => Some("o"),
        'ㅑ' => Some("i"),
        'ㅒ' => Some("O"),
        'ㅓ' => Some("j"),
        'ㅔ' => Some("p"),
        'ㅕ' => Some("u"),
        'ㅖ' => Some("P"),
        'ㅗ' => Some("h"),
        'ㅘ' => Some("hk"),
        'ㅙ' => Some("ho"),
        'ㅚ' => Some("hl"),
        'ㅛ' => Some("y"),
        'ㅜ' => Some("n"),
        'ㅝ' => Some("nj"),
        'ㅞ' => Some("np"),
        'ㅟ' => Some("nl"),
        'ㅠ' => Some("b"),
        'ㅡ' => Some("m"),
        'ㅢ' => Some("ml"),
        'ㅣ' => Some("l"),
        _ => None,
    }
}

fn key_to_jamo(key: char) -> Option<char> {
    match key {
        // Consonants
        'r' => Some('ㄱ'),
        'R' => Some('ㄲ'),
        's' => Some('ㄴ'),
        'e' => Some('ㄷ'),
        'E' => Some('ㄸ'),
        'f' => Some('ㄹ'),
        'a' => Some('ㅁ'),
        'q' => Some('ㅂ'),
        'Q' => Some('ㅃ'),
        't' => Some('ㅅ'),
        'T' => Some('ㅆ'),
        'd' => Some('ㅇ'),
        'w' => Some('ㅈ'),
        'W' => Some('ㅉ'),
        'c' => Some('ㅊ'),
        'z' => Some('ㅋ'),
        'x' => Some('ㅌ'),
        'v' => Some('ㅍ'),
        'g' => Some('ㅎ'),
        // Vowels
        'k' => Some('ㅏ'),
        'o' => Some('ㅐ'),
        'i' => Some('ㅑ'),
        'O' => Some('ㅒ'),
        'j' => Some('ㅓ'),
        'p' => Some('ㅔ'),
        'u' => Some('ㅕ'),
        'P' => Some('ㅖ'),
        'h' => Some('ㅗ'),
        'y' => Some('ㅛ'),
        'n' => Some('ㅜ'),
        'b' => Some('ㅠ'),
        'm' => Some('ㅡ'),
        'l' => Some('ㅣ'),
        _ => None,
    }
}

/// Compound trailing consonants have no key of their own; they are typed
/// as two simple jamo in sequence.
fn split_compound(jamo: char) -> Option<(char, char)> {
    match jamo {
        'ㄳ' => Some(('ㄱ', 'ㅅ')),
        'ㄵ' => Some(('ㄴ', 'ㅈ')),
        'ㄶ' => Some(('ㄴ', 'ㅎ')),
        'ㄺ' => Some(('ㄹ', 'ㄱ')),
        'ㄻ' => Some(('ㄹ', 'ㅁ')),
        'ㄼ' => Some(('ㄹ', 'ㅂ')),
        'ㄽ' => Some(('ㄹ', 'ㅅ')),
        'ㄾ' => Some(('ㄹ', 'ㅌ')),
        'ㄿ' => Some(('ㄹ', 'ㅍ')),
        'ㅀ' => Some(('ㄹ', 'ㅎ')),
        'ㅄ' => Some(('ㅂ', 'ㅅ')),
        _ => None,
    }
}

fn push_jamo_keys(jamo: char, out: &mut String) {
    if let Some(keys) = jamo_to_keys(jamo) {
        out.push_str(keys);
    } else if let Some((first, second)) = split_compound(jamo) {
        push_jamo_keys(first, out);
        push_jamo_keys(second, out);
    } else {
        out.push(jamo);
    }
}

/// Decomposes one precomposed syllable block into its jamo, in reading order.
fn decompose_syllable(c: char) -> Option<(char, char, Option<char>)> {
    let code = c as u32;
    if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
        return None;
    }
    let index = code - SYLLABLE_BASE;
    let lead = LEADS[(index / (VOWEL_COUNT * FINAL_COUNT)) as usize];
    let vowel = VOWELS[((index / FINAL_COUNT) % VOWEL_COUNT) as usize];
    let trailing = FINALS[(index % FINAL_COUNT) as usize];
    Some((lead, vowel, trailing))
}

/// Rewrites Hangul text as the QWERTY keystrokes that would have produced
/// it, e.g. "안녕" -> "dkssud". Anything that is not Hangul passes through.
pub fn hangul_to_keys(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some((lead, vowel, trailing)) = decompose_syllable(c) {
            push_jamo_keys(lead, &mut result);
            push_jamo_keys(vowel, &mut result);
            if let Some(trailing) = trailing {
                push_jamo_keys(trailing, &mut result);
            }
        } else {
            // Standalone jamo still map; everything else passes through.
            push_jamo_keys(c, &mut result);
        }
    }
    result
}

/// Reinterprets Latin keystrokes as the jamo they produce under the Korean
/// layout, e.g. "dkssud" -> "ㅇㅏㄴㄴㅕㅇ". Unmapped characters pass through.
pub fn keys_to_jamo(text: &str) -> String {
    text.chars()
        .map(|c| key_to_jamo(c).unwrap_or(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_syllables_with_and_without_trailing() {
        assert_eq!(decompose_syllable('안'), Some(('ㅇ', 'ㅏ', Some('ㄴ'))));
        assert_eq!(decompose_syllable('아'), Some(('ㅇ', 'ㅏ', None)));
        assert_eq!(decompose_syllable('a'), None);
    }

    #[test]
    fn hangul_to_keys_basic() {
        assert_eq!(hangul_to_keys("안녕"), "dkssud");
        assert_eq!(hangul_to_keys("아리"), "dkfl");
    }

    #[test]
    fn hangul_to_keys_compound_vowel() {
        // ㅘ is typed as the two-key sequence "hk".
        assert_eq!(hangul_to_keys("과"), "rhk");
        assert_eq!(hangul_to_keys("의"), "dml");
    }

    #[test]
    fn hangul_to_keys_compound_trailing_consonant() {
        // ㄳ has no single key; it splits into ㄱ + ㅅ.
        assert_eq!(hangul_to_keys("삯"), "tkrt");
        assert_eq!(hangul_to_keys("닭"), "ekfr");
    }

    #[test]
    fn hangul_to_keys_passes_through_non_korean() {
        assert_eq!(hangul_to_keys("Ahri 아리!"), "Ahri dkfl!");
        assert_eq!(hangul_to_keys("zed"), "zed");
    }

    #[test]
    fn hangul_to_keys_maps_standalone_jamo() {
        assert_eq!(hangul_to_keys("ㅇㅏㄴ"), "dks");
    }

    #[test]
    fn keys_to_jamo_basic() {
        assert_eq!(keys_to_jamo("dkssud"), "ㅇㅏㄴㄴㅕㅇ");
        assert_eq!(keys_to_jamo("dkfl"), "ㅇㅏㄹㅣ");
    }

    #[test]
    fn keys_to_jamo_passes_through_unmapped() {
        assert_eq!(keys_to_jamo("a1 b"), "ㅁ1 ㅠ");
        assert_eq!(keys_to_jamo("안녕"), "안녕");
    }
}
