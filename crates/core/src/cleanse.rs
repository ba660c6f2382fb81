//! Lexical normalisation of source text.
//!
//! The passes run in place over a byte buffer, strictly in the order
//! [`drop_comments`], [`generalise`], [`normalise_whitespace`],
//! [`remove_spaces`]. The first three only overwrite bytes; the last one
//! compacts the buffer and reports its new length.

use crate::profile::CleanseProfile;

/// Blanks from `pos` up to, but excluding, the next `\n`. Returns the position
/// of that `\n` (or the buffer end).
fn blank_rest_of_line(buf: &mut [u8], mut pos: usize) -> usize {
    while pos < buf.len() && buf[pos] != b'\n' {
        buf[pos] = b' ';
        pos += 1;
    }
    pos
}

/// Blanks a block comment body and its terminator, starting right after the
/// opening delimiter. Line terminators inside the comment are kept. Returns
/// the position after the terminator (or the buffer end if unterminated).
fn blank_block_comment(buf: &mut [u8], mut pos: usize, end: &[u8]) -> usize {
    while pos < buf.len() {
        if buf[pos..].starts_with(end) {
            buf[pos..pos + end.len()].fill(b' ');
            return pos + end.len();
        }
        if !matches!(buf[pos], b'\n' | b'\r') {
            buf[pos] = b' ';
        }
        pos += 1;
    }
    pos
}

/// Blanks line comments, dropped line prefixes and block comments.
pub fn drop_comments(buf: &mut [u8], profile: &CleanseProfile) {
    let mut pos = 0usize;
    while pos < buf.len() {
        let rest = &buf[pos..];
        if profile
            .line_drop_prefixes
            .iter()
            .any(|prefix| rest.starts_with(prefix.as_bytes()))
        {
            pos = blank_rest_of_line(buf, pos);
            continue;
        }

        if let Some(comment) = &profile.block_comment
            && rest.starts_with(comment.start.as_bytes())
        {
            // Blank the opener before looking for the closer so `/*/` is not
            // mistaken for a complete comment.
            let body = pos + comment.start.len();
            buf[pos..body].fill(b' ');
            pos = blank_block_comment(buf, body, comment.end.as_bytes());
            continue;
        }

        pos += 1;
    }
}

/// Rewrites every generalisation variant to its canonical token, padding the
/// remainder of the variant with spaces.
pub fn generalise(buf: &mut [u8], profile: &CleanseProfile) {
    debug_assert!(profile.is_well_formed());

    let mut pos = 0usize;
    while pos < buf.len() {
        match profile.match_generalisation(&buf[pos..]) {
            Some((canonical, variant_len)) => {
                let canonical_end = pos + canonical.len();
                buf[pos..canonical_end].copy_from_slice(canonical);
                buf[canonical_end..pos + variant_len].fill(b' ');
                pos += variant_len;
            }
            None => pos += 1,
        }
    }
}

/// Maps horizontal whitespace to spaces and every terminator-like byte to
/// `\n`, then keeps only the last of any run of terminators separated by
/// whitespace. A terminator at the end of the buffer is blanked.
pub fn normalise_whitespace(buf: &mut [u8], profile: &CleanseProfile) {
    let mut pending_newline: Option<usize> = None;

    for pos in 0..buf.len() {
        let is_terminator = match buf[pos] {
            b'\t' | 0x0b => {
                buf[pos] = b' ';
                continue;
            }
            b' ' => continue,
            b'\r' | b'\n' => true,
            b => profile.is_newline_char(b),
        };
        if !is_terminator {
            pending_newline = None;
            continue;
        }

        buf[pos] = b'\n';
        if let Some(prev) = pending_newline.replace(pos) {
            buf[prev] = b' ';
        }
    }

    if let Some(prev) = pending_newline {
        buf[prev] = b' ';
    }
}

/// Removes every space and any leading terminators, compacting the buffer in
/// place. Returns the number of bytes kept.
pub fn remove_spaces(buf: &mut [u8]) -> usize {
    let mut kept = 0usize;
    for read in 0..buf.len() {
        let b = buf[read];
        if b == b' ' || (b == b'\n' && kept == 0) {
            continue;
        }
        buf[kept] = b;
        kept += 1;
    }
    kept
}

/// Runs all passes once and truncates `text` to the kept length.
fn cleanse_pass(text: &mut Vec<u8>, profile: &CleanseProfile) {
    drop_comments(text, profile);
    generalise(text, profile);
    normalise_whitespace(text, profile);
    let kept = remove_spaces(text);
    text.truncate(kept);
}

/// Cleanses `text` in place until it is a fixed point of the passes.
///
/// Removing spaces can join fragments into a new token: `a / / b` becomes
/// `a//b`, which the next round drops as a line comment. Any round that still
/// finds work shrinks the text, so rounds repeat until the length holds.
pub fn cleanse(text: &mut Vec<u8>, profile: &CleanseProfile) {
    loop {
        let before = text.len();
        cleanse_pass(text, profile);
        if text.len() == before {
            break;
        }
    }

    debug_assert!(is_cleansed(text));
}

/// No leading, trailing or consecutive `\n` and no spaces.
pub fn is_cleansed(text: &[u8]) -> bool {
    text.first() != Some(&b'\n')
        && text.last() != Some(&b'\n')
        && !text.windows(2).any(|w| w == b"\n\n")
        && !text.contains(&b' ')
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::profile::Language;

    fn cleansed(input: &str, lang: Language) -> String {
        let mut text = input.as_bytes().to_vec();
        cleanse(&mut text, lang.profile());
        String::from_utf8(text).expect("ascii input stays ascii")
    }

    #[test]
    fn drop_comments_keeps_terminators_and_length() {
        let mut buf = b"a // x\nb /* c\nd */ e".to_vec();
        drop_comments(&mut buf, Language::C.profile());
        assert_eq!(buf, b"a     \nb     \n     e");
    }

    #[test]
    fn drop_comments_blanks_opener_before_searching_closer() {
        let mut buf = b"x/*/y*/z".to_vec();
        drop_comments(&mut buf, Language::C.profile());
        assert_eq!(buf, b"x      z");
    }

    #[test]
    fn drop_comments_handles_unterminated_block() {
        let mut buf = b"a (* b\nc".to_vec();
        drop_comments(&mut buf, Language::FSharp.profile());
        assert_eq!(buf, b"a     \n ");
    }

    #[test]
    fn drop_comments_drops_preprocessor_lines() {
        let mut buf = b"#include <x.h>\n#define N 1\n#endif".to_vec();
        drop_comments(&mut buf, Language::C.profile());
        assert_eq!(buf, b"              \n#define N 1\n      ");
    }

    #[test]
    fn unknown_profile_leaves_comments() {
        let mut buf = b"a // b".to_vec();
        drop_comments(&mut buf, Language::Unknown.profile());
        generalise(&mut buf, Language::Unknown.profile());
        assert_eq!(buf, b"a // b");
    }

    #[test]
    fn generalise_pads_with_spaces() {
        let mut buf = b"static long x; double y;".to_vec();
        generalise(&mut buf, Language::C.profile());
        assert_eq!(buf, b"       int  x; int    y;");
    }

    #[test]
    fn generalise_handles_adjacent_variants() {
        let mut buf = b"shortlong".to_vec();
        generalise(&mut buf, Language::C.profile());
        assert_eq!(buf, b"int  int ");
    }

    #[test]
    fn normalise_whitespace_collapses_blank_lines() {
        let mut buf = b"a\r\n\t\n b\n ".to_vec();
        normalise_whitespace(&mut buf, Language::Unknown.profile());
        assert_eq!(buf, b"a   \n b  ");
    }

    #[test]
    fn normalise_whitespace_turns_pseudo_terminators_into_newlines() {
        let mut buf = b"f(){x;}".to_vec();
        normalise_whitespace(&mut buf, Language::Java.profile());
        assert_eq!(buf, b"f()\nx  ");
    }

    #[test]
    fn remove_spaces_strips_leading_terminators() {
        let mut buf = b" \n \na b\nc ".to_vec();
        let kept = remove_spaces(&mut buf);
        assert_eq!(&buf[..kept], b"ab\nc");
    }

    #[test]
    fn remove_spaces_handles_all_space_buffer() {
        let mut buf = b"    ".to_vec();
        assert_eq!(remove_spaces(&mut buf), 0);
    }

    #[test]
    fn cleanses_c_source() {
        let input = "#include <stdio.h>\n\
                     /* entry */\n\
                     static unsigned long add(long a, long b) {\n\
                     \treturn a + b; // sum\n\
                     }\n";
        assert_eq!(cleansed(input, Language::C), "intadd(inta,intb)\nreturna+b");
    }

    #[test]
    fn cleanses_java_source() {
        let input = "public class A {\n  private final double x = 1.0;\n}\n";
        assert_eq!(cleansed(input, Language::Java), "classA\nintx=1.0");
    }

    #[test]
    fn cleanses_fsharp_source() {
        let input = "(* doc *)\nlet private f (x: float32) =\n    x + 1 // inc\n";
        assert_eq!(cleansed(input, Language::FSharp), "letf(x:int)=\nx+1");
    }

    #[test]
    fn comment_only_file_cleanses_to_empty() {
        assert_eq!(cleansed("// nothing\n/* here */\n", Language::C), "");
    }

    #[test]
    fn cleansing_is_idempotent_on_sources() {
        let inputs = [
            ("int main() { return 0; }\n", Language::C),
            ("class B { void f() { g(); } }", Language::Java),
            ("let x = 1\n\nlet y = 2\n", Language::FSharp),
            ("plain\r\n\r\ntext  here\n", Language::Unknown),
        ];
        for (input, lang) in inputs {
            let once = cleansed(input, lang);
            assert_eq!(cleansed(&once, lang), once, "{lang}: {input:?}");
        }
    }

    #[test]
    fn joined_fragments_are_cleansed_again() {
        let once = cleansed("a / / b;", Language::C);
        assert_eq!(once, "a");
        assert_eq!(cleansed(&once, Language::C), once);

        assert_eq!(cleansed("sh ort x;", Language::C), "intx");
        assert_eq!(cleansed("x = ( * y *) + 1", Language::FSharp), "x=+1");
        assert_eq!(cleansed("pub lic int n;", Language::Java), "intn");
    }

    proptest! {
        #[test]
        fn cleansed_output_has_no_empty_lines(
            input in "[a-z;{} \t\r\n/*#]{0,200}",
            lang_idx in 0usize..4,
        ) {
            let lang = Language::ALL[lang_idx];
            let mut text = input.into_bytes();
            cleanse(&mut text, lang.profile());
            prop_assert!(is_cleansed(&text));
        }

        #[test]
        fn cleansing_is_idempotent(
            input in "[a-z;{}() \t\r\n/*#]{0,200}",
            lang_idx in 0usize..4,
        ) {
            let profile = Language::ALL[lang_idx].profile();
            let mut once = input.into_bytes();
            cleanse(&mut once, profile);
            let mut twice = once.clone();
            cleanse(&mut twice, profile);
            prop_assert_eq!(once, twice);
        }
    }
}
