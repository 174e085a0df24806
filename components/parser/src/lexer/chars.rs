//! Character classes used by the lexer

/// Characters in ID_Start (or ID_Continue) that XID tables drop because
/// they are not stable under NFKC.
const ID_NOT_XID: &[char] = &[
    '\u{037A}', '\u{0E33}', '\u{0EB3}', '\u{309B}', '\u{309C}', '\u{FC5E}', '\u{FC5F}',
    '\u{FC60}', '\u{FC61}', '\u{FC62}', '\u{FC63}', '\u{FDFA}', '\u{FDFB}', '\u{FE70}',
    '\u{FE72}', '\u{FE74}', '\u{FE76}', '\u{FE78}', '\u{FE7A}', '\u{FE7C}', '\u{FE7E}',
    '\u{FF9E}', '\u{FF9F}',
];

/// IdentifierStartChar: ID_Start, `$`, `_`
pub fn is_id_start(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphabetic() || ch == '$' || ch == '_';
    }
    unicode_ident::is_xid_start(ch) || ID_NOT_XID.contains(&ch)
}

/// IdentifierPartChar: ID_Continue, `$`, ZWNJ, ZWJ
pub fn is_id_continue(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphanumeric() || ch == '$' || ch == '_';
    }
    unicode_ident::is_xid_continue(ch)
        || ch == '\u{200C}'
        || ch == '\u{200D}'
        || ID_NOT_XID.contains(&ch)
}

/// LineTerminator: LF, CR, LS, PS
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// WhiteSpace: TAB, VT, FF, ZWNBSP and every Space_Separator
pub fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_identifier_chars() {
        assert!(is_id_start('a'));
        assert!(is_id_start('$'));
        assert!(is_id_start('_'));
        assert!(!is_id_start('1'));
        assert!(is_id_continue('1'));
        assert!(!is_id_continue('-'));
    }

    #[test]
    fn test_unicode_identifier_chars() {
        assert!(is_id_start('ä'));
        assert!(is_id_start('\u{309B}'));
        assert!(is_id_continue('\u{200C}'));
        assert!(!is_id_start('\u{200C}'));
        assert!(!is_id_start('€'));
    }

    #[test]
    fn test_whitespace_and_terminators() {
        assert!(is_whitespace('\u{00A0}'));
        assert!(is_whitespace('\u{2007}'));
        assert!(!is_whitespace('\n'));
        assert!(is_line_terminator('\u{2028}'));
        assert!(!is_line_terminator('\u{0085}'));
    }
}
