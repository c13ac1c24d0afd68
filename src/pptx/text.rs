//! Escaping of text written into presentation parts.
//!
//! XML 1.0 cannot carry most C0 control characters, not even as character
//! references. Run text therefore uses the OOXML `_xHHHH_` escape for them,
//! and a literal `_xHHHH_` sequence in the source has its leading underscore
//! written as `_x005F_` so it reads back unchanged.

/// Length of one `_xHHHH_` escape.
const ESCAPE_LEN: usize = 7;

/// Whether `ch` may appear in an XML 1.0 document.
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
        || ch > '\u{FFFF}'
}

/// Escape text for use in XML content and attribute values. Characters XML
/// cannot represent are dropped.
pub(crate) fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            ch if is_xml_char(ch) => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Escape one line of run text for an `<a:t>` element.
pub(super) fn encode_run_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (idx, ch) in raw.char_indices() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            // A raw carriage return would be normalized away by the parser.
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push('\t'),
            '_' if escape_code(&raw[idx..]).is_some() => out.push_str("_x005F_"),
            ch if is_xml_char(ch) && !ch.is_ascii_control() => out.push(ch),
            ch => out.push_str(&format!("_x{:04X}_", ch as u32)),
        }
    }
    out
}

/// Undo [`encode_run_text`] on text already unescaped by the XML parser.
pub(super) fn decode_run_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match escape_code(tail).and_then(char::from_u32) {
            Some(ch) => {
                out.push(ch);
                rest = &tail[ESCAPE_LEN..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Code point of an `_xHHHH_` escape at the start of `text`.
fn escape_code(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    if bytes.len() < ESCAPE_LEN
        || !bytes.starts_with(b"_x")
        || !bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        || bytes[6] != b'_'
    {
        return None;
    }
    u32::from_str_radix(&text[2..6], 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_escape_handles_markup_and_drops_control_characters() {
        assert_eq!(
            xml_escape("a & <b> \"c\" 'd'"),
            "a &amp; &lt;b&gt; &quot;c&quot; &apos;d&apos;"
        );
        assert_eq!(xml_escape("bell\u{7}here\u{FFFF}"), "bellhere");
        assert_eq!(xml_escape("tab\tok"), "tab\tok");
    }

    #[test]
    fn control_characters_use_hex_escapes() {
        assert_eq!(encode_run_text("a\u{7}b"), "a_x0007_b");
        assert_eq!(encode_run_text("\u{0}\u{1F}\u{7F}"), "_x0000__x001F__x007F_");
        assert_eq!(encode_run_text("x\u{FFFE}"), "x_xFFFE_");
        assert_eq!(encode_run_text("tab\there"), "tab\there");
        assert_eq!(encode_run_text("cr\r"), "cr&#xD;");
        assert_eq!(encode_run_text("• ç & <é>"), "• ç &amp; &lt;é&gt;");
    }

    #[test]
    fn literal_escape_sequences_are_protected() {
        assert_eq!(encode_run_text("_x0041_"), "_x005F_x0041_");
        assert_eq!(encode_run_text("snake_x_case"), "snake_x_case");
        assert_eq!(decode_run_text("_x005F_x0041_"), "_x0041_");
    }

    #[test]
    fn decode_restores_control_characters() {
        assert_eq!(decode_run_text("a_x0007_b"), "a\u{7}b");
        assert_eq!(decode_run_text("_x_1234_"), "_x_1234_");
        assert_eq!(decode_run_text("trailing_x00"), "trailing_x00");
    }

    #[test]
    fn encoded_text_parses_and_decodes_to_the_original() {
        for raw in [
            "plain",
            "bell\u{7}and\u{1B}escape",
            "_x0041_ and _x005F_",
            "cr\r\tand tab",
            "<tag> & \"quotes\"",
            "\u{FFFF}\u{FFFE}",
        ] {
            let xml = format!("<t>{}</t>", encode_run_text(raw));
            let doc = roxmltree::Document::parse(&xml).expect("well-formed text");
            let text = doc.root_element().text().unwrap_or_default();
            assert_eq!(decode_run_text(text), raw);
        }
    }
}
