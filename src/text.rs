/// Turns an HTML-bearing summary into plain text: tags dropped, paragraph and
/// line breaks kept as newlines, entities decoded.
pub fn summary_to_text(input: &str) -> String {
    let without_tags = strip_html_with_breaks(input);
    let decoded = decode_basic_html_entities(&without_tags);
    normalize_newlines(&decoded)
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn strip_html_with_breaks(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '<' {
            out.push(ch);
            continue;
        }
        let mut tag = String::new();
        for c in chars.by_ref() {
            if c == '>' {
                break;
            }
            tag.push(c);
        }
        let closing = tag.trim_start().starts_with('/');
        let name = tag
            .trim()
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        // <br> anywhere, and the end of a block, become line breaks.
        if name == "br" || (closing && matches!(name.as_str(), "p" | "div" | "li")) {
            out.push('\n');
        }
    }
    out
}

fn decode_basic_html_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            out.push(ch);
            continue;
        }
        let mut entity = String::new();
        let mut terminated = false;
        while let Some(&c) = chars.peek() {
            if c == ';' {
                chars.next();
                terminated = true;
                break;
            }
            if entity.len() > 32 || c.is_whitespace() || c == '&' {
                break;
            }
            chars.next();
            entity.push(c);
        }
        if !terminated {
            out.push('&');
            out.push_str(&entity);
            continue;
        }
        let decoded = match entity.as_str() {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                u32::from_str_radix(&entity[2..], 16)
                    .ok()
                    .and_then(char::from_u32)
            }
            _ if entity.starts_with('#') => {
                entity[1..].parse::<u32>().ok().and_then(char::from_u32)
            }
            _ => None,
        };
        if let Some(c) = decoded {
            out.push(c);
        } else {
            out.push('&');
            out.push_str(&entity);
            out.push(';');
        }
    }
    out
}

fn normalize_newlines(input: &str) -> String {
    let input = input.replace("\r\n", "\n");
    let mut out = String::with_capacity(input.len());
    let mut nl_run = 0usize;

    for ch in input.chars() {
        if ch == '\n' {
            nl_run += 1;
            if nl_run <= 2 {
                out.push('\n');
            }
            continue;
        }
        nl_run = 0;
        out.push(ch);
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_loses_tags_and_keeps_paragraphs() {
        let raw = "<p><b>Batman</b> fights crime in Gotham.</p><p>Wham &amp; Pow!</p>";
        assert_eq!(
            summary_to_text(raw),
            "Batman fights crime in Gotham.\nWham & Pow!"
        );
    }

    #[test]
    fn br_variants_become_newlines() {
        assert_eq!(summary_to_text("one<br>two<BR/>three<br />four"), "one\ntwo\nthree\nfour");
    }

    #[test]
    fn unknown_and_bare_entities_survive() {
        assert_eq!(summary_to_text("Fish &chips; &#39;yes&#39; &#x41;"), "Fish &chips; 'yes' A");
        assert_eq!(summary_to_text("R&D dept"), "R&D dept");
    }

    #[test]
    fn empty_summary_stays_empty() {
        assert_eq!(summary_to_text(""), "");
        assert_eq!(summary_to_text("<p></p>"), "");
    }

    #[test]
    fn escapes_markup_significant_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }

    #[test]
    fn decoded_summary_is_escaped_again_for_output() {
        let text = summary_to_text("<p>&lt;img src=x&gt;</p>");
        assert_eq!(text, "<img src=x>");
        assert_eq!(escape_html(&text), "&lt;img src=x&gt;");
    }
}
