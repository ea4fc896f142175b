//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! .po (Portable Object) file reader and writer
//!
//! A merge driver has to write back everything it reads, so unlike a
//! compiler front end this parser keeps every field of an entry: all
//! comment kinds, previous-message lines, context, plural forms and
//! obsolete entries.
//!
//! PO file format:
//! - Comments: lines starting with #
//!   - #  - translator comments
//!   - #. - extracted comments
//!   - #: - reference (file:line)
//!   - #, - flags (fuzzy, c-format, etc.)
//!   - #| - previous msgctxt/msgid
//!   - #~ - obsolete entry lines
//! - msgctxt "context" - message context (optional)
//! - msgid "original" - original string
//! - msgid_plural "plural" - plural original (optional)
//! - msgstr "translation" - translation (for singular)
//! - msgstr[N] "translation" - plural translations
//!
//! Lines keep any trailing whitespace; the line terminator style and
//! the comments after the last message are remembered for writing.

use super::charset::Charset;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

/// A single message entry from a .po file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoEntry {
    /// Translator comments (# ...)
    pub translator_comments: Vec<String>,
    /// Extracted comments (#. ...)
    pub extracted_comments: Vec<String>,
    /// Reference comments (#: file:line)
    pub reference_comments: Vec<String>,
    /// Flags (#, fuzzy, c-format)
    pub flags: Vec<String>,
    /// Previous-message lines (#| ...), kept verbatim
    pub previous: Vec<String>,
    /// Message context
    pub msgctxt: Option<String>,
    /// Original string (msgid)
    pub msgid: String,
    /// Plural original (msgid_plural)
    pub msgid_plural: Option<String>,
    /// Translations (msgstr or msgstr[N])
    /// For singular: single element
    /// For plural: multiple elements indexed by plural form
    pub msgstr: Vec<String>,
    /// Whether this entry is obsolete (#~ ...)
    pub is_obsolete: bool,
}

impl PoEntry {
    /// Create a singular entry with the given msgid and translation
    pub fn new(msgid: &str, msgstr: &str) -> Self {
        PoEntry {
            msgid: msgid.to_string(),
            msgstr: vec![msgstr.to_string()],
            ..Default::default()
        }
    }

    /// Check if this is the header entry (empty msgid)
    pub fn is_header(&self) -> bool {
        self.msgid.is_empty() && self.msgctxt.is_none() && !self.is_obsolete
    }

    /// Check if this is a plural entry
    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }

    pub fn is_fuzzy(&self) -> bool {
        self.flags.iter().any(|f| f == "fuzzy")
    }
}

/// Parsed .po file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoFile {
    /// Header entry (msgid = ""); its comments are the file header text
    pub header: Option<PoEntry>,
    /// Message entries, in file order
    pub entries: Vec<PoEntry>,
    /// Lines after the last message (comments and the blank lines among them)
    pub trailing: Vec<String>,
    /// Text encoding of the file
    pub charset: Charset,
    /// Lines end in CR LF
    pub crlf: bool,
}

/// Error type for .po file parsing
#[derive(Debug)]
pub enum PoError {
    /// I/O error
    Io(io::Error),
    /// Parse error with line number
    Parse(usize, String),
    /// Unterminated string
    UnterminatedString(usize),
    /// Bytes that are not UTF-8 in a UTF-8 catalog
    InvalidUtf8(usize),
}

impl fmt::Display for PoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoError::Io(e) => write!(f, "I/O error: {}", e),
            PoError::Parse(line, msg) => write!(f, "line {}: {}", line, msg),
            PoError::UnterminatedString(line) => write!(f, "line {}: unterminated string", line),
            PoError::InvalidUtf8(line) => write!(f, "line {}: invalid UTF-8 sequence", line),
        }
    }
}

impl std::error::Error for PoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PoError {
    fn from(e: io::Error) -> Self {
        PoError::Io(e)
    }
}

/// Split an obsolete marker off a line: `#~ msgid "x"` -> (true, `msgid "x"`)
fn split_obsolete(line: &str) -> (bool, &str) {
    match line.strip_prefix("#~") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, line),
    }
}

/// If `line` continues a string value, return the quoted part
fn continuation(line: &str) -> Option<&str> {
    let (_, body) = split_obsolete(line);
    let body = body.trim_start();
    if body.starts_with('"') {
        Some(body)
    } else {
        None
    }
}

/// Strip the single space that conventionally follows a comment marker
fn comment_text(rest: &str) -> String {
    rest.strip_prefix(' ').unwrap_or(rest).to_string()
}

/// Parser for .po files
pub struct PoParser<R> {
    reader: BufReader<R>,
    line_number: usize,
    current_line: String,
    peeked: Option<String>,
    crlf: Option<bool>,
    trailing: Vec<String>,
}

impl<R: Read> PoParser<R> {
    /// Create a new parser from a reader
    pub fn new(reader: R) -> Self {
        PoParser {
            reader: BufReader::new(reader),
            line_number: 0,
            current_line: String::new(),
            peeked: None,
            crlf: None,
            trailing: Vec::new(),
        }
    }

    /// Parse the .po file
    pub fn parse(&mut self) -> Result<PoFile, PoError> {
        let mut po_file = PoFile::default();

        while let Some(entry) = self.parse_entry()? {
            if entry.is_header() && po_file.header.is_none() && po_file.entries.is_empty() {
                po_file.header = Some(entry);
            } else {
                po_file.entries.push(entry);
            }
        }

        po_file.trailing = std::mem::take(&mut self.trailing);
        po_file.crlf = self.crlf.unwrap_or(false);
        Ok(po_file)
    }

    /// Read the next line, handling the peeked line
    fn next_line(&mut self) -> Result<Option<String>, PoError> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }

        self.current_line.clear();
        let bytes = self.reader.read_line(&mut self.current_line)?;
        if bytes == 0 {
            return Ok(None);
        }

        self.line_number += 1;

        // Remove the line terminator only; the first one sets the style
        let mut line = self.current_line.as_str();
        if let Some(rest) = line.strip_suffix('\n') {
            let crlf = rest.ends_with('\r');
            line = rest.strip_suffix('\r').unwrap_or(rest);
            self.crlf.get_or_insert(crlf);
        }
        Ok(Some(line.to_string()))
    }

    /// Peek at the next line without consuming it
    fn peek_line(&mut self) -> Result<Option<&str>, PoError> {
        if self.peeked.is_none() {
            self.peeked = self.next_line()?;
        }
        Ok(self.peeked.as_deref())
    }

    /// Put back a line to be read again
    fn unread_line(&mut self, line: String) {
        self.peeked = Some(line);
    }

    /// Parse a single entry
    ///
    /// An entry ends at a blank line, at end of input, or where the
    /// comments or msgctxt/msgid of the next entry begin.
    fn parse_entry(&mut self) -> Result<Option<PoEntry>, PoError> {
        let mut entry = PoEntry::default();
        let mut seen_msgid = false;
        let mut seen_msgstr = false;
        // raw lines before the msgid, kept in case no message follows
        let mut pending: Vec<String> = Vec::new();

        while let Some(line) = self.next_line()? {
            if line.trim().is_empty() {
                if seen_msgid {
                    // leave the separator for the next entry to see
                    self.unread_line(line);
                    break;
                }
                pending.push(line);
                continue;
            }
            if !seen_msgid {
                pending.push(line.clone());
            }

            let (obsolete, body) = split_obsolete(&line);
            let body = body.to_string();

            if !obsolete && body.starts_with('#') {
                if seen_msgstr {
                    self.unread_line(line);
                    break;
                }
                self.parse_comment(&mut entry, &body[1..]);
                continue;
            }

            if body.is_empty() {
                // bare "#~"
                continue;
            }

            if let Some(rest) = body.strip_prefix('|') {
                entry.previous.push(comment_text(rest));
                continue;
            }

            if seen_msgstr && (body.starts_with("msgctxt") || body.starts_with("msgid")) {
                self.unread_line(line);
                break;
            }

            if obsolete {
                entry.is_obsolete = true;
            }

            if body.starts_with("domain ") {
                // Domain directive - not part of any message
                continue;
            } else if let Some(rest) = body.strip_prefix("msgctxt") {
                entry.msgctxt = Some(self.parse_string_value(rest)?);
            } else if let Some(rest) = body.strip_prefix("msgid_plural") {
                entry.msgid_plural = Some(self.parse_string_value(rest)?);
            } else if let Some(rest) = body.strip_prefix("msgid") {
                entry.msgid = self.parse_string_value(rest)?;
                seen_msgid = true;
            } else if body.starts_with("msgstr") && !seen_msgid {
                return Err(PoError::Parse(
                    self.line_number,
                    "msgstr without msgid".to_string(),
                ));
            } else if let Some(rest) = body.strip_prefix("msgstr[") {
                // Plural form: msgstr[N] "..."
                let idx_end = rest.find(']').ok_or_else(|| {
                    PoError::Parse(self.line_number, "missing ']' after msgstr index".to_string())
                })?;
                let idx: usize = rest[..idx_end].trim().parse().map_err(|_| {
                    PoError::Parse(self.line_number, "invalid msgstr index".to_string())
                })?;
                let value = self.parse_string_value(&rest[idx_end + 1..])?;

                // Ensure the vector is large enough
                while entry.msgstr.len() <= idx {
                    entry.msgstr.push(String::new());
                }
                entry.msgstr[idx] = value;
                seen_msgstr = true;
            } else if let Some(rest) = body.strip_prefix("msgstr") {
                entry.msgstr = vec![self.parse_string_value(rest)?];
                seen_msgstr = true;
            } else if body.starts_with('"') {
                return Err(PoError::Parse(
                    self.line_number,
                    "string without keyword".to_string(),
                ));
            } else {
                return Err(PoError::Parse(
                    self.line_number,
                    format!("unexpected content: {}", body),
                ));
            }
        }

        // Comments trailing after the last message are not an entry
        if !seen_msgid {
            if pending.iter().any(|l| !l.trim().is_empty()) {
                self.trailing.extend(pending);
            }
            return Ok(None);
        }

        // Ensure msgstr has at least one entry
        if entry.msgstr.is_empty() {
            entry.msgstr.push(String::new());
        }

        Ok(Some(entry))
    }

    /// Parse a comment line; `rest` is the text after '#'
    fn parse_comment(&mut self, entry: &mut PoEntry, rest: &str) {
        if let Some(content) = rest.strip_prefix('.') {
            entry.extracted_comments.push(comment_text(content));
        } else if let Some(content) = rest.strip_prefix(':') {
            entry.reference_comments.push(comment_text(content));
        } else if let Some(content) = rest.strip_prefix(',') {
            for flag in content.split(',') {
                let flag = flag.trim();
                if !flag.is_empty() {
                    entry.flags.push(flag.to_string());
                }
            }
        } else if let Some(content) = rest.strip_prefix('|') {
            entry.previous.push(comment_text(content));
        } else {
            entry.translator_comments.push(comment_text(rest));
        }
    }

    /// Parse a string value after a keyword (e.g., after "msgid ")
    fn parse_string_value(&mut self, rest: &str) -> Result<String, PoError> {
        let rest = rest.trim();
        if !rest.starts_with('"') {
            return Err(PoError::Parse(
                self.line_number,
                "expected quoted string".to_string(),
            ));
        }

        let mut result = self.parse_quoted_string(rest)?;

        // Handle multi-line strings
        loop {
            let next = match self.peek_line()? {
                Some(line) => continuation(line).map(str::to_string),
                None => None,
            };
            match next {
                Some(quoted) => {
                    self.next_line()?;
                    result.push_str(&self.parse_quoted_string(&quoted)?);
                }
                None => break,
            }
        }

        Ok(result)
    }

    /// Parse a quoted string (including escape sequences)
    fn parse_quoted_string(&self, s: &str) -> Result<String, PoError> {
        let s = s.trim();
        let Some(s) = s.strip_prefix('"') else {
            return Err(PoError::Parse(
                self.line_number,
                "expected quoted string".to_string(),
            ));
        };

        let mut result = String::new();
        let mut chars = s.chars();

        loop {
            match chars.next() {
                None => {
                    return Err(PoError::UnterminatedString(self.line_number));
                }
                Some('"') => {
                    // End of string
                    break;
                }
                Some('\\') => match chars.next() {
                    None => {
                        return Err(PoError::UnterminatedString(self.line_number));
                    }
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some('r') => result.push('\r'),
                    Some('a') => result.push('\x07'),
                    Some('b') => result.push('\x08'),
                    Some('f') => result.push('\x0c'),
                    Some('v') => result.push('\x0b'),
                    Some('0') => result.push('\0'),
                    Some('\\') => result.push('\\'),
                    Some('"') => result.push('"'),
                    Some(c) => {
                        // Unknown escape - keep as-is
                        result.push('\\');
                        result.push(c);
                    }
                },
                Some(c) => {
                    result.push(c);
                }
            }
        }

        if !chars.as_str().trim().is_empty() {
            return Err(PoError::Parse(
                self.line_number,
                "trailing characters after string".to_string(),
            ));
        }

        Ok(result)
    }
}

impl PoFile {
    /// Parse a .po file from a string
    pub fn parse(s: &str) -> Result<Self, PoError> {
        let mut parser = PoParser::new(s.as_bytes());
        parser.parse()
    }

    /// Parse a .po file from raw bytes in the charset its header declares
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, PoError> {
        let charset = Charset::detect(bytes);
        let text = charset.decode(bytes)?;
        let mut po_file = Self::parse(&text)?;
        po_file.charset = charset;
        Ok(po_file)
    }

    /// Parse a .po file from a reader
    pub fn parse_from<R: Read>(mut reader: R) -> Result<Self, PoError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse_bytes(&bytes)
    }

    /// Open and parse a .po file
    pub fn load(path: &Path) -> Result<Self, PoError> {
        let file = File::open(path)?;
        Self::parse_from(BufReader::new(file))
    }

    /// Serialize the catalog in its own charset and line terminators
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut text = self.to_string();
        if self.crlf {
            text = text.replace('\n', "\r\n");
        }
        self.charset.encode(&text)
    }

    /// Serialize the catalog to a writer
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }
}

/// Quote and escape a string for output
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\x0b' => out.push_str("\\v"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Write `keyword "value"`, switching to the multi-line form when the
/// value has a newline before its end.
fn write_keyword(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    keyword: &str,
    value: &str,
) -> fmt::Result {
    let segments: Vec<&str> = value.split_inclusive('\n').collect();
    if segments.len() <= 1 {
        return writeln!(f, "{}{} {}", prefix, keyword, escape(value));
    }

    writeln!(f, "{}{} \"\"", prefix, keyword)?;
    for segment in segments {
        writeln!(f, "{}{}", prefix, escape(segment))?;
    }
    Ok(())
}

fn write_comments(
    f: &mut fmt::Formatter<'_>,
    marker: &str,
    comments: &[String],
) -> fmt::Result {
    for comment in comments {
        if comment.is_empty() {
            writeln!(f, "{}", marker)?;
        } else {
            writeln!(f, "{} {}", marker, comment)?;
        }
    }
    Ok(())
}

impl fmt::Display for PoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_comments(f, "#", &self.translator_comments)?;
        write_comments(f, "#.", &self.extracted_comments)?;
        write_comments(f, "#:", &self.reference_comments)?;
        if !self.flags.is_empty() {
            writeln!(f, "#, {}", self.flags.join(", "))?;
        }

        let prefix = if self.is_obsolete { "#~ " } else { "" };
        let previous = if self.is_obsolete { "#~|" } else { "#|" };
        write_comments(f, previous, &self.previous)?;

        if let Some(ref ctxt) = self.msgctxt {
            write_keyword(f, prefix, "msgctxt", ctxt)?;
        }
        write_keyword(f, prefix, "msgid", &self.msgid)?;

        match self.msgid_plural {
            Some(ref plural) => {
                write_keyword(f, prefix, "msgid_plural", plural)?;
                for (i, form) in self.msgstr.iter().enumerate() {
                    write_keyword(f, prefix, &format!("msgstr[{}]", i), form)?;
                }
            }
            None => {
                let msgstr = self.msgstr.first().map(String::as_str).unwrap_or("");
                write_keyword(f, prefix, "msgstr", msgstr)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in self.header.iter().chain(self.entries.iter()) {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", entry)?;
            first = false;
        }
        for line in &self.trailing {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let input = r#"
msgid "Hello"
msgstr "Hola"
"#;
        let po = PoFile::parse(input).unwrap();
        assert_eq!(po.entries.len(), 1);
        assert_eq!(po.entries[0].msgid, "Hello");
        assert_eq!(po.entries[0].msgstr[0], "Hola");
    }

    #[test]
    fn test_parse_header() {
        let input = r#"# French translation
# Copyright (C) 2026
#, fuzzy
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Plural-Forms: nplurals=2; plural=(n != 1);\n"

msgid "Hello"
msgstr "Hola"
"#;
        let po = PoFile::parse(input).unwrap();
        let header = po.header.as_ref().unwrap();
        assert_eq!(
            header.translator_comments,
            vec!["French translation", "Copyright (C) 2026"]
        );
        assert!(header.is_fuzzy());
        assert!(header.msgstr[0].contains("charset=UTF-8"));
        assert!(header.msgstr[0].contains("nplurals=2"));
        assert_eq!(po.entries.len(), 1);
    }

    #[test]
    fn test_parse_multiline() {
        let input = r#"
msgid ""
"Hello "
"World"
msgstr "Hola Mundo"
"#;
        let po = PoFile::parse(input).unwrap();
        assert!(po.header.is_none());
        assert_eq!(po.entries[0].msgid, "Hello World");
    }

    #[test]
    fn test_parse_plural() {
        let input = r#"
msgid "One item"
msgid_plural "%d items"
msgstr[0] "Un elemento"
msgstr[1] "%d elementos"
"#;
        let po = PoFile::parse(input).unwrap();
        assert_eq!(po.entries.len(), 1);
        assert!(po.entries[0].is_plural());
        assert_eq!(po.entries[0].msgid_plural, Some("%d items".to_string()));
        assert_eq!(po.entries[0].msgstr, vec!["Un elemento", "%d elementos"]);
    }

    #[test]
    fn test_parse_comments() {
        let input = r#"
# Translator comment
#. Extracted comment
#: file.c:123 file.c:200
#, c-format, fuzzy
#| msgid "Old %d"
msgid "Test %d"
msgstr "Prueba %d"
"#;
        let po = PoFile::parse(input).unwrap();
        let entry = &po.entries[0];
        assert_eq!(entry.translator_comments, vec!["Translator comment"]);
        assert_eq!(entry.extracted_comments, vec!["Extracted comment"]);
        assert_eq!(entry.reference_comments, vec!["file.c:123 file.c:200"]);
        assert_eq!(entry.flags, vec!["c-format", "fuzzy"]);
        assert_eq!(entry.previous, vec!["msgid \"Old %d\""]);
        assert!(entry.is_fuzzy());
    }

    #[test]
    fn test_escape_sequences() {
        let input = r#"
msgid "Line1\nLine2\tTabbed \"quoted\" back\\slash"
msgstr "Linea1\nLinea2\tTabulado"
"#;
        let po = PoFile::parse(input).unwrap();
        assert_eq!(
            po.entries[0].msgid,
            "Line1\nLine2\tTabbed \"quoted\" back\\slash"
        );
        assert_eq!(po.entries[0].msgstr[0], "Linea1\nLinea2\tTabulado");
    }

    #[test]
    fn test_context() {
        let input = r#"
msgctxt "menu"
msgid "File"
msgstr "Archivo"
"#;
        let po = PoFile::parse(input).unwrap();
        assert_eq!(po.entries[0].msgctxt, Some("menu".to_string()));
        assert_eq!(po.entries[0].msgid, "File");
    }

    #[test]
    fn test_context_with_empty_msgid_is_not_header() {
        let input = r#"
msgctxt "empty"
msgid ""
msgstr "vide"
"#;
        let po = PoFile::parse(input).unwrap();
        assert!(po.header.is_none());
        assert_eq!(po.entries.len(), 1);
    }

    #[test]
    fn test_entries_without_blank_separator() {
        let input = r#"msgid "One"
msgstr ""
# next
msgid "Two"
msgstr "Deux"
msgid "Three"
msgstr "Trois"
"#;
        let po = PoFile::parse(input).unwrap();
        assert_eq!(po.entries.len(), 3);
        assert_eq!(po.entries[0].msgstr, vec![""]);
        assert_eq!(po.entries[1].translator_comments, vec!["next"]);
        assert_eq!(po.entries[2].msgstr, vec!["Trois"]);
    }

    #[test]
    fn test_obsolete_entry() {
        let input = r#"
msgid "Live"
msgstr "Vivant"

# kept for reference
#~ msgid "Gone"
#~ msgstr ""
#~ "Parti"
"#;
        let po = PoFile::parse(input).unwrap();
        assert_eq!(po.entries.len(), 2);
        let gone = &po.entries[1];
        assert!(gone.is_obsolete);
        assert_eq!(gone.msgid, "Gone");
        assert_eq!(gone.msgstr, vec!["Parti"]);
        assert_eq!(gone.translator_comments, vec!["kept for reference"]);
    }

    #[test]
    fn test_missing_msgstr_defaults_to_empty() {
        let po = PoFile::parse("msgid \"Lonely\"\n").unwrap();
        assert_eq!(po.entries[0].msgstr, vec![""]);
    }

    #[test]
    fn test_trailing_comments_kept() {
        let input = "msgid \"A\"\nmsgstr \"B\"\n\n# dangling\n#. and more\n";
        let po = PoFile::parse(input).unwrap();
        assert_eq!(po.entries.len(), 1);
        assert_eq!(po.trailing, vec!["", "# dangling", "#. and more"]);
        assert_eq!(po.to_string(), input);
    }

    #[test]
    fn test_trailing_blank_lines_dropped() {
        let po = PoFile::parse("msgid \"A\"\nmsgstr \"B\"\n\n\n").unwrap();
        assert!(po.trailing.is_empty());
        assert_eq!(po.to_string(), "msgid \"A\"\nmsgstr \"B\"\n");
    }

    #[test]
    fn test_crlf_and_trailing_space_round_trip() {
        let input = "# note  \r\nmsgid \"a\"\r\nmsgstr \"b\"\r\n# trailing remark\r\n";
        let po = PoFile::parse_bytes(input.as_bytes()).unwrap();
        assert!(po.crlf);
        assert_eq!(po.entries[0].translator_comments, vec!["note  "]);
        assert_eq!(po.entries[0].msgstr, vec!["b"]);
        assert_eq!(po.trailing, vec!["# trailing remark"]);
        assert_eq!(po.to_bytes(), input.as_bytes());
    }

    #[test]
    fn test_latin1_round_trip() {
        let input: &[u8] = b"msgid \"\"\n\
msgstr \"\"\n\
\"Content-Type: text/plain; charset=ISO-8859-1\\n\"\n\
\"Language: fr\\n\"\n\
\n\
msgid \"cafe\"\n\
msgstr \"caf\xe9\"\n";
        let po = PoFile::parse_from(input).unwrap();
        assert_eq!(po.charset, Charset::EightBit);
        assert_eq!(po.entries[0].msgstr, vec!["caf\u{e9}"]);

        let mut buf = Vec::new();
        po.write_to(&mut buf).unwrap();
        assert_eq!(buf, input);
    }

    #[test]
    fn test_invalid_utf8_in_utf8_catalog() {
        let input: &[u8] = b"msgid \"\"\n\
msgstr \"\"\n\
\"Content-Type: text/plain; charset=UTF-8\\n\"\n\
\n\
msgid \"cafe\"\n\
msgstr \"caf\xe9\"\n";
        let err = PoFile::parse_from(input).unwrap_err();
        assert_eq!(err.to_string(), "line 6: invalid UTF-8 sequence");
    }

    #[test]
    fn test_error_msgstr_without_msgid() {
        let err = PoFile::parse("# lone\nmsgstr \"x\"\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: msgstr without msgid");
    }

    #[test]
    fn test_error_unterminated_string() {
        let err = PoFile::parse("msgid \"Hello\nmsgstr \"\"\n").unwrap_err();
        assert!(matches!(err, PoError::UnterminatedString(1)));
    }

    #[test]
    fn test_error_unquoted_value() {
        let err = PoFile::parse("msgid Hello\nmsgstr \"\"\n").unwrap_err();
        assert!(matches!(err, PoError::Parse(1, _)));
    }

    #[test]
    fn test_error_bad_plural_index() {
        let input = "msgid \"a\"\nmsgid_plural \"b\"\nmsgstr[x] \"c\"\n";
        let err = PoFile::parse(input).unwrap_err();
        assert_eq!(err.to_string(), "line 3: invalid msgstr index");
    }

    #[test]
    fn test_error_garbage_line() {
        let err = PoFile::parse("msgid \"a\"\nmsgstr \"b\"\nbogus\n").unwrap_err();
        assert!(matches!(err, PoError::Parse(3, _)));
    }

    #[test]
    fn test_write_simple() {
        let po = PoFile {
            header: None,
            entries: vec![PoEntry::new("Hello", "Bonjour"), PoEntry::new("Bye", "")],
            ..Default::default()
        };
        assert_eq!(
            po.to_string(),
            "msgid \"Hello\"\nmsgstr \"Bonjour\"\n\nmsgid \"Bye\"\nmsgstr \"\"\n"
        );
    }

    #[test]
    fn test_write_multiline_value() {
        let entry = PoEntry::new("Two lines", "Deux\nlignes");
        assert_eq!(
            entry.to_string(),
            "msgid \"Two lines\"\nmsgstr \"\"\n\"Deux\\n\"\n\"lignes\"\n"
        );

        // a single trailing newline stays on one line
        let entry = PoEntry::new("End", "Fin\n");
        assert_eq!(entry.to_string(), "msgid \"End\"\nmsgstr \"Fin\\n\"\n");
    }

    #[test]
    fn test_write_obsolete() {
        let mut entry = PoEntry::new("Gone", "Parti");
        entry.is_obsolete = true;
        entry.translator_comments.push("old".to_string());
        assert_eq!(
            entry.to_string(),
            "# old\n#~ msgid \"Gone\"\n#~ msgstr \"Parti\"\n"
        );
    }

    #[test]
    fn test_reparse_preserves_fields() {
        let input = r#"# SOME DESCRIPTIVE TITLE.
#
msgid ""
msgstr ""
"Project-Id-Version: demo\n"
"Content-Type: text/plain; charset=UTF-8\n"

#. TRANSLATORS: greeting
#: src/main.c:10
#, c-format
#| msgid "Hi %s"
msgctxt "greeting"
msgid "Hello %s"
msgstr "Bonjour %s"

#: src/main.c:20
msgid "%d file"
msgid_plural "%d files"
msgstr[0] "%d fichier"
msgstr[1] "%d fichiers"

#~ msgid "Gone"
#~ msgstr "Parti"
"#;
        let po = PoFile::parse(input).unwrap();
        let written = po.to_string();
        assert_eq!(written, input);
        assert_eq!(PoFile::parse(&written).unwrap(), po);
    }

    #[test]
    fn test_write_to() {
        let po = PoFile {
            header: None,
            entries: vec![PoEntry::new("Tab\there", "Tab\tici")],
            ..Default::default()
        };
        let mut buf = Vec::new();
        po.write_to(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "msgid \"Tab\\there\"\nmsgstr \"Tab\\tici\"\n"
        );
    }
}
