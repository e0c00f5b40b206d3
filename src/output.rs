use compact_str::CompactString;

/// Marker appended to the line of the code that went to the clipboard
pub const COPIED_MARKER: &str = "<-- copied to clipboard";

/// One generated code paired with the account it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    /// Rendered, zero-padded code
    pub code: String,
    /// Position of the account in the store
    pub index: usize,
    /// Account label
    pub identifier: CompactString,
}

/// Codes to render, tagged by how they were selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSet {
    /// Every account in store order; nothing is designated for copy
    Listing(Vec<CodeEntry>),
    /// Candidates in rank order; the first is designated for the clipboard
    Ranked(Vec<CodeEntry>),
}

/// What the caller prints and what it hands to the clipboard sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    /// Lines to print, in order
    pub lines: Vec<String>,
    /// Code designated for copy, verbatim
    pub clipboard: Option<String>,
}

/// Render a code value as a decimal string of exactly `digits` characters.
/// Leading zeros are significant; `42` with six digits is `"000042"`.
pub fn format_code(code: u32, digits: u32) -> String {
    format!("{code:0width$}", width = digits as usize)
}

/// Compose the presentation of a resolved code set.
///
/// Listing mode prints `code [index] identifier` per account, or bare
/// codes under `quiet`. Ranked mode prints `code identifier` per
/// candidate with the primary line carrying the copy marker; under
/// `quiet` it prints only the primary code, undecorated.
pub fn render(set: &CodeSet, quiet: bool) -> RenderedOutput {
    match set {
        CodeSet::Listing(entries) => RenderedOutput {
            lines: entries
                .iter()
                .map(|entry| {
                    if quiet {
                        entry.code.clone()
                    } else {
                        format!("{} [{}] {}", entry.code, entry.index, entry.identifier)
                    }
                })
                .collect(),
            clipboard: None,
        },
        CodeSet::Ranked(entries) => {
            let clipboard = entries.first().map(|entry| entry.code.clone());
            let lines = if quiet {
                clipboard.iter().cloned().collect()
            } else {
                entries
                    .iter()
                    .enumerate()
                    .map(|(rank, entry)| {
                        if rank == 0 {
                            format!("{} {} {}", entry.code, entry.identifier, COPIED_MARKER)
                        } else {
                            format!("{} {}", entry.code, entry.identifier)
                        }
                    })
                    .collect()
            };
            RenderedOutput { lines, clipboard }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, index: usize, identifier: &str) -> CodeEntry {
        CodeEntry {
            code: code.to_string(),
            index,
            identifier: identifier.into(),
        }
    }

    #[test]
    fn format_code_pads_to_exactly_the_digit_count() {
        assert_eq!(format_code(42, 6), "000042");
        assert_eq!(format_code(287082, 6), "287082");
        assert_eq!(format_code(0, 6), "000000");
        assert_eq!(format_code(5924, 8), "00005924");
        for digits in 1..=9u32 {
            assert_eq!(format_code(1, digits).len(), digits as usize);
        }
    }

    #[test]
    fn listing_shows_code_index_and_identifier() {
        let set = CodeSet::Listing(vec![
            entry("287082", 0, "bob@aws"),
            entry("359152", 1, "bobby@gmail"),
        ]);
        let rendered = render(&set, false);
        assert_eq!(
            rendered.lines,
            vec!["287082 [0] bob@aws", "359152 [1] bobby@gmail"]
        );
        assert_eq!(rendered.clipboard, None);
    }

    #[test]
    fn quiet_listing_is_bare_codes() {
        let set = CodeSet::Listing(vec![
            entry("287082", 0, "bob@aws"),
            entry("359152", 1, "bobby@gmail"),
        ]);
        let rendered = render(&set, true);
        assert_eq!(rendered.lines, vec!["287082", "359152"]);
        assert_eq!(rendered.clipboard, None);
    }

    #[test]
    fn primary_line_carries_the_copy_marker() {
        let set = CodeSet::Ranked(vec![
            entry("287082", 0, "bob@aws"),
            entry("359152", 1, "bobby@gmail"),
        ]);
        let rendered = render(&set, false);
        assert_eq!(
            rendered.lines,
            vec![
                "287082 bob@aws <-- copied to clipboard",
                "359152 bobby@gmail"
            ]
        );
        assert_eq!(rendered.clipboard.as_deref(), Some("287082"));
    }

    #[test]
    fn quiet_ranked_output_is_the_primary_code_alone() {
        let set = CodeSet::Ranked(vec![
            entry("287082", 0, "bob@aws"),
            entry("359152", 1, "bobby@gmail"),
        ]);
        let rendered = render(&set, true);
        assert_eq!(rendered.lines, vec!["287082"]);
        assert_eq!(rendered.clipboard.as_deref(), Some("287082"));
    }

    #[test]
    fn empty_ranked_set_renders_nothing() {
        let rendered = render(&CodeSet::Ranked(Vec::new()), false);
        assert!(rendered.lines.is_empty());
        assert_eq!(rendered.clipboard, None);
    }
}
