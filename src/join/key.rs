//! Join key derivation from record headers.

use crate::policy::KeyOptions;

/// Turns raw headers into join keys according to [`KeyOptions`].
#[derive(Debug, Clone, Default)]
pub struct KeyExtractor {
    opts: KeyOptions,
}

impl KeyExtractor {
    pub fn new(opts: KeyOptions) -> Self {
        Self { opts }
    }

    /// Key for `header`, or `None` when the requested field does not exist.
    ///
    /// A `None` means "skip this record", not an error. An empty header is a
    /// valid key (the empty string) unless a field is requested.
    pub fn extract(&self, header: &str) -> Option<String> {
        let selected = match self.opts.field {
            Some(field) => self.tokens(header).nth(field.get() - 1)?,
            None => header,
        };
        Some(if self.opts.case_fold {
            selected.to_ascii_uppercase()
        } else {
            selected.to_string()
        })
    }

    /// Tokens between runs of delimiter characters. With an empty delimiter
    /// the whole header is the only token.
    fn tokens<'a>(&'a self, header: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        let delims = self.opts.delimiter.as_str();
        if delims.is_empty() {
            return Box::new(std::iter::once(header));
        }
        Box::new(
            header
                .split(move |c: char| delims.contains(c))
                .filter(|t| !t.is_empty()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn field(delimiter: &str, n: usize) -> KeyExtractor {
        KeyExtractor::new(KeyOptions {
            case_fold: false,
            delimiter: delimiter.to_string(),
            field: NonZeroUsize::new(n),
        })
    }

    #[test]
    fn whole_header_by_default() {
        let k = KeyExtractor::default();
        assert_eq!(k.extract("gene_1 human").as_deref(), Some("gene_1 human"));
        assert_eq!(k.extract("").as_deref(), Some(""));
    }

    #[test]
    fn selects_one_based_field() {
        let k = field("_", 2);
        assert_eq!(k.extract("gene_1_human").as_deref(), Some("1"));
    }

    #[test]
    fn delimiter_runs_and_edges_make_no_empty_tokens() {
        let k = field("_|", 1);
        assert_eq!(k.extract("__gene||_1_").as_deref(), Some("gene"));
        assert_eq!(field("_|", 2).extract("__gene||_1_").as_deref(), Some("1"));
        assert_eq!(field("_|", 3).extract("__gene||_1_"), None);
    }

    #[test]
    fn missing_field_skips() {
        assert_eq!(field(" ", 3).extract("only two"), None);
        assert_eq!(field(" ", 1).extract(""), None);
    }

    #[test]
    fn empty_delimiter_keeps_header_whole() {
        assert_eq!(field("", 1).extract("a_b c").as_deref(), Some("a_b c"));
        assert_eq!(field("", 2).extract("a_b c"), None);
    }

    #[test]
    fn case_folding_merges_keys() {
        let k = KeyExtractor::new(KeyOptions {
            case_fold: true,
            ..KeyOptions::default()
        });
        assert_eq!(k.extract("geneA"), k.extract("GENEA"));
        assert_eq!(k.extract("geneA").as_deref(), Some("GENEA"));
    }
}
