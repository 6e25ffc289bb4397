use std::ops::Range;

use regex::Regex;

use crate::error::AssembleError;

const INCLUDE_PATTERN: &str = r"<!--\s*include:\s*([\w/\\.-]+)\s*-->";

/// One `<!-- include: path -->` occurrence in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Byte range of the whole comment, delimiters included.
    pub span: Range<usize>,
    pub raw_path: String,
}

impl IncludeDirective {
    pub fn path(&self) -> &str {
        self.raw_path.trim()
    }

    /// Inline replacement used when the include target does not exist.
    pub fn missing_marker(&self) -> String {
        format!("<!-- ERROR: Could not include {} -->", self.path())
    }
}

#[derive(Debug, Clone)]
pub struct IncludePattern {
    regex: Regex,
}

impl IncludePattern {
    pub fn new() -> Result<Self, AssembleError> {
        Ok(Self {
            regex: Regex::new(INCLUDE_PATTERN)?,
        })
    }

    /// Non-overlapping directives, left to right.
    pub fn directives<'a>(&'a self, text: &'a str) -> impl Iterator<Item = IncludeDirective> + 'a {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let path = caps.get(1)?;
            Some(IncludeDirective {
                span: whole.range(),
                raw_path: path.as_str().to_string(),
            })
        })
    }
}
