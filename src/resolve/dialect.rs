//! Config dialect descriptors
//!
//! Every supported configuration language is described by data rather than
//! code: which directive declares a content (or data) root, which directives
//! pull in other files, how values are quoted and terminated, and which file
//! extension an included directory is filtered by. One shared line scanner in
//! [`super::extractor`] consumes these descriptors.

/// Which part of a matching line carries the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSelector {
    /// Whitespace-delimited token at this position (0 is the keyword)
    Token(usize),
    /// Final whitespace-delimited token, for directives with optional matchers
    LastToken,
    /// `key = value` or `key value`, value may be quoted and followed by a comment
    Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    /// Case-sensitive keywords that introduce the directive
    pub keywords: &'static [&'static str],
    pub selector: ValueSelector,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    pub name: &'static str,
    /// Directive naming the content root (web servers) or data directory (databases)
    pub root: Directive,
    /// Directive pulling in other configuration files, if the dialect has one
    pub include: Option<Directive>,
    pub quote_chars: &'static [char],
    /// Trailing statement terminator stripped from values
    pub terminator: Option<char>,
    /// Extension filter applied when an include names a directory; `None` keeps every file
    pub include_extension: Option<&'static str>,
}

pub static APACHE: Dialect = Dialect {
    name: "apache",
    root: Directive {
        keywords: &["DocumentRoot"],
        selector: ValueSelector::Token(1),
    },
    include: Some(Directive {
        keywords: &["Include", "IncludeOptional"],
        selector: ValueSelector::Token(1),
    }),
    quote_chars: &['"', '\''],
    terminator: None,
    include_extension: Some("conf"),
};

pub static NGINX: Dialect = Dialect {
    name: "nginx",
    root: Directive {
        keywords: &["root"],
        selector: ValueSelector::Token(1),
    },
    include: Some(Directive {
        keywords: &["include"],
        selector: ValueSelector::Token(1),
    }),
    quote_chars: &['"', '\''],
    terminator: Some(';'),
    include_extension: Some("conf"),
};

pub static LIGHTTPD: Dialect = Dialect {
    name: "lighttpd",
    root: Directive {
        keywords: &["server.document-root"],
        selector: ValueSelector::Assignment,
    },
    include: Some(Directive {
        keywords: &["include"],
        selector: ValueSelector::Token(1),
    }),
    quote_chars: &['"', '\''],
    terminator: None,
    include_extension: Some("conf"),
};

// `root [<matcher>] <path>`, so the path is the last token.
pub static CADDY: Dialect = Dialect {
    name: "caddy",
    root: Directive {
        keywords: &["root"],
        selector: ValueSelector::LastToken,
    },
    include: Some(Directive {
        keywords: &["import"],
        selector: ValueSelector::Token(1),
    }),
    quote_chars: &['"', '\'', '`'],
    terminator: None,
    include_extension: None,
};

pub static MYSQL: Dialect = Dialect {
    name: "mysql",
    root: Directive {
        keywords: &["datadir"],
        selector: ValueSelector::Assignment,
    },
    include: Some(Directive {
        keywords: &["!include", "!includedir"],
        selector: ValueSelector::Token(1),
    }),
    quote_chars: &['"', '\''],
    terminator: None,
    include_extension: Some("cnf"),
};

pub static POSTGRESQL: Dialect = Dialect {
    name: "postgresql",
    root: Directive {
        keywords: &["data_directory"],
        selector: ValueSelector::Assignment,
    },
    include: Some(Directive {
        keywords: &["include", "include_if_exists", "include_dir"],
        selector: ValueSelector::Assignment,
    }),
    quote_chars: &['\'', '"'],
    terminator: None,
    include_extension: Some("conf"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dialect_has_root_keywords() {
        for dialect in [&APACHE, &NGINX, &LIGHTTPD, &CADDY, &MYSQL, &POSTGRESQL] {
            assert!(!dialect.root.keywords.is_empty(), "{}", dialect.name);
            assert!(!dialect.quote_chars.is_empty(), "{}", dialect.name);
        }
    }

    #[test]
    fn test_only_nginx_terminates_statements() {
        assert_eq!(NGINX.terminator, Some(';'));
        for dialect in [&APACHE, &LIGHTTPD, &CADDY, &MYSQL, &POSTGRESQL] {
            assert_eq!(dialect.terminator, None, "{}", dialect.name);
        }
    }
}
