//! Line-oriented directive extraction over a [`Dialect`]

use super::dialect::{Dialect, Directive, ValueSelector};

/// Values of `directive` in `contents`, in declaration order.
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Token
/// selectors require the first token to equal one of the directive keywords,
/// so `rootdir /x` never matches `root`. Lines that match but carry no value
/// contribute nothing.
pub fn extract(contents: &str, dialect: &Dialect, directive: &Directive) -> Vec<String> {
    contents
        .lines()
        .filter_map(|line| extract_line(line.trim(), dialect, directive))
        .collect()
}

fn extract_line(line: &str, dialect: &Dialect, directive: &Directive) -> Option<String> {
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    match directive.selector {
        ValueSelector::Assignment => assignment_value(line, dialect, directive.keywords),
        ValueSelector::Token(index) => {
            let tokens = tokenize(line, dialect.quote_chars);
            if !directive.keywords.contains(&tokens.first()?.as_str()) {
                return None;
            }
            normalize(tokens.get(index)?, dialect)
        }
        ValueSelector::LastToken => {
            let tokens = tokenize(line, dialect.quote_chars);
            if tokens.len() < 2 || !directive.keywords.contains(&tokens[0].as_str()) {
                return None;
            }
            normalize(tokens.last()?, dialect)
        }
    }
}

/// Split on unquoted whitespace, dropping the quotes themselves.
///
/// An unquoted token starting with `#` begins a trailing comment and ends the
/// line.
fn tokenize(line: &str, quote_chars: &[char]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if quote_chars.contains(&c) => {
                quote = Some(c);
                in_token = true;
            }
            None if c == '#' && !in_token => break,
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }

    tokens
}

fn normalize(value: &str, dialect: &Dialect) -> Option<String> {
    let mut value = value.trim();
    if let Some(terminator) = dialect.terminator {
        value = value.trim_end_matches(terminator);
    }
    let value = value.trim_matches(|c| dialect.quote_chars.contains(&c)).trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn assignment_value(line: &str, dialect: &Dialect, keywords: &[&str]) -> Option<String> {
    let keyword = keywords.iter().copied().find(|keyword| {
        line.strip_prefix(keyword)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_whitespace() || c == '=')
    })?;

    let rest = line[keyword.len()..].trim_start();
    let rest = rest.strip_prefix('=').unwrap_or(rest).trim_start();

    let value = match rest.chars().next() {
        Some(q) if dialect.quote_chars.contains(&q) => {
            let inner = &rest[q.len_utf8()..];
            let end = inner.find(q).unwrap_or(inner.len());
            &inner[..end]
        }
        _ => {
            let end = rest.find('#').unwrap_or(rest.len());
            &rest[..end]
        }
    };

    normalize(value, dialect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::dialect::{APACHE, CADDY, LIGHTTPD, MYSQL, NGINX, POSTGRESQL};
    use yare::parameterized;

    fn roots(contents: &str, dialect: &Dialect) -> Vec<String> {
        extract(contents, dialect, &dialect.root)
    }

    fn includes(contents: &str, dialect: &Dialect) -> Vec<String> {
        let directive = dialect.include.expect("dialect declares includes");
        extract(contents, dialect, &directive)
    }

    #[parameterized(
        apache_plain = { &APACHE, "DocumentRoot /var/www/html", "/var/www/html" },
        apache_quoted = { &APACHE, "  DocumentRoot \"/srv/my site\"", "/srv/my site" },
        nginx_terminated = { &NGINX, "root /usr/share/nginx/html;", "/usr/share/nginx/html" },
        nginx_quoted_terminated = { &NGINX, "root \"/x\";", "/x" },
        nginx_detached_terminator = { &NGINX, "    root /var/www ;", "/var/www" },
        lighttpd_assignment = { &LIGHTTPD, "server.document-root = \"/var/www/lighttpd\"", "/var/www/lighttpd" },
        caddy_plain = { &CADDY, "root /srv/www", "/srv/www" },
        caddy_matcher = { &CADDY, "\troot * /srv/site", "/srv/site" },
        caddy_trailing_comment = { &CADDY, "root * /srv/site # static files", "/srv/site" },
        caddy_quoted_hash = { &CADDY, "root * \"/srv/#site\"", "/srv/#site" },
        nginx_trailing_comment = { &NGINX, "root /var/www/app; # main site", "/var/www/app" },
        mysql_datadir = { &MYSQL, "datadir = /var/lib/mysql", "/var/lib/mysql" },
        mysql_no_spaces = { &MYSQL, "datadir=/data/mysql", "/data/mysql" },
        postgres_quoted_comment = { &POSTGRESQL, "data_directory = '/var/lib/postgresql/16/main'  # use data in another directory", "/var/lib/postgresql/16/main" },
        postgres_unquoted_comment = { &POSTGRESQL, "data_directory = /pg/data # moved", "/pg/data" },
    )]
    fn test_root_extraction(dialect: &Dialect, line: &str, expected: &str) {
        assert_eq!(roots(line, dialect), vec![expected.to_string()]);
    }

    #[parameterized(
        apache_comment = { &APACHE, "# DocumentRoot /var/www" },
        apache_prefix_only = { &APACHE, "DocumentRootX /var/www" },
        apache_no_value = { &APACHE, "DocumentRoot" },
        nginx_substring = { &NGINX, "rootdir /x;" },
        nginx_bare_terminator = { &NGINX, "root ;" },
        caddy_keyword_only = { &CADDY, "root" },
        mysql_commented = { &MYSQL, "#datadir = /var/lib/mysql" },
        mysql_longer_key = { &MYSQL, "datadirectory = /x" },
        postgres_empty_quotes = { &POSTGRESQL, "data_directory = ''" },
    )]
    fn test_non_matching_lines(dialect: &Dialect, line: &str) {
        assert!(roots(line, dialect).is_empty(), "{line:?} should yield nothing");
    }

    #[test]
    fn test_values_keep_declaration_order() {
        let conf = "\
<VirtualHost *:80>
    DocumentRoot /var/www/one
</VirtualHost>
# DocumentRoot /var/www/disabled
<VirtualHost *:8080>
    DocumentRoot '/var/www/two'
</VirtualHost>
";
        assert_eq!(roots(conf, &APACHE), vec!["/var/www/one", "/var/www/two"]);
    }

    #[test]
    fn test_repeated_values_are_kept() {
        let conf = "root /a;\nserver {\n    root /b;\n}\nroot /a;\n";
        assert_eq!(roots(conf, &NGINX), vec!["/a", "/b", "/a"]);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let conf = "\
root * /srv/site # static files
import snippets/*
root /srv/other
";
        let first = roots(conf, &CADDY);
        assert_eq!(first, roots(conf, &CADDY));
        assert_eq!(first, vec!["/srv/site", "/srv/other"]);
        assert_eq!(includes(conf, &CADDY), includes(conf, &CADDY));
    }

    #[test]
    fn test_apache_include_variants() {
        let conf = "\
Include ports.conf
IncludeOptional sites-enabled/*.conf
IncludeOptional \"conf-enabled/*.conf\"
";
        assert_eq!(
            includes(conf, &APACHE),
            vec!["ports.conf", "sites-enabled/*.conf", "conf-enabled/*.conf"]
        );
    }

    #[test]
    fn test_nginx_includes() {
        let conf = "\
http {
    include       mime.types;
    include /etc/nginx/conf.d/*.conf;
}
";
        assert_eq!(
            includes(conf, &NGINX),
            vec!["mime.types", "/etc/nginx/conf.d/*.conf"]
        );
    }

    #[test]
    fn test_mysql_include_directives() {
        let conf = "\
[mysqld]
!includedir /etc/mysql/conf.d/
!include /etc/mysql/extra.cnf
";
        assert_eq!(
            includes(conf, &MYSQL),
            vec!["/etc/mysql/conf.d/", "/etc/mysql/extra.cnf"]
        );
    }

    #[test]
    fn test_postgres_include_assignments() {
        let conf = "\
include_dir = 'conf.d'
include_if_exists 'local.conf'
include = 'extra.conf'
";
        assert_eq!(
            includes(conf, &POSTGRESQL),
            vec!["conf.d", "local.conf", "extra.conf"]
        );
    }

    #[test]
    fn test_tokenize_quotes_and_whitespace() {
        assert_eq!(
            tokenize("a  \"b c\"\t'd'", &['"', '\'']),
            vec!["a", "b c", "d"]
        );
        assert_eq!(tokenize("x \"\"", &['"']), vec!["x", ""]);
        assert_eq!(tokenize("a b#c # d e", &['"']), vec!["a", "b#c"]);
        assert!(tokenize("   ", &['"']).is_empty());
    }
}
