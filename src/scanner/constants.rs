//! `wp-config.php` constant scan
//!
//! A small PHP lexer: comments and non-literal arguments are skipped, and
//! only `define( 'NAME', 'value' )` calls with two string literals count.

/// Connection settings that must never leave the source site
pub const DENIED_CONSTANTS: [&str; 6] = [
    "DB_NAME",
    "DB_USER",
    "DB_PASSWORD",
    "DB_HOST",
    "DB_CHARSET",
    "DB_COLLATE",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigConstant {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Str(String),
    Punct(char),
}

/// Constants defined with literal values, in definition order
///
/// A constant defined twice keeps its position and takes the later value.
pub fn scan_constants(source: &str) -> Vec<ConfigConstant> {
    let tokens = tokenize(source);
    let mut found: Vec<ConfigConstant> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        if let Some((name, value)) = match_define(&tokens[i..]) {
            i += 5;
            if DENIED_CONSTANTS.contains(&name.as_str()) {
                continue;
            }
            match found.iter_mut().find(|c| c.name == name) {
                Some(existing) => existing.value = value,
                None => found.push(ConfigConstant { name, value }),
            }
        } else {
            i += 1;
        }
    }

    found
}

// The value must end the argument: `'a' . $b` is not a literal.
fn match_define(tokens: &[Token]) -> Option<(String, String)> {
    match tokens {
        [
            Token::Ident(define),
            Token::Punct('('),
            Token::Str(name),
            Token::Punct(','),
            Token::Str(value),
            Token::Punct(')' | ','),
            ..,
        ] if define.eq_ignore_ascii_case("define") => Some((name.clone(), value.clone())),
        _ => None,
    }
}

fn tokenize(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            _ if c.is_whitespace() => i += 1,
            '#' => i = skip_line(&chars, i),
            '/' if chars.get(i + 1) == Some(&'/') => i = skip_line(&chars, i),
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            '\'' | '"' => match read_string(&chars, i) {
                Some((value, next)) => {
                    tokens.push(Token::Str(value));
                    i = next;
                }
                None => break,
            },
            _ if c.is_alphanumeric() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            _ => {
                tokens.push(Token::Punct(c));
                i += 1;
            }
        }
    }

    tokens
}

fn skip_line(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i] != '\n' {
        i += 1;
    }
    i
}

/// Read a quoted literal starting at `start`; returns the unescaped value
/// and the index after the closing quote, `None` if it never closes
fn read_string(chars: &[char], start: usize) -> Option<(String, usize)> {
    let quote = chars[start];
    let mut value = String::new();
    let mut i = start + 1;

    while i < chars.len() {
        let c = chars[i];
        if c == quote {
            return Some((value, i + 1));
        }
        if c == '\\' {
            if let Some(&next) = chars.get(i + 1) {
                match (quote, next) {
                    (_, '\\') => value.push('\\'),
                    (q, n) if n == q => value.push(n),
                    ('"', 'n') => value.push('\n'),
                    ('"', 't') => value.push('\t'),
                    ('"', '$') => value.push('$'),
                    (_, n) => {
                        value.push('\\');
                        value.push(n);
                    }
                }
                i += 2;
                continue;
            }
        }
        value.push(c);
        i += 1;
    }

    None
}
