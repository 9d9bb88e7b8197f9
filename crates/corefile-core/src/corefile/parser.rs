//! Corefile parser
//!
//! Recursive descent over the token stream. A server block header is every
//! word up to `{`; inside a body, a node's arguments are the words on the
//! same line as its name, and a `{` on that line opens its own body.
//!
//! A `{` glued to the end of a word (`.:53{`, `health{`) also opens a body,
//! but only in a server block header or as the last word of a node's line,
//! and never when escaped with `\`. Elsewhere it is literal text.
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use super::lexer::{Token, TokenKind};
use super::{Corefile, Node, NodeKind, ServerBlock};
use crate::error::{Error, Result};

/// Corefile token parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse every server block in the token stream
    pub fn parse(mut self) -> Result<Corefile> {
        let mut servers = Vec::new();
        while !self.is_at_end() {
            servers.push(self.parse_server_block()?);
        }
        Ok(Corefile::new(servers))
    }

    fn parse_server_block(&mut self) -> Result<ServerBlock> {
        let header_line = self.current_line();
        let mut keys = Vec::new();

        loop {
            match self.current() {
                Some(token) if token.kind == TokenKind::Word => {
                    let open_line = token.line;
                    match strip_open_brace(&token.text).map(str::to_string) {
                        Some(key) => {
                            keys.push(key);
                            self.advance();
                            let plugins = self.parse_body(NodeKind::Plugin, open_line)?;
                            return Ok(ServerBlock::new(keys, plugins));
                        }
                        None => {
                            keys.push(token.text.clone());
                            self.advance();
                        }
                    }
                }
                Some(token) if token.kind == TokenKind::OpenBrace => {
                    if keys.is_empty() {
                        return Err(Error::syntax(token.line, "server block has no keys"));
                    }
                    let open_line = token.line;
                    self.advance();
                    let plugins = self.parse_body(NodeKind::Plugin, open_line)?;
                    return Ok(ServerBlock::new(keys, plugins));
                }
                Some(token) => return Err(Error::syntax(token.line, "unexpected '}'")),
                None => {
                    return Err(Error::syntax(
                        header_line,
                        "expected '{' after server block keys",
                    ))
                }
            }
        }
    }

    /// Parse nodes up to the `}` closing a body opened on `open_line`
    fn parse_body(&mut self, kind: NodeKind, open_line: usize) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        loop {
            match self.current() {
                None => return Err(Error::syntax(open_line, "unmatched '{'")),
                Some(token) => match token.kind {
                    TokenKind::CloseBrace => {
                        self.advance();
                        return Ok(nodes);
                    }
                    TokenKind::OpenBrace => {
                        return Err(Error::syntax(token.line, "unexpected '{'"));
                    }
                    TokenKind::Word => nodes.push(self.parse_node(kind)?),
                },
            }
        }
    }

    fn parse_node(&mut self, kind: NodeKind) -> Result<Node> {
        let line = self.current_line();
        let mut words = Vec::new();
        let mut opens_body = false;

        while let Some(token) = self.current() {
            if token.kind != TokenKind::Word || token.line != line {
                break;
            }
            let attached = if self.ends_line() {
                strip_open_brace(&token.text).map(str::to_string)
            } else {
                None
            };
            let text = token.text.clone();
            self.advance();
            match attached {
                Some(word) => {
                    words.push(word);
                    opens_body = true;
                    break;
                }
                None => words.push(text),
            }
        }

        let mut words = words.into_iter();
        let name = words
            .next()
            .ok_or_else(|| Error::syntax(line, "expected a directive name"))?;
        let mut node = Node::new(kind, name, words.collect());

        if !opens_body {
            if let Some(token) = self.current() {
                if token.kind == TokenKind::OpenBrace && token.line == line {
                    self.advance();
                    opens_body = true;
                }
            }
        }
        if opens_body {
            node.children = self.parse_body(NodeKind::Option, line)?;
        }

        Ok(node)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Whether the current token is the last one on its line
    fn ends_line(&self) -> bool {
        match (self.current(), self.tokens.get(self.position + 1)) {
            (Some(token), Some(next)) => next.line != token.line,
            _ => true,
        }
    }

    fn current_line(&self) -> usize {
        self.current()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

/// The word before a trailing unescaped `{`, if the token has one
fn strip_open_brace(text: &str) -> Option<&str> {
    let word = text.strip_suffix('{')?;
    let escapes = word.chars().rev().take_while(|&ch| ch == '\\').count();
    if word.is_empty() || escapes % 2 == 1 {
        None
    } else {
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Corefile> {
        Corefile::parse(text)
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse("").unwrap().servers.len(), 0);
        assert_eq!(parse("  \n# only a comment\n").unwrap().servers.len(), 0);
    }

    #[test]
    fn test_nested_structure() {
        let corefile = parse(
            ".:53 {\n    kubernetes cluster.local in-addr.arpa {\n        pods insecure\n    }\n    cache 30\n}\n",
        )
        .unwrap();

        let block = &corefile.servers[0];
        assert_eq!(block.keys, vec![".:53"]);
        assert_eq!(block.plugins.len(), 2);

        let kubernetes = &block.plugins[0];
        assert_eq!(kubernetes.kind, NodeKind::Plugin);
        assert_eq!(kubernetes.args, vec!["cluster.local", "in-addr.arpa"]);
        assert_eq!(kubernetes.children[0].kind, NodeKind::Option);
        assert_eq!(kubernetes.children[0].name, "pods");
        assert_eq!(kubernetes.children[0].args, vec!["insecure"]);

        assert_eq!(block.plugins[1].args, vec!["30"]);
    }

    #[test]
    fn test_one_line_block() {
        let corefile = parse("example.org { forward . 1.2.3.4 }").unwrap();
        let block = &corefile.servers[0];
        assert_eq!(block.plugins.len(), 1);
        assert_eq!(block.plugins[0].args, vec![".", "1.2.3.4"]);
    }

    #[test]
    fn test_multiple_keys() {
        let corefile = parse("example.org example.net:53 {\n    errors\n}\n").unwrap();
        assert_eq!(corefile.servers[0].keys, vec!["example.org", "example.net:53"]);
    }

    #[test]
    fn test_unmatched_open_brace() {
        let err = parse(".:53 {\n    errors\n    health {\n").unwrap_err();
        match err {
            Error::Syntax { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("unmatched"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unexpected_close_brace() {
        let err = parse(".:53 {\n    errors\n}\n}\n").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 4, .. }));
    }

    #[test]
    fn test_missing_header_brace() {
        let err = parse(".:53\n").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_empty_header() {
        let err = parse("{\n    errors\n}\n").unwrap_err();
        assert!(matches!(err, Error::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_attached_brace_opens_header() {
        let corefile = parse(".:53{\n    errors\n}\n").unwrap();
        assert_eq!(corefile.servers[0].keys, vec![".:53"]);
        assert_eq!(corefile.servers[0].plugins[0].name, "errors");
    }

    #[test]
    fn test_attached_brace_opens_body_at_line_end() {
        let corefile = parse(
            ".:53 {\n    health{\n        lameduck 5s\n    }\n    forward . 1.2.3.4{\n        max_fails 3\n    }\n}\n",
        )
        .unwrap();
        let plugins = &corefile.servers[0].plugins;
        assert_eq!(plugins[0].name, "health");
        assert_eq!(plugins[0].children[0].name, "lameduck");
        assert_eq!(plugins[1].args, vec![".", "1.2.3.4"]);
        assert_eq!(plugins[1].children[0].args, vec!["3"]);
    }

    #[test]
    fn test_brace_inside_line_is_literal() {
        let input = ".:53 {\n    template IN A x{ y\n    cache 30\n}\n";
        let corefile = parse(input).unwrap();
        let plugins = &corefile.servers[0].plugins;
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0].args, vec!["IN", "A", "x{", "y"]);
        assert!(plugins[0].children.is_empty());
        assert_eq!(corefile.to_text(), input);
    }

    #[test]
    fn test_escaped_brace_is_literal() {
        let input = ".:53 {\n    rewrite name regex (.*)\\{ {1}.example.org\n    answer a\\{\n    errors\n}\n";
        let corefile = parse(input).unwrap();
        let plugins = &corefile.servers[0].plugins;
        assert_eq!(plugins.len(), 3);
        assert_eq!(
            plugins[0].args,
            vec!["name", "regex", "(.*)\\{", "{1}.example.org"]
        );
        assert_eq!(plugins[1].args, vec!["a\\{"]);
        assert!(plugins[1].children.is_empty());
        assert_eq!(corefile.to_text(), input);
    }

    #[test]
    fn test_strip_open_brace() {
        assert_eq!(strip_open_brace("health{"), Some("health"));
        assert_eq!(strip_open_brace("a\\\\{"), Some("a\\\\"));
        assert_eq!(strip_open_brace("a\\{"), None);
        assert_eq!(strip_open_brace("{1}.example.org"), None);
        assert_eq!(strip_open_brace("plain"), None);
    }
}
