//! The two optional whole-text transforms. Both are lossless with
//! respect to the markup structure; the pipeline applies at most one.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::interfaces::adapters::MarkupTransform;

static INTER_TAG_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">\s+<").expect("whitespace pattern must compile"));

pub struct MarkupMinifier;

impl MarkupTransform for MarkupMinifier {
    fn transform(&self, markup: &str) -> Result<String> {
        Ok(INTER_TAG_WHITESPACE
            .replace_all(markup.trim(), "><")
            .into_owned())
    }
}

pub struct MarkupPrettyPrinter;

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Tag(&'a str),
    Text(&'a str),
}

impl<'a> Token<'a> {
    fn is_opening(&self) -> bool {
        matches!(self, Token::Tag(tag)
            if !tag.starts_with("</")
                && !tag.ends_with("/>")
                && !tag.starts_with("<?")
                && !tag.starts_with("<!"))
    }

    fn is_closing(&self) -> bool {
        matches!(self, Token::Tag(tag) if tag.starts_with("</"))
    }
}

fn tokenize(markup: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = markup.trim();

    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => {
                let end = rest
                    .find('>')
                    .ok_or_else(|| anyhow::anyhow!("unterminated tag in markup"))?;
                tokens.push(Token::Tag(&rest[..=end]));
                rest = &rest[end + 1..];
            }
            Some(start) => {
                let text = rest[..start].trim();
                if !text.is_empty() {
                    tokens.push(Token::Text(text));
                }
                rest = &rest[start..];
            }
            None => {
                let text = rest.trim();
                if !text.is_empty() {
                    tokens.push(Token::Text(text));
                }
                break;
            }
        }
    }

    Ok(tokens)
}

impl MarkupTransform for MarkupPrettyPrinter {
    fn transform(&self, markup: &str) -> Result<String> {
        let tokens = tokenize(markup)?;
        let mut output = String::new();
        let mut depth = 0usize;
        let mut index = 0;

        while index < tokens.len() {
            // Elements with pure text content stay on one line.
            if tokens[index].is_opening() && index + 2 < tokens.len() {
                if let (Token::Tag(open), Token::Text(text), Token::Tag(close)) =
                    (&tokens[index], &tokens[index + 1], &tokens[index + 2])
                {
                    if tokens[index + 2].is_closing() {
                        push_line(&mut output, depth, &format!("{}{}{}", open, text, close));
                        index += 3;
                        continue;
                    }
                }
            }

            match &tokens[index] {
                token @ Token::Tag(tag) => {
                    if token.is_closing() {
                        depth = depth.saturating_sub(1);
                        push_line(&mut output, depth, tag);
                    } else if token.is_opening() {
                        push_line(&mut output, depth, tag);
                        depth += 1;
                    } else {
                        push_line(&mut output, depth, tag);
                    }
                }
                Token::Text(text) => push_line(&mut output, depth, text),
            }
            index += 1;
        }

        Ok(output)
    }
}

fn push_line(output: &mut String, depth: usize, content: &str) {
    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&"  ".repeat(depth));
    output.push_str(content);
}
