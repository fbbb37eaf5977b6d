// src/extract/html.rs
// =============================================================================
// This module harvests link targets from HTML pages.
//
// We use the `html5ever` tokenizer directly rather than building a DOM:
// the page is scanned token by token and only anchor start tags are ever
// looked at. The tokenizer recovers from malformed markup on its own, so
// the scan always runs to the end-of-input token and never fails.
// =============================================================================

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// Token sink that collects `href` values from `<a>` start tags as the
/// tokenizer streams them, preserving document order.
#[derive(Default)]
struct AnchorSink {
    hrefs: Vec<String>,
}

impl TokenSink for AnchorSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(tag) = token {
            if tag.kind == TagKind::StartTag && &*tag.name == "a" {
                for attr in &tag.attrs {
                    if &*attr.name.local == "href" {
                        self.hrefs.push(attr.value.to_string());
                    }
                }
            }
        }
        TokenSinkResult::Continue
    }
}

/// Returns every `href` value found on an `<a>` start tag in `body`, in
/// document order. An empty vector is a valid outcome (page had no links).
pub fn harvest_links(body: &str) -> Vec<String> {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(body));

    let mut tokenizer = Tokenizer::new(AnchorSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.hrefs
}
