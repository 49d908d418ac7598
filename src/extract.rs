//! Pure extraction logic against the site's stream and embed pages.
//!
//! Two markers matter: the `iframe#thatframe` element on the stream page,
//! and the playlist URL inside the embed page. The embed page carries the
//! URL either as a `source: '...'` player option, or (on the obfuscated
//! variant) as a character array the page reassembles at runtime with
//! `return([...]).join("")`. Both shapes are decoded here, statically.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static SOURCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"source:.*?'(.*)'").expect("valid regex"));

/// Pull the `src` of the stream page's player iframe.
pub fn iframe_src(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("iframe#thatframe").ok()?;
    let src = doc.select(&sel).next()?.value().attr("src")?;
    if src.is_empty() {
        None
    } else {
        Some(src.to_string())
    }
}

/// Extract the playlist URL from an embed page body.
///
/// Tries the `source: '...'` assignment first; on the obfuscated page
/// variant falls back to reassembling the array-join script. Returns `None`
/// when neither shape is present (the caller skips the channel).
pub fn media_url(body: &str) -> Option<String> {
    from_source_attr(body).or_else(|| from_join_script(body))
}

/// Strategy one: `source: 'https://.../index.m3u8'` player option.
///
/// The site serves an index manifest at one path and the playable playlist
/// at a sibling path differing only by that token, so `index` is swapped for
/// `playlist` in the captured string.
fn from_source_attr(body: &str) -> Option<String> {
    let captured = SOURCE_RE.captures(body)?.get(1)?.as_str();
    if captured.is_empty() {
        return None;
    }
    Some(captured.replace("index", "playlist"))
}

/// Strategy two: the script block following `div#player` builds the URL as
/// `return(["h","t","t","p",...]).join("")`. Take the text between the last
/// `return(` and the next `.join`, strip brackets and quotes, and
/// concatenate the comma-separated characters.
fn from_join_script(body: &str) -> Option<String> {
    let doc = Html::parse_document(body);
    let sel = Selector::parse("div#player").ok()?;
    let player = doc.select(&sel).next()?;
    let script = player.next_siblings().find_map(ElementRef::wrap)?;
    let data = script.text().collect::<String>();

    let tail = data.rsplit_once("return(")?.1;
    let array = tail.split_once(".join")?.0;
    let array = array
        .trim()
        .trim_end_matches(')')
        .trim_start_matches('[')
        .trim_end_matches(']');

    let url: String = array.replace('"', "").split(',').collect();
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}
