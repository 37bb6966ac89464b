//! Renders a `storesByGeo` result into a Telegram HTML message.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use teloxide::utils::html;

use super::models::{store_type_icon, Store, StoresByGeo};

/// Telegram's limit on message text length.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Room kept free for the truncation notice.
const TRUNCATION_MARGIN: usize = 64;

pub const NO_STORES: &str = "저런! 근처에 마스크 판매처가 존재하지 않아요.";
pub const TRUNCATED: &str = "판매처가 너무 많아서, 나머지 판매처의 출력은 생략했어요.\n";
const NO_DATA: &str = "❌ 정보 미제공";

static MAP_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://map.kakao.com/").expect("map url is valid"));

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^(]+)\((.+)\)$").expect("address pattern is valid")
});

/// Splits `"street (note)"` into the street part and the note.
/// Addresses without a trailing note come back whole with an empty note.
pub fn split_address(addr: &str) -> (&str, &str) {
    match ADDRESS_RE.captures(addr) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(address), Some(note)) => (address.as_str(), note.as_str()),
            _ => (addr, ""),
        },
        None => (addr, ""),
    }
}

/// Map search link for the store: first address segment plus the store name.
/// The query is form-encoded, then escaped for use inside an `href`.
pub fn map_link(address: &str, name: &str) -> String {
    let street = address.split(',').next().unwrap_or_default();
    let query = format!("{} {name}", street.trim()).replace(',', " ");

    let mut url = MAP_URL.clone();
    url.query_pairs_mut().append_pair("q", &query);
    html::escape(url.as_str())
}

pub fn store_line(store: &Store) -> String {
    let (address, note) = split_address(&store.addr);
    let label = if note.is_empty() {
        html::escape(&store.name)
    } else {
        format!("{} ({})", html::escape(&store.name), html::escape(note))
    };

    let status = match store.remain_stat.and_then(|stat| stat.describe()) {
        Some(desc) => match &store.stock_at {
            Some(at) => format!("<b>{desc}</b> <i>({} 기준)</i>", html::escape(at)),
            None => format!("<b>{desc}</b>"),
        },
        None => NO_DATA.to_string(),
    };

    format!(
        "{} <a href=\"{}\">{label}</a>: {status}\n",
        store_type_icon(&store.store_type),
        map_link(address, &store.name),
    )
}

fn header(radius: u32, count: usize) -> String {
    format!("반경 <b>{radius}</b>미터에서 마스크 판매처를 <b>{count}</b>군데 찾았어요.\n")
}

/// Builds the final reply. Store lines are appended until the next one
/// would push the message past the length limit, at which point the
/// truncation notice closes the reply.
pub fn render_reply(radius: u32, result: &StoresByGeo) -> String {
    if result.count == 0 {
        return NO_STORES.to_string();
    }

    let mut reply = header(radius, result.count);
    let mut len = reply.chars().count();

    for store in &result.stores {
        let line = store_line(store);
        let line_len = line.chars().count();
        if len + line_len > MAX_MESSAGE_LEN - TRUNCATION_MARGIN {
            reply.push_str(TRUNCATED);
            break;
        }
        reply.push_str(&line);
        len += line_len;
    }

    reply
}
