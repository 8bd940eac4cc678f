//! 富文本（HTML）辅助函数

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static LEADING_P_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<p(?:\s[^>]*)?>").expect("leading <p> pattern is valid"));

static TRAILING_P_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</p>\s*$").expect("trailing </p> pattern is valid"));

/// 去掉全部标签，空白实体替换为空格
pub fn strip_markup(html: &str) -> String {
    let text = TAG_RE.replace_all(html, "");
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

/// 去掉标签后是否为空，`<p><br></p>` 视为空
pub fn is_blank_rich_text(html: &str) -> bool {
    strip_markup(html).is_empty()
}

/// 去掉外层的一对 `<p>` 标签，其余标签保留
pub fn strip_paragraph_wrapper(html: &str) -> String {
    let without_leading = LEADING_P_RE.replace(html, "");
    TRAILING_P_RE.replace(&without_leading, "").trim().to_string()
}
