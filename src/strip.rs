//! 纯文本剥离模块
//!
//! # 设计思路
//!
//! 保存评论前，把任意标记内容转换为不含任何标签与属性的纯文本（零白名单策略）。
//! 输出需要与此前宿主使用的清理器逐字节一致，因此：
//! - 不折叠空白
//! - `script` / `style` / `textarea` / `option` 的内容整体丢弃
//! - 注释、doctype、处理指令丢弃
//! - 先解码实体，再对 `&` `<` `>` 重新转义
//!
//! # 实现思路
//!
//! 单遍字符扫描，不构建 DOM。遇到不完整的标签（输入末尾缺少 `>`）直接丢弃剩余部分，
//! 任何输入都不会报错。

/// 实体名（含 `#`/`x` 前缀）的最大长度。
const MAX_ENTITY_LEN: usize = 32;

/// 内容需要整体丢弃的标签。
const NON_TEXT_TAGS: [&str; 4] = ["script", "style", "textarea", "option"];

/// 剥离全部标签与属性，返回纯文本。
///
/// # 示例
/// ```rust
/// use comment_editor::strip::strip;
///
/// assert_eq!(strip("<b>hi <i>there</i></b>"), "hi there");
/// assert_eq!(strip("<script>x</script>"), "");
/// ```
pub fn strip(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '<' => {
                let after = &rest[1..];
                if let Some(comment) = after.strip_prefix("!--") {
                    rest = skip_past(comment, "-->");
                    continue;
                }
                match after.chars().next() {
                    Some('!') | Some('?') => {
                        rest = skip_past(after, ">");
                    }
                    Some(next) if next == '/' || next.is_ascii_alphabetic() => {
                        rest = consume_tag(after);
                    }
                    _ => {
                        out.push_str("&lt;");
                        rest = after;
                    }
                }
            }
            '&' => {
                let (decoded, consumed) = decode_entity(rest);
                match decoded {
                    Some(c) => push_escaped(&mut out, c),
                    None => out.push_str("&amp;"),
                }
                rest = &rest[consumed..];
            }
            other => {
                push_escaped(&mut out, other);
                rest = &rest[other.len_utf8()..];
            }
        }
    }

    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        other => out.push(other),
    }
}

/// 跳过 `needle` 及其之前的内容；找不到时丢弃剩余输入。
fn skip_past<'a>(input: &'a str, needle: &str) -> &'a str {
    match input.find(needle) {
        Some(pos) => &input[pos + needle.len()..],
        None => "",
    }
}

/// 找到标签结束位置（引号内的 `>` 不算）。
fn tag_end(input: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (idx, ch) in input.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '>') => return Some(idx),
            _ => {}
        }
    }
    None
}

/// 消费一个标签（`input` 从 `<` 之后开始），返回剩余输入。
fn consume_tag(input: &str) -> &str {
    let Some(end) = tag_end(input) else {
        return "";
    };

    let body = &input[..end];
    let remaining = &input[end + 1..];

    if body.starts_with('/') || body.ends_with('/') {
        return remaining;
    }

    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == ':')
        .collect::<String>()
        .to_ascii_lowercase();

    if !NON_TEXT_TAGS.contains(&name.as_str()) {
        return remaining;
    }

    skip_non_text_content(remaining, &name)
}

/// 跳过 `script` 等标签的内容直到对应的结束标签。
fn skip_non_text_content<'a>(input: &'a str, name: &str) -> &'a str {
    let closing = format!("</{}", name);
    let mut search_from = 0;

    while let Some(offset) = find_ignore_ascii_case(&input[search_from..], &closing) {
        let start = search_from + offset;
        let after_name = start + closing.len();
        let boundary = input[after_name..].chars().next();
        if matches!(boundary, None | Some('>') | Some('/')) || boundary.is_some_and(char::is_whitespace) {
            return match tag_end(&input[after_name..]) {
                Some(end) => &input[after_name + end + 1..],
                None => "",
            };
        }
        search_from = after_name;
    }

    ""
}

/// 忽略 ASCII 大小写查找 `needle`（`needle` 须为 ASCII）。
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// 解码 `input` 开头的实体，返回（字符，消费的字节数）。
///
/// 无法识别时返回 `(None, 1)`，只消费 `&` 本身。
fn decode_entity(input: &str) -> (Option<char>, usize) {
    // 实体名不会太长，只在开头的窗口内找 `;`
    let Some(semi) = input.as_bytes()[1..]
        .iter()
        .take(MAX_ENTITY_LEN)
        .position(|&b| b == b';')
        .map(|pos| pos + 1)
    else {
        return (None, 1);
    };

    let name = &input[1..semi];
    let decoded = if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
    } else {
        named_entity(name)
    };

    match decoded {
        Some(c) => (Some(c), semi + 1),
        None => (None, 1),
    }
}

fn named_entity(name: &str) -> Option<char> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "shy" => '\u{ad}',
        "copy" => '©',
        "reg" => '®',
        "hellip" => '…',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        "bull" => '•',
        "middot" => '·',
        "aelig" => 'æ',
        "AElig" => 'Æ',
        "oslash" => 'ø',
        "Oslash" => 'Ø',
        "aring" => 'å',
        "Aring" => 'Å',
        _ => return None,
    };
    Some(ch)
}
