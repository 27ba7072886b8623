//! 文字处理器标记清理模块
//!
//! # 设计思路
//!
//! 从 Word 等文字处理器粘贴的 HTML 中，真正有意义的只有段落、标题、列表、强调等逻辑结构；
//! 其余的样式 span、条件注释、命名空间标签（`o:p`、`v:shape`）都是导出噪音。
//! 本模块只在 [`is_word_content`] 命中时才清理，普通内容原样返回。
//!
//! # 实现思路
//!
//! 1. 先把 `MsoListParagraph` 段落转换为 `<ul>/<ol>`（需要用到条件注释里的列表符号）
//! 2. 按顺序执行删除/替换规则（有序规则表，前一条的输出是后一条的输入）
//! 3. 重建所有开始标签，只保留白名单属性
//! 4. 展开已无属性的 `<span>` / `<a>`
//!
//! 单轮清理重复执行直到输出不再变化，因此 `clean(clean(x)) == clean(x)`。

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::detection::is_word_content;

/// 清理轮数上限。
const MAX_PASSES: usize = 32;

/// 重建标签时保留的属性。
const ALLOWED_ATTRIBUTES: [&str; 7] = ["href", "src", "alt", "title", "colspan", "rowspan", "start"];

/// 有序替换规则。
struct FilterRule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl FilterRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("word filter pattern is valid"),
            replacement,
        }
    }

    fn apply(&self, input: String) -> String {
        if !self.pattern.is_match(&input) {
            return input;
        }
        log::trace!("word filter rule `{}` applied", self.name);
        self.pattern.replace_all(&input, self.replacement).into_owned()
    }
}

/// 结构清理规则：在属性过滤之前执行。
static STRUCTURE_RULES: Lazy<Vec<FilterRule>> = Lazy::new(|| {
    vec![
        FilterRule::new(
            "downlevel_hidden_conditionals",
            r"(?is)<!--\[if[^\]]*\]>.*?<!\[endif\]-->",
            "",
        ),
        FilterRule::new("downlevel_revealed_markers", r"(?i)<!\[(?:if[^\]]*|endif)\]>", ""),
        FilterRule::new("comments", r"(?s)<!--.*?-->", ""),
        FilterRule::new("style_blocks", r"(?is)<style\b[^>]*>.*?</style\s*>", ""),
        FilterRule::new("script_blocks", r"(?is)<script\b[^>]*>.*?</script\s*>", ""),
        FilterRule::new("xml_blocks", r"(?is)<xml\b[^>]*>.*?</xml\s*>", ""),
        FilterRule::new("title_blocks", r"(?is)<title\b[^>]*>.*?</title\s*>", ""),
        FilterRule::new("head_blocks", r"(?is)<head\b[^>]*>.*?</head\s*>", ""),
        FilterRule::new("processing_instructions", r"(?i)<\?xml[^>]*>|<!doctype[^>]*>", ""),
        FilterRule::new(
            "document_and_void_artifacts",
            r"(?i)</?(?:html|body|meta|link|img|font)\b[^>]*>",
            "",
        ),
        FilterRule::new("namespaced_tags", r"</?[A-Za-z]+:[A-Za-z0-9]+\b[^>]*>", ""),
        FilterRule::new(
            "spacerun_spans",
            r#"(?i)<span\s+style\s*=\s*["']\s*mso-spacerun\s*:\s*yes\s*;?\s*["']\s*>((?:&nbsp;|\s|\x{a0})*)</span>"#,
            "${1}",
        ),
        FilterRule::new("nbsp_entities", r"&nbsp;", "\u{a0}"),
    ]
});

/// 收尾规则：在属性过滤之后执行。
static INLINE_RULES: Lazy<Vec<FilterRule>> = Lazy::new(|| {
    vec![
        FilterRule::new("strike_tags", r"(?i)<(/?)s>", "<${1}strike>"),
        FilterRule::new("bare_spans", r"(?i)</?span>", ""),
        FilterRule::new("bare_anchors", r"(?is)<a>(.*?)</a>", "${1}"),
    ]
});

static START_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<([A-Za-z][A-Za-z0-9]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*(/?)>"#,
    )
    .expect("start tag pattern is valid")
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern is valid")
});

static LIST_PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<p\b([^>]*?mso-list\s*:\s*l\d+\s+level(\d+)[^>]*)>(.*?)</p\s*>")
        .expect("list paragraph pattern is valid")
});

static LIST_MARKER_CONDITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!(?:--)?\[if\s+!supportLists\](?:--)?>(.*?)<!(?:--)?\[endif\](?:--)?>")
        .expect("list marker pattern is valid")
});

static LIST_MARKER_IGNORE_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<span[^>]*mso-list\s*:\s*Ignore[^>]*>(.*?)</span>"#)
        .expect("list ignore span pattern is valid")
});

static ANY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+|[A-Za-z]|[ivxlcdmIVXLCDM]+)[.)]$").expect("ordered marker pattern is valid")
});

/// 清理文字处理器标记。
///
/// 非文字处理器内容原样返回。
///
/// # 示例
/// ```rust
/// use comment_editor::paste::clean;
///
/// let html = r#"<p class=MsoNormal><span style='mso-bidi-font-weight:bold'>Hei</span></p>"#;
/// assert_eq!(clean(html), "<p>Hei</p>");
/// assert_eq!(clean("<p>Hei</p>"), "<p>Hei</p>");
/// ```
pub fn clean(content: &str) -> String {
    if !is_word_content(content) {
        return content.to_string();
    }

    let mut html = clean_pass(content);
    let mut passes = 1;
    // 删除一段结构可能把两侧文本拼成新的注释或标签，重复清理直到不再变化
    while passes < MAX_PASSES {
        let next = clean_pass(&html);
        if next == html {
            break;
        }
        html = next;
        passes += 1;
    }
    if passes == MAX_PASSES {
        log::warn!("⚠️ 文字处理器清理在 {} 轮后仍未收敛", MAX_PASSES);
    }

    log::debug!(
        "🧹 已清理文字处理器标记 - 输入 {} 字节，输出 {} 字节，{} 轮",
        content.len(),
        html.len(),
        passes
    );

    html
}

/// 单轮清理：列表转换 → 结构规则 → 属性过滤 → 收尾规则。
fn clean_pass(content: &str) -> String {
    let mut html = convert_lists(content);
    for rule in STRUCTURE_RULES.iter() {
        html = rule.apply(html);
    }

    html = filter_attributes(&html);

    for rule in INLINE_RULES.iter() {
        html = rule.apply(html);
    }

    html
}

/// 重建开始标签，只保留白名单属性。
fn filter_attributes(html: &str) -> String {
    START_TAG
        .replace_all(html, |caps: &Captures| {
            let name = &caps[1];
            let self_closing = !caps[3].is_empty();
            let mut rebuilt = format!("<{}", name);

            for attr in ATTRIBUTE.captures_iter(&caps[2]) {
                let attr_name = attr[1].to_ascii_lowercase();
                if !ALLOWED_ATTRIBUTES.contains(&attr_name.as_str()) {
                    continue;
                }
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .or_else(|| attr.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                rebuilt.push_str(&format!(" {}=\"{}\"", attr_name, value.replace('"', "&quot;")));
            }

            if self_closing {
                rebuilt.push_str(" /");
            }
            rebuilt.push('>');
            rebuilt
        })
        .into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bulleted,
    Ordered,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            Self::Bulleted => "<ul>",
            Self::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Self::Bulleted => "</ul>",
            Self::Ordered => "</ol>",
        }
    }
}

/// 打开中的列表栈；每层记录列表类型与当前 `<li>` 是否未关闭。
#[derive(Default)]
struct ListStack {
    levels: Vec<(ListKind, bool)>,
}

impl ListStack {
    fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn pop_into(&mut self, out: &mut String) {
        if let Some((kind, li_open)) = self.levels.pop() {
            if li_open {
                out.push_str("</li>");
            }
            out.push_str(kind.close_tag());
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while !self.is_empty() {
            self.pop_into(out);
        }
    }

    fn push_item(&mut self, out: &mut String, level: usize, kind: ListKind, content: &str) {
        let level = level.max(1);

        while self.levels.len() > level {
            self.pop_into(out);
        }

        if self.levels.len() == level {
            if self.levels.last().is_some_and(|(k, _)| *k != kind) {
                self.pop_into(out);
            } else if let Some((_, li_open)) = self.levels.last_mut() {
                if *li_open {
                    out.push_str("</li>");
                    *li_open = false;
                }
            }
        }

        while self.levels.len() < level {
            out.push_str(kind.open_tag());
            self.levels.push((kind, false));
        }

        out.push_str("<li>");
        out.push_str(content);
        if let Some((_, li_open)) = self.levels.last_mut() {
            *li_open = true;
        }
    }
}

/// 将 Word 列表段落转换为 `<ul>/<ol>`，相邻段落合并为同一列表。
fn convert_lists(html: &str) -> String {
    if !LIST_PARAGRAPH.is_match(html) {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len());
    let mut stack = ListStack::default();
    let mut last = 0;

    for caps in LIST_PARAGRAPH.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        let between = &html[last..whole.start()];

        if stack.is_empty() || !between.trim().is_empty() {
            stack.close_all(&mut out);
            out.push_str(between);
        }

        let level = caps[2].parse::<usize>().unwrap_or(1);
        let (kind, content) = split_list_marker(&caps[3]);
        stack.push_item(&mut out, level, kind, content.trim());

        last = whole.end();
    }

    stack.close_all(&mut out);
    out.push_str(&html[last..]);
    out
}

/// 拆出列表符号，返回（列表类型，去掉符号后的内容）。
fn split_list_marker(paragraph: &str) -> (ListKind, String) {
    let marker_pattern = if LIST_MARKER_CONDITIONAL.is_match(paragraph) {
        &*LIST_MARKER_CONDITIONAL
    } else {
        &*LIST_MARKER_IGNORE_SPAN
    };

    let Some(caps) = marker_pattern.captures(paragraph) else {
        return (ListKind::Bulleted, paragraph.to_string());
    };

    let marker_text = ANY_TAG
        .replace_all(&caps[1], "")
        .replace("&nbsp;", "")
        .replace('\u{a0}', "");
    let kind = if ORDERED_MARKER.is_match(marker_text.trim()) {
        ListKind::Ordered
    } else {
        ListKind::Bulleted
    };

    let content = marker_pattern.replacen(paragraph, 1, "").into_owned();
    (kind, content)
}
