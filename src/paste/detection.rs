//! 文字处理器来源检测模块
//!
//! # 设计思路
//!
//! 从 Word / Google Docs 等文字处理器复制的 HTML 带有大量私有标记，
//! 本模块通过正则识别这些“来源特征”，只有命中时才执行清理。
//!
//! # 实现思路
//!
//! - 使用 `RegexSet` 进行一次性多模式匹配。
//! - 通过 `once_cell::sync::Lazy` 在首次调用时编译正则，后续零成本复用。

use once_cell::sync::Lazy;
use regex::RegexSet;

/// 预编译的来源特征集合
///
/// 1. Word 段落/文字样式类名（`class=MsoNormal` 等）
/// 2. 内联 `mso-` 样式（双引号/单引号）
/// 3. Word 文档元数据标记
/// 4. 旧版 Word 导出的字体标签
/// 5. Word Online 段落容器
/// 6. Google Docs 内部 guid
static WORD_ORIGIN_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r#"(?i)class\s*=\s*["']?\s*Mso"#,
        r#"(?i)style\s*=\s*"[^"]*\bmso-"#,
        r#"(?i)style\s*=\s*'[^']*\bmso-"#,
        r"(?i)w:WordDocument",
        r#"(?i)<font\s+face\s*=\s*["']?Times New Roman"#,
        r#"(?i)class\s*=\s*["']?OutlineElement"#,
        r#"(?i)id\s*=\s*["']?docs-internal-guid-"#,
    ])
    .expect("word origin patterns are valid")
});

/// 判断内容是否来自文字处理器
///
/// # 参数
/// * `content` - 剪贴板 HTML 或编辑器导出的文本
///
/// # 返回
/// - `true`：包含文字处理器特征，需要清理
/// - `false`：普通内容，原样保留
pub fn is_word_content(content: &str) -> bool {
    WORD_ORIGIN_PATTERNS.is_match(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mso_class_detected() {
        assert!(is_word_content(r#"<p class=MsoNormal>Hei</p>"#));
        assert!(is_word_content(r#"<p class="MsoListParagraph">Hei</p>"#));
    }

    #[test]
    fn test_mso_style_detected() {
        assert!(is_word_content(r#"<span style="font-size:11pt;mso-bidi-font-weight:bold">x</span>"#));
        assert!(is_word_content(r#"<span style='mso-spacerun:yes'> </span>"#));
    }

    #[test]
    fn test_word_document_marker_detected() {
        assert!(is_word_content("<xml><w:WordDocument><w:View>Normal</w:View></w:WordDocument></xml>"));
    }

    #[test]
    fn test_google_docs_detected() {
        assert!(is_word_content(r#"<b id="docs-internal-guid-1234abcd">text</b>"#));
    }

    #[test]
    fn test_plain_html_not_detected() {
        assert!(!is_word_content("<p><strong>hello</strong> world</p>"));
        assert!(!is_word_content("# Heading\n\n* item"));
    }
}
