//! Channel name normalization
//!
//! Manifests from different boxes spell the same channel many ways
//! ("cctv1高清", "中央1综合频道", "CCTV-1 HD"). The normalizer rewrites them
//! into one canonical form so deduplication can collapse them.
//!
//! Stages run in a fixed order and every stage sees the output of the one
//! before it:
//!
//! 1. brand spellings folded to `CCTV`
//! 2. noise tokens removed
//! 3. built-in CCTV alias table, in table order
//! 4. configured extra regex rules, in configuration order
//! 5. stray `CCTV<n>台` suffix cleanup
//! 6. trim

use regex::Regex;
use std::sync::OnceLock;

use crate::config::RewriteRuleConfig;
use crate::errors::{AppError, AppResult};

const BRAND_SPELLINGS: &[(&str, &str)] = &[("cctv", "CCTV"), ("中央", "CCTV"), ("央视", "CCTV")];

const NOISE_TOKENS: &[&str] = &[
    "高清", "超高", "HD", "标清", "频道", "-", " ", "PLUS", "＋", "(", ")", "台",
];

/// Verbose CCTV descriptors and their canonical names
///
/// Order matters: rules are applied top to bottom and later rules see the
/// output of earlier ones. The patterns are literal text.
const CCTV_ALIASES: &[(&str, &str)] = &[
    ("CCTV1综合", "CCTV1"),
    ("CCTV2财经", "CCTV2"),
    ("CCTV3综艺", "CCTV3"),
    ("CCTV4国际", "CCTV4"),
    ("CCTV4中文国际", "CCTV4"),
    ("CCTV4欧洲", "CCTV4"),
    ("CCTV5体育", "CCTV5"),
    ("CCTV6电影", "CCTV6"),
    ("CCTV7军事", "CCTV7"),
    ("CCTV7军农", "CCTV7"),
    ("CCTV7农业", "CCTV7"),
    ("CCTV7国防军事", "CCTV7"),
    ("CCTV8电视剧", "CCTV8"),
    ("CCTV9记录", "CCTV9"),
    ("CCTV9纪录", "CCTV9"),
    ("CCTV10科教", "CCTV10"),
    ("CCTV11戏曲", "CCTV11"),
    ("CCTV12社会与法", "CCTV12"),
    ("CCTV13新闻", "CCTV13"),
    ("CCTV新闻", "CCTV13"),
    ("CCTV14少儿", "CCTV14"),
    ("CCTV15音乐", "CCTV15"),
    ("CCTV16奥林匹克", "CCTV16"),
    ("CCTV17农业农村", "CCTV17"),
    ("CCTV17农业", "CCTV17"),
    ("CCTV5+体育赛视", "CCTV5+"),
    ("CCTV5+体育赛事", "CCTV5+"),
    ("CCTV5+体育", "CCTV5+"),
];

fn stray_suffix() -> &'static Regex {
    static STRAY_SUFFIX: OnceLock<Regex> = OnceLock::new();
    STRAY_SUFFIX.get_or_init(|| Regex::new(r"CCTV(\d+)台").expect("static regex is valid"))
}

/// A user supplied regex rewrite
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: &str, replacement: &str) -> AppResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            AppError::configuration(format!("Invalid normalizer pattern '{pattern}': {e}"))
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }
}

/// Rewrites raw channel names into their canonical form
#[derive(Debug, Clone, Default)]
pub struct ChannelNameNormalizer {
    extra_rules: Vec<RewriteRule>,
}

impl ChannelNameNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in pipeline plus extra regex rules from configuration
    ///
    /// Replacements may reference capture groups (`$1`, `${name}`).
    pub fn with_rules(rules: &[RewriteRuleConfig]) -> AppResult<Self> {
        let extra_rules = rules
            .iter()
            .map(|rule| RewriteRule::new(&rule.pattern, &rule.replacement))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Self { extra_rules })
    }

    pub fn normalize(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }

        let mut name = name.to_string();

        for (from, to) in BRAND_SPELLINGS {
            name = name.replace(from, to);
        }

        for token in NOISE_TOKENS {
            name = name.replace(token, "");
        }

        for (pattern, canonical) in CCTV_ALIASES {
            name = name.replace(pattern, canonical);
        }

        for rule in &self.extra_rules {
            name = rule
                .pattern
                .replace_all(&name, rule.replacement.as_str())
                .into_owned();
        }

        let name = stray_suffix().replace_all(&name, "CCTV${1}");
        name.trim().to_string()
    }
}

/// Normalize with the built-in rules only
pub fn normalize_channel_name(name: &str) -> String {
    static DEFAULT: OnceLock<ChannelNameNormalizer> = OnceLock::new();
    DEFAULT
        .get_or_init(ChannelNameNormalizer::new)
        .normalize(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CCTV-5+体育赛视 高清", "CCTV5+")]
    #[case("中央1综合频道", "CCTV1")]
    #[case("cctv1高清", "CCTV1")]
    #[case("央视新闻", "CCTV13")]
    #[case("CCTV-13 新闻", "CCTV13")]
    #[case("CCTV4中文国际", "CCTV4")]
    #[case("CCTV-7 国防军事", "CCTV7")]
    #[case("CCTV9纪录HD", "CCTV9")]
    #[case("CCTV12社会与法", "CCTV12")]
    #[case("CCTV17农业农村", "CCTV17")]
    #[case("CCTV5+体育赛事", "CCTV5+")]
    #[case("CCTV5PLUS", "CCTV5")]
    #[case("湖南卫视 高清", "湖南卫视")]
    #[case("(测试)台", "测试")]
    fn test_normalizes_known_spellings(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_channel_name(raw), expected);
    }

    #[test]
    fn test_empty_input_short_circuits() {
        assert_eq!(normalize_channel_name(""), "");
    }

    #[test]
    fn test_noise_only_name_becomes_empty() {
        assert_eq!(normalize_channel_name(" 高清 - 频道 "), "");
    }

    #[rstest]
    #[case("CCTV1")]
    #[case("CCTV5+")]
    #[case("CCTV-5+体育赛视 高清")]
    #[case("中央1综合频道")]
    #[case("cctv13新闻")]
    #[case("CCTV 16 奥林匹克")]
    #[case("北京卫视HD")]
    #[case("东方卫视(高清)")]
    fn test_normalization_is_idempotent(#[case] raw: &str) {
        let once = normalize_channel_name(raw);
        assert_eq!(normalize_channel_name(&once), once);
    }

    #[test]
    fn test_extra_rules_run_after_aliases() {
        let normalizer = ChannelNameNormalizer::with_rules(&[RewriteRuleConfig {
            pattern: r"^CCTV(\d+)$".to_string(),
            replacement: "CCTV-$1".to_string(),
        }])
        .unwrap();

        assert_eq!(normalizer.normalize("中央1综合频道"), "CCTV-1");
        assert_eq!(normalizer.normalize("湖南卫视"), "湖南卫视");
    }

    #[test]
    fn test_invalid_extra_rule_is_configuration_error() {
        let err = ChannelNameNormalizer::with_rules(&[RewriteRuleConfig {
            pattern: "(unclosed".to_string(),
            replacement: String::new(),
        }])
        .unwrap_err();
        assert!(matches!(err, AppError::Configuration { .. }));
    }
}
