// ==========================================
// 名称排序规则
// ==========================================
// 三级比较:
// 1) 主键: 忽略大小写；zh 规则下汉字按拼音（同音字按声调、再按字符）
// 2) 大小写: 小写在前
// 3) 原始字符串兜底，不同名称不会判为相等
// ==========================================

use pinyin::ToPinyin;
use std::cmp::Ordering;

/// 名称排序规则，由配置的语言决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCollator {
    /// 中文: 汉字按拼音排序，排在拉丁字母与数字之后
    #[default]
    Pinyin,
    /// 其他语言: 按 Unicode 码位排序
    CodePoint,
}

/// 主键比较单元；变体顺序即跨类比较顺序
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortUnit {
    Plain(char),
    Han {
        plain: &'static str,
        tone: &'static str,
        ch: char,
    },
}

impl NameCollator {
    /// zh / zh-CN / zh-TW ... 使用拼音规则，其余语言按码位
    pub fn for_locale(locale: &str) -> Self {
        if locale.trim().to_ascii_lowercase().starts_with("zh") {
            NameCollator::Pinyin
        } else {
            NameCollator::CodePoint
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.primary_units(a)
            .cmp(&self.primary_units(b))
            .then_with(|| {
                let case_a = a.chars().map(case_rank);
                let case_b = b.chars().map(case_rank);
                case_a.cmp(case_b)
            })
            .then_with(|| a.cmp(b))
    }

    fn primary_units(&self, s: &str) -> Vec<SortUnit> {
        let mut units = Vec::with_capacity(s.len());
        for c in s.chars() {
            if *self == NameCollator::Pinyin {
                if let Some(p) = c.to_pinyin() {
                    units.push(SortUnit::Han {
                        plain: p.plain(),
                        tone: p.with_tone_num_end(),
                        ch: c,
                    });
                    continue;
                }
            }
            units.extend(c.to_lowercase().map(SortUnit::Plain));
        }
        units
    }
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}
