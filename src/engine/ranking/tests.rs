use super::{NameCollator, RankingEngine};
use crate::config::RankingConfig;
use crate::domain::member::Member;
use crate::domain::reagent::Reagent;
use crate::domain::types::DangerLevel;
use crate::engine::strategy::SortStrategy;
use chrono::{Duration, NaiveDate};
use std::cmp::Ordering;

// ==========================================
// 测试辅助函数
// ==========================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

fn engine() -> RankingEngine {
    RankingEngine::new(today())
}

/// 创建测试用试剂
///
/// expiry_offset: 相对 today 的天数，None 表示无有效期
fn reagent(
    name: &str,
    danger: DangerLevel,
    expiry_offset: Option<i64>,
    current: f64,
    initial: f64,
    usage: Option<f64>,
) -> Reagent {
    let mut r = Reagent::new(format!("ID-{}", name), name);
    r.danger_level = danger;
    r.expiry_date = expiry_offset.map(|d| today() + Duration::days(d));
    r.current_amount = current;
    r.initial_amount = initial;
    r.usage_frequency = usage;
    r
}

fn names(records: &[Reagent]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

fn all_strategies() -> Vec<SortStrategy> {
    [
        "smart",
        "name_asc",
        "name_desc",
        "dangerLevel_asc",
        "dangerLevel_desc",
        "expiryDate_asc",
        "expiryDate_desc",
        "stockLevel_asc",
        "stockLevel_desc",
        "usageFrequency_asc",
        "usageFrequency_desc",
        "purchaseDate_asc",
        "purchaseDate_desc",
        "category_asc",
        "currentAmount_desc",
    ]
    .iter()
    .map(|s| s.parse().unwrap())
    .collect()
}

/// 覆盖各排序级边界的样本集
fn fixture() -> Vec<Reagent> {
    let mut list = vec![
        reagent("甲醛", DangerLevel::High, Some(-10), 0.0, 100.0, Some(5.0)),
        reagent("乙醚", DangerLevel::High, Some(-1), 50.0, 100.0, None),
        reagent("丙酮", DangerLevel::High, Some(0), 10.0, 100.0, Some(1.0)),
        reagent("苯", DangerLevel::High, Some(5), 10.0, 0.0, Some(3.0)),
        reagent("乙醇", DangerLevel::Medium, Some(30), 20.0, 100.0, Some(8.0)),
        reagent("Ethanol", DangerLevel::Medium, Some(31), 20.0, 100.0, Some(8.0)),
        reagent("ethanol", DangerLevel::Medium, Some(31), 20.0, 100.0, Some(8.0)),
        reagent("氯化钠", DangerLevel::Low, None, 80.0, 100.0, Some(2.0)),
        reagent("葡萄糖", DangerLevel::Low, Some(400), 80.0, 100.0, Some(f64::NAN)),
        reagent("蒸馏水", DangerLevel::Unknown, Some(3), 0.0, 0.0, None),
        reagent("琼脂", DangerLevel::Low, Some(400), 1.0, 100.0, Some(2.0)),
    ];
    list[0].category = Some("有机".to_string());
    list[7].purchase_date = NaiveDate::from_ymd_opt(2025, 1, 1);
    list[8].purchase_date = NaiveDate::from_ymd_opt(2025, 6, 1);
    list
}

// ==========================================
// 智能排序
// ==========================================

#[test]
fn test_smart_danger_dominates() {
    // R1 高危/已过期/无库存 vs R2 低危/明天过期/半库存/高频
    let r1 = reagent("Z", DangerLevel::High, Some(-1), 0.0, 100.0, Some(5.0));
    let r2 = reagent("A", DangerLevel::Low, Some(1), 50.0, 100.0, Some(50.0));

    let engine = engine();
    assert_eq!(
        engine.compare_records(&r1, &r2, &SortStrategy::Smart),
        Ordering::Less
    );
    assert_eq!(
        engine.compare_records(&r2, &r1, &SortStrategy::Smart),
        Ordering::Greater
    );
}

#[test]
fn test_smart_high_before_low_regardless_of_other_fields() {
    let engine = engine();
    let high = reagent("高危", DangerLevel::High, Some(900), 100.0, 100.0, None);
    let low = reagent("低危", DangerLevel::Low, Some(-300), 0.0, 100.0, Some(999.0));
    assert_eq!(
        engine.compare_records(&high, &low, &SortStrategy::Smart),
        Ordering::Less
    );
}

#[test]
fn test_smart_unknown_danger_sorts_last() {
    let engine = engine();
    let low = reagent("B", DangerLevel::Low, None, 100.0, 100.0, None);
    let unknown = reagent("A", DangerLevel::Unknown, Some(-5), 0.0, 100.0, None);
    assert_eq!(
        engine.compare_records(&low, &unknown, &SortStrategy::Smart),
        Ordering::Less
    );
}

#[test]
fn test_smart_expired_before_not_expired() {
    let engine = engine();
    let expired = reagent("B", DangerLevel::Medium, Some(-1), 100.0, 100.0, None);
    let fresh = reagent("A", DangerLevel::Medium, Some(1), 0.0, 100.0, Some(10.0));
    assert_eq!(
        engine.compare_records(&expired, &fresh, &SortStrategy::Smart),
        Ordering::Less
    );
}

#[test]
fn test_smart_expiry_today_counts_as_expired() {
    let engine = engine();
    let today_expiry = reagent("B", DangerLevel::Low, Some(0), 100.0, 100.0, None);
    let tomorrow = reagent("A", DangerLevel::Low, Some(1), 100.0, 100.0, None);
    assert_eq!(
        engine.compare_records(&today_expiry, &tomorrow, &SortStrategy::Smart),
        Ordering::Less
    );
}

#[test]
fn test_smart_longest_overdue_first() {
    let engine = engine();
    let sorted = engine.sort_records(
        &[
            reagent("A", DangerLevel::Low, Some(-2), 50.0, 100.0, None),
            reagent("B", DangerLevel::Low, Some(-20), 50.0, 100.0, None),
            reagent("C", DangerLevel::Low, Some(-7), 50.0, 100.0, None),
        ],
        &SortStrategy::Smart,
    );
    assert_eq!(names(&sorted), vec!["B", "C", "A"]);
}

#[test]
fn test_smart_expiring_window_boundary() {
    let engine = engine();
    let sorted = engine.sort_records(
        &[
            reagent("later", DangerLevel::Low, Some(31), 50.0, 100.0, Some(100.0)),
            reagent("edge", DangerLevel::Low, Some(30), 50.0, 100.0, None),
            reagent("soon", DangerLevel::Low, Some(2), 50.0, 100.0, None),
        ],
        &SortStrategy::Smart,
    );
    assert_eq!(names(&sorted), vec!["soon", "edge", "later"]);
}

#[test]
fn test_smart_later_expiry_dates_do_not_order_each_other() {
    // 30 天外的有效期不再比较天数，交给后续排序级
    let engine = engine();
    let far = reagent("far", DangerLevel::Low, Some(500), 50.0, 100.0, Some(9.0));
    let near = reagent("near", DangerLevel::Low, Some(40), 50.0, 100.0, Some(1.0));
    assert_eq!(
        engine.compare_records(&far, &near, &SortStrategy::Smart),
        Ordering::Less
    );
}

#[test]
fn test_smart_missing_expiry_behaves_as_far_future() {
    let engine = engine();
    let missing = reagent("missing", DangerLevel::Low, None, 50.0, 100.0, Some(9.0));
    let far = reagent("far", DangerLevel::Low, Some(500), 50.0, 100.0, Some(1.0));
    let soon = reagent("soon", DangerLevel::Low, Some(3), 50.0, 100.0, None);

    assert_eq!(
        engine.compare_records(&soon, &missing, &SortStrategy::Smart),
        Ordering::Less
    );
    // 与远期有效期同组，由使用频率决定
    assert_eq!(
        engine.compare_records(&missing, &far, &SortStrategy::Smart),
        Ordering::Less
    );
}

#[test]
fn test_smart_stock_tiers() {
    let engine = engine();
    let sorted = engine.sort_records(
        &[
            reagent("adequate", DangerLevel::Low, None, 21.0, 100.0, Some(50.0)),
            reagent("low", DangerLevel::Low, None, 20.0, 100.0, Some(10.0)),
            reagent("empty", DangerLevel::Low, None, 0.0, 100.0, None),
        ],
        &SortStrategy::Smart,
    );
    assert_eq!(names(&sorted), vec!["empty", "low", "adequate"]);
}

#[test]
fn test_smart_zero_initial_amount_is_zero_stock() {
    let engine = engine();
    let zero_initial = reagent("B", DangerLevel::Low, None, 30.0, 0.0, None);
    let low = reagent("A", DangerLevel::Low, None, 1.0, 100.0, None);
    assert_eq!(
        engine.compare_records(&zero_initial, &low, &SortStrategy::Smart),
        Ordering::Less
    );
    let explain = engine.explain(&zero_initial);
    assert_eq!(explain["sort_keys"]["stock_ratio"], 0.0);
    assert_eq!(explain["sort_keys"]["stock_bucket"], "OUT_OF_STOCK");
}

#[test]
fn test_smart_usage_frequency_desc_missing_as_zero() {
    let engine = engine();
    let sorted = engine.sort_records(
        &[
            reagent("none", DangerLevel::Low, None, 50.0, 100.0, None),
            reagent("busy", DangerLevel::Low, None, 50.0, 100.0, Some(12.0)),
            reagent("rare", DangerLevel::Low, None, 50.0, 100.0, Some(1.0)),
            reagent("nan", DangerLevel::Low, None, 50.0, 100.0, Some(f64::NAN)),
        ],
        &SortStrategy::Smart,
    );
    assert_eq!(names(&sorted), vec!["busy", "rare", "nan", "none"]);
}

#[test]
fn test_smart_name_tie_break() {
    let engine = engine();
    let sorted = engine.sort_records(
        &[
            reagent("Zinc", DangerLevel::Medium, Some(10), 5.0, 10.0, Some(2.0)),
            reagent("acetone", DangerLevel::Medium, Some(10), 5.0, 10.0, Some(2.0)),
            reagent("Benzene", DangerLevel::Medium, Some(10), 5.0, 10.0, Some(2.0)),
        ],
        &SortStrategy::Smart,
    );
    assert_eq!(names(&sorted), vec!["acetone", "Benzene", "Zinc"]);
}

#[test]
fn test_smart_full_fixture_order() {
    let sorted = engine().sort_records(&fixture(), &SortStrategy::Smart);
    assert_eq!(
        names(&sorted),
        vec![
            "甲醛",    // 高, 过期10天
            "乙醚",    // 高, 过期1天
            "丙酮",    // 高, 今天过期
            "苯",      // 高, 5天后过期
            "乙醇",    // 中, 30天内
            "ethanol", // 中, 30天外, 同库存同频率 → 名称
            "Ethanol",
            "琼脂",    // 低, 库存不足
            "氯化钠",  // 低, 充足, 频率2
            "葡萄糖",  // 低, 充足, 频率 NaN → 0
            "蒸馏水",  // 未知
        ]
    );
}

// ==========================================
// 单字段排序
// ==========================================

#[test]
fn test_field_danger_level_polarity_is_inverted() {
    let engine = engine();
    let data = vec![
        reagent("中", DangerLevel::Medium, None, 1.0, 1.0, None),
        reagent("高", DangerLevel::High, None, 1.0, 1.0, None),
        reagent("低", DangerLevel::Low, None, 1.0, 1.0, None),
    ];

    let asc = engine.sort_records(&data, &SortStrategy::asc("dangerLevel"));
    assert_eq!(names(&asc), vec!["低", "中", "高"]);

    let desc = engine.sort_records(&data, &SortStrategy::desc("dangerLevel"));
    assert_eq!(names(&desc), vec!["高", "中", "低"]);
}

#[test]
fn test_field_expiry_date_with_missing_last_both_directions() {
    let engine = engine();
    let data = vec![
        reagent("none", DangerLevel::Low, None, 1.0, 1.0, None),
        reagent("late", DangerLevel::Low, Some(100), 1.0, 1.0, None),
        reagent("early", DangerLevel::Low, Some(-5), 1.0, 1.0, None),
    ];

    let asc = engine.sort_records(&data, &SortStrategy::asc("expiryDate"));
    assert_eq!(names(&asc), vec!["early", "late", "none"]);

    let desc = engine.sort_records(&data, &SortStrategy::desc("expiryDate"));
    assert_eq!(names(&desc), vec!["late", "early", "none"]);
}

#[test]
fn test_field_stock_level_and_usage() {
    let engine = engine();
    let data = vec![
        reagent("half", DangerLevel::Low, None, 50.0, 100.0, Some(3.0)),
        reagent("zero-initial", DangerLevel::Low, None, 10.0, 0.0, None),
        reagent("full", DangerLevel::Low, None, 100.0, 100.0, Some(1.0)),
    ];

    let stock = engine.sort_records(&data, &SortStrategy::asc("stockLevel"));
    assert_eq!(names(&stock), vec!["zero-initial", "half", "full"]);

    let usage = engine.sort_records(&data, &SortStrategy::desc("usageFrequency"));
    assert_eq!(names(&usage), vec!["half", "full", "zero-initial"]);
}

#[test]
fn test_field_name_desc() {
    let engine = engine();
    let data = vec![
        reagent("b", DangerLevel::Low, None, 1.0, 1.0, None),
        reagent("C", DangerLevel::Low, None, 1.0, 1.0, None),
        reagent("a", DangerLevel::Low, None, 1.0, 1.0, None),
    ];
    let desc = engine.sort_records(&data, &SortStrategy::desc("name"));
    assert_eq!(names(&desc), vec!["C", "b", "a"]);
}

#[test]
fn test_field_numeric_generic_field() {
    let engine = engine();
    let data = vec![
        reagent("a", DangerLevel::Low, None, 9.0, 10.0, None),
        reagent("b", DangerLevel::Low, None, 100.0, 1000.0, None),
        reagent("c", DangerLevel::Low, None, 0.5, 1.0, None),
    ];
    let asc = engine.sort_records(&data, &SortStrategy::asc("currentAmount"));
    assert_eq!(names(&asc), vec!["c", "a", "b"]);
}

#[test]
fn test_field_ties_fall_back_to_name() {
    let engine = engine();
    let data = vec![
        reagent("b", DangerLevel::High, None, 1.0, 1.0, None),
        reagent("a", DangerLevel::High, None, 1.0, 1.0, None),
    ];
    let sorted = engine.sort_records(&data, &SortStrategy::desc("dangerLevel"));
    assert_eq!(names(&sorted), vec!["a", "b"]);
}

#[test]
fn test_member_join_date_and_smart_fallback() {
    let engine = engine();
    let mut alice = Member::new("M1", "Alice");
    alice.join_date = NaiveDate::from_ymd_opt(2024, 9, 1);
    let mut bob = Member::new("M2", "bob");
    bob.join_date = NaiveDate::from_ymd_opt(2022, 2, 1);
    let carol = Member::new("M3", "Carol");
    let members = vec![carol, bob, alice];

    let by_join = engine.sort_records(&members, &SortStrategy::desc("joinDate"));
    let ids: Vec<&str> = by_join.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["M1", "M2", "M3"]);

    // 成员没有排序级字段，智能排序退化为名称排序
    let smart = engine.sort_records(&members, &SortStrategy::Smart);
    let ids: Vec<&str> = smart.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["M1", "M2", "M3"]);
}

// ==========================================
// 序关系性质
// ==========================================

#[test]
fn test_antisymmetry_for_every_strategy() {
    let engine = engine();
    let data = fixture();
    for strategy in all_strategies() {
        for a in &data {
            for b in &data {
                let ab = engine.compare_records(a, b, &strategy);
                let ba = engine.compare_records(b, a, &strategy);
                assert_eq!(ab, ba.reverse(), "{} / {} / {}", strategy, a.name, b.name);
            }
        }
    }
}

#[test]
fn test_transitivity_for_every_strategy() {
    let engine = engine();
    let data = fixture();
    for strategy in all_strategies() {
        for a in &data {
            for b in &data {
                for c in &data {
                    if engine.compare_records(a, b, &strategy) == Ordering::Less
                        && engine.compare_records(b, c, &strategy) == Ordering::Less
                    {
                        assert_eq!(
                            engine.compare_records(a, c, &strategy),
                            Ordering::Less,
                            "{}: {} < {} < {}",
                            strategy,
                            a.name,
                            b.name,
                            c.name
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_distinct_names_never_compare_equal() {
    let engine = engine();
    let data = fixture();
    for strategy in all_strategies() {
        for a in &data {
            for b in &data {
                if a.name != b.name {
                    assert_ne!(engine.compare_records(a, b, &strategy), Ordering::Equal);
                }
            }
        }
    }
}

#[test]
fn test_sort_is_idempotent_and_does_not_mutate_input() {
    let engine = engine();
    let data = fixture();
    let snapshot: Vec<String> = data.iter().map(|r| r.id.clone()).collect();
    for strategy in all_strategies() {
        let once = engine.sort_records(&data, &strategy);
        let twice = engine.sort_records(&once, &strategy);
        // fixture 含 NaN 使用频率，按名称比较而不是整条记录
        assert_eq!(names(&once), names(&twice), "{}", strategy);
    }
    let after: Vec<String> = data.iter().map(|r| r.id.clone()).collect();
    assert_eq!(after, snapshot);
}

#[test]
fn test_sort_refs_matches_sort_records() {
    let engine = engine();
    let data = fixture();
    let owned = engine.sort_records(&data, &SortStrategy::Smart);
    let refs = engine.sort_refs(&data, &SortStrategy::Smart);
    let owned_names: Vec<&str> = owned.iter().map(|r| r.name.as_str()).collect();
    let ref_names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(owned_names, ref_names);
}

// ==========================================
// 可解释性
// ==========================================

#[test]
fn test_explain_reports_primary_factor() {
    let engine = engine();

    let high = reagent("A", DangerLevel::High, Some(100), 50.0, 100.0, None);
    assert_eq!(engine.explain(&high)["primary_factor"], "DANGER_LEVEL");

    let expired = reagent("B", DangerLevel::Low, Some(-3), 50.0, 100.0, None);
    let explained = engine.explain(&expired);
    assert_eq!(explained["primary_factor"], "EXPIRY");
    assert_eq!(explained["sort_keys"]["days_to_expiry"], -3);
    assert_eq!(explained["sort_keys"]["expiry_bucket"], "EXPIRED");

    let low = reagent("C", DangerLevel::Low, None, 5.0, 100.0, None);
    assert_eq!(engine.explain(&low)["primary_factor"], "STOCK");
    assert_eq!(engine.explain(&low)["sort_keys"]["expiry_bucket"], "NO_EXPIRY");

    let plain = reagent("D", DangerLevel::Low, None, 50.0, 100.0, None);
    assert_eq!(engine.explain(&plain)["primary_factor"], "NAME");
}

// ==========================================
// 名称规则
// ==========================================

#[test]
fn test_chinese_names_sort_by_pinyin() {
    let engine = engine();
    let data = vec![
        reagent("甲醛", DangerLevel::Low, None, 1.0, 1.0, None),
        reagent("乙醇", DangerLevel::Low, None, 1.0, 1.0, None),
        reagent("苯", DangerLevel::Low, None, 1.0, 1.0, None),
        reagent("丙酮", DangerLevel::Low, None, 1.0, 1.0, None),
    ];

    // ben < bing < jia < yi
    let asc = engine.sort_records(&data, &SortStrategy::asc("name"));
    assert_eq!(names(&asc), vec!["苯", "丙酮", "甲醛", "乙醇"]);

    // 其他排序级相同，智能排序的名称级同样按拼音
    let smart = engine.sort_records(&data, &SortStrategy::Smart);
    assert_eq!(names(&smart), vec!["苯", "丙酮", "甲醛", "乙醇"]);
}

#[test]
fn test_collator_follows_configured_locale() {
    let zh = RankingEngine::from_config(&RankingConfig::default(), today());
    assert_eq!(zh.collator(), NameCollator::Pinyin);

    let config = RankingConfig {
        locale: "en".to_string(),
        ..Default::default()
    };
    let en = RankingEngine::from_config(&config, today());
    assert_eq!(en.collator(), NameCollator::CodePoint);

    let a = reagent("苯", DangerLevel::Low, None, 1.0, 1.0, None);
    let b = reagent("甲醛", DangerLevel::Low, None, 1.0, 1.0, None);
    assert_eq!(zh.compare_records(&a, &b, &SortStrategy::Smart), Ordering::Less);
    // 码位: 甲 U+7532 < 苯 U+82EF
    assert_eq!(en.compare_records(&a, &b, &SortStrategy::Smart), Ordering::Greater);
}

// ==========================================
// 负零
// ==========================================

#[test]
fn test_negative_zero_usage_equals_missing_usage() {
    let engine = engine();
    let neg = reagent("b", DangerLevel::Low, None, 1.0, 1.0, Some(-0.0));
    let missing = reagent("a", DangerLevel::Low, None, 1.0, 1.0, None);

    // 使用频率相同，落到名称级
    for strategy in [SortStrategy::Smart, SortStrategy::asc("usageFrequency")] {
        assert_eq!(
            engine.compare_records(&missing, &neg, &strategy),
            Ordering::Less,
            "{}",
            strategy
        );
        assert_eq!(
            engine.compare_records(&neg, &missing, &strategy),
            Ordering::Greater,
            "{}",
            strategy
        );
    }
}

#[test]
fn test_negative_zero_amounts_compare_as_zero() {
    let engine = engine();
    let neg = reagent("b", DangerLevel::Low, None, -0.0, 10.0, None);
    let zero = reagent("a", DangerLevel::Low, None, 0.0, 10.0, None);

    for strategy in [SortStrategy::asc("stockLevel"), SortStrategy::asc("currentAmount")] {
        assert_eq!(
            engine.compare_records(&zero, &neg, &strategy),
            Ordering::Less,
            "{}",
            strategy
        );
        assert_eq!(
            engine.compare_records(&neg, &zero, &strategy),
            Ordering::Greater,
            "{}",
            strategy
        );
    }
}
