use crate::error::RuleError;
use crate::matching::address::AddressRange;
use crate::matching::query::RuleQuery;
use crate::matching::service::port_matches;
use crate::storage::models::rule::{AddressSpec, Rule, RuleId};
use log::{debug, warn};
use std::collections::BTreeSet;

/// ルールが持つアドレス一覧のいずれかが`target`と重なるか
///
/// 解析できないエントリはそのエントリだけを不一致として扱い、残りの判定は続ける。
fn any_overlaps(rule_id: RuleId, field: &str, specs: &[AddressSpec], target: &AddressRange) -> bool {
    specs.iter().any(|spec| match AddressRange::parse(&spec.ip) {
        Ok(range) => range.overlaps(target),
        Err(e) => {
            warn!("ルール{}の{}をスキップします: {}", rule_id, field, e);
            false
        }
    })
}

fn intersect(a: &BTreeSet<RuleId>, b: &BTreeSet<RuleId>) -> BTreeSet<RuleId> {
    a.intersection(b).copied().collect()
}

/// 検索条件に一致するルールIDの集合を返す
///
/// 送信元・宛先・ポートごとに一致集合を作り、指定された条件が二つ以上なら積集合、
/// 一つだけなら和集合を結果とする。検索条件のアドレスが不正な場合はエラーを返す。
pub fn find_matching_rule_ids(rules: &[Rule], query: &RuleQuery) -> Result<BTreeSet<RuleId>, RuleError> {
    let src = query.src.as_deref().map(AddressRange::parse).transpose()?;
    let dst = query.dst.as_deref().map(AddressRange::parse).transpose()?;
    let port = query.port.as_deref();

    let mut port_result = BTreeSet::new();
    let mut src_result = BTreeSet::new();
    let mut dst_result = BTreeSet::new();

    for rule in rules {
        if let Some(port) = port {
            if port_matches(&rule.data.service, port) {
                port_result.insert(rule.id);
            }
        }
        if let Some(src) = &src {
            if any_overlaps(rule.id, "source", &rule.data.source, src) {
                src_result.insert(rule.id);
            }
        }
        if let Some(dst) = &dst {
            if any_overlaps(rule.id, "destination", &rule.data.destination, dst) {
                dst_result.insert(rule.id);
            }
        }
    }

    debug!(
        "一致件数 - port: {}, src: {}, dst: {}",
        port_result.len(),
        src_result.len(),
        dst_result.len()
    );

    let result = match (src.is_some(), dst.is_some(), port.is_some()) {
        (true, true, true) => intersect(&intersect(&port_result, &dst_result), &src_result),
        (true, true, false) => intersect(&dst_result, &src_result),
        (true, false, true) => intersect(&port_result, &src_result),
        (false, true, true) => intersect(&port_result, &dst_result),
        _ => port_result
            .into_iter()
            .chain(dst_result)
            .chain(src_result)
            .collect(),
    };

    debug!("最終的な一致ルール数: {}", result.len());
    Ok(result)
}
