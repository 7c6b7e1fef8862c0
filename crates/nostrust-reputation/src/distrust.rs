// crates/nostrust-reputation/src/distrust.rs
//
// Distrust passes: mutes, reports from trusted identities, and reports from
// identities outside the scored set.
//
// Every pass runs in two phases. First it reads a snapshot of the ledger and
// stages one adjustment per target in a `SideTable`, where a later source
// overwrites an earlier one for the same target. Then the whole table is
// added into the ledger at once. Sources are visited in ledger order.

use tracing::{debug, info};

use nostrust_core::{EngineConfig, Identity, SocialGraphSource};

use crate::fetch::{fetch_many, Relation};
use crate::ledger::{Ledger, SideTable};

/// Identities scoring strictly above `threshold`, with their scores.
pub(crate) fn sources_above(ledger: &Ledger, threshold: f64) -> (Vec<Identity>, Vec<f64>) {
    ledger.iter().filter(|&(_, score)| score > threshold).unzip()
}

/// Stage mute penalties without touching the ledger.
///
/// Every positively scored identity `p` with `k` mutes gives each muted
/// identity `-score(p) / k`, provided that share reaches the minimum trust
/// score.
pub async fn compute_mute_distrust<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    ledger: &Ledger,
) -> SideTable {
    let mut side = SideTable::new();
    if !config.mute_enable {
        return side;
    }

    let (muters, scores) = sources_above(ledger, 0.0);
    let mute_sets = fetch_many(source, Relation::Mutes, &muters, config.fetch_concurrency).await;

    for (score, mutes) in scores.into_iter().zip(mute_sets) {
        let k = mutes.len() as f64;
        for muted in mutes {
            let share = score / k;
            if share >= config.minimum_trust_score {
                side.set(muted, -share);
            }
        }
    }
    side
}

/// Apply mute penalties to the ledger. No-op when mutes are disabled.
pub async fn apply_mute_distrust<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    ledger: &mut Ledger,
) {
    if !config.mute_enable {
        return;
    }
    info!("Going through mutes. This can take a while.");
    let side = compute_mute_distrust(source, config, ledger).await;
    debug!(ledger = ledger.len(), staged = side.len(), "mute pass staged");
    ledger.merge(side);
}

/// Stage report penalties without touching the ledger.
///
/// Every identity scoring above the report eligibility threshold gives each
/// identity it reported its full score as a penalty. Unlike mutes, the
/// penalty is not divided by how many identities the reporter reported.
pub async fn compute_report_distrust<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    ledger: &Ledger,
) -> SideTable {
    let mut side = SideTable::new();
    if !config.reports_enable {
        return side;
    }

    let (reporters, scores) = sources_above(ledger, config.report_eligibility_threshold);
    let report_sets = fetch_many(source, Relation::Reports, &reporters, config.fetch_concurrency).await;

    for (score, reported) in scores.into_iter().zip(report_sets) {
        for target in reported {
            side.set(target, -score);
        }
    }
    side
}

/// Apply report penalties to the ledger. No-op when reports are disabled.
pub async fn apply_report_distrust<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    ledger: &mut Ledger,
) {
    if !config.reports_enable {
        return;
    }
    info!("Going through reports. This can take a while.");
    let side = compute_report_distrust(source, config, ledger).await;
    debug!(ledger = ledger.len(), staged = side.len(), "report pass staged");
    ledger.merge(side);
}

/// Stage penalties for identities reported by someone outside `subset`.
///
/// Every identity in `subset`, whatever its sign, that has at least one
/// reporter not keyed in `subset` gets a flat `-untrusted_reports_weight`.
/// Several such reporters still yield a single penalty.
pub async fn compute_untrusted_report_distrust<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    subset: &Ledger,
) -> SideTable {
    let mut side = SideTable::new();
    if !config.reports_enable {
        return side;
    }

    let targets: Vec<Identity> = subset.iter().map(|(identity, _)| identity).collect();
    let reporter_sets = fetch_many(source, Relation::ReportedBy, &targets, config.fetch_concurrency).await;

    for (target, reporters) in targets.into_iter().zip(reporter_sets) {
        for reporter in reporters {
            if !subset.contains(&reporter) {
                side.set(target, -config.untrusted_reports_weight);
            }
        }
    }
    side
}

/// Apply untrusted-report penalties to a subset of the ledger.
///
/// Meant for small subsets (a benchmark list, a single lookup), never the
/// full pipeline ledger: it costs one lookup per entry.
pub async fn apply_untrusted_report_distrust<S: SocialGraphSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    subset: &mut Ledger,
) {
    if !config.reports_enable {
        return;
    }
    let side = compute_untrusted_report_distrust(source, config, subset).await;
    debug!(subset = subset.len(), staged = side.len(), "untrusted report pass staged");
    subset.merge(side);
}
