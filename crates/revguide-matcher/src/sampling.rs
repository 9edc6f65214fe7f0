//! Content sampling strategies.
//!
//! A content pattern is never required to scan a whole file; the rule's
//! effective strategy picks which slice of the bytes gets tested. Line
//! splitting follows the raw bytes (`\n` separators, trailing empty segment
//! included), so the sampled slice re-joins to exactly the original text
//! when every line is selected.

use rand::Rng;
use revguide_config::{ContentDefaults, Rule, Sampling, Strategy};
use std::borrow::Cow;

/// Counts used when the default strategy is `smart` and the rule supplies
/// no override.
const SMART_FALLBACK: Sampling = Sampling::Smart {
    first: 100,
    last: 100,
    random: 100,
};

/// Resolve the strategy a rule's content pattern scans with: the rule's own
/// override when present, otherwise the rule set's defaults.
pub fn effective_sampling(rule: &Rule, defaults: &ContentDefaults) -> Sampling {
    match &rule.sampling {
        Some(sampling) => sampling.clone(),
        None => match defaults.strategy {
            Strategy::FirstLines => Sampling::FirstLines { lines: None },
            Strategy::FullFile => Sampling::FullFile,
            Strategy::Smart => SMART_FALLBACK,
        },
    }
}

/// Return the portion of `content` to test a content pattern against.
pub fn sample<'a>(
    content: &'a [u8],
    sampling: &Sampling,
    defaults: &ContentDefaults,
) -> Cow<'a, [u8]> {
    match sampling {
        Sampling::FullFile => Cow::Borrowed(content),

        Sampling::FirstLines { lines } => {
            let split: Vec<&[u8]> = content.split(|&b| b == b'\n').collect();
            let count = lines.unwrap_or(defaults.lines);
            if count >= split.len() {
                return Cow::Borrowed(content);
            }
            Cow::Owned(split[..count].join(&b'\n'))
        }

        Sampling::Smart {
            first,
            last,
            random,
        } => {
            let split: Vec<&[u8]> = content.split(|&b| b == b'\n').collect();
            let total = split.len();
            let mut selected: Vec<&[u8]> = Vec::new();

            selected.extend(&split[..(*first).min(total)]);

            // The tail never overlaps the first block.
            let tail_start = total.saturating_sub(*last).max(*first);
            if tail_start < total {
                selected.extend(&split[tail_start..]);
            }

            // Random draws only when a middle region exists; draws are with
            // replacement, a known characteristic of this heuristic.
            if total > first + last {
                let (mid_start, mid_end) = (*first, total - last);
                let mut rng = rand::rng();
                for _ in 0..*random {
                    selected.push(split[rng.random_range(mid_start..mid_end)]);
                }
            }

            Cow::Owned(selected.join(&b'\n'))
        }
    }
}
