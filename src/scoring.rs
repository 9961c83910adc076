//! Website scoring rubric.
//!
//! The rubric is an ordered list of independent rules. Each rule looks at a
//! [`PageContext`] and may return an [`Adjustment`]; the adjustments are
//! folded over a starting score of 10 in rubric order.

use crate::parsers::PageSignals;
use crate::results::{Category, MAX_SCORE, MIN_SCORE, ScoreResult};
use std::time::Duration;

/// Default wall-clock budget before a site is flagged as slow
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(3000);

/// Everything a rule may inspect
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Signals extracted from the HTML
    pub signals: PageSignals,
    /// Whether the final URL, after redirects, was served over HTTPS
    pub is_secure: bool,
    /// Time spent fetching the page, fallback attempt included
    pub elapsed: Duration,
    /// Threshold above which `elapsed` is penalized
    pub slow_threshold: Duration,
}

impl PageContext {
    pub fn new(signals: PageSignals, final_url: &str, elapsed: Duration) -> Self {
        Self {
            signals,
            is_secure: is_https(final_url),
            elapsed,
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
        }
    }

    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }
}

/// Signed point change plus the insight explaining it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub delta: i32,
    pub insight: Option<&'static str>,
}

impl Adjustment {
    fn new(delta: i32, insight: &'static str) -> Self {
        Self {
            delta,
            insight: Some(insight),
        }
    }
}

/// A single rubric rule
pub type Rule = fn(&PageContext) -> Option<Adjustment>;

/// The rubric, in evaluation order
pub const RUBRIC: &[Rule] = &[
    https_rule,
    viewport_rule,
    deprecated_markup_rule,
    framework_rule,
    cms_rule,
    slow_response_rule,
];

pub fn https_rule(ctx: &PageContext) -> Option<Adjustment> {
    (!ctx.is_secure).then(|| Adjustment::new(-3, "Not using HTTPS (Security Risk)"))
}

pub fn viewport_rule(ctx: &PageContext) -> Option<Adjustment> {
    (!ctx.signals.has_viewport())
        .then(|| Adjustment::new(-3, "Missing viewport meta tag (Not Mobile Friendly)"))
}

pub fn deprecated_markup_rule(ctx: &PageContext) -> Option<Adjustment> {
    ctx.signals.has_deprecated_tags.then(|| {
        Adjustment::new(
            -4,
            "Uses deprecated HTML tags (e.g. <font>, <center>, <table> for layout)",
        )
    })
}

pub fn framework_rule(ctx: &PageContext) -> Option<Adjustment> {
    if ctx.signals.has_modern_framework {
        Some(Adjustment::new(
            2,
            "Uses modern web frameworks (React, Next, Vue, etc)",
        ))
    } else {
        Some(Adjustment::new(
            -1,
            "No obvious modern Javascript framework detected",
        ))
    }
}

/// WordPress alone is neutral; it only costs a point on an otherwise dated site
pub fn cms_rule(ctx: &PageContext) -> Option<Adjustment> {
    if !ctx.signals.uses_wordpress {
        return None;
    }
    let delta = if !ctx.is_secure || !ctx.signals.has_viewport() {
        -1
    } else {
        0
    };
    Some(Adjustment::new(delta, "Built with WordPress"))
}

pub fn slow_response_rule(ctx: &PageContext) -> Option<Adjustment> {
    (ctx.elapsed > ctx.slow_threshold)
        .then(|| Adjustment::new(-1, "Website load time is unusually slow"))
}

/// Runs every rule of the rubric and classifies the result
pub fn evaluate(ctx: &PageContext) -> ScoreResult {
    evaluate_with(RUBRIC, ctx)
}

/// Folds the given rules over the starting score.
///
/// The running score is capped at [`MAX_SCORE`] after every step, so a bonus
/// cannot bank points that later penalties would eat into. The floor is only
/// applied once at the end.
pub fn evaluate_with(rules: &[Rule], ctx: &PageContext) -> ScoreResult {
    let mut score = MAX_SCORE;
    let mut insights = Vec::new();

    for rule in rules {
        if let Some(adjustment) = rule(ctx) {
            score = (score + adjustment.delta).min(MAX_SCORE);
            if let Some(insight) = adjustment.insight {
                insights.push(insight.to_string());
            }
        }
    }

    let score = score.max(MIN_SCORE);
    ::log::debug!("Rubric produced score {} with {} insights", score, insights.len());

    ScoreResult {
        score,
        category: Category::from_score(score),
        insights,
        is_secure: ctx.is_secure,
    }
}

/// Scores a raw HTML document fetched from `final_url`
pub fn score_document(
    html: &str,
    final_url: &str,
    elapsed: Duration,
    slow_threshold: Duration,
) -> ScoreResult {
    let signals = crate::parsers::html::parse(html);
    let ctx = PageContext::new(signals, final_url, elapsed).with_slow_threshold(slow_threshold);
    evaluate(&ctx)
}

fn is_https(url: &str) -> bool {
    url.get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
}
