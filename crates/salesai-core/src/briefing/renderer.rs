use crate::types::{Briefing, Insight};

pub trait BriefingRenderer {
    fn render(&self, briefing: &Briefing) -> String;
}

pub struct MarkdownRenderer {
    pub max_chars: usize,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self { max_chars: 8000 }
    }
}

/// Truncate `s` to at most `max_chars` Unicode scalar values.
/// Appends " [truncated]" when there is room; otherwise hard-truncates.
fn truncate(s: &str, max_chars: usize) -> String {
    const SUFFIX: &str = " [truncated]";

    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let suffix_len = SUFFIX.chars().count();
    let (keep, suffix) = if max_chars > suffix_len {
        (max_chars - suffix_len, SUFFIX)
    } else {
        (max_chars, "")
    };
    let byte_end = s
        .char_indices()
        .nth(keep)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    format!("{}{}", &s[..byte_end], suffix)
}

fn render_insight(insight: &Insight) -> String {
    let mut out = format!(
        "### {} ({:.0}% confidence)\n\n{}\n\n",
        insight.text,
        insight.confidence * 100.0,
        insight.reasoning
    );
    out.push_str(&format!("**Next step:** {}\n", insight.action));
    if !insight.citations.is_empty() {
        out.push('\n');
        for c in &insight.citations {
            out.push_str(&format!("- [{}]({})\n", c.title, c.source_url));
        }
    }
    out
}

fn render_list(title: &str, items: impl IntoIterator<Item = String>) -> String {
    let mut out = format!("## {}\n\n", title);
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
    out.push('\n');
    out
}

impl BriefingRenderer for MarkdownRenderer {
    fn render(&self, briefing: &Briefing) -> String {
        let meta = &briefing.metadata;
        let mut out = format!(
            "# Briefing: {} ({})\n_Role: {} | Generated: {}_\n\n",
            meta.account_name,
            meta.account_id,
            meta.role,
            meta.generated_at.format("%Y-%m-%d %H:%M UTC")
        );

        out.push_str("## Insights\n\n");
        for insight in &briefing.insights {
            out.push_str(&render_insight(insight));
            out.push('\n');
        }

        if let Some(ice_breakers) = &briefing.ice_breakers {
            out.push_str(&render_list("Ice Breakers", ice_breakers.iter().cloned()));
        }
        if let Some(metrics) = &briefing.financial_metrics {
            out.push_str(&render_list(
                "Financial Pulse",
                metrics.iter().map(|(k, v)| format!("{}: {}", k, v)),
            ));
        }
        if let Some(value_map) = &briefing.value_map {
            out.push_str(&render_list(
                "Value Map",
                value_map.iter().map(|item| {
                    format!(
                        "{} → {} ({:?})",
                        item.feature, item.pain_point, item.relevance
                    )
                }),
            ));
        }

        truncate(&out, self.max_chars)
    }
}
