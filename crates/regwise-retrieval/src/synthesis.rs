//! AnswerSynthesizer: best match plus context into a cited answer.

use regwise_core::config::RetrievalConfig;
use regwise_core::intent::QueryIntent;
use regwise_core::models::{Alternate, QaResponse, SampleResponse};
use regwise_store::{FrameworkRegistry, SampleResponseBook};

use crate::ranking::{FrameworkMatch, RankedCandidate, Ranking};

/// Per-question inputs to synthesis.
#[derive(Debug, Clone, Copy)]
pub struct AnswerRequest<'a> {
    pub question: &'a str,
    pub role: Option<&'a str>,
    pub frameworks: &'a [String],
    /// Distinct candidates that passed the role filter.
    pub role_matches: usize,
    pub intents: &'a [QueryIntent],
}

pub struct AnswerSynthesizer<'a> {
    config: &'a RetrievalConfig,
    samples: &'a SampleResponseBook,
    registry: &'a FrameworkRegistry,
}

impl<'a> AnswerSynthesizer<'a> {
    pub fn new(
        config: &'a RetrievalConfig,
        samples: &'a SampleResponseBook,
        registry: &'a FrameworkRegistry,
    ) -> Self {
        Self {
            config,
            samples,
            registry,
        }
    }

    pub fn synthesize(&self, request: &AnswerRequest<'_>, ranking: &Ranking) -> QaResponse {
        let Some(best) = ranking.best() else {
            return self.fallback(request);
        };

        let mismatch = !request.frameworks.is_empty() && best.framework_match == FrameworkMatch::None;
        let mut sections = vec![best.chunk.text.trim().to_string()];

        if let Some(role) = request.role {
            if let Some(sample) = self.sample_for(role, request.frameworks, best) {
                sections.push(format!("Sample Implementation: {}", sample.concise));
            }
        }
        if mismatch {
            sections.push(advisory_note(request, best));
        }

        let ambiguous = mismatch || (request.role.is_some() && !best.role_signal);
        let alternates = if ambiguous {
            self.alternates(ranking)
        } else {
            Vec::new()
        };
        if !alternates.is_empty() {
            sections.push(format_alternates(&alternates));
        }

        QaResponse {
            success: true,
            answer: sections.join("\n\n"),
            confidence: self.confidence(request, best),
            citations: ranking.citations.clone(),
            best_match_id: Some(best.chunk.id.clone()),
            best_match_framework: best.chunk.metadata.framework.clone(),
            context_ids: ranking.context.iter().map(|c| c.chunk.id.clone()).collect(),
            alternates,
            intents: request.intents.to_vec(),
        }
    }

    /// Role-path confidence: grows with corroborating role candidates.
    pub fn role_confidence(&self, role_matches: usize) -> f64 {
        if role_matches == 0 {
            return self.config.role_empty_confidence;
        }
        (self.config.role_base_confidence + self.config.role_confidence_step * role_matches as f64)
            .min(self.config.role_confidence_cap)
    }

    fn confidence(&self, request: &AnswerRequest<'_>, best: &RankedCandidate) -> f64 {
        match request.role {
            Some(_) => self.role_confidence(request.role_matches),
            None => best.base_similarity.clamp(0.0, 1.0),
        }
    }

    /// Sample text for the requested framework's family, else the family of
    /// the selected chunk.
    pub fn sample_for(
        &self,
        role: &str,
        frameworks: &[String],
        best: &RankedCandidate,
    ) -> Option<&'a SampleResponse> {
        let (samples, registry) = (self.samples, self.registry);
        frameworks
            .iter()
            .map(String::as_str)
            .chain(best.chunk.metadata.framework.as_deref())
            .find_map(|fw| samples.lookup(role, &registry.family_of(fw)))
    }

    fn alternates(&self, ranking: &Ranking) -> Vec<Alternate> {
        ranking
            .context
            .iter()
            .skip(1)
            .take(self.config.alternates_shown)
            .map(|c| Alternate {
                id: c.chunk.id.clone(),
                framework: c.chunk.framework_label().to_string(),
                preview: preview(&c.chunk.text, self.config.preview_chars),
            })
            .collect()
    }

    fn fallback(&self, request: &AnswerRequest<'_>) -> QaResponse {
        QaResponse {
            success: false,
            answer: format!(
                "I couldn't find specific information about \"{}\" in our knowledge base. \
                 Please try rephrasing your question or specify a different framework.",
                request.question.trim()
            ),
            confidence: self.config.fallback_confidence,
            citations: Vec::new(),
            best_match_id: None,
            best_match_framework: None,
            context_ids: Vec::new(),
            alternates: Vec::new(),
            intents: request.intents.to_vec(),
        }
    }
}

fn advisory_note(request: &AnswerRequest<'_>, best: &RankedCandidate) -> String {
    let wanted = request.frameworks.join(", ");
    let role_part = request
        .role
        .map(|r| format!(" for the {r} role"))
        .unwrap_or_default();
    format!(
        "Note: You requested guidance for {wanted}, but the closest match comes from {selected}. \
         Some content may be more impactful under {wanted}{role_part}. Consider refining your \
         question with specifics (e.g., documentation, logging, risk assessment) to prioritize {wanted}.",
        selected = best.chunk.framework_label(),
    )
}

fn format_alternates(alternates: &[Alternate]) -> String {
    let mut out = String::from("Other candidates:");
    for (i, alt) in alternates.iter().enumerate() {
        out.push_str(&format!("\n{}. [{}] {}: {}", i + 1, alt.framework, alt.id, alt.preview));
    }
    out
}

/// First `max_chars` characters, with an ellipsis when cut.
fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}
