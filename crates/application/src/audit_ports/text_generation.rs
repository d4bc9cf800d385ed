use async_trait::async_trait;
use thiserror::Error;
use webaudit_core::{AppError, AppResult};
use webaudit_domain::{Category, Issue};

/// Language of generated and fallback recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationLocale {
    /// French.
    #[default]
    Fr,
    /// English.
    En,
}

impl RecommendationLocale {
    /// Returns stable locale value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }

    /// Parses locale from a configuration value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fr" => Ok(Self::Fr),
            "en" => Ok(Self::En),
            _ => Err(AppError::Validation(format!(
                "unknown recommendation locale '{value}'"
            ))),
        }
    }
}

struct PromptTerms {
    seo: &'static str,
    performance: &'static str,
    ui_ux: &'static str,
    expert: &'static str,
    problem: &'static str,
    specific: &'static str,
    details: &'static str,
    no_details: &'static str,
    severity: &'static str,
    category: &'static str,
    check: &'static str,
    instruction: &'static str,
}

const FRENCH_TERMS: PromptTerms = PromptTerms {
    seo: "SEO",
    performance: "performance web",
    ui_ux: "UI/UX et accessibilité",
    expert: "Tu es un expert en optimisation web spécialisé en",
    problem: "Voici un problème détecté sur un site web",
    specific: "Problème spécifique",
    details: "Détails",
    no_details: "Pas de détails supplémentaires disponibles",
    severity: "Sévérité",
    category: "Type",
    check: "ID audit",
    instruction: "Donne une recommandation spécifique et technique pour résoudre ce problème précis. \
                  Évite les conseils génériques et concentre-toi sur des solutions pratiques que les développeurs peuvent mettre en œuvre. \
                  Limite ta réponse à 2-3 phrases maximum et sois précis. \
                  Ta réponse doit être UNIQUEMENT en français.",
};

const ENGLISH_TERMS: PromptTerms = PromptTerms {
    seo: "SEO",
    performance: "web performance",
    ui_ux: "UI/UX and accessibility",
    expert: "You are a web optimization expert specialized in",
    problem: "Here is an issue detected on a website",
    specific: "Specific issue",
    details: "Details",
    no_details: "No additional details available",
    severity: "Severity",
    category: "Type",
    check: "Audit ID",
    instruction: "Provide a specific and technical recommendation to solve this precise issue. \
                  Avoid generic advice and focus on practical solutions that developers can implement. \
                  Limit your response to 2-3 sentences maximum and be precise. \
                  Your response must be ONLY in English.",
};

/// Structured request for one recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPrompt {
    /// Issue category.
    pub category: Category,
    /// Audited address.
    pub url: String,
    /// Issue description.
    pub description: String,
    /// Optional issue details.
    pub details: Option<String>,
    /// Severity value.
    pub severity: String,
    /// Upstream check identifier.
    pub check_id: String,
    /// Response language.
    pub locale: RecommendationLocale,
}

impl RecommendationPrompt {
    /// Builds the prompt for one issue.
    #[must_use]
    pub fn for_issue(issue: &Issue, locale: RecommendationLocale) -> Self {
        Self {
            category: issue.category(),
            url: issue.source_key().url().to_owned(),
            description: issue.description().to_owned(),
            details: issue.details().map(str::to_owned),
            severity: issue.severity().as_str().to_owned(),
            check_id: issue.source_key().check_id().to_owned(),
            locale,
        }
    }

    /// Renders the single user message sent to the text generator.
    #[must_use]
    pub fn render(&self) -> String {
        let terms = match self.locale {
            RecommendationLocale::Fr => &FRENCH_TERMS,
            RecommendationLocale::En => &ENGLISH_TERMS,
        };
        let category_label = match self.category {
            Category::Seo => terms.seo,
            Category::Performance => terms.performance,
            Category::UiUx => terms.ui_ux,
        };

        format!(
            "{expert} {category_label}.\n{problem} ({url}):\n\n\
             {specific}: {description}\n\
             {details_label}: {details}\n\
             {severity_label}: {severity}\n\
             {category_term}: {category}\n\
             {check_label}: {check_id}\n\n\
             {instruction}",
            expert = terms.expert,
            problem = terms.problem,
            url = self.url,
            specific = terms.specific,
            description = self.description,
            details_label = terms.details,
            details = self.details.as_deref().unwrap_or(terms.no_details),
            severity_label = terms.severity,
            severity = self.severity,
            category_term = terms.category,
            category = self.category,
            check_label = terms.check,
            check_id = self.check_id,
            instruction = terms.instruction,
        )
    }
}

/// Failure of one text-generation call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextGenerationError {
    /// Upstream answered with a rate-limit response; retrying may succeed.
    #[error("text generation rate limited: {0}")]
    RateLimited(String),

    /// Any other failure; retrying is pointless.
    #[error("text generation failed: {0}")]
    Failed(String),
}

/// Port for the remediation text generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates free text for one prompt.
    async fn generate(&self, prompt: &RecommendationPrompt) -> Result<String, TextGenerationError>;
}
