use webaudit_domain::Category;

use crate::audit_ports::RawDiagnostic;

const DIRECT_CHECKS: [(Category, &[&str]); 3] = [
    (
        Category::Performance,
        &[
            "first-contentful-paint",
            "speed-index",
            "largest-contentful-paint",
            "interactive",
            "total-blocking-time",
            "cumulative-layout-shift",
            "server-response-time",
            "render-blocking-resources",
            "unminified-css",
            "unminified-javascript",
            "unused-css-rules",
            "unused-javascript",
            "efficient-animated-content",
            "duplicated-javascript",
        ],
    ),
    (
        Category::UiUx,
        &[
            "accesskeys",
            "aria-allowed-attr",
            "aria-required-attr",
            "aria-roles",
            "button-name",
            "color-contrast",
            "form-field-multiple-labels",
            "html-has-lang",
            "image-alt",
            "input-image-alt",
            "label",
            "tabindex",
            "td-headers-attr",
            "valid-lang",
        ],
    ),
    (
        Category::Seo,
        &[
            "meta-description",
            "http-status-code",
            "font-size",
            "crawlable-anchors",
            "link-text",
            "is-crawlable",
            "robots-txt",
            "canonical",
            "hreflang",
            "structured-data",
        ],
    ),
];

const KEYWORDS: [(Category, &[&str]); 3] = [
    (
        Category::Performance,
        &[
            "performance",
            "speed",
            "time",
            "load",
            "render",
            "resource",
            "javascript-execution",
            "css",
            "image",
            "cache",
            "server-response",
        ],
    ),
    (
        Category::UiUx,
        &[
            "accessibility",
            "a11y",
            "aria",
            "contrast",
            "label",
            "alt",
            "keyboard",
            "focus",
            "tabindex",
        ],
    ),
    (
        Category::Seo,
        &[
            "seo",
            "crawl",
            "robots",
            "meta",
            "description",
            "canonical",
            "link",
            "anchor",
            "text",
        ],
    ),
];

/// Resolves the category of one diagnostic.
///
/// Direct check ids win over keyword matches. `None` means the diagnostic
/// belongs to no audited category.
pub(super) fn categorize(diagnostic: &RawDiagnostic) -> Option<Category> {
    let check_id = diagnostic.id.as_str();

    let direct = DIRECT_CHECKS.iter().find_map(|(category, checks)| {
        checks
            .iter()
            .any(|check| check_id == *check || check_id.starts_with(check))
            .then_some(*category)
    });
    if direct.is_some() {
        return direct;
    }

    let title = diagnostic
        .title
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let description = diagnostic
        .description
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    KEYWORDS.iter().find_map(|(category, keywords)| {
        keywords
            .iter()
            .any(|keyword| {
                check_id.contains(keyword)
                    || title.contains(keyword)
                    || description.contains(keyword)
            })
            .then_some(*category)
    })
}
