//! Text checks
//!
//! Length is measured in Unicode scalar values (chars), not bytes.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    BuildError, Check, Reconfigure, Rule, RuleHint, RuleSet, SanitizeError, UnitInfo, UnitKind,
    UnitOptions, ValidationResult, rule,
};

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// ============================================================================
// TRANSFORMS
// ============================================================================

transform! {
    /// Removes leading and trailing whitespace.
    pub Trim for String => String;
    type_rule(rule::string());
    kind(String);
    sanitize(input) => input.trim().to_owned();
    fn trim();
}

transform! {
    /// Converts to lowercase.
    pub Lowercase for String => String;
    type_rule(rule::string());
    kind(String);
    sanitize(input) => input.to_lowercase();
    fn lowercase();
}

transform! {
    /// Converts to uppercase.
    pub Uppercase for String => String;
    type_rule(rule::string());
    kind(String);
    sanitize(input) => input.to_uppercase();
    fn uppercase();
}

// ============================================================================
// MIN LENGTH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinLengthOptions {
    #[serde(flatten)]
    pub base: UnitOptions,
    pub min_length: usize,
}

impl Default for MinLengthOptions {
    fn default() -> Self {
        Self {
            base: UnitOptions::default(),
            min_length: 1,
        }
    }
}

/// Requires at least `min_length` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLength {
    options: MinLengthOptions,
}

impl MinLength {
    #[must_use]
    pub fn new(options: MinLengthOptions) -> Self {
        Self { options }
    }

    fn rule(&self) -> Rule {
        let min = self.options.min_length;
        Rule::new(
            "min_length",
            RuleHint::new(
                format!("At least {min} character{}", plural(min)),
                format!("Input must be at least {min} character{}", plural(min)),
            ),
        )
        .with_context("min_length", min)
    }
}

impl UnitInfo for MinLength {
    fn options(&self) -> &UnitOptions {
        &self.options.base
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([
            ("string".to_owned(), rule::string()),
            ("min_length".to_owned(), self.rule()),
        ])
    }

    fn type_rule(&self) -> Rule {
        rule::string()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::String
    }
}

#[async_trait]
impl Check for MinLength {
    type Input = String;
    type Output = String;

    async fn validate(&self, input: &String) -> ValidationResult {
        let length = input.chars().count();
        if length < self.options.min_length {
            self.rule().to_error().with_context("actual_length", length).into()
        } else {
            ValidationResult::pass()
        }
    }

    async fn sanitize(&self, input: String) -> Result<String, SanitizeError> {
        Ok(input)
    }
}

impl Reconfigure for MinLength {
    type Options = MinLengthOptions;

    fn config(&self) -> &MinLengthOptions {
        &self.options
    }

    fn with_config(&self, options: MinLengthOptions) -> Result<Self, BuildError> {
        Ok(Self::new(options))
    }
}

#[must_use]
pub fn min_length(min_length: usize) -> MinLength {
    MinLength::new(MinLengthOptions {
        min_length,
        ..MinLengthOptions::default()
    })
}

// ============================================================================
// MAX LENGTH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxLengthOptions {
    #[serde(flatten)]
    pub base: UnitOptions,
    pub max_length: usize,
}

/// Allows at most `max_length` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLength {
    options: MaxLengthOptions,
}

impl MaxLength {
    #[must_use]
    pub fn new(options: MaxLengthOptions) -> Self {
        Self { options }
    }

    fn rule(&self) -> Rule {
        let max = self.options.max_length;
        Rule::new(
            "max_length",
            RuleHint::new(
                format!("At most {max} character{}", plural(max)),
                format!("Input must be at most {max} character{}", plural(max)),
            ),
        )
        .with_context("max_length", max)
    }
}

impl UnitInfo for MaxLength {
    fn options(&self) -> &UnitOptions {
        &self.options.base
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([
            ("string".to_owned(), rule::string()),
            ("max_length".to_owned(), self.rule()),
        ])
    }

    fn type_rule(&self) -> Rule {
        rule::string()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::String
    }
}

#[async_trait]
impl Check for MaxLength {
    type Input = String;
    type Output = String;

    async fn validate(&self, input: &String) -> ValidationResult {
        let length = input.chars().count();
        if length > self.options.max_length {
            self.rule().to_error().with_context("actual_length", length).into()
        } else {
            ValidationResult::pass()
        }
    }

    async fn sanitize(&self, input: String) -> Result<String, SanitizeError> {
        Ok(input)
    }
}

impl Reconfigure for MaxLength {
    type Options = MaxLengthOptions;

    fn config(&self) -> &MaxLengthOptions {
        &self.options
    }

    fn with_config(&self, options: MaxLengthOptions) -> Result<Self, BuildError> {
        Ok(Self::new(options))
    }
}

#[must_use]
pub fn max_length(max_length: usize) -> MaxLength {
    MaxLength::new(MaxLengthOptions {
        base: UnitOptions::default(),
        max_length,
    })
}

// ============================================================================
// PATTERN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternOptions {
    #[serde(flatten)]
    pub base: UnitOptions,
    pub pattern: String,
    /// Replaces the default failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PatternOptions {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            base: UnitOptions::default(),
            pattern: pattern.into(),
            error_message: None,
        }
    }
}

/// Requires a regular expression match somewhere in the input.
///
/// Anchor the pattern (`^...$`) to match the whole input.
#[derive(Debug, Clone)]
pub struct Pattern {
    options: PatternOptions,
    regex: Regex,
}

impl Pattern {
    /// # Errors
    ///
    /// [`BuildError::InvalidPattern`] when the pattern does not compile.
    pub fn new(options: PatternOptions) -> Result<Self, BuildError> {
        let regex = Regex::new(&options.pattern).map_err(|source| BuildError::InvalidPattern {
            pattern: options.pattern.clone(),
            source,
        })?;
        Ok(Self { options, regex })
    }

    fn rule(&self) -> Rule {
        let message = self
            .options
            .error_message
            .clone()
            .unwrap_or_else(|| "Input does not match required pattern".to_owned());
        Rule::new("pattern", RuleHint::new("Pattern", message))
            .with_context("pattern", self.options.pattern.clone())
    }
}

impl UnitInfo for Pattern {
    fn options(&self) -> &UnitOptions {
        &self.options.base
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([
            ("string".to_owned(), rule::string()),
            ("pattern".to_owned(), self.rule()),
        ])
    }

    fn type_rule(&self) -> Rule {
        rule::string()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::String
    }
}

#[async_trait]
impl Check for Pattern {
    type Input = String;
    type Output = String;

    async fn validate(&self, input: &String) -> ValidationResult {
        if self.regex.is_match(input) {
            ValidationResult::pass()
        } else {
            self.rule().to_error().into()
        }
    }

    async fn sanitize(&self, input: String) -> Result<String, SanitizeError> {
        Ok(input)
    }
}

impl Reconfigure for Pattern {
    type Options = PatternOptions;

    fn config(&self) -> &PatternOptions {
        &self.options
    }

    fn with_config(&self, options: PatternOptions) -> Result<Self, BuildError> {
        Self::new(options)
    }
}

/// Shorthand for [`Pattern::new`] with default options.
pub fn pattern(pattern: &str) -> Result<Pattern, BuildError> {
    Pattern::new(PatternOptions::new(pattern))
}

// ============================================================================
// EMAIL
// ============================================================================

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern is valid")
});

static EMAIL_NO_PLUS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOptions {
    #[serde(flatten)]
    pub base: UnitOptions,
    /// Accept `user+tag@example.com`.
    pub allow_plus_address: bool,
    /// Accept only these domains (case-insensitive, no leading `@`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            base: UnitOptions::default(),
            allow_plus_address: true,
            allowed_domains: None,
        }
    }
}

/// Checks email address format and, optionally, the domain.
///
/// Leaves the input untouched; put [`Trim`] and [`Lowercase`] in front of
/// it to canonicalize addresses.
#[derive(Debug, Clone)]
pub struct Email {
    options: EmailOptions,
    allowed_domains: Option<Vec<String>>,
}

impl Email {
    #[must_use]
    pub fn new(options: EmailOptions) -> Self {
        let allowed_domains = options
            .allowed_domains
            .as_ref()
            .map(|domains| domains.iter().map(|d| d.to_lowercase()).collect());
        Self {
            options,
            allowed_domains,
        }
    }

    fn regex(&self) -> &'static Regex {
        if self.options.allow_plus_address {
            &*EMAIL_REGEX
        } else {
            &*EMAIL_NO_PLUS_REGEX
        }
    }

    fn format_rule(&self) -> Rule {
        Rule::new(
            "email_format",
            RuleHint::new("Email", "Input is not a valid email address"),
        )
        .with_context("allow_plus_address", self.options.allow_plus_address)
    }

    fn domain_rule(&self) -> Rule {
        let domains = self.allowed_domains.clone().unwrap_or_default();
        Rule::new(
            "email_domain",
            RuleHint::new(
                format!("Domain must be: {}", domains.join(", ")),
                "Email domain not allowed",
            ),
        )
        .with_context("allowed_domains", domains)
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new(EmailOptions::default())
    }
}

impl UnitInfo for Email {
    fn options(&self) -> &UnitOptions {
        &self.options.base
    }

    fn rules(&self) -> RuleSet {
        RuleSet::from([
            ("string".to_owned(), rule::string()),
            ("invalid".to_owned(), self.format_rule()),
            ("domain".to_owned(), self.domain_rule()),
        ])
    }

    fn type_rule(&self) -> Rule {
        rule::string()
    }

    fn kind(&self) -> UnitKind {
        UnitKind::String
    }

    fn example(&self) -> Option<&'static str> {
        Some("test@example.com")
    }

    fn format(&self) -> Option<&'static str> {
        Some("email")
    }
}

#[async_trait]
impl Check for Email {
    type Input = String;
    type Output = String;

    async fn validate(&self, input: &String) -> ValidationResult {
        if !self.regex().is_match(input) {
            return self.format_rule().to_error().into();
        }

        if let Some(allowed) = &self.allowed_domains {
            let domain = input
                .rsplit_once('@')
                .map(|(_, domain)| domain.to_lowercase())
                .unwrap_or_default();
            if !allowed.contains(&domain) {
                return self
                    .domain_rule()
                    .to_error()
                    .with_context("domain", domain)
                    .into();
            }
        }

        ValidationResult::pass()
    }

    async fn sanitize(&self, input: String) -> Result<String, SanitizeError> {
        Ok(input)
    }
}

impl Reconfigure for Email {
    type Options = EmailOptions;

    fn config(&self) -> &EmailOptions {
        &self.options
    }

    fn with_config(&self, options: EmailOptions) -> Result<Self, BuildError> {
        Ok(Self::new(options))
    }
}

#[must_use]
pub fn email() -> Email {
    Email::default()
}

// ============================================================================
// TESTS
// ============================================================================
