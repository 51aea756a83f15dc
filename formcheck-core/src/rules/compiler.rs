//! compiler.rs - Manages the compilation and caching of form schemas.
//!
//! This module converts a declared `FormSchema` into a `CompiledForm`: every
//! `RuleSpec` becomes a ready-to-run `Rule` with its regex built and its
//! message rendered. Compiled forms are kept in a process-wide cache keyed by
//! a hash of the schema, so repeated validations of the same form share one
//! compilation.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::{debug, warn};
use regex::RegexBuilder;
use lazy_static::lazy_static;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{FieldSpec, FormSchema, RuleSpec, RuleSpecKind, MAX_PATTERN_LENGTH};
use crate::errors::FormcheckError;
use crate::form::{FieldRules, Rule, RuleKind};
use crate::rules::messages::{default_message, render_message};

/// A form schema ready for validation.
#[derive(Debug)]
pub struct CompiledForm {
    /// The schema's name.
    pub name: String,
    /// Executable rules per field.
    pub rules: FieldRules,
    /// Fields eligible for email domain suggestions, in declaration order.
    pub suggestion_fields: Vec<String>,
    /// Human-readable label per field.
    pub labels: BTreeMap<String, String>,
}

impl CompiledForm {
    pub fn label<'a>(&'a self, field: &'a str) -> &'a str {
        self.labels.get(field).map(String::as_str).unwrap_or(field)
    }
}

/// A cache entry keeps the schema it was compiled from, so a hash collision
/// is detected instead of serving another form's rules.
struct CachedForm {
    schema: FormSchema,
    compiled: Arc<CompiledForm>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled forms.
    /// The key is a hash of the `FormSchema`.
    static ref COMPILED_FORMS_CACHE: RwLock<HashMap<u64, CachedForm>> = RwLock::new(HashMap::new());
}

fn hash_schema(schema: &FormSchema) -> u64 {
    let mut hasher = DefaultHasher::new();
    schema.hash(&mut hasher);
    hasher.finish()
}

/// Compiles one field's rule declaration.
fn compile_rule(field: &FieldSpec, spec: &RuleSpec) -> Result<Rule, FormcheckError> {
    let missing = |param: &'static str| {
        FormcheckError::MissingRuleParameter(field.name.clone(), spec.kind.to_string(), param)
    };

    let kind = match spec.kind {
        RuleSpecKind::Required => RuleKind::Required,
        RuleSpecKind::NationalId => RuleKind::NationalId,
        RuleSpecKind::PostalCode => RuleKind::PostalCode,
        RuleSpecKind::Phone => RuleKind::Phone,
        RuleSpecKind::Name => RuleKind::Name,
        RuleSpecKind::Email => RuleKind::Email,
        RuleSpecKind::Isbn => RuleKind::Isbn,
        RuleSpecKind::Positive => RuleKind::Positive,
        RuleSpecKind::MinLength => RuleKind::MinLength(spec.value.ok_or_else(|| missing("value"))?),
        RuleSpecKind::MaxLength => RuleKind::MaxLength(spec.value.ok_or_else(|| missing("value"))?),
        RuleSpecKind::Pattern => {
            let pattern = spec.pattern.as_deref().ok_or_else(|| missing("pattern"))?;
            if pattern.len() > MAX_PATTERN_LENGTH {
                return Err(FormcheckError::PatternLengthExceeded(
                    field.name.clone(),
                    pattern.len(),
                    MAX_PATTERN_LENGTH,
                ));
            }
            let regex = RegexBuilder::new(pattern)
                .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
                .build()
                .map_err(|e| FormcheckError::RuleCompilationError(field.name.clone(), e))?;
            RuleKind::Pattern(regex)
        }
        RuleSpecKind::MatchesField => {
            RuleKind::MatchesField(spec.field.clone().ok_or_else(|| missing("field"))?)
        }
    };

    let template = spec.message.as_deref().unwrap_or_else(|| default_message(spec.kind));
    let message = render_message(template, &field.name, field.label(), spec.value)?;

    Ok(Rule::new(kind, message))
}

/// Compiles a `FormSchema` into a `CompiledForm`.
/// This is the low-level function that performs the actual compilation.
pub fn compile_form(schema: &FormSchema) -> Result<CompiledForm, FormcheckError> {
    debug!("Starting compilation of form '{}' ({} fields).", schema.name, schema.fields.len());

    let mut rules = FieldRules::new();
    let mut labels = BTreeMap::new();
    let mut suggestion_fields = Vec::new();
    let mut compilation_errors = Vec::new();

    for field in &schema.fields {
        let mut field_rules = Vec::with_capacity(field.rules.len());
        for spec in &field.rules {
            match compile_rule(field, spec) {
                Ok(rule) => field_rules.push(rule),
                Err(e) => compilation_errors.push(e),
            }
        }

        log::debug!(
            target: "formcheck_core::compiler",
            "Field '{}' compiled with {} rule(s).",
            &field.name,
            field_rules.len()
        );

        if field.suggest_domain {
            suggestion_fields.push(field.name.clone());
        }
        labels.insert(field.name.clone(), field.label().to_string());
        rules.insert(field.name.clone(), field_rules);
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(FormcheckError::Fatal(format!(
            "Failed to compile {} rule(s) in form '{}':\n{}",
            compilation_errors.len(),
            schema.name,
            error_message
        )));
    }

    debug!("Finished compiling form '{}'.", schema.name);
    Ok(CompiledForm {
        name: schema.name.clone(),
        rules,
        suggestion_fields,
        labels,
    })
}

/// Gets a `CompiledForm` from the cache or compiles it if not found.
///
/// This is the public entry point for retrieving compiled forms. It returns an
/// `Arc`, allowing for cheap sharing between callers.
pub fn get_or_compile_form(schema: &FormSchema) -> Result<Arc<CompiledForm>> {
    let cache_key = hash_schema(schema);

    {
        let cache = COMPILED_FORMS_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        match cache.get(&cache_key) {
            Some(entry) if entry.schema == *schema => {
                debug!("Serving compiled form '{}' from cache for key: {}", schema.name, cache_key);
                return Ok(Arc::clone(&entry.compiled));
            }
            Some(entry) => {
                warn!(
                    "Cache key {} holds form '{}', not '{}'; recompiling.",
                    cache_key, entry.schema.name, schema.name
                );
            }
            None => {}
        }
    }

    debug!("Compiled form '{}' not found in cache. Compiling now.", schema.name);
    let compiled = Arc::new(compile_form(schema)?);

    COMPILED_FORMS_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(cache_key, CachedForm { schema: schema.clone(), compiled: Arc::clone(&compiled) });

    debug!("Successfully compiled and cached form '{}' for key: {}", schema.name, cache_key);
    Ok(compiled)
}
