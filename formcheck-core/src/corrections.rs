// File: formcheck-core/src/corrections.rs
//! Email domain typo detection and correction.
//!
//! A static table maps common misspellings of popular mail domains (global
//! providers and the big Polish ones) to the canonical domain. Suggestions are
//! advisory: they never make a form invalid, they only give the caller
//! something to offer the user.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::form::FieldRecord;
use crate::pii::loggable_value;

/// Misspelled domain -> canonical domain. Keys are lowercase.
pub static CORRECTION_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str)] = &[
        // gmail
        ("gmial.com", "gmail.com"),
        ("gmai.com", "gmail.com"),
        ("gmali.com", "gmail.com"),
        ("gmall.com", "gmail.com"),
        ("gmal.com", "gmail.com"),
        ("gamil.com", "gmail.com"),
        ("gnail.com", "gmail.com"),
        ("gmail.co", "gmail.com"),
        ("gmail.om", "gmail.com"),
        ("gmail.cm", "gmail.com"),
        ("gmail.con", "gmail.com"),
        ("gmail.cpm", "gmail.com"),
        ("gmail.ocm", "gmail.com"),
        ("gmaill.com", "gmail.com"),
        ("gmaiil.com", "gmail.com"),
        ("gimail.com", "gmail.com"),
        ("gemail.com", "gmail.com"),
        // hotmail / outlook
        ("hotmal.com", "hotmail.com"),
        ("hotmai.com", "hotmail.com"),
        ("hotmial.com", "hotmail.com"),
        ("hotmali.com", "hotmail.com"),
        ("hotamil.com", "hotmail.com"),
        ("hotmail.co", "hotmail.com"),
        ("hotmail.con", "hotmail.com"),
        ("hotmaill.com", "hotmail.com"),
        ("hitmail.com", "hotmail.com"),
        ("hotnail.com", "hotmail.com"),
        ("outlok.com", "outlook.com"),
        ("outloo.com", "outlook.com"),
        ("outlook.co", "outlook.com"),
        ("outlook.con", "outlook.com"),
        ("outllook.com", "outlook.com"),
        ("outlookk.com", "outlook.com"),
        // yahoo
        ("yaho.com", "yahoo.com"),
        ("yahooo.com", "yahoo.com"),
        ("yhaoo.com", "yahoo.com"),
        ("yhoo.com", "yahoo.com"),
        ("yahoo.co", "yahoo.com"),
        ("yahoo.con", "yahoo.com"),
        ("yaoo.com", "yahoo.com"),
        ("yahou.com", "yahoo.com"),
        ("yaho.pl", "yahoo.pl"),
        // wp.pl
        ("wp.p", "wp.pl"),
        ("wp.l", "wp.pl"),
        ("wpp.pl", "wp.pl"),
        ("w.pl", "wp.pl"),
        ("wp.com", "wp.pl"),
        // onet.pl
        ("onet.p", "onet.pl"),
        ("onet.l", "onet.pl"),
        ("onett.pl", "onet.pl"),
        ("oneet.pl", "onet.pl"),
        ("onet.com", "onet.pl"),
        ("onnet.pl", "onet.pl"),
        ("oner.pl", "onet.pl"),
        // interia.pl
        ("interia.p", "interia.pl"),
        ("interia.l", "interia.pl"),
        ("inteira.pl", "interia.pl"),
        ("interai.pl", "interia.pl"),
        ("intria.pl", "interia.pl"),
        ("interiaa.pl", "interia.pl"),
        ("interia.com", "interia.pl"),
        // o2.pl
        ("o2.p", "o2.pl"),
        ("o2.l", "o2.pl"),
        ("02.pl", "o2.pl"),
        ("o2.com", "o2.pl"),
        // gazeta.pl
        ("gazeta.p", "gazeta.pl"),
        ("gazeta.l", "gazeta.pl"),
        ("gazzeta.pl", "gazeta.pl"),
        ("gazetta.pl", "gazeta.pl"),
        ("gazeta.com", "gazeta.pl"),
        // icloud
        ("icoud.com", "icloud.com"),
        ("iclod.com", "icloud.com"),
        ("icload.com", "icloud.com"),
        ("icloud.co", "icloud.com"),
        ("icloud.con", "icloud.com"),
        // protonmail
        ("protonmal.com", "protonmail.com"),
        ("protonmai.com", "protonmail.com"),
        ("protonmail.co", "protonmail.com"),
        ("protonmail.con", "protonmail.com"),
    ];
    entries.iter().copied().collect()
});

/// A proposed fix for a mistyped email domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCorrection {
    /// The canonical domain, e.g. `gmail.com`.
    pub suggested_domain: String,
    /// The full address rebuilt with the canonical domain.
    pub suggested_email: String,
}

/// A correction attached to the record field it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSuggestion {
    pub field: String,
    pub correction: DomainCorrection,
}

/// Looks up the domain of `email` in [`CORRECTION_TABLE`].
///
/// The domain is everything after the last `@` and is matched
/// case-insensitively. The local part (everything before the last `@`) is
/// copied verbatim into the suggestion, so `a@b@gmial.com` becomes
/// `a@b@gmail.com`.
///
/// # Returns
///
/// `None` if the address has no `@` or its domain is not a known typo.
pub fn suggest_correction(email: &str) -> Option<DomainCorrection> {
    let (local_part, domain) = email.rsplit_once('@')?;
    let corrected = CORRECTION_TABLE.get(domain.to_lowercase().as_str())?;

    debug!(
        "Domain typo detected in '{}': '{}' -> '{}'",
        loggable_value(email),
        domain,
        corrected
    );

    Some(DomainCorrection {
        suggested_domain: (*corrected).to_string(),
        suggested_email: format!("{}@{}", local_part, corrected),
    })
}

/// Returns a copy of `record` with `field` set to the corrected address.
///
/// All other fields are untouched. Applying the same correction twice gives
/// the same record, and the corrected value produces no further suggestion.
pub fn apply_correction(record: &FieldRecord, field: &str, correction: &DomainCorrection) -> FieldRecord {
    let mut updated = record.clone();
    updated.insert(field.to_string(), correction.suggested_email.clone());
    updated
}

/// Collects a suggestion for every listed field whose value has a known domain typo.
///
/// Fields missing from the record are skipped.
pub fn suggest_for_record<S: AsRef<str>>(record: &FieldRecord, fields: &[S]) -> Vec<FieldSuggestion> {
    fields
        .iter()
        .filter_map(|field| {
            let field = field.as_ref();
            let value = record.get(field)?;
            suggest_correction(value).map(|correction| FieldSuggestion {
                field: field.to_string(),
                correction,
            })
        })
        .collect()
}

/// Applies every suggestion in order and returns the corrected record.
pub fn apply_all_suggestions(record: &FieldRecord, suggestions: &[FieldSuggestion]) -> FieldRecord {
    suggestions.iter().fold(record.clone(), |acc, s| {
        apply_correction(&acc, &s.field, &s.correction)
    })
}
