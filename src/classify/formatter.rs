//! Article text cleanup before offline classification

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "МОСКВА, 24 апреля. /ТАСС/." or "МОСКВА, 24 апр - РИА Новости." leads, matched lower-cased
    static ref AGENCY_LEAD: Regex = Regex::new(
        r"(.*,\s\d{1,2}\s\w{3,8}\.\s/тасс/\.)|(.*,\s\d{1,2}\s\w{3}\s\W\sриа\sновости\.)"
    )
    .expect("Invalid agency lead pattern");
}

/// Remove the dateline and agency lead, then punctuation and digits
pub fn strip_agency_lead(text: &str) -> String {
    let without_lead = AGENCY_LEAD.replace_all(text, "");
    remove_punctuation_digits(&without_lead)
}

/// Remove ASCII punctuation and ASCII digits
pub fn remove_punctuation_digits(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_ascii_digit())
        .collect()
}
