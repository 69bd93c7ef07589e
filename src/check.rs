//! Consistency between the values tree and its documentation.

use crate::error::{CheckIssue, Error, Result};
use crate::model::Parameter;
use crate::parser::path;
use std::collections::HashSet;

/// Compare computed `values` with declared `metadata`.
///
/// Every real key needs a tag unless a `skip` tag covers it or one of its
/// ancestors. Every tag needs a real key unless it is `extra`, `skip`, or
/// opted out with `validate = false`.
pub fn check_keys(values: &[Parameter], metadata: &[Parameter]) -> Vec<CheckIssue> {
    let documented: HashSet<&str> = metadata.iter().map(|p| p.name.as_str()).collect();
    let skipped: Vec<&str> = metadata
        .iter()
        .filter(|p| p.skip)
        .map(|p| p.name.as_str())
        .collect();
    let real: HashSet<&str> = values.iter().map(|p| p.name.as_str()).collect();

    let undocumented = values
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| !documented.contains(name))
        .filter(|name| !skipped.iter().any(|skip| path::is_within(name, skip)))
        .map(|name| CheckIssue::MissingMetadata(name.to_string()));

    let valueless = metadata
        .iter()
        .filter(|p| p.validate && !p.extra && !p.skip)
        .filter(|p| !real.contains(p.name.as_str()))
        .map(|p| CheckIssue::MissingValue(p.name.clone()));

    undocumented.chain(valueless).collect()
}

/// [`check_keys`], failing when anything is out of sync.
pub fn validate(values: &[Parameter], metadata: &[Parameter]) -> Result<()> {
    let issues = check_keys(values, metadata);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Check(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Parameter {
        Parameter::new(name)
    }

    #[test]
    fn in_sync() {
        let values = vec![named("a"), named("b.c")];
        let metadata = vec![named("a"), named("b.c")];
        assert!(validate(&values, &metadata).is_ok());
    }

    #[test]
    fn reports_both_directions() {
        let values = vec![named("a"), named("undocumented")];
        let metadata = vec![named("a"), named("stale")];
        assert_eq!(
            check_keys(&values, &metadata),
            vec![
                CheckIssue::MissingMetadata("undocumented".to_string()),
                CheckIssue::MissingValue("stale".to_string()),
            ]
        );
    }

    #[test]
    fn skip_covers_descendants_only() {
        let values = vec![
            named("podLabels.app"),
            named("podLabels.tier"),
            named("list[0].x"),
            named("podLabelsExtra"),
        ];
        let mut skip = named("podLabels");
        skip.skip = true;
        let mut list_skip = named("list");
        list_skip.skip = true;
        let issues = check_keys(&values, &[skip, list_skip]);
        assert_eq!(
            issues,
            vec![CheckIssue::MissingMetadata("podLabelsExtra".to_string())]
        );
    }

    #[test]
    fn extra_and_unvalidated_are_exempt() {
        let mut extra = named("ingress.hosts[0].name");
        extra.extra = true;
        let mut dependency = named("redis");
        dependency.validate = false;
        assert!(check_keys(&[], &[extra, dependency]).is_empty());
    }
}
